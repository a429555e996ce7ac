use std::io::Read;
use std::path::Path;

use super::domain::{Lead, LEAD_FIELDS};

#[derive(Debug, thiserror::Error)]
pub enum LeadImportError {
    #[error("failed to read lead file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid file encoding. Please use UTF-8")]
    InvalidEncoding,
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV file is empty")]
    Empty,
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Reads lead sheets with a header row naming the six lead columns.
pub struct LeadCsvImporter;

impl LeadCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Lead>, LeadImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Vec<Lead>, LeadImportError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    /// Data rows are checked before columns, so a header-only sheet reports `Empty`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Vec<Lead>, LeadImportError> {
        let text = std::str::from_utf8(bytes).map_err(|_| LeadImportError::InvalidEncoding)?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = csv_reader.headers()?.clone();
        let mut rows = Vec::new();
        for record in csv_reader.records() {
            rows.push(record?);
        }

        if rows.is_empty() {
            return Err(LeadImportError::Empty);
        }

        let missing: Vec<String> = LEAD_FIELDS
            .iter()
            .filter(|column| !headers.iter().any(|header| header == **column))
            .map(|column| column.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LeadImportError::MissingColumns(missing));
        }

        let column_index = |column: &str| headers.iter().position(|header| header == column);
        let indices: Vec<Option<usize>> = LEAD_FIELDS.iter().map(|c| column_index(c)).collect();

        Ok(rows
            .iter()
            .map(|row| {
                let value = |slot: usize| {
                    indices[slot]
                        .and_then(|index| row.get(index))
                        .unwrap_or_default()
                        .to_string()
                };
                Lead {
                    name: value(0),
                    role: value(1),
                    company: value(2),
                    industry: value(3),
                    location: value(4),
                    linkedin_bio: value(5),
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "name,role,company,industry,location,linkedin_bio";

    #[test]
    fn imports_rows_in_order_and_ignores_extra_columns() {
        let csv = format!(
            "{HEADER},email\n\
Ava Patel,Head of Growth,FlowMetrics,SaaS,\"Bengaluru, India\",Growth leader,ava@example.com\n\
Bob Johnson,Intern,TestCorp,Retail,Chicago,Intern at TestCorp,bob@example.com\n"
        );
        let leads = LeadCsvImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].name, "Ava Patel");
        assert_eq!(leads[0].location, "Bengaluru, India");
        assert_eq!(leads[1].linkedin_bio, "Intern at TestCorp");
    }

    #[test]
    fn column_order_does_not_matter() {
        let csv = "linkedin_bio,location,industry,company,role,name\nbio,Pune,SaaS,Acme,CTO,Ravi\n";
        let leads = LeadCsvImporter::from_bytes(csv.as_bytes()).expect("import succeeds");
        assert_eq!(leads[0].name, "Ravi");
        assert_eq!(leads[0].role, "CTO");
        assert_eq!(leads[0].linkedin_bio, "bio");
    }

    #[test]
    fn short_rows_leave_missing_fields_empty() {
        let csv = format!("{HEADER}\nAva,CEO,FlowMetrics\n");
        let leads = LeadCsvImporter::from_bytes(csv.as_bytes()).expect("flexible rows");
        assert_eq!(leads[0].company, "FlowMetrics");
        assert_eq!(leads[0].industry, "");
        assert!(!leads[0].is_complete());
    }

    #[test]
    fn reports_missing_columns_by_name() {
        let csv = "name,role,company\nAva,CEO,FlowMetrics\n";
        let err = LeadCsvImporter::from_bytes(csv.as_bytes()).expect_err("columns missing");
        assert_eq!(
            err.to_string(),
            "Missing required columns: industry, location, linkedin_bio"
        );
    }

    #[test]
    fn header_only_sheet_is_empty() {
        let err = LeadCsvImporter::from_bytes(HEADER.as_bytes()).expect_err("no rows");
        assert!(matches!(err, LeadImportError::Empty));
        assert!(matches!(
            LeadCsvImporter::from_bytes(b""),
            Err(LeadImportError::Empty)
        ));
    }

    #[test]
    fn rejects_non_utf8_payloads() {
        let err = LeadCsvImporter::from_bytes(&[0xff, 0xfe, 0x00, 0x41]).expect_err("bad encoding");
        assert_eq!(err.to_string(), "Invalid file encoding. Please use UTF-8");
    }

    #[test]
    fn strips_byte_order_mark_from_first_header() {
        let csv = format!("\u{feff}{HEADER}\nAva,CEO,Acme,SaaS,Pune,bio\n");
        let leads = LeadCsvImporter::from_bytes(csv.as_bytes()).expect("bom tolerated");
        assert_eq!(leads[0].name, "Ava");
    }
}
