use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Columns every uploaded lead sheet must carry, in export order.
pub const LEAD_FIELDS: [&str; 6] = [
    "name",
    "role",
    "company",
    "industry",
    "location",
    "linkedin_bio",
];

/// Prospective customer record. Missing or non-string fields deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub role: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub company: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub industry: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub linkedin_bio: String,
}

impl Lead {
    pub fn field(&self, column: &str) -> Option<&str> {
        match column {
            "name" => Some(&self.name),
            "role" => Some(&self.role),
            "company" => Some(&self.company),
            "industry" => Some(&self.industry),
            "location" => Some(&self.location),
            "linkedin_bio" => Some(&self.linkedin_bio),
            _ => None,
        }
    }

    /// True when every required field carries non-whitespace text.
    pub fn is_complete(&self) -> bool {
        LEAD_FIELDS
            .iter()
            .filter_map(|column| self.field(column))
            .all(|value| !value.trim().is_empty())
    }
}

/// Product or service being pitched, with its ideal customer profile descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Offer {
    pub name: String,
    pub value_props: Vec<String>,
    pub ideal_use_cases: Vec<String>,
}

/// Rejections raised while validating an uploaded offer payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OfferValidationError {
    #[error("JSON data required")]
    NotAnObject,
    #[error("Missing required fields: name")]
    MissingName,
    #[error("{0} must be a list")]
    NotAList(&'static str),
}

impl Offer {
    /// Validates a loosely-typed JSON offer the way the upload endpoint expects.
    pub fn from_json(value: &Value) -> Result<Self, OfferValidationError> {
        let object = value.as_object().ok_or(OfferValidationError::NotAnObject)?;

        let name = match object.get("name") {
            Some(Value::String(name)) if !name.is_empty() => name.clone(),
            _ => return Err(OfferValidationError::MissingName),
        };

        Ok(Self {
            name,
            value_props: string_list(object.get("value_props"), "value_props")?,
            ideal_use_cases: string_list(object.get("ideal_use_cases"), "ideal_use_cases")?,
        })
    }

    /// Best-effort conversion for ad-hoc classification requests; never rejects the payload.
    pub fn from_json_lossy(value: &Value) -> Self {
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Self {
            name,
            value_props: string_list(value.get("value_props"), "value_props").unwrap_or_default(),
            ideal_use_cases: string_list(value.get("ideal_use_cases"), "ideal_use_cases")
                .unwrap_or_default(),
        }
    }
}

fn string_list(
    value: Option<&Value>,
    field: &'static str,
) -> Result<Vec<String>, OfferValidationError> {
    match value {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect()),
        Some(_) => Err(OfferValidationError::NotAList(field)),
    }
}

/// Three-tier buying-intent label shared by the classifier and the final verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentLabel {
    High,
    Medium,
    Low,
}

impl IntentLabel {
    /// Points contributed by a classifier label toward the final score.
    pub fn points(self) -> u8 {
        match self {
            IntentLabel::High => 50,
            IntentLabel::Medium => 30,
            IntentLabel::Low => 10,
        }
    }

    /// Tier for a combined score; lower bounds are inclusive.
    pub fn from_score(score: u8) -> Self {
        if score >= 70 {
            IntentLabel::High
        } else if score >= 40 {
            IntentLabel::Medium
        } else {
            IntentLabel::Low
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Some(IntentLabel::High),
            "medium" => Some(IntentLabel::Medium),
            "low" => Some(IntentLabel::Low),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IntentLabel::High => "High",
            IntentLabel::Medium => "Medium",
            IntentLabel::Low => "Low",
        }
    }
}

impl fmt::Display for IntentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-lead working values; never stored on their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreComponents {
    pub rule_score: u8,
    pub ai_label: IntentLabel,
    pub ai_reasoning: String,
    pub ai_points: u8,
}

impl ScoreComponents {
    pub fn final_score(&self) -> u8 {
        self.rule_score + self.ai_points
    }
}

/// Result row handed back to the API and CSV export. Field order is the export column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredLead {
    pub name: String,
    pub role: String,
    pub company: String,
    pub intent: IntentLabel,
    pub score: u8,
    pub reasoning: String,
}

impl ScoredLead {
    pub fn from_components(lead: &Lead, components: ScoreComponents) -> Self {
        let score = components.final_score();
        Self {
            name: lead.name.clone(),
            role: lead.role.clone(),
            company: lead.company.clone(),
            intent: IntentLabel::from_score(score),
            score,
            reasoning: components.ai_reasoning,
        }
    }

    /// Placeholder recorded when a lead could not be scored.
    pub fn failed(lead: &Lead, cause: impl fmt::Display) -> Self {
        Self {
            name: lead.name.clone(),
            role: lead.role.clone(),
            company: lead.company.clone(),
            intent: IntentLabel::Low,
            score: 0,
            reasoning: format!("Error processing lead: {cause}"),
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientStringVisitor)
}

struct LenientStringVisitor;

impl<'de> Visitor<'de> for LenientStringVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or any value treated as empty text")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<String, E> {
        Ok(value.to_string())
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<String, E> {
        Ok(value)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_unit<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<String, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<String, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(String::new())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<String, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(String::new())
    }
}
