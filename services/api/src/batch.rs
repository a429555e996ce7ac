use chrono::Utc;
use clap::{Args, ValueEnum};
use lead_intent::config::AppConfig;
use lead_intent::error::AppError;
use lead_intent::telemetry;
use lead_intent::workflows::lead_scoring::{
    export, Classification, ClassifierAdapter, IntentLabel, Lead, LeadCsvImporter, Offer,
    ScoredLead, ScoringOrchestrator,
};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Aligned columns followed by a tier summary
    #[default]
    Table,
    /// Pretty-printed JSON array
    Json,
    /// Same layout as the HTTP export
    Csv,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Offer definition as JSON (name, value_props, ideal_use_cases)
    #[arg(long)]
    pub(crate) offer: PathBuf,
    /// Lead sheet CSV with name, role, company, industry, location, linkedin_bio columns
    #[arg(long)]
    pub(crate) leads: PathBuf,
    /// Output format for the scored leads
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
    /// Write results to this file instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ClassifyArgs {
    /// Offer definition as JSON
    #[arg(long)]
    pub(crate) offer: PathBuf,
    /// Single lead as a JSON object
    #[arg(long)]
    pub(crate) lead: PathBuf,
}

pub(crate) async fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let classifier = Arc::new(ClassifierAdapter::from_config(&config.classifier));
    info!(strategy = classifier.strategy(), "intent classifier selected");

    let results = score_files(&args.offer, &args.leads, classifier).await?;
    let rendered = render(&results, args.format)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            info!(path = %path.display(), scored = results.len(), "results written");
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

pub(crate) async fn run_classify(args: ClassifyArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let offer = load_offer(&args.offer)?;
    let lead: Lead = serde_json::from_str(&std::fs::read_to_string(&args.lead)?)?;
    let classifier = ClassifierAdapter::from_config(&config.classifier);

    let classification: Classification =
        tokio::task::spawn_blocking(move || classifier.classify(&lead, &offer)).await?;
    println!("{}", serde_json::to_string_pretty(&classification)?);
    Ok(())
}

/// Loads both files and scores every lead off the async runtime.
pub(crate) async fn score_files(
    offer_path: &Path,
    leads_path: &Path,
    classifier: Arc<ClassifierAdapter>,
) -> Result<Vec<ScoredLead>, AppError> {
    let offer = load_offer(offer_path)?;
    let leads = LeadCsvImporter::from_path(leads_path)?;
    let orchestrator = ScoringOrchestrator::new(classifier);

    let results = tokio::task::spawn_blocking(move || orchestrator.run(&offer, &leads)).await?;
    Ok(results)
}

pub(crate) fn load_offer(path: &Path) -> Result<Offer, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let payload: Value = serde_json::from_str(&raw)?;
    Ok(Offer::from_json(&payload)?)
}

pub(crate) fn render(results: &[ScoredLead], format: OutputFormat) -> Result<String, AppError> {
    match format {
        OutputFormat::Table => Ok(render_table(results)),
        OutputFormat::Json => Ok(export::to_json_string(results)? + "\n"),
        OutputFormat::Csv => Ok(export::to_csv_string(results)?),
    }
}

fn render_table(results: &[ScoredLead]) -> String {
    let mut lines = vec![format!(
        "{:<22} {:<24} {:<18} {:<6} {:>5}  {}",
        "NAME", "ROLE", "COMPANY", "INTENT", "SCORE", "REASONING"
    )];

    for result in results {
        lines.push(format!(
            "{:<22} {:<24} {:<18} {:<6} {:>5}  {}",
            clip(&result.name, 22),
            clip(&result.role, 24),
            clip(&result.company, 18),
            result.intent.label(),
            result.score,
            result.reasoning
        ));
    }

    let tally = |label: IntentLabel| results.iter().filter(|r| r.intent == label).count();
    lines.push(String::new());
    lines.push(format!(
        "Scored {} leads at {}: {} High | {} Medium | {} Low",
        results.len(),
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        tally(IntentLabel::High),
        tally(IntentLabel::Medium),
        tally(IntentLabel::Low)
    ));

    let mut rendered = lines.join("\n");
    rendered.push('\n');
    rendered
}

fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut clipped: String = value.chars().take(width.saturating_sub(1)).collect();
    clipped.push('~');
    clipped
}
