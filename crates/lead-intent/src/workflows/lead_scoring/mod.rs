//! Lead intent scoring: rule scoring, intent classification and the combined verdict.
//!
//! Each lead receives up to 50 rule points from its role, industry and profile completeness, plus
//! 10/30/50 points from a Low/Medium/High classifier label. The sum selects the final tier.

pub mod classifier;
pub mod domain;
pub mod export;
pub mod import;
pub mod orchestrator;
pub mod repository;
pub mod router;
pub mod rules;
pub mod service;

#[cfg(test)]
mod tests;

pub use classifier::{
    Classification, ClassificationError, ClassifierAdapter, HeuristicClassifier,
    IntentClassifier, PredictRequest, PredictionGateway, RemoteClassifier,
};
pub use domain::{
    IntentLabel, Lead, Offer, OfferValidationError, ScoreComponents, ScoredLead, LEAD_FIELDS,
};
pub use export::{ExportError, EXPORT_COLUMNS};
pub use import::{LeadCsvImporter, LeadImportError};
pub use orchestrator::{LeadScoringError, ScoringOrchestrator};
pub use repository::{LeadStore, StoreError};
pub use router::scoring_router;
pub use rules::rule_score;
pub use service::{LeadScoringService, ScoringRunSummary, ScoringServiceError};
