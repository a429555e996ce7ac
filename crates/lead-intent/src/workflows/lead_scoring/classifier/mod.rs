mod heuristic;
mod parser;
mod vertex;

pub use heuristic::HeuristicClassifier;
pub use parser::parse_label_and_reasoning;
pub use vertex::{
    build_prompt, PredictInstance, PredictParameters, PredictRequest, PredictionGateway,
    RemoteClassifier, VertexPredictionClient,
};

use serde::Serialize;
use tracing::warn;

use super::domain::{IntentLabel, Lead, Offer};
use crate::config::{ClassifierConfig, ClassifierProvider};

/// Normalized classifier verdict. `points` always follows from `label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    #[serde(rename = "intent")]
    pub label: IntentLabel,
    pub reasoning: String,
    pub points: u8,
}

impl Classification {
    pub fn new(label: IntentLabel, reasoning: impl Into<String>) -> Self {
        Self {
            label,
            reasoning: reasoning.into(),
            points: label.points(),
        }
    }
}

/// Failures raised by the remote strategy before the adapter falls back.
#[derive(Debug, thiserror::Error)]
pub enum ClassificationError {
    #[error("VERTEX_API_KEY and PROJECT_ID must be set for vertex_api_key provider")]
    MissingCredentials,
    #[error("request timed out after {0}s")]
    Timeout(u64),
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("classification endpoint returned HTTP {0}")]
    Status(u16),
    #[error("malformed prediction response: {0}")]
    MalformedResponse(String),
    #[error("failed to encode prompt: {0}")]
    Prompt(#[source] serde_json::Error),
    #[error("classifier unavailable: {0}")]
    Unavailable(String),
}

/// Classification seam used by the scoring orchestrator.
pub trait IntentClassifier: Send + Sync {
    fn classify(&self, lead: &Lead, offer: &Offer) -> Result<Classification, ClassificationError>;
}

/// Strategy chosen once from configuration. Remote failures degrade to the heuristic.
#[derive(Debug)]
pub enum ClassifierAdapter {
    Heuristic(HeuristicClassifier),
    Remote(RemoteClassifier),
}

impl Default for ClassifierAdapter {
    fn default() -> Self {
        Self::Heuristic(HeuristicClassifier)
    }
}

impl ClassifierAdapter {
    pub fn from_config(config: &ClassifierConfig) -> Self {
        match config.provider {
            ClassifierProvider::Mock => Self::Heuristic(HeuristicClassifier),
            ClassifierProvider::VertexApiKey => {
                Self::Remote(RemoteClassifier::vertex(config.clone()))
            }
        }
    }

    pub fn strategy(&self) -> &'static str {
        match self {
            ClassifierAdapter::Heuristic(_) => "mock",
            ClassifierAdapter::Remote(_) => "vertex_api_key",
        }
    }

    /// Never fails: remote errors are reported through the reasoning text instead.
    pub fn classify(&self, lead: &Lead, offer: &Offer) -> Classification {
        match self {
            ClassifierAdapter::Heuristic(heuristic) => heuristic.classify(lead, offer),
            ClassifierAdapter::Remote(remote) => match remote.classify(lead, offer) {
                Ok(classification) => classification,
                Err(err) => {
                    warn!(error = %err, lead = %lead.name, "remote classifier failed; using heuristic");
                    let fallback = HeuristicClassifier.classify(lead, offer);
                    let reasoning = format!(
                        "{} AI provider error: {err}. Fallback to mock.",
                        fallback.reasoning
                    );
                    Classification::new(fallback.label, reasoning)
                }
            },
        }
    }
}

impl IntentClassifier for ClassifierAdapter {
    fn classify(&self, lead: &Lead, offer: &Offer) -> Result<Classification, ClassificationError> {
        Ok(ClassifierAdapter::classify(self, lead, offer))
    }
}
