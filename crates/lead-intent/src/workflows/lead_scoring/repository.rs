use super::domain::{Lead, Offer, ScoredLead};

/// Holds the latest uploaded offer, the latest lead sheet and the latest scoring results.
///
/// Injected into the scoring service so the HTTP layer owns storage lifetime.
pub trait LeadStore: Send + Sync {
    fn save_offer(&self, offer: Offer) -> Result<(), StoreError>;
    fn offer(&self) -> Result<Option<Offer>, StoreError>;
    fn save_leads(&self, leads: Vec<Lead>) -> Result<(), StoreError>;
    fn leads(&self) -> Result<Vec<Lead>, StoreError>;
    /// Replaces, never merges with, the previous run.
    fn replace_results(&self, results: Vec<ScoredLead>) -> Result<(), StoreError>;
    fn results(&self) -> Result<Vec<ScoredLead>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("lead store unavailable: {0}")]
    Unavailable(String),
}
