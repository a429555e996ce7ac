use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use super::classifier::{Classification, ClassificationError, IntentClassifier};
use super::domain::{Lead, Offer, OfferValidationError, ScoredLead};
use super::export::{self, ExportError};
use super::import::{LeadCsvImporter, LeadImportError};
use super::orchestrator::ScoringOrchestrator;
use super::repository::{LeadStore, StoreError};

/// Outcome of a completed scoring run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoringRunSummary {
    pub total_leads: usize,
    pub scored_at: DateTime<Utc>,
}

/// Service composing the lead store with the scoring orchestrator.
pub struct LeadScoringService<S, C> {
    store: Arc<S>,
    orchestrator: ScoringOrchestrator<C>,
}

impl<S, C> LeadScoringService<S, C>
where
    S: LeadStore + 'static,
    C: IntentClassifier + 'static,
{
    pub fn new(store: Arc<S>, classifier: Arc<C>) -> Self {
        Self {
            store,
            orchestrator: ScoringOrchestrator::new(classifier),
        }
    }

    /// Validate and store the offer, replacing any previous one.
    pub fn register_offer(&self, payload: &Value) -> Result<Offer, ScoringServiceError> {
        let offer = Offer::from_json(payload)?;
        self.store.save_offer(offer.clone())?;
        info!(offer = %offer.name, "offer stored");
        Ok(offer)
    }

    /// Parse a lead CSV and replace the stored lead sheet. Returns the lead count.
    pub fn upload_leads(&self, csv: &[u8]) -> Result<usize, ScoringServiceError> {
        let leads = LeadCsvImporter::from_bytes(csv)?;
        self.replace_leads(leads)
    }

    pub fn replace_leads(&self, leads: Vec<Lead>) -> Result<usize, ScoringServiceError> {
        let count = leads.len();
        self.store.save_leads(leads)?;
        info!(leads = count, "lead sheet stored");
        Ok(count)
    }

    /// Score every stored lead against the stored offer. Blocks while remote calls run.
    pub fn score(&self) -> Result<ScoringRunSummary, ScoringServiceError> {
        let offer = self.store.offer()?.ok_or(ScoringServiceError::MissingOffer)?;
        let leads = self.store.leads()?;
        if leads.is_empty() {
            return Err(ScoringServiceError::MissingLeads);
        }

        let results = self.orchestrator.run(&offer, &leads);
        let total_leads = results.len();
        self.store.replace_results(results)?;

        Ok(ScoringRunSummary {
            total_leads,
            scored_at: Utc::now(),
        })
    }

    pub fn results(&self) -> Result<Vec<ScoredLead>, ScoringServiceError> {
        let results = self.store.results()?;
        if results.is_empty() {
            return Err(ScoringServiceError::NoResults);
        }
        Ok(results)
    }

    pub fn export_csv(&self) -> Result<String, ScoringServiceError> {
        let results = self.results()?;
        Ok(export::to_csv_string(&results)?)
    }

    /// Single-lead classification for ad-hoc testing; bypasses the store.
    pub fn classify(&self, lead: &Lead, offer: &Offer) -> Result<Classification, ScoringServiceError> {
        Ok(self.orchestrator.classifier().classify(lead, offer)?)
    }
}

/// Error raised by the lead scoring service.
#[derive(Debug, thiserror::Error)]
pub enum ScoringServiceError {
    #[error(transparent)]
    Offer(#[from] OfferValidationError),
    #[error(transparent)]
    Import(#[from] LeadImportError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Classification(#[from] ClassificationError),
    #[error("No offer data found. Please upload offer first.")]
    MissingOffer,
    #[error("No leads data found. Please upload leads first.")]
    MissingLeads,
    #[error("No results found. Please run scoring first.")]
    NoResults,
}
