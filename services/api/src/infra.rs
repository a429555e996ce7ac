use lead_intent::workflows::lead_scoring::{Lead, LeadStore, Offer, ScoredLead, StoreError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local store holding the latest offer, lead sheet and scoring results.
#[derive(Default, Clone)]
pub(crate) struct InMemoryLeadStore {
    offer: Arc<Mutex<Option<Offer>>>,
    leads: Arc<Mutex<Vec<Lead>>>,
    results: Arc<Mutex<Vec<ScoredLead>>>,
}

impl LeadStore for InMemoryLeadStore {
    fn save_offer(&self, offer: Offer) -> Result<(), StoreError> {
        let mut guard = self.offer.lock().expect("offer mutex poisoned");
        *guard = Some(offer);
        Ok(())
    }

    fn offer(&self) -> Result<Option<Offer>, StoreError> {
        let guard = self.offer.lock().expect("offer mutex poisoned");
        Ok(guard.clone())
    }

    fn save_leads(&self, leads: Vec<Lead>) -> Result<(), StoreError> {
        let mut guard = self.leads.lock().expect("lead mutex poisoned");
        *guard = leads;
        Ok(())
    }

    fn leads(&self) -> Result<Vec<Lead>, StoreError> {
        let guard = self.leads.lock().expect("lead mutex poisoned");
        Ok(guard.clone())
    }

    fn replace_results(&self, results: Vec<ScoredLead>) -> Result<(), StoreError> {
        let mut guard = self.results.lock().expect("results mutex poisoned");
        *guard = results;
        Ok(())
    }

    fn results(&self) -> Result<Vec<ScoredLead>, StoreError> {
        let guard = self.results.lock().expect("results mutex poisoned");
        Ok(guard.clone())
    }
}
