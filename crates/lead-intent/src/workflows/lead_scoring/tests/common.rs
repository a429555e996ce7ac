use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::{json, Value};

use crate::workflows::lead_scoring::classifier::{
    Classification, ClassificationError, ClassifierAdapter, IntentClassifier,
};
use crate::workflows::lead_scoring::domain::{IntentLabel, Lead, Offer, ScoredLead};
use crate::workflows::lead_scoring::repository::{LeadStore, StoreError};
use crate::workflows::lead_scoring::{scoring_router, LeadScoringService};

pub(super) const LEADS_CSV: &str = "name,role,company,industry,location,linkedin_bio\n\
John Doe,CEO,TestCorp,SaaS,San Francisco,CEO at TestCorp\n\
Jane Smith,Marketing Manager,TestCorp,Technology,New York,Marketing Manager at TestCorp\n\
Bob Johnson,Intern,TestCorp,Retail,Chicago,Intern at TestCorp\n";

pub(super) fn offer_payload() -> Value {
    json!({
        "name": "AI Outreach Automation",
        "value_props": ["24/7 outreach", "6x more meetings"],
        "ideal_use_cases": ["B2B SaaS mid-market"]
    })
}

pub(super) fn offer() -> Offer {
    Offer::from_json(&offer_payload()).expect("fixture offer is valid")
}

pub(super) fn lead(name: &str, role: &str, industry: &str) -> Lead {
    Lead {
        name: name.to_string(),
        role: role.to_string(),
        company: "TestCorp".to_string(),
        industry: industry.to_string(),
        location: "Chicago".to_string(),
        linkedin_bio: format!("{role} at TestCorp"),
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    offer: Arc<Mutex<Option<Offer>>>,
    leads: Arc<Mutex<Vec<Lead>>>,
    results: Arc<Mutex<Vec<ScoredLead>>>,
}

impl LeadStore for MemoryStore {
    fn save_offer(&self, offer: Offer) -> Result<(), StoreError> {
        *self.offer.lock().expect("offer mutex poisoned") = Some(offer);
        Ok(())
    }

    fn offer(&self) -> Result<Option<Offer>, StoreError> {
        Ok(self.offer.lock().expect("offer mutex poisoned").clone())
    }

    fn save_leads(&self, leads: Vec<Lead>) -> Result<(), StoreError> {
        *self.leads.lock().expect("leads mutex poisoned") = leads;
        Ok(())
    }

    fn leads(&self) -> Result<Vec<Lead>, StoreError> {
        Ok(self.leads.lock().expect("leads mutex poisoned").clone())
    }

    fn replace_results(&self, results: Vec<ScoredLead>) -> Result<(), StoreError> {
        *self.results.lock().expect("results mutex poisoned") = results;
        Ok(())
    }

    fn results(&self) -> Result<Vec<ScoredLead>, StoreError> {
        Ok(self.results.lock().expect("results mutex poisoned").clone())
    }
}

pub(super) struct UnavailableStore;

impl LeadStore for UnavailableStore {
    fn save_offer(&self, _offer: Offer) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("cache offline".to_string()))
    }

    fn offer(&self) -> Result<Option<Offer>, StoreError> {
        Err(StoreError::Unavailable("cache offline".to_string()))
    }

    fn save_leads(&self, _leads: Vec<Lead>) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("cache offline".to_string()))
    }

    fn leads(&self) -> Result<Vec<Lead>, StoreError> {
        Err(StoreError::Unavailable("cache offline".to_string()))
    }

    fn replace_results(&self, _results: Vec<ScoredLead>) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("cache offline".to_string()))
    }

    fn results(&self) -> Result<Vec<ScoredLead>, StoreError> {
        Err(StoreError::Unavailable("cache offline".to_string()))
    }
}

/// Errors for any lead named "Broken", labels everyone else Medium.
pub(super) struct FlakyClassifier;

impl IntentClassifier for FlakyClassifier {
    fn classify(&self, lead: &Lead, _offer: &Offer) -> Result<Classification, ClassificationError> {
        if lead.name == "Broken" {
            return Err(ClassificationError::Unavailable("tokenizer panic".to_string()));
        }
        Ok(Classification::new(IntentLabel::Medium, "steady interest"))
    }
}

pub(super) fn build_service() -> (LeadScoringService<MemoryStore, ClassifierAdapter>, MemoryStore) {
    let store = MemoryStore::default();
    let service =
        LeadScoringService::new(Arc::new(store.clone()), Arc::new(ClassifierAdapter::default()));
    (service, store)
}

pub(super) fn router_with_service(
    service: LeadScoringService<MemoryStore, ClassifierAdapter>,
) -> axum::Router {
    scoring_router(Arc::new(service))
}

pub(super) const MULTIPART_BOUNDARY: &str = "lead-intent-test-boundary";

pub(super) fn multipart_body(field: &str, file_name: &str, contents: &str) -> String {
    format!(
        "--{MULTIPART_BOUNDARY}\r\n\
Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
Content-Type: text/csv\r\n\r\n\
{contents}\r\n\
--{MULTIPART_BOUNDARY}--\r\n"
    )
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = read_body(response).await;
    serde_json::from_slice(&body).expect("json payload")
}
