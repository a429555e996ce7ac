use super::common::*;
use crate::workflows::lead_scoring::domain::IntentLabel;
use crate::workflows::lead_scoring::repository::LeadStore;
use crate::workflows::lead_scoring::{
    ClassifierAdapter, LeadImportError, LeadScoringService, OfferValidationError,
    ScoringServiceError,
};
use serde_json::json;
use std::sync::Arc;

#[test]
fn score_requires_offer_then_leads() {
    let (service, _) = build_service();

    match service.score() {
        Err(ScoringServiceError::MissingOffer) => {}
        other => panic!("expected missing offer, got {other:?}"),
    }

    service.register_offer(&offer_payload()).expect("offer stored");
    match service.score() {
        Err(err @ ScoringServiceError::MissingLeads) => {
            assert_eq!(err.to_string(), "No leads data found. Please upload leads first.")
        }
        other => panic!("expected missing leads, got {other:?}"),
    }
}

#[test]
fn score_runs_heuristic_pipeline_over_uploaded_sheet() {
    let (service, store) = build_service();
    service.register_offer(&offer_payload()).expect("offer stored");
    assert_eq!(service.upload_leads(LEADS_CSV.as_bytes()).expect("leads stored"), 3);

    let summary = service.score().expect("scoring succeeds");
    assert_eq!(summary.total_leads, 3);

    let results = store.results().expect("results readable");
    let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["John Doe", "Jane Smith", "Bob Johnson"]);

    // CEO / SaaS: rule 50 + heuristic High 50.
    assert_eq!((results[0].score, results[0].intent), (100, IntentLabel::High));
    // Manager / Technology: rule 30 + heuristic Medium 30.
    assert_eq!((results[1].score, results[1].intent), (60, IntentLabel::Medium));
    // Intern / Retail: rule 10 + heuristic Low 10.
    assert_eq!((results[2].score, results[2].intent), (20, IntentLabel::Low));
    assert_eq!(results[2].reasoning, "No strong signals in role, industry or bio.");
}

#[test]
fn rescoring_replaces_previous_results() {
    let (service, store) = build_service();
    service.register_offer(&offer_payload()).expect("offer stored");
    service.upload_leads(LEADS_CSV.as_bytes()).expect("leads stored");
    service.score().expect("first run");

    service
        .replace_leads(vec![lead("Solo", "Founder", "SaaS")])
        .expect("leads replaced");
    service.score().expect("second run");

    let results = store.results().expect("results readable");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Solo");
}

#[test]
fn failing_classification_is_recorded_per_lead() {
    let store = MemoryStore::default();
    let service = LeadScoringService::new(Arc::new(store.clone()), Arc::new(FlakyClassifier));
    service.register_offer(&offer_payload()).expect("offer stored");
    service
        .replace_leads(vec![
            lead("Broken", "CEO", "SaaS"),
            lead("Working", "Intern", "Retail"),
        ])
        .expect("leads stored");

    service.score().expect("run completes despite failure");
    let results = service.results().expect("results present");

    assert_eq!(results[0].intent, IntentLabel::Low);
    assert_eq!(results[0].score, 0);
    assert_eq!(results[0].role, "CEO");
    assert_eq!(
        results[0].reasoning,
        "Error processing lead: classifier unavailable: tokenizer panic"
    );
    assert_eq!((results[1].score, results[1].intent), (40, IntentLabel::Medium));
}

#[test]
fn results_and_export_require_a_completed_run() {
    let (service, _) = build_service();
    assert!(matches!(service.results(), Err(ScoringServiceError::NoResults)));
    assert!(matches!(service.export_csv(), Err(ScoringServiceError::NoResults)));

    service.register_offer(&offer_payload()).expect("offer stored");
    service.upload_leads(LEADS_CSV.as_bytes()).expect("leads stored");
    service.score().expect("scoring succeeds");

    let csv = service.export_csv().expect("export succeeds");
    assert!(csv.starts_with("name,role,company,intent,score,reasoning\n"));
    assert_eq!(csv.lines().count(), 4);
}

#[test]
fn invalid_uploads_do_not_touch_stored_state() {
    let (service, store) = build_service();

    match service.register_offer(&json!({ "name": "X", "value_props": "fast" })) {
        Err(ScoringServiceError::Offer(OfferValidationError::NotAList("value_props"))) => {}
        other => panic!("expected list validation error, got {other:?}"),
    }
    assert!(store.offer().expect("offer readable").is_none());

    match service.upload_leads(b"name,role\nAva,CEO\n") {
        Err(ScoringServiceError::Import(LeadImportError::MissingColumns(columns))) => {
            assert_eq!(columns, ["company", "industry", "location", "linkedin_bio"]);
        }
        other => panic!("expected missing columns, got {other:?}"),
    }
    assert!(store.leads().expect("leads readable").is_empty());
}

#[test]
fn store_failures_surface_as_store_errors() {
    let service = LeadScoringService::new(
        Arc::new(UnavailableStore),
        Arc::new(ClassifierAdapter::default()),
    );
    assert!(matches!(
        service.register_offer(&offer_payload()),
        Err(ScoringServiceError::Store(_))
    ));
    assert!(matches!(service.score(), Err(ScoringServiceError::Store(_))));
}

#[test]
fn classify_exposes_adapter_points() {
    let (service, _) = build_service();
    let classification = service
        .classify(&lead("Ava", "VP Sales", "Software"), &offer())
        .expect("heuristic classification");
    assert_eq!(classification.label, IntentLabel::High);
    assert_eq!(classification.points, 50);
}
