use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::error;

use super::classifier::IntentClassifier;
use super::domain::{Lead, Offer, LEAD_FIELDS};
use super::repository::LeadStore;
use super::service::{LeadScoringService, ScoringServiceError};

type SharedService<S, C> = Arc<LeadScoringService<S, C>>;

/// Router builder exposing offer upload, lead upload, scoring, results and classification.
pub fn scoring_router<S, C>(service: SharedService<S, C>) -> Router
where
    S: LeadStore + 'static,
    C: IntentClassifier + 'static,
{
    Router::new()
        .route("/", get(root_handler))
        .route("/offer", post(offer_handler::<S, C>))
        .route("/leads/upload", post(upload_leads_handler::<S, C>))
        .route("/score", post(score_handler::<S, C>))
        .route("/results", get(results_handler::<S, C>))
        .route("/results/export", get(export_handler::<S, C>))
        .route("/classify", post(classify_handler::<S, C>))
        .with_state(service)
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

impl ScoringServiceError {
    /// HTTP status for this error; shared by the scoring routes and `AppError`.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ScoringServiceError::Offer(_)
            | ScoringServiceError::Import(_)
            | ScoringServiceError::MissingOffer
            | ScoringServiceError::MissingLeads => StatusCode::BAD_REQUEST,
            ScoringServiceError::NoResults => StatusCode::NOT_FOUND,
            ScoringServiceError::Store(_)
            | ScoringServiceError::Export(_)
            | ScoringServiceError::Classification(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn service_error_response(err: ScoringServiceError) -> Response {
    let status = err.status_code();
    if status.is_server_error() {
        error!(error = %err, "lead scoring request failed");
    }
    error_response(status, err.to_string())
}

pub(crate) async fn root_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "message": "Lead Scoring API is running",
    }))
}

pub(crate) async fn offer_handler<S, C>(
    State(service): State<SharedService<S, C>>,
    body: Bytes,
) -> Response
where
    S: LeadStore + 'static,
    C: IntentClassifier + 'static,
{
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(Value::Null) | Err(_) => return error_response(StatusCode::BAD_REQUEST, "JSON data required"),
        Ok(payload) => payload,
    };

    match service.register_offer(&payload) {
        Ok(offer) => (
            StatusCode::OK,
            Json(json!({
                "message": "Offer stored successfully",
                "offer": offer,
            })),
        )
            .into_response(),
        Err(ScoringServiceError::Offer(err)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": err.to_string(),
                "required_fields": ["name"],
            })),
        )
            .into_response(),
        Err(other) => service_error_response(other),
    }
}

pub(crate) async fn upload_leads_handler<S, C>(
    State(service): State<SharedService<S, C>>,
    mut multipart: Multipart,
) -> Response
where
    S: LeadStore + 'static,
    C: IntentClassifier + 'static,
{
    let mut upload = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                match field.bytes().await {
                    Ok(bytes) => {
                        upload = Some((file_name, bytes));
                        break;
                    }
                    Err(err) => {
                        return error_response(
                            StatusCode::BAD_REQUEST,
                            format!("File processing error: {err}"),
                        )
                    }
                }
            }
            Ok(Some(_)) => continue,
            Ok(None) => break,
            Err(err) => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("File processing error: {err}"),
                )
            }
        }
    }

    let Some((file_name, bytes)) = upload else {
        return error_response(StatusCode::BAD_REQUEST, "CSV file required");
    };
    if file_name.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "No file selected");
    }
    if !file_name.to_lowercase().ends_with(".csv") {
        return error_response(StatusCode::BAD_REQUEST, "File must be a CSV");
    }

    match service.upload_leads(&bytes) {
        Ok(total) => (
            StatusCode::OK,
            Json(json!({
                "message": format!("{total} leads uploaded successfully"),
                "total_leads": total,
            })),
        )
            .into_response(),
        Err(err @ ScoringServiceError::Import(super::import::LeadImportError::MissingColumns(_))) => {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": err.to_string(),
                    "required_columns": LEAD_FIELDS,
                })),
            )
                .into_response()
        }
        Err(err) => service_error_response(err),
    }
}

pub(crate) async fn score_handler<S, C>(State(service): State<SharedService<S, C>>) -> Response
where
    S: LeadStore + 'static,
    C: IntentClassifier + 'static,
{
    let outcome = tokio::task::spawn_blocking(move || service.score()).await;

    match outcome {
        Ok(Ok(summary)) => (
            StatusCode::OK,
            Json(json!({
                "message": format!("Scored {} leads successfully", summary.total_leads),
                "total_leads": summary.total_leads,
                "scored_at": summary.scored_at,
            })),
        )
            .into_response(),
        Ok(Err(err)) => service_error_response(err),
        Err(join_err) => {
            error!(error = %join_err, "scoring task aborted");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "scoring task aborted")
        }
    }
}

pub(crate) async fn results_handler<S, C>(State(service): State<SharedService<S, C>>) -> Response
where
    S: LeadStore + 'static,
    C: IntentClassifier + 'static,
{
    match service.results() {
        Ok(results) => (StatusCode::OK, Json(results)).into_response(),
        Err(err) => service_error_response(err),
    }
}

pub(crate) async fn export_handler<S, C>(State(service): State<SharedService<S, C>>) -> Response
where
    S: LeadStore + 'static,
    C: IntentClassifier + 'static,
{
    match service.export_csv() {
        Ok(csv) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, mime::TEXT_CSV.as_ref()),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=lead_scores.csv",
                ),
            ],
            csv,
        )
            .into_response(),
        Err(err) => service_error_response(err),
    }
}

pub(crate) async fn classify_handler<S, C>(
    State(service): State<SharedService<S, C>>,
    body: Bytes,
) -> Response
where
    S: LeadStore + 'static,
    C: IntentClassifier + 'static,
{
    const INVALID_INPUT: &str = "Invalid input. 'lead' and 'offer' are required.";

    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(_) => return error_response(StatusCode::BAD_REQUEST, INVALID_INPUT),
    };
    let (Some(lead), Some(offer)) = (payload.get("lead"), payload.get("offer")) else {
        return error_response(StatusCode::BAD_REQUEST, INVALID_INPUT);
    };
    let Ok(lead) = serde_json::from_value::<Lead>(lead.clone()) else {
        return error_response(StatusCode::BAD_REQUEST, INVALID_INPUT);
    };
    let offer = Offer::from_json_lossy(offer);

    let outcome = tokio::task::spawn_blocking(move || service.classify(&lead, &offer)).await;
    match outcome {
        Ok(Ok(classification)) => (StatusCode::OK, Json(classification)).into_response(),
        Ok(Err(err)) => service_error_response(err),
        Err(join_err) => {
            error!(error = %join_err, "classification task aborted");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "classification task aborted")
        }
    }
}
