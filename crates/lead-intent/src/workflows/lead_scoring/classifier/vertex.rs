use std::fmt::Debug;

use serde::Serialize;
use serde_json::Value;

use super::{parser::parse_label_and_reasoning, Classification, ClassificationError};
use crate::config::ClassifierConfig;
use crate::workflows::lead_scoring::domain::{Lead, Offer};

/// Body of a Vertex `:predict` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictRequest {
    pub instances: Vec<PredictInstance>,
    pub parameters: PredictParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictInstance {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictParameters {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl PredictRequest {
    pub fn for_prompt(prompt: String) -> Self {
        Self {
            instances: vec![PredictInstance { content: prompt }],
            parameters: PredictParameters {
                temperature: 0.0,
                max_output_tokens: 256,
            },
        }
    }
}

/// Prompt asking the model for a one-line "label first, then reasoning" verdict.
///
/// Both blocks keep struct field order, so the lead reads `name, role, company, ...`.
pub fn build_prompt(lead: &Lead, offer: &Offer) -> Result<String, ClassificationError> {
    let lead_block = serde_json::to_string(lead).map_err(ClassificationError::Prompt)?;
    let offer_block = serde_json::to_string(offer).map_err(ClassificationError::Prompt)?;

    Ok(format!(
        "Offer:\n{offer_block}\n\nLead:\n{lead_block}\n\n\
         Task: Classify buying intent as High/Medium/Low and provide 1-2 sentence reasoning. \
         Respond in 1 line with the label first followed by reasoning."
    ))
}

/// Transport seam for the remote model so the strategy can run against fakes.
pub trait PredictionGateway: Debug + Send + Sync {
    fn predict(&self, request: &PredictRequest) -> Result<Value, ClassificationError>;
}

/// Blocking Vertex AI client authenticated with an API key.
///
/// A fresh HTTP client is built per call so it is only ever created and dropped on the
/// blocking thread that runs the scoring loop.
#[derive(Debug, Clone)]
pub struct VertexPredictionClient {
    config: ClassifierConfig,
}

impl VertexPredictionClient {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    fn endpoint(&self) -> Result<String, ClassificationError> {
        let (Some(api_key), Some(project)) = (&self.config.api_key, &self.config.project_id) else {
            return Err(ClassificationError::MissingCredentials);
        };
        let location = &self.config.location;

        Ok(format!(
            "https://{location}-aiplatform.googleapis.com/v1/projects/{project}/locations/{location}/{model}:predict?key={api_key}",
            model = self.config.model,
        ))
    }

    fn map_transport(&self, err: reqwest::Error) -> ClassificationError {
        if err.is_timeout() {
            ClassificationError::Timeout(self.config.request_timeout_secs)
        } else {
            ClassificationError::Transport(err.without_url())
        }
    }
}

impl PredictionGateway for VertexPredictionClient {
    fn predict(&self, request: &PredictRequest) -> Result<Value, ClassificationError> {
        let endpoint = self.endpoint()?;
        let client = reqwest::blocking::Client::builder()
            .timeout(self.config.request_timeout())
            .build()
            .map_err(|err| self.map_transport(err))?;

        let response = client
            .post(endpoint)
            .json(request)
            .send()
            .map_err(|err| self.map_transport(err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassificationError::Status(status.as_u16()));
        }

        response.json::<Value>().map_err(|err| {
            if err.is_timeout() {
                ClassificationError::Timeout(self.config.request_timeout_secs)
            } else {
                ClassificationError::MalformedResponse(err.without_url().to_string())
            }
        })
    }
}

/// Remote-model strategy: prompt, predict, then parse the free-form answer.
#[derive(Debug)]
pub struct RemoteClassifier {
    gateway: Box<dyn PredictionGateway>,
}

impl RemoteClassifier {
    pub fn new(gateway: Box<dyn PredictionGateway>) -> Self {
        Self { gateway }
    }

    pub fn vertex(config: ClassifierConfig) -> Self {
        Self::new(Box::new(VertexPredictionClient::new(config)))
    }

    pub fn classify(&self, lead: &Lead, offer: &Offer) -> Result<Classification, ClassificationError> {
        let request = PredictRequest::for_prompt(build_prompt(lead, offer)?);
        let response = self.gateway.predict(&request)?;
        let text = prediction_text(&response)?;
        let (label, reasoning) = parse_label_and_reasoning(&text);
        Ok(Classification::new(label, reasoning))
    }
}

/// First prediction's `content`, the stringified prediction when shaped differently, or the whole
/// response when no usable text came back.
fn prediction_text(response: &Value) -> Result<String, ClassificationError> {
    let object = response.as_object().ok_or_else(|| {
        ClassificationError::MalformedResponse("expected a JSON object".to_string())
    })?;

    let text = match object.get("predictions") {
        Some(Value::Array(predictions)) => match predictions.first() {
            Some(Value::Object(first)) if first.contains_key("content") => {
                match &first["content"] {
                    Value::String(content) => content.clone(),
                    Value::Null => String::new(),
                    other => other.to_string(),
                }
            }
            Some(other) => other.to_string(),
            None => String::new(),
        },
        _ => String::new(),
    };

    if text.is_empty() {
        Ok(response.to_string())
    } else {
        Ok(text)
    }
}
