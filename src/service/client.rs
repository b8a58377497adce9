// src/service/client.rs
use serde::Deserialize;
use serde_json::json;

use crate::model::{DesignInput, StrategyAnalysis};
use crate::service::config::ServiceConfig;
use crate::service::prompt::build_prompt;
use crate::service::schema::response_schema;

/// Failure taxonomy for one analysis request. The application shell collapses
/// all of these into a single user-facing message; the variant detail is only
/// logged.
#[derive(Debug, thiserror::Error)]
pub enum StrategyError {
    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,

    #[error("service returned no analysis text")]
    EmptyResponse,

    #[error("failed to parse analysis JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service error {status}: {body}")]
    Service {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Client for the generateContent endpoint. One outbound call per
/// invocation; no retry, no backoff, no caching of prior results.
pub struct StrategyClient {
    http: reqwest::Client,
    config: ServiceConfig,
}

impl StrategyClient {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn has_credential(&self) -> bool {
        self.config.has_credential()
    }

    /// Produce a `StrategyAnalysis` for the given brief, or fail.
    pub async fn generate(&self, input: &DesignInput) -> Result<StrategyAnalysis, StrategyError> {
        if !self.config.has_credential() {
            return Err(StrategyError::MissingApiKey);
        }

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint, self.config.model
        );
        let request = json!({
            "contents": [{ "parts": [{ "text": build_prompt(input) }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
            }
        });

        log::debug!("requesting strategy from {}", self.config.model);
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StrategyError::Service { status, body });
        }

        let reply: GenerateResponse = response.json().await?;
        let text = reply.candidate_text().ok_or(StrategyError::EmptyResponse)?;
        parse_analysis(&text)
    }
}

/// Parse candidate text into the typed result and sanitize the graph.
pub fn parse_analysis(text: &str) -> Result<StrategyAnalysis, StrategyError> {
    let mut analysis: StrategyAnalysis = serde_json::from_str(text)?;
    let dropped = analysis.spatial_graph_data.sanitize();
    if dropped > 0 {
        log::warn!("dropped {dropped} link(s) referencing unknown node ids");
    }
    Ok(analysis)
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    /// First non-empty text part, if any.
    fn candidate_text(&self) -> Option<String> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|content| content.parts.iter())
            .map(|part| part.text.trim())
            .find(|text| !text.is_empty())
            .map(str::to_string)
    }
}
