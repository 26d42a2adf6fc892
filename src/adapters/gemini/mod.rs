//! Gemini adapter: Generative Language API client.
//!
//! Implements [`GenerativeModel`] over the `models/{model}:generateContent`
//! endpoint with structured (JSON) output. Uses a blocking client because
//! calls already run on the background worker thread.
//!
//! The credential travels in the `x-goog-api-key` header, never in the URL,
//! so transport errors (which echo the URL) cannot leak it.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::{ApiKey, Settings};
use crate::ports::{AnalysisError, GenerationRequest, GenerativeModel};

/// Cap on service error text carried into logs.
const MAX_ERROR_MESSAGE_CHARS: usize = 512;

/// Blocking client for one model.
pub struct GeminiClient {
    api_key: ApiKey,
    model: String,
    api_base: String,
    client: reqwest::blocking::Client,
}

impl GeminiClient {
    /// Build a client from startup settings.
    ///
    /// # Errors
    /// Returns `AnalysisError::Transport` if the HTTP client cannot be built
    /// (e.g. TLS backend initialisation failure).
    pub fn new(settings: &Settings) -> Result<Self, AnalysisError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        Ok(Self {
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            api_base: settings.api_base.clone(),
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

impl GenerativeModel for GeminiClient {
    fn generate(&self, request: &GenerationRequest) -> Result<String, AnalysisError> {
        tracing::debug!(
            model = %self.model,
            prompt_len = request.prompt.len(),
            "Sending generateContent request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.expose())
            .json(&build_request_body(request))
            .send()
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        tracing::debug!(status = status.as_u16(), body_len = body.len(), "Model responded");

        if !status.is_success() {
            return Err(classify_error(status.as_u16(), &body));
        }

        extract_text(&body)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// JSON body for a structured-output `generateContent` call.
#[must_use]
pub fn build_request_body(request: &GenerationRequest) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": request.prompt }]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": request.response_schema,
        }
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Pull the generated text out of a successful response envelope.
///
/// # Errors
/// `MalformedResponse` if the envelope itself is not JSON, `EmptyResponse`
/// if no candidate produced text.
pub fn extract_text(body: &str) -> Result<String, AnalysisError> {
    let envelope: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| AnalysisError::MalformedResponse(format!("response envelope: {e}")))?;

    let Some(candidate) = envelope.candidates.into_iter().next() else {
        let reason = envelope
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates".to_string());
        return Err(AnalysisError::EmptyResponse(reason));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate
            .finish_reason
            .unwrap_or_else(|| "empty candidate".to_string());
        return Err(AnalysisError::EmptyResponse(reason));
    }

    Ok(text)
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    status: Option<String>,
    #[serde(default)]
    details: Vec<Value>,
}

impl ErrorBody {
    fn mentions_api_key(&self) -> bool {
        let message = self.message.to_ascii_lowercase();
        if message.contains("api key") || message.contains("api_key") {
            return true;
        }
        self.details.iter().any(|d| {
            d.get("reason")
                .and_then(Value::as_str)
                .is_some_and(|r| r.starts_with("API_KEY"))
        })
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}

/// Map a non-success HTTP response to an `AnalysisError`.
///
/// 401/403 and any error that names the API key are credential problems;
/// everything else is a retryable service error.
#[must_use]
pub fn classify_error(status: u16, body: &str) -> AnalysisError {
    let parsed = serde_json::from_str::<ErrorEnvelope>(body).ok().map(|e| e.error);

    let credential = matches!(status, 401 | 403)
        || parsed.as_ref().is_some_and(ErrorBody::mentions_api_key);

    let message = match &parsed {
        Some(err) => match &err.status {
            Some(code) => format!("{code}: {}", err.message),
            None => err.message.clone(),
        },
        None => body.trim().to_string(),
    };
    let message = truncate_chars(&message, MAX_ERROR_MESSAGE_CHARS);

    if credential {
        AnalysisError::Configuration(message)
    } else {
        AnalysisError::Service { status, message }
    }
}
