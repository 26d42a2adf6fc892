//! Generative model port: Trait for schema-constrained text generation.
//!
//! This trait abstracts the hosted model (Gemini) from the analysis service.

use crate::domain::{AnalysisFailure, FailureKind};

/// User-facing text for configuration failures.
const CONFIGURATION_MESSAGE: &str = "Invalid API Key. Please ensure your Google AI API key is correctly configured in the environment variables.";

/// User-facing text for every other failure.
const REQUEST_MESSAGE: &str = "Failed to get health analysis from the AI. The model may have returned an unexpected response.";

/// A single prompt plus the JSON schema the answer must follow.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub response_schema: serde_json::Value,
}

/// Errors raised while obtaining or decoding an analysis.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Credential missing, empty, or rejected by the service
    #[error("API credential rejected: {0}")]
    Configuration(String),

    /// Connection, TLS, or timeout failure
    #[error("Request to model service failed: {0}")]
    Transport(String),

    /// Non-success HTTP status from the service
    #[error("Model service returned {status}: {message}")]
    Service { status: u16, message: String },

    /// Service answered but produced no text (e.g. blocked prompt)
    #[error("Model returned no content: {0}")]
    EmptyResponse(String),

    /// Text was not JSON, or lacked required fields
    #[error("Malformed model response: {0}")]
    MalformedResponse(String),
}

impl AnalysisError {
    /// Collapse to the two categories the user sees.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Configuration(_) => FailureKind::Configuration,
            _ => FailureKind::Request,
        }
    }

    /// Fixed message shown in the error view. Details stay in the logs.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self.kind() {
            FailureKind::Configuration => CONFIGURATION_MESSAGE,
            FailureKind::Request => REQUEST_MESSAGE,
        }
    }

    #[must_use]
    pub fn to_failure(&self) -> AnalysisFailure {
        AnalysisFailure {
            kind: self.kind(),
            message: self.user_message().to_string(),
        }
    }
}

/// Trait for hosted generative models.
///
/// Implementations must return the raw generated text. Decoding and
/// validation belong to the caller.
pub trait GenerativeModel: Send + Sync {
    /// Generate a JSON answer for `request`.
    ///
    /// # Errors
    /// Returns `AnalysisError::Configuration` when the credential is rejected
    /// and one of the request variants for anything else.
    fn generate(&self, request: &GenerationRequest) -> Result<String, AnalysisError>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert_eq!(
            AnalysisError::Configuration("bad key".into()).kind(),
            FailureKind::Configuration
        );
        for err in [
            AnalysisError::Transport("timeout".into()),
            AnalysisError::Service {
                status: 503,
                message: "overloaded".into(),
            },
            AnalysisError::EmptyResponse("SAFETY".into()),
            AnalysisError::MalformedResponse("not json".into()),
        ] {
            assert_eq!(err.kind(), FailureKind::Request);
            assert_eq!(err.user_message(), REQUEST_MESSAGE);
        }
    }

    #[test]
    fn test_failure_carries_user_message_only() {
        let failure = AnalysisError::Configuration("AIzaSECRET".into()).to_failure();
        assert_eq!(failure.kind, FailureKind::Configuration);
        assert!(failure.message.starts_with("Invalid API Key"));
        assert!(!failure.message.contains("AIzaSECRET"));
    }
}
