//! # HealthMate
//!
//! Terminal wellness wizard backed by a hosted generative model.
//!
//! This crate provides:
//! - A four-step input flow (profile, labs, symptoms, results)
//! - Schema-constrained analysis requests with strict response validation
//! - Self-contained HTML report export
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (form data, BMI, analysis, wizard state machine)
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (Gemini HTTP client, log sanitizer)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface
//! - `config`: Startup settings from the environment

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

#[cfg(test)]
mod testing;

pub use domain::{FullFormData, HealthAnalysis, Wizard};

/// Result type for HealthMate operations
pub type Result<T> = std::result::Result<T, HealthmateError>;

/// Main error type for HealthMate
#[derive(Debug, thiserror::Error)]
pub enum HealthmateError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Analysis failed: {0}")]
    Analysis(#[from] ports::AnalysisError),

    #[error("Report export failed: {0}")]
    Report(#[from] application::ReportError),

    #[error("Invalid wizard transition: {0}")]
    Wizard(#[from] domain::WizardError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advance_from_empty_profile() -> Result<domain::Step> {
        let mut wizard = Wizard::new();
        Ok(wizard.next()?)
    }

    #[test]
    fn test_layer_errors_convert() {
        let err = advance_from_empty_profile().expect_err("Should be gated");
        assert!(matches!(
            err,
            HealthmateError::Wizard(domain::WizardError::ProfileIncomplete)
        ));

        let err: HealthmateError = ports::AnalysisError::Transport("timed out".into()).into();
        assert_eq!(
            err.to_string(),
            "Analysis failed: Request to model service failed: timed out"
        );
    }
}
