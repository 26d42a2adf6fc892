//! Analysis service: Turns a frozen form into a validated `HealthAnalysis`.
//!
//! This service coordinates:
//! - Prompt construction
//! - The schema-constrained model call
//! - Decoding and required-field validation of the answer

use std::sync::Arc;

use serde_json::Value;

use super::prompt::build_prompt;
use super::schema::health_analysis_schema;
use crate::domain::{FullFormData, HealthAnalysis, REQUIRED_FIELDS};
use crate::ports::{AnalysisError, GenerationRequest, GenerativeModel};

/// Service for running wellness analyses against a generative model.
pub struct AnalysisService<M>
where
    M: GenerativeModel,
{
    model: Arc<M>,
}

impl<M> AnalysisService<M>
where
    M: GenerativeModel,
{
    pub fn new(model: Arc<M>) -> Self {
        Self { model }
    }

    /// Run one analysis.
    ///
    /// No retries: a failed call is reported once and the user decides
    /// whether to resubmit.
    ///
    /// # Errors
    /// Returns `AnalysisError` for credential, transport, service, or
    /// decoding failures.
    pub fn analyze(&self, data: &FullFormData) -> Result<HealthAnalysis, AnalysisError> {
        tracing::info!(
            model = self.model.model_name(),
            labs_provided = data.lab_results.provided_count(),
            symptoms_len = data.symptoms.len(),
            "Requesting health analysis"
        );

        let request = GenerationRequest {
            prompt: build_prompt(data),
            response_schema: health_analysis_schema(),
        };

        let text = self.model.generate(&request).map_err(|e| {
            tracing::error!("Model call failed: {}", e);
            e
        })?;

        let analysis = parse_analysis(&text).map_err(|e| {
            tracing::error!("Rejecting model response: {}", e);
            e
        })?;

        tracing::info!(
            conditions = analysis.potential_conditions.len(),
            lifestyle = analysis.lifestyle_recommendations.len(),
            "Health analysis complete"
        );

        Ok(analysis)
    }
}

/// Decode model output into a `HealthAnalysis`.
///
/// The text must be a JSON object carrying all four top-level fields; nested
/// objects must carry their required keys too. Field contents (e.g. the
/// confidence label) are accepted as-is.
///
/// # Errors
/// Returns `AnalysisError::MalformedResponse` on any decoding failure.
pub fn parse_analysis(text: &str) -> Result<HealthAnalysis, AnalysisError> {
    let body = strip_code_fence(text.trim());

    let value: Value = serde_json::from_str(body)
        .map_err(|e| AnalysisError::MalformedResponse(format!("not valid JSON: {e}")))?;

    let object = value
        .as_object()
        .ok_or_else(|| AnalysisError::MalformedResponse("top level is not an object".into()))?;

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| object.get(*field).map_or(true, Value::is_null))
        .collect();
    if !missing.is_empty() {
        return Err(AnalysisError::MalformedResponse(format!(
            "missing required fields: {}",
            missing.join(", ")
        )));
    }

    serde_json::from_value(value)
        .map_err(|e| AnalysisError::MalformedResponse(format!("unexpected shape: {e}")))
}

/// Unwrap a ```json fenced block if the model added one.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Confidence, FormData, ProfileData, Sex};
    use crate::testing::VALID_RESPONSE;
    use std::sync::Mutex;

    struct CannedModel {
        reply: Mutex<Option<Result<String, AnalysisError>>>,
        seen_prompt: Mutex<Option<String>>,
    }

    impl CannedModel {
        fn new(reply: Result<String, AnalysisError>) -> Self {
            Self {
                reply: Mutex::new(Some(reply)),
                seen_prompt: Mutex::new(None),
            }
        }
    }

    impl GenerativeModel for CannedModel {
        fn generate(&self, request: &GenerationRequest) -> Result<String, AnalysisError> {
            *self.seen_prompt.lock().expect("lock") = Some(request.prompt.clone());
            self.reply
                .lock()
                .expect("lock")
                .take()
                .expect("single call")
        }

        fn model_name(&self) -> &str {
            "canned"
        }
    }

    fn sample_data() -> FullFormData {
        FullFormData::freeze(&FormData {
            profile: ProfileData {
                age: "35".to_string(),
                height_cm: "175".to_string(),
                weight_kg: "70".to_string(),
                sex: Sex::Female,
            },
            symptoms: "I have been feeling dizzy for days".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_analyze_success() {
        let model = Arc::new(CannedModel::new(Ok(VALID_RESPONSE.to_string())));
        let service = AnalysisService::new(model.clone());

        let analysis = service.analyze(&sample_data()).expect("Should analyze");
        assert_eq!(analysis.potential_conditions.len(), 2);
        assert_eq!(analysis.potential_conditions[0].confidence, Confidence::Medium);
        assert_eq!(analysis.potential_conditions[1].confidence, Confidence::Low);
        assert_eq!(analysis.specialist_recommendation, "Hematologist");

        let prompt = model.seen_prompt.lock().expect("lock").clone().expect("prompt");
        assert!(prompt.contains("BMI: 22.86"));
    }

    #[test]
    fn test_analyze_propagates_model_error() {
        let model = Arc::new(CannedModel::new(Err(AnalysisError::Transport(
            "connection refused".into(),
        ))));
        let service = AnalysisService::new(model);

        let err = service.analyze(&sample_data()).expect_err("Should fail");
        assert!(matches!(err, AnalysisError::Transport(_)));
    }

    #[test]
    fn test_each_missing_top_level_field_is_rejected() {
        let full: Value = serde_json::from_str(VALID_RESPONSE).expect("fixture");
        for field in REQUIRED_FIELDS {
            let mut partial = full.clone();
            partial.as_object_mut().expect("object").remove(field);
            let err = parse_analysis(&partial.to_string()).expect_err("Should reject");
            match err {
                AnalysisError::MalformedResponse(msg) => assert!(msg.contains(field)),
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_null_field_is_missing() {
        let mut value: Value = serde_json::from_str(VALID_RESPONSE).expect("fixture");
        value["specialistRecommendation"] = Value::Null;
        assert!(matches!(
            parse_analysis(&value.to_string()),
            Err(AnalysisError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_missing_meal_slot_is_rejected() {
        let mut value: Value = serde_json::from_str(VALID_RESPONSE).expect("fixture");
        value["dietarySuggestions"]["mealPlan"]
            .as_object_mut()
            .expect("object")
            .remove("snacks");
        assert!(matches!(
            parse_analysis(&value.to_string()),
            Err(AnalysisError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_non_json_is_rejected() {
        assert!(matches!(
            parse_analysis("I'm sorry, I can't help with that."),
            Err(AnalysisError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_analysis("[1, 2, 3]"),
            Err(AnalysisError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_unknown_confidence_is_kept() {
        let text = VALID_RESPONSE.replace("\"Medium\"", "\"Moderate\"");
        let analysis = parse_analysis(&text).expect("Should parse");
        assert_eq!(
            analysis.potential_conditions[0].confidence,
            Confidence::Other("Moderate".to_string())
        );
    }

    #[test]
    fn test_code_fence_is_stripped() {
        let fenced = format!("```json\n{VALID_RESPONSE}\n```");
        assert!(parse_analysis(&fenced).is_ok());
        assert_eq!(strip_code_fence("{}"), "{}");
    }
}
