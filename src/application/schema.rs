//! Response schema declared to the model.
//!
//! Uses the OpenAPI subset accepted by structured-output endpoints
//! (upper-case type names). Must stay in sync with `domain::HealthAnalysis`.

use serde_json::{json, Value};

fn string_list(description: &str) -> Value {
    json!({
        "type": "ARRAY",
        "items": { "type": "STRING" },
        "description": description,
    })
}

/// JSON schema for a `HealthAnalysis`.
#[must_use]
pub fn health_analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "potentialConditions": {
                "type": "ARRAY",
                "description": "A list of potential health conditions based on the user's data. Should be prefixed with 'Possible' or 'Potential'.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "condition": {
                            "type": "STRING",
                            "description": "Name of the potential condition (e.g., 'Iron-Deficiency Anemia')."
                        },
                        "confidence": {
                            "type": "STRING",
                            "description": "A qualitative confidence level (e.g., 'Low', 'Medium', 'High')."
                        },
                        "explanation": {
                            "type": "STRING",
                            "description": "A brief, easy-to-understand explanation of why this condition is suspected, based on the provided data."
                        }
                    },
                    "required": ["condition", "confidence", "explanation"]
                }
            },
            "dietarySuggestions": {
                "type": "OBJECT",
                "description": "A personalized diet plan.",
                "properties": {
                    "generalAdvice": string_list("General dietary principles to follow."),
                    "mealPlan": {
                        "type": "OBJECT",
                        "properties": {
                            "breakfast": string_list("Breakfast suggestions."),
                            "lunch": string_list("Lunch suggestions."),
                            "dinner": string_list("Dinner suggestions."),
                            "snacks": string_list("Snack suggestions.")
                        },
                        "required": ["breakfast", "lunch", "dinner", "snacks"]
                    }
                },
                "required": ["generalAdvice", "mealPlan"]
            },
            "lifestyleRecommendations": {
                "type": "ARRAY",
                "description": "Actionable lifestyle advice (e.g., exercise, sleep).",
                "items": { "type": "STRING" }
            },
            "specialistRecommendation": {
                "type": "STRING",
                "description": "Suggests the type of medical specialist to consult (e.g., 'Endocrinologist', 'General Physician', 'Hematologist')."
            }
        },
        "required": crate::domain::REQUIRED_FIELDS,
    })
}
