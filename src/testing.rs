//! Shared fixtures for unit tests.

use crate::domain::{
    Confidence, DietarySuggestions, HealthAnalysis, MealPlan, PotentialCondition,
};

/// A well-formed model answer.
pub const VALID_RESPONSE: &str = r#"{
    "potentialConditions": [
        {"condition": "Possible Iron-Deficiency Anemia", "confidence": "Medium", "explanation": "Low hemoglobin and fatigue."},
        {"condition": "Potential Hypothyroidism", "confidence": "low", "explanation": "Borderline TSH."}
    ],
    "dietarySuggestions": {
        "generalAdvice": ["Eat iron-rich foods"],
        "mealPlan": {
            "breakfast": ["Fortified cereal"],
            "lunch": ["Spinach salad"],
            "dinner": ["Lentil stew"],
            "snacks": ["Pumpkin seeds"]
        }
    },
    "lifestyleRecommendations": ["Sleep 7-9 hours", "Walk daily"],
    "specialistRecommendation": "Hematologist"
}"#;

pub fn sample_analysis() -> HealthAnalysis {
    HealthAnalysis {
        potential_conditions: vec![PotentialCondition {
            condition: "Possible Type 2 Diabetes".to_string(),
            confidence: Confidence::High,
            explanation: "Fasting glucose of 130 mg/dL & increased thirst.".to_string(),
        }],
        dietary_suggestions: DietarySuggestions {
            general_advice: vec!["Limit refined sugars".to_string()],
            meal_plan: MealPlan {
                breakfast: vec!["Greek yogurt with berries".to_string()],
                lunch: vec!["Grilled chicken salad".to_string()],
                dinner: vec!["Baked salmon with quinoa".to_string()],
                snacks: vec!["Almonds".to_string()],
            },
        },
        lifestyle_recommendations: vec!["30 minutes of brisk walking daily".to_string()],
        specialist_recommendation: "Endocrinologist".to_string(),
    }
}
