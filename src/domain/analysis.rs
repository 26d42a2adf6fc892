//! Wellness analysis returned by the generative model.
//!
//! Field names follow the JSON contract declared to the model, so these types
//! decode the model output directly.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Top-level keys every analysis must carry.
pub const REQUIRED_FIELDS: [&str; 4] = [
    "potentialConditions",
    "dietarySuggestions",
    "lifestyleRecommendations",
    "specialistRecommendation",
];

/// Structured wellness report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthAnalysis {
    /// In the order the model ranked them
    pub potential_conditions: Vec<PotentialCondition>,
    pub dietary_suggestions: DietarySuggestions,
    pub lifestyle_recommendations: Vec<String>,
    /// Kind of specialist to consult, e.g. "Endocrinologist"
    pub specialist_recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotentialCondition {
    pub condition: String,
    pub confidence: Confidence,
    pub explanation: String,
}

/// Qualitative confidence attached to a condition.
///
/// The model is asked for Low/Medium/High but nothing forces it to comply.
/// Unknown labels are kept verbatim instead of rejecting the whole report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confidence {
    Low,
    Medium,
    High,
    Other(String),
}

impl Confidence {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Other(s) => s,
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Confidence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietarySuggestions {
    pub general_advice: Vec<String>,
    pub meal_plan: MealPlan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub breakfast: Vec<String>,
    pub lunch: Vec<String>,
    pub dinner: Vec<String>,
    pub snacks: Vec<String>,
}

/// One of the four meal plan slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealSlot {
    /// Display order.
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Snacks,
    ];

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
            Self::Snacks => "Snacks",
        }
    }
}

impl MealPlan {
    #[must_use]
    pub fn slot(&self, slot: MealSlot) -> &[String] {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
            MealSlot::Snacks => &self.snacks,
        }
    }

    /// Slots paired with their items, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (MealSlot, &[String])> {
        MealSlot::ALL.into_iter().map(move |s| (s, self.slot(s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_parsing() {
        assert_eq!(Confidence::parse("Low"), Confidence::Low);
        assert_eq!(Confidence::parse(" MEDIUM "), Confidence::Medium);
        assert_eq!(Confidence::parse("high"), Confidence::High);
        assert_eq!(
            Confidence::parse("Very likely"),
            Confidence::Other("Very likely".to_string())
        );
    }

    #[test]
    fn test_confidence_serializes_as_label() {
        let json = serde_json::to_string(&Confidence::Medium).expect("Should serialize");
        assert_eq!(json, "\"Medium\"");

        let other: Confidence = serde_json::from_str("\"Moderate\"").expect("Should parse");
        assert_eq!(other.as_str(), "Moderate");
    }

    #[test]
    fn test_meal_plan_order() {
        let plan = MealPlan {
            breakfast: vec!["Oats".to_string()],
            lunch: vec!["Salad".to_string()],
            dinner: vec!["Fish".to_string()],
            snacks: vec!["Nuts".to_string()],
        };
        let titles: Vec<_> = plan.iter().map(|(s, _)| s.title()).collect();
        assert_eq!(titles, ["Breakfast", "Lunch", "Dinner", "Snacks"]);
        assert_eq!(plan.slot(MealSlot::Dinner), ["Fish".to_string()]);
    }

    #[test]
    fn test_missing_meal_slot_fails_to_decode() {
        let json = r#"{"breakfast": [], "lunch": [], "dinner": []}"#;
        assert!(serde_json::from_str::<MealPlan>(json).is_err());
    }
}
