//! Form data collected by the wizard.
//!
//! All numeric inputs are kept as the raw strings the user typed. Parsing
//! happens only where a number is actually needed (BMI), so an empty or
//! half-typed field never blocks editing.

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Text substituted for the BMI when it cannot be computed.
pub const BMI_NOT_AVAILABLE: &str = "Not available";

/// Biological sex as offered by the profile selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[default]
    Male,
    Female,
    Other,
}

impl Sex {
    pub const ALL: [Sex; 3] = [Sex::Male, Sex::Female, Sex::Other];

    /// Next option, wrapping around.
    #[must_use]
    pub fn cycle_next(self) -> Self {
        match self {
            Self::Male => Self::Female,
            Self::Female => Self::Other,
            Self::Other => Self::Male,
        }
    }

    /// Previous option, wrapping around.
    #[must_use]
    pub fn cycle_prev(self) -> Self {
        match self {
            Self::Male => Self::Other,
            Self::Female => Self::Male,
            Self::Other => Self::Female,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Demographic profile (step 1).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileData {
    /// Age in years
    pub age: String,
    /// Height in centimetres
    pub height_cm: String,
    /// Weight in kilograms
    pub weight_kg: String,
    pub sex: Sex,
}

impl ProfileData {
    /// The profile step gates on age, height and weight being non-empty.
    /// Content is not checked here; BMI handles unparseable values.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.age.is_empty() && !self.height_cm.is_empty() && !self.weight_kg.is_empty()
    }

    /// Body mass index, if height and weight both parse to positive numbers.
    #[must_use]
    pub fn bmi(&self) -> Option<Bmi> {
        Bmi::compute(&self.height_cm, &self.weight_kg)
    }
}

impl Zeroize for ProfileData {
    fn zeroize(&mut self) {
        self.age.zeroize();
        self.height_cm.zeroize();
        self.weight_kg.zeroize();
        self.sex = Sex::default();
    }
}

/// Optional lab values (step 2). An empty string means "not provided".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabResultData {
    /// g/dL
    pub hemoglobin: String,
    /// Fasting blood glucose, mg/dL
    pub glucose: String,
    /// Thyroid-stimulating hormone, mIU/L
    pub tsh: String,
    /// mmHg
    #[serde(rename = "systolicBP")]
    pub systolic_bp: String,
    /// mmHg
    #[serde(rename = "diastolicBP")]
    pub diastolic_bp: String,
}

impl LabResultData {
    /// Number of lab fields the user filled in.
    #[must_use]
    pub fn provided_count(&self) -> usize {
        [
            &self.hemoglobin,
            &self.glucose,
            &self.tsh,
            &self.systolic_bp,
            &self.diastolic_bp,
        ]
        .iter()
        .filter(|v| !v.is_empty())
        .count()
    }
}

impl Zeroize for LabResultData {
    fn zeroize(&mut self) {
        self.hemoglobin.zeroize();
        self.glucose.zeroize();
        self.tsh.zeroize();
        self.systolic_bp.zeroize();
        self.diastolic_bp.zeroize();
    }
}

/// Minimum trimmed symptom length is strictly greater than this.
pub const SYMPTOMS_MIN_EXCLUSIVE: usize = 10;

/// Whether free-text symptoms are long enough to submit.
///
/// Counts characters, not bytes, after trimming surrounding whitespace.
#[must_use]
pub fn symptoms_valid(symptoms: &str) -> bool {
    symptoms.trim().chars().count() > SYMPTOMS_MIN_EXCLUSIVE
}

/// Everything the wizard collects while in progress.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub profile: ProfileData,
    pub lab_results: LabResultData,
    pub symptoms: String,
}

impl Zeroize for FormData {
    fn zeroize(&mut self) {
        self.profile.zeroize();
        self.lab_results.zeroize();
        self.symptoms.zeroize();
    }
}

/// Frozen request payload: the form plus the derived BMI string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullFormData {
    pub profile: ProfileData,
    pub lab_results: LabResultData,
    pub symptoms: String,
    /// Two-decimal BMI or [`BMI_NOT_AVAILABLE`]
    pub bmi: String,
}

impl FullFormData {
    /// Freeze a snapshot of the form.
    #[must_use]
    pub fn freeze(form: &FormData) -> Self {
        let bmi = form
            .profile
            .bmi()
            .map(|b| b.to_string())
            .unwrap_or_else(|| BMI_NOT_AVAILABLE.to_string());

        Self {
            profile: form.profile.clone(),
            lab_results: form.lab_results.clone(),
            symptoms: form.symptoms.clone(),
            bmi,
        }
    }
}

/// Body mass index rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Bmi(f64);

impl Bmi {
    /// `weight_kg / (height_cm / 100)^2`.
    ///
    /// Returns `None` unless both inputs parse to finite positive numbers.
    #[must_use]
    pub fn compute(height_cm: &str, weight_kg: &str) -> Option<Self> {
        let height = parse_positive(height_cm)?;
        let weight = parse_positive(weight_kg)?;

        let height_m = height / 100.0;
        let raw = weight / (height_m * height_m);
        if !raw.is_finite() {
            return None;
        }

        Some(Self((raw * 100.0).round() / 100.0))
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn category(&self) -> BmiCategory {
        BmiCategory::from_value(self.0)
    }
}

impl std::fmt::Display for Bmi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

fn parse_positive(raw: &str) -> Option<f64> {
    let v: f64 = raw.trim().parse().ok()?;
    (v.is_finite() && v > 0.0).then_some(v)
}

/// WHO adult BMI bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    #[must_use]
    pub fn from_value(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Normal
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }
}

impl std::fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Underweight => write!(f, "Underweight"),
            Self::Normal => write!(f, "Normal weight"),
            Self::Overweight => write!(f, "Overweight"),
            Self::Obese => write!(f, "Obese"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(age: &str, height: &str, weight: &str) -> ProfileData {
        ProfileData {
            age: age.to_string(),
            height_cm: height.to_string(),
            weight_kg: weight.to_string(),
            sex: Sex::Male,
        }
    }

    #[test]
    fn test_bmi_normal_weight() {
        let bmi = profile("35", "175", "70").bmi().expect("BMI should compute");
        assert_eq!(bmi.to_string(), "22.86");
        assert_eq!(bmi.category(), BmiCategory::Normal);
        assert_eq!(bmi.category().to_string(), "Normal weight");
    }

    #[test]
    fn test_bmi_obese() {
        let bmi = profile("35", "175", "92").bmi().expect("BMI should compute");
        assert_eq!(bmi.to_string(), "30.04");
        assert_eq!(bmi.category(), BmiCategory::Obese);
    }

    #[test]
    fn test_bmi_undefined_for_bad_input() {
        assert!(Bmi::compute("0", "70").is_none());
        assert!(Bmi::compute("175", "0").is_none());
        assert!(Bmi::compute("-175", "70").is_none());
        assert!(Bmi::compute("175", "-70").is_none());
        assert!(Bmi::compute("abc", "70").is_none());
        assert!(Bmi::compute("175", "").is_none());
        assert!(Bmi::compute("NaN", "70").is_none());
        assert!(Bmi::compute("inf", "70").is_none());
    }

    #[test]
    fn test_bmi_category_boundaries() {
        assert_eq!(BmiCategory::from_value(18.49), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_value(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_value(24.99), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_value(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_value(29.99), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_value(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_profile_completeness_ignores_content() {
        assert!(profile("35", "175", "70").is_complete());
        assert!(profile("x", "y", "z").is_complete());
        assert!(!profile("", "175", "70").is_complete());
        assert!(!profile("35", "", "70").is_complete());
        assert!(!profile("35", "175", "").is_complete());
    }

    #[test]
    fn test_symptoms_threshold() {
        assert!(!symptoms_valid("tired"));
        assert!(!symptoms_valid("   0123456789   "));
        assert!(symptoms_valid("01234567890"));
        assert!(symptoms_valid("I have been feeling dizzy for days"));
    }

    #[test]
    fn test_freeze_substitutes_missing_bmi() {
        let form = FormData {
            profile: profile("35", "", "70"),
            ..Default::default()
        };
        let full = FullFormData::freeze(&form);
        assert_eq!(full.bmi, BMI_NOT_AVAILABLE);

        let form = FormData {
            profile: profile("35", "175", "70"),
            ..Default::default()
        };
        assert_eq!(FullFormData::freeze(&form).bmi, "22.86");
    }

    #[test]
    fn test_zeroize_resets_form() {
        let mut form = FormData {
            profile: ProfileData {
                sex: Sex::Female,
                ..profile("35", "175", "70")
            },
            lab_results: LabResultData {
                glucose: "90".to_string(),
                ..Default::default()
            },
            symptoms: "headaches every morning".to_string(),
        };
        form.zeroize();
        assert_eq!(form, FormData::default());
    }

    #[test]
    fn test_lab_serialization_uses_original_keys() {
        let labs = LabResultData {
            systolic_bp: "120".to_string(),
            diastolic_bp: "80".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&labs).expect("Should serialize");
        assert_eq!(json["systolicBP"], "120");
        assert_eq!(json["diastolicBP"], "80");
        assert_eq!(labs.provided_count(), 2);
    }
}
