//! Prompt construction for the wellness analysis.

use crate::domain::FullFormData;

const NOT_PROVIDED: &str = "Not provided";
const NOT_AVAILABLE: &str = "N/A";
const NO_SYMPTOMS: &str = "No specific symptoms reported.";

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

/// Build the natural-language prompt embedding every collected field.
///
/// Empty profile fields read "Not provided", empty labs read "N/A".
#[must_use]
pub fn build_prompt(data: &FullFormData) -> String {
    let profile = &data.profile;
    let labs = &data.lab_results;

    let mut prompt = String::with_capacity(2048);

    prompt.push_str("Analyze the following health data for an individual.\n");
    prompt.push_str(
        "**CRITICAL INSTRUCTION: You are an AI health assistant. Your analysis is for \
         informational purposes only and is NOT a medical diagnosis. Always state this. \
         You must not provide a definitive diagnosis. Use phrases like \"potential condition\" \
         or \"may indicate\".**\n\n",
    );

    prompt.push_str("Here is the user's data:\n");
    prompt.push_str("- **Profile**:\n");
    prompt.push_str(&format!(
        "  - Age: {} years\n",
        or_default(&profile.age, NOT_PROVIDED)
    ));
    prompt.push_str(&format!("  - Sex: {}\n", profile.sex));
    prompt.push_str(&format!(
        "  - Height: {} cm\n",
        or_default(&profile.height_cm, NOT_PROVIDED)
    ));
    prompt.push_str(&format!(
        "  - Weight: {} kg\n",
        or_default(&profile.weight_kg, NOT_PROVIDED)
    ));
    prompt.push_str(&format!("  - BMI: {}\n", data.bmi));

    prompt.push_str("- **Lab Results (if provided)**:\n");
    prompt.push_str(&format!(
        "  - Hemoglobin: {} g/dL\n",
        or_default(&labs.hemoglobin, NOT_AVAILABLE)
    ));
    prompt.push_str(&format!(
        "  - Fasting Blood Glucose: {} mg/dL\n",
        or_default(&labs.glucose, NOT_AVAILABLE)
    ));
    prompt.push_str(&format!(
        "  - TSH (Thyroid-Stimulating Hormone): {} mIU/L\n",
        or_default(&labs.tsh, NOT_AVAILABLE)
    ));
    prompt.push_str(&format!(
        "  - Blood Pressure: {} / {} mmHg\n",
        or_default(&labs.systolic_bp, NOT_AVAILABLE),
        or_default(&labs.diastolic_bp, NOT_AVAILABLE)
    ));

    prompt.push_str("- **Reported Symptoms**:\n");
    prompt.push_str(&format!(
        "  - \"{}\"\n\n",
        or_default(data.symptoms.trim(), NO_SYMPTOMS)
    ));

    prompt.push_str(
        "Based on this information, perform the following tasks and provide the output in \
         JSON format matching the defined schema:\n",
    );
    prompt.push_str(
        "1. **Potential Conditions**: Identify potential health issues. For each, provide the \
         condition name, a confidence level (Low, Medium, High), and a brief explanation \
         linking it to the provided data.\n",
    );
    prompt.push_str(
        "2. **Dietary Suggestions**: Create a personalized diet plan. Include general advice \
         and specific meal suggestions (breakfast, lunch, dinner, snacks).\n",
    );
    prompt.push_str(
        "3. **Lifestyle Recommendations**: Suggest 2-3 actionable lifestyle changes (e.g., \
         exercise, sleep hygiene, stress management).\n",
    );
    prompt.push_str(
        "4. **Specialist Recommendation**: Recommend the type of medical specialist the user \
         should consider consulting for a formal diagnosis.\n",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FormData, LabResultData, ProfileData, Sex};

    fn full(form: FormData) -> FullFormData {
        FullFormData::freeze(&form)
    }

    #[test]
    fn test_prompt_embeds_all_fields() {
        let data = full(FormData {
            profile: ProfileData {
                age: "35".to_string(),
                height_cm: "175".to_string(),
                weight_kg: "70".to_string(),
                sex: Sex::Female,
            },
            lab_results: LabResultData {
                hemoglobin: "11.2".to_string(),
                glucose: "130".to_string(),
                tsh: "4.8".to_string(),
                systolic_bp: "140".to_string(),
                diastolic_bp: "90".to_string(),
            },
            symptoms: "Always tired and thirsty lately".to_string(),
        });

        let prompt = build_prompt(&data);
        assert!(prompt.contains("Age: 35 years"));
        assert!(prompt.contains("Sex: female"));
        assert!(prompt.contains("Height: 175 cm"));
        assert!(prompt.contains("Weight: 70 kg"));
        assert!(prompt.contains("BMI: 22.86"));
        assert!(prompt.contains("Hemoglobin: 11.2 g/dL"));
        assert!(prompt.contains("Fasting Blood Glucose: 130 mg/dL"));
        assert!(prompt.contains("TSH (Thyroid-Stimulating Hormone): 4.8 mIU/L"));
        assert!(prompt.contains("Blood Pressure: 140 / 90 mmHg"));
        assert!(prompt.contains("\"Always tired and thirsty lately\""));
        assert!(prompt.contains("NOT a medical diagnosis"));
    }

    #[test]
    fn test_prompt_substitutes_missing_values() {
        let data = full(FormData::default());
        let prompt = build_prompt(&data);

        assert!(prompt.contains("Age: Not provided years"));
        assert!(prompt.contains("Height: Not provided cm"));
        assert!(prompt.contains("BMI: Not available"));
        assert!(prompt.contains("Hemoglobin: N/A g/dL"));
        assert!(prompt.contains("Blood Pressure: N/A / N/A mmHg"));
        assert!(prompt.contains(NO_SYMPTOMS));
        assert!(prompt.contains("Sex: male"));
    }

    #[test]
    fn test_prompt_lists_four_tasks() {
        let prompt = build_prompt(&full(FormData::default()));
        for section in [
            "**Potential Conditions**",
            "**Dietary Suggestions**",
            "**Lifestyle Recommendations**",
            "**Specialist Recommendation**",
        ] {
            assert!(prompt.contains(section), "missing {section}");
        }
    }
}
