//! Form fields: focus order, labels and keyboard editing for each step.
//!
//! The wizard owns the values; this module only knows which field is which
//! and how keystrokes map onto them.

use crate::domain::{FormData, Sex, Step, Wizard};

/// Every editable input across the three form steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Age,
    Sex,
    Height,
    Weight,
    Hemoglobin,
    Glucose,
    Tsh,
    SystolicBp,
    DiastolicBp,
    Symptoms,
}

const PROFILE_FIELDS: [Field; 4] = [Field::Age, Field::Sex, Field::Height, Field::Weight];

const LAB_FIELDS: [Field; 5] = [
    Field::Hemoglobin,
    Field::Glucose,
    Field::Tsh,
    Field::SystolicBp,
    Field::DiastolicBp,
];

const SYMPTOM_FIELDS: [Field; 1] = [Field::Symptoms];

impl Field {
    /// Focus order for `step`. Results has no inputs.
    #[must_use]
    pub fn for_step(step: Step) -> &'static [Field] {
        match step {
            Step::Profile => &PROFILE_FIELDS,
            Step::Labs => &LAB_FIELDS,
            Step::Symptoms => &SYMPTOM_FIELDS,
            Step::Results => &[],
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::Sex => "Sex",
            Self::Height => "Height (cm)",
            Self::Weight => "Weight (kg)",
            Self::Hemoglobin => "Hemoglobin (g/dL)",
            Self::Glucose => "Fasting Blood Glucose (mg/dL)",
            Self::Tsh => "TSH (mIU/L)",
            Self::SystolicBp => "Systolic BP",
            Self::DiastolicBp => "Diastolic BP",
            Self::Symptoms => "Symptoms",
        }
    }

    /// Hint shown while the field is empty.
    #[must_use]
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Age => "e.g., 35",
            Self::Sex => "",
            Self::Height => "e.g., 175",
            Self::Weight => "e.g., 70",
            Self::Hemoglobin => "e.g., 14",
            Self::Glucose => "e.g., 90",
            Self::Tsh => "e.g., 2.5",
            Self::SystolicBp => "e.g., 120",
            Self::DiastolicBp => "e.g., 80",
            Self::Symptoms => "Describe your symptoms here...",
        }
    }

    /// Numeric fields accept digits and one decimal point only.
    #[must_use]
    pub fn is_numeric(self) -> bool {
        !matches!(self, Self::Sex | Self::Symptoms)
    }

    /// Current text of the field. The sex selector has no text.
    #[must_use]
    pub fn value(self, form: &FormData) -> &str {
        match self {
            Self::Age => &form.profile.age,
            Self::Sex => "",
            Self::Height => &form.profile.height_cm,
            Self::Weight => &form.profile.weight_kg,
            Self::Hemoglobin => &form.lab_results.hemoglobin,
            Self::Glucose => &form.lab_results.glucose,
            Self::Tsh => &form.lab_results.tsh,
            Self::SystolicBp => &form.lab_results.systolic_bp,
            Self::DiastolicBp => &form.lab_results.diastolic_bp,
            Self::Symptoms => &form.symptoms,
        }
    }

    fn buffer(self, wizard: &mut Wizard) -> Option<&mut String> {
        match self {
            Self::Age => Some(&mut wizard.profile_mut().age),
            Self::Sex => None,
            Self::Height => Some(&mut wizard.profile_mut().height_cm),
            Self::Weight => Some(&mut wizard.profile_mut().weight_kg),
            Self::Hemoglobin => Some(&mut wizard.labs_mut().hemoglobin),
            Self::Glucose => Some(&mut wizard.labs_mut().glucose),
            Self::Tsh => Some(&mut wizard.labs_mut().tsh),
            Self::SystolicBp => Some(&mut wizard.labs_mut().systolic_bp),
            Self::DiastolicBp => Some(&mut wizard.labs_mut().diastolic_bp),
            Self::Symptoms => Some(wizard.symptoms_mut()),
        }
    }

    /// Apply a typed character. Returns whether anything changed.
    pub fn input_char(self, wizard: &mut Wizard, c: char) -> bool {
        if self == Self::Sex {
            return match c {
                ' ' => {
                    self.cycle(wizard, true);
                    true
                }
                'm' | 'M' => set_sex(wizard, Sex::Male),
                'f' | 'F' => set_sex(wizard, Sex::Female),
                'o' | 'O' => set_sex(wizard, Sex::Other),
                _ => false,
            };
        }

        let numeric = self.is_numeric();
        let Some(buffer) = self.buffer(wizard) else {
            return false;
        };
        if numeric && !accepts_numeric(buffer, c) {
            return false;
        }
        if c.is_control() {
            return false;
        }
        buffer.push(c);
        true
    }

    /// Remove the last character.
    pub fn delete_char(self, wizard: &mut Wizard) {
        if let Some(buffer) = self.buffer(wizard) {
            buffer.pop();
        }
    }

    /// Empty the field. The sex selector returns to its default.
    pub fn clear(self, wizard: &mut Wizard) {
        match self.buffer(wizard) {
            Some(buffer) => buffer.clear(),
            None => wizard.profile_mut().sex = Sex::default(),
        }
    }

    /// Step through the sex options. No-op for text fields.
    pub fn cycle(self, wizard: &mut Wizard, forward: bool) {
        if self != Self::Sex {
            return;
        }
        let profile = wizard.profile_mut();
        profile.sex = if forward {
            profile.sex.cycle_next()
        } else {
            profile.sex.cycle_prev()
        };
    }
}

fn set_sex(wizard: &mut Wizard, sex: Sex) -> bool {
    wizard.profile_mut().sex = sex;
    true
}

/// Whether `c` may be appended to the numeric text `current`.
#[must_use]
pub fn accepts_numeric(current: &str, c: char) -> bool {
    c.is_ascii_digit() || (c == '.' && !current.contains('.'))
}

/// Fill the inputs of `step` with a demonstration example.
pub fn load_sample_data(wizard: &mut Wizard, step: Step) {
    match step {
        Step::Profile => {
            let profile = wizard.profile_mut();
            profile.age = "35".to_string();
            profile.sex = Sex::Female;
            profile.height_cm = "165".to_string();
            profile.weight_kg = "72".to_string();
        }
        Step::Labs => {
            let labs = wizard.labs_mut();
            labs.hemoglobin = "11.2".to_string();
            labs.glucose = "108".to_string();
            labs.tsh = "2.5".to_string();
            labs.systolic_bp = "128".to_string();
            labs.diastolic_bp = "84".to_string();
        }
        Step::Symptoms => {
            *wizard.symptoms_mut() = "I've been feeling constantly tired for the last two weeks, \
                 and I've noticed I'm more thirsty than usual."
                .to_string();
        }
        Step::Results => {}
    }
}
