//! Domain layer: Core wellness types and the wizard state machine.
//!
//! Pure Rust types with no I/O. Everything here is serializable or trivially
//! testable without a terminal or network.

mod analysis;
mod profile;
mod wizard;

pub use analysis::{
    Confidence, DietarySuggestions, HealthAnalysis, MealPlan, MealSlot, PotentialCondition,
    REQUIRED_FIELDS,
};
pub use profile::{
    symptoms_valid, Bmi, BmiCategory, FormData, FullFormData, LabResultData, ProfileData, Sex,
    BMI_NOT_AVAILABLE,
};
pub use wizard::{
    AnalysisFailure, AnalysisStatus, FailureKind, Step, Submission, Wizard, WizardError,
};
