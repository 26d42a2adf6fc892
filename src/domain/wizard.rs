//! Four-step wizard state machine.
//!
//! Profile -> Labs -> Symptoms -> Results. Forward moves are gated on the
//! current step's validity, backward moves clamp at Profile, and the only way
//! from Symptoms into a real analysis is [`Wizard::submit`].

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use super::analysis::HealthAnalysis;
use super::profile::{symptoms_valid, FormData, FullFormData, LabResultData, ProfileData};

/// Wizard step, ordered and integer-backed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Step {
    Profile = 1,
    Labs = 2,
    Symptoms = 3,
    Results = 4,
}

impl Step {
    pub const ALL: [Step; 4] = [Step::Profile, Step::Labs, Step::Symptoms, Step::Results];

    #[must_use]
    pub fn number(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Profile => "Profile",
            Self::Labs => "Lab Reports",
            Self::Symptoms => "Symptoms",
            Self::Results => "Results",
        }
    }

    /// Following step, clamped at Results.
    #[must_use]
    pub fn following(self) -> Self {
        match self {
            Self::Profile => Self::Labs,
            Self::Labs => Self::Symptoms,
            Self::Symptoms | Self::Results => Self::Results,
        }
    }

    /// Preceding step, clamped at Profile.
    #[must_use]
    pub fn preceding(self) -> Self {
        match self {
            Self::Profile | Self::Labs => Self::Profile,
            Self::Symptoms => Self::Labs,
            Self::Results => Self::Symptoms,
        }
    }
}

impl Default for Step {
    fn default() -> Self {
        Self::Profile
    }
}

/// User-facing failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Credential missing or rejected. Retrying will not help.
    Configuration,
    /// Network, service or malformed response. Retry by resubmitting.
    Request,
}

/// A failed analysis as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisFailure {
    pub kind: FailureKind,
    pub message: String,
}

/// Lifecycle of the analysis attached to the wizard.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AnalysisStatus {
    #[default]
    Idle,
    Loading,
    Ready(HealthAnalysis),
    Failed(AnalysisFailure),
}

/// A frozen request handed to the background worker.
#[derive(Debug, Clone)]
pub struct Submission {
    pub id: u64,
    pub data: FullFormData,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("Age, height and weight are required")]
    ProfileIncomplete,

    #[error("Please describe your symptoms in more than 10 characters")]
    SymptomsTooShort,

    #[error("Cannot submit from the {0:?} step")]
    NotAtSymptoms(Step),

    #[error("An analysis is already in progress")]
    RequestInFlight,

    #[error("Start a new analysis to submit again")]
    ResetRequired,
}

/// In-progress form plus navigation and analysis state.
#[derive(Debug, Default)]
pub struct Wizard {
    step: Step,
    form: FormData,
    status: AnalysisStatus,
    last_submission: u64,
    active_submission: Option<u64>,
}

impl Wizard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn step(&self) -> Step {
        self.step
    }

    #[must_use]
    pub fn form(&self) -> &FormData {
        &self.form
    }

    pub fn profile_mut(&mut self) -> &mut ProfileData {
        &mut self.form.profile
    }

    pub fn labs_mut(&mut self) -> &mut LabResultData {
        &mut self.form.lab_results
    }

    pub fn symptoms_mut(&mut self) -> &mut String {
        &mut self.form.symptoms
    }

    #[must_use]
    pub fn status(&self) -> &AnalysisStatus {
        &self.status
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.status, AnalysisStatus::Loading)
    }

    #[must_use]
    pub fn analysis(&self) -> Option<&HealthAnalysis> {
        match &self.status {
            AnalysisStatus::Ready(analysis) => Some(analysis),
            _ => None,
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<&AnalysisFailure> {
        match &self.status {
            AnalysisStatus::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Validity predicate of the current step.
    ///
    /// Labs has no gate. Results is terminal and always "valid" so that
    /// `next` degrades to a no-op there.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        match self.step {
            Step::Profile => self.form.profile.is_complete(),
            Step::Labs | Step::Results => true,
            Step::Symptoms => symptoms_valid(&self.form.symptoms),
        }
    }

    /// Submission is possible only from Symptoms with a long enough text.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.step == Step::Symptoms && symptoms_valid(&self.form.symptoms)
    }

    /// Advance one step if the current step is valid.
    ///
    /// # Errors
    /// Returns the failing predicate when the current step is invalid.
    pub fn next(&mut self) -> Result<Step, WizardError> {
        if !self.can_advance() {
            return Err(match self.step {
                Step::Symptoms => WizardError::SymptomsTooShort,
                _ => WizardError::ProfileIncomplete,
            });
        }
        self.step = self.step.following();
        Ok(self.step)
    }

    /// Go back one step, clamped at Profile.
    ///
    /// Once a request has been submitted, Results is only left by
    /// [`Wizard::reset`].
    ///
    /// # Errors
    /// Returns `RequestInFlight` while loading and `ResetRequired` once an
    /// outcome is shown.
    pub fn back(&mut self) -> Result<Step, WizardError> {
        if self.step == Step::Results {
            match self.status {
                AnalysisStatus::Idle => {}
                AnalysisStatus::Loading => return Err(WizardError::RequestInFlight),
                AnalysisStatus::Ready(_) | AnalysisStatus::Failed(_) => {
                    return Err(WizardError::ResetRequired)
                }
            }
        }
        self.step = self.step.preceding();
        Ok(self.step)
    }

    /// Freeze the form, enter Results in the loading state and hand back the
    /// request to run.
    ///
    /// # Errors
    /// Returns an error if not on Symptoms, if symptoms are too short, or if
    /// a request is already outstanding.
    pub fn submit(&mut self) -> Result<Submission, WizardError> {
        if self.active_submission.is_some() {
            return Err(WizardError::RequestInFlight);
        }
        if matches!(
            self.status,
            AnalysisStatus::Ready(_) | AnalysisStatus::Failed(_)
        ) {
            return Err(WizardError::ResetRequired);
        }
        if self.step != Step::Symptoms {
            return Err(WizardError::NotAtSymptoms(self.step));
        }
        if !symptoms_valid(&self.form.symptoms) {
            return Err(WizardError::SymptomsTooShort);
        }

        let data = FullFormData::freeze(&self.form);
        self.last_submission += 1;
        let id = self.last_submission;

        self.active_submission = Some(id);
        self.status = AnalysisStatus::Loading;
        self.step = Step::Results;

        Ok(Submission { id, data })
    }

    /// Record the outcome of submission `id`.
    ///
    /// Returns `false` (and changes nothing) if `id` is not the outstanding
    /// submission, e.g. the user reset while the request was in flight.
    pub fn complete(
        &mut self,
        id: u64,
        outcome: Result<HealthAnalysis, AnalysisFailure>,
    ) -> bool {
        if self.active_submission != Some(id) {
            return false;
        }
        self.active_submission = None;
        self.status = match outcome {
            Ok(analysis) => AnalysisStatus::Ready(analysis),
            Err(failure) => AnalysisStatus::Failed(failure),
        };
        true
    }

    /// Clear everything and return to Profile.
    pub fn reset(&mut self) {
        self.form.zeroize();
        self.status = AnalysisStatus::Idle;
        self.active_submission = None;
        self.step = Step::Profile;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{DietarySuggestions, MealPlan};

    fn sample_analysis() -> HealthAnalysis {
        HealthAnalysis {
            potential_conditions: vec![],
            dietary_suggestions: DietarySuggestions {
                general_advice: vec!["Drink water".to_string()],
                meal_plan: MealPlan {
                    breakfast: vec![],
                    lunch: vec![],
                    dinner: vec![],
                    snacks: vec![],
                },
            },
            lifestyle_recommendations: vec!["Sleep 8 hours".to_string()],
            specialist_recommendation: "General Physician".to_string(),
        }
    }

    fn wizard_at_symptoms() -> Wizard {
        let mut wizard = Wizard::new();
        wizard.profile_mut().age = "35".to_string();
        wizard.profile_mut().height_cm = "175".to_string();
        wizard.profile_mut().weight_kg = "70".to_string();
        wizard.next().expect("Profile complete");
        wizard.next().expect("Labs ungated");
        assert_eq!(wizard.step(), Step::Symptoms);
        wizard
    }

    #[test]
    fn test_profile_gate() {
        let mut wizard = Wizard::new();
        assert_eq!(wizard.next(), Err(WizardError::ProfileIncomplete));
        assert_eq!(wizard.step(), Step::Profile);

        // Lab and symptom content does not unlock the profile step.
        wizard.labs_mut().glucose = "90".to_string();
        *wizard.symptoms_mut() = "I have been feeling dizzy for days".to_string();
        assert!(!wizard.can_advance());

        wizard.profile_mut().age = "35".to_string();
        wizard.profile_mut().height_cm = "175".to_string();
        assert!(!wizard.can_advance());
        wizard.profile_mut().weight_kg = "70".to_string();
        assert_eq!(wizard.next(), Ok(Step::Labs));
    }

    #[test]
    fn test_back_clamps_at_profile() {
        let mut wizard = Wizard::new();
        assert_eq!(wizard.back(), Ok(Step::Profile));

        let mut wizard = wizard_at_symptoms();
        assert_eq!(wizard.back(), Ok(Step::Labs));
        assert_eq!(wizard.back(), Ok(Step::Profile));
        assert_eq!(wizard.back(), Ok(Step::Profile));
    }

    #[test]
    fn test_next_clamps_at_results() {
        let mut wizard = wizard_at_symptoms();
        *wizard.symptoms_mut() = "I have been feeling dizzy for days".to_string();
        assert_eq!(wizard.next(), Ok(Step::Results));
        assert_eq!(wizard.next(), Ok(Step::Results));
        assert_eq!(wizard.step().number(), 4);
    }

    #[test]
    fn test_submit_gate() {
        let mut wizard = wizard_at_symptoms();
        *wizard.symptoms_mut() = "tired".to_string();
        assert!(!wizard.can_submit());
        assert_eq!(wizard.submit().err(), Some(WizardError::SymptomsTooShort));

        *wizard.symptoms_mut() = "I have been feeling dizzy for days".to_string();
        assert!(wizard.can_submit());
    }

    #[test]
    fn test_submit_only_from_symptoms() {
        let mut wizard = Wizard::new();
        assert_eq!(
            wizard.submit().err(),
            Some(WizardError::NotAtSymptoms(Step::Profile))
        );
    }

    #[test]
    fn test_submit_enters_results_loading() {
        let mut wizard = wizard_at_symptoms();
        *wizard.symptoms_mut() = "I have been feeling dizzy for days".to_string();

        let submission = wizard.submit().expect("Should submit");
        assert_eq!(wizard.step(), Step::Results);
        assert!(wizard.is_loading());
        assert_eq!(submission.data.bmi, "22.86");
        assert_eq!(submission.data.symptoms, "I have been feeling dizzy for days");

        assert_eq!(wizard.back(), Err(WizardError::RequestInFlight));

        assert!(wizard.complete(submission.id, Ok(sample_analysis())));
        assert!(!wizard.is_loading());
        assert!(wizard.analysis().is_some());
        assert!(wizard.failure().is_none());
    }

    #[test]
    fn test_failure_shows_no_analysis() {
        let mut wizard = wizard_at_symptoms();
        *wizard.symptoms_mut() = "I have been feeling dizzy for days".to_string();
        let submission = wizard.submit().expect("Should submit");

        let failure = AnalysisFailure {
            kind: FailureKind::Request,
            message: "Failed".to_string(),
        };
        assert!(wizard.complete(submission.id, Err(failure.clone())));
        assert_eq!(wizard.failure(), Some(&failure));
        assert!(wizard.analysis().is_none());
    }

    #[test]
    fn test_reset_from_any_state() {
        for target in Step::ALL {
            let mut wizard = wizard_at_symptoms();
            wizard.labs_mut().tsh = "2.5".to_string();
            *wizard.symptoms_mut() = "I have been feeling dizzy for days".to_string();
            match target {
                Step::Results => {
                    let s = wizard.submit().expect("Should submit");
                    wizard.complete(s.id, Ok(sample_analysis()));
                }
                Step::Symptoms => {}
                Step::Labs => {
                    wizard.back().expect("back");
                }
                Step::Profile => {
                    wizard.back().expect("back");
                    wizard.back().expect("back");
                }
            }
            assert_eq!(wizard.step(), target);

            wizard.reset();
            assert_eq!(wizard.step(), Step::Profile);
            assert_eq!(wizard.form(), &FormData::default());
            assert_eq!(wizard.status(), &AnalysisStatus::Idle);
            assert!(!wizard.is_loading());
            assert!(wizard.analysis().is_none());
            assert!(wizard.failure().is_none());
        }
    }

    #[test]
    fn test_stale_completion_after_reset_is_dropped() {
        let mut wizard = wizard_at_symptoms();
        *wizard.symptoms_mut() = "I have been feeling dizzy for days".to_string();
        let stale = wizard.submit().expect("Should submit");

        wizard.reset();
        assert!(!wizard.complete(stale.id, Ok(sample_analysis())));
        assert_eq!(wizard.status(), &AnalysisStatus::Idle);

        let mut wizard2 = wizard;
        wizard2.profile_mut().age = "40".to_string();
        wizard2.profile_mut().height_cm = "180".to_string();
        wizard2.profile_mut().weight_kg = "80".to_string();
        wizard2.next().expect("next");
        wizard2.next().expect("next");
        *wizard2.symptoms_mut() = "Persistent cough for two weeks".to_string();
        let fresh = wizard2.submit().expect("Should submit");
        assert_ne!(fresh.id, stale.id);
        assert!(!wizard2.complete(stale.id, Ok(sample_analysis())));
        assert!(wizard2.is_loading());
    }

    #[test]
    fn test_results_are_left_only_by_reset() {
        let mut wizard = wizard_at_symptoms();
        *wizard.symptoms_mut() = "I have been feeling dizzy for days".to_string();
        let submission = wizard.submit().expect("Should submit");
        wizard.complete(submission.id, Ok(sample_analysis()));

        assert_eq!(wizard.back(), Err(WizardError::ResetRequired));
        assert_eq!(wizard.step(), Step::Results);
        assert_eq!(wizard.submit().err(), Some(WizardError::ResetRequired));

        let failure = AnalysisFailure {
            kind: FailureKind::Request,
            message: "Failed".to_string(),
        };
        let mut wizard = wizard_at_symptoms();
        *wizard.symptoms_mut() = "I have been feeling dizzy for days".to_string();
        let submission = wizard.submit().expect("Should submit");
        wizard.complete(submission.id, Err(failure));
        assert_eq!(wizard.back(), Err(WizardError::ResetRequired));

        wizard.reset();
        assert_eq!(wizard.step(), Step::Profile);
    }

    #[test]
    fn test_back_from_idle_results() {
        let mut wizard = wizard_at_symptoms();
        *wizard.symptoms_mut() = "I have been feeling dizzy for days".to_string();
        wizard.next().expect("Symptoms valid");
        assert_eq!(wizard.back(), Ok(Step::Symptoms));
    }

    #[test]
    fn test_no_second_submission_while_loading() {
        let mut wizard = wizard_at_symptoms();
        *wizard.symptoms_mut() = "I have been feeling dizzy for days".to_string();
        wizard.submit().expect("Should submit");
        assert_eq!(wizard.submit().err(), Some(WizardError::RequestInFlight));
    }
}
