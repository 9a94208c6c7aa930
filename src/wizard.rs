//! Wizard controller.
//!
//! A linear state machine over five steps. Each collection step validates
//! its slice before advancing; `back` never validates. Every change to a
//! slice or to the step index is written through to the draft store.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::draft::DraftStore;
use crate::error::{AppError, WizardError};
use crate::model::{
    BacklogField, BacklogInformation, MentoringReport, OtherParameters, StudentDetails,
    SubjectField, SubjectPerformance, new_row_id,
};
use crate::validation::{
    validate_backlog, validate_other_parameters, validate_student_details, validate_subjects,
};

// ============================================================================
// Steps
// ============================================================================

/// Wizard steps, numbered from 1 in their persisted form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum Step {
    #[default]
    StudentDetails,
    SubjectPerformance,
    BacklogInformation,
    OtherParameters,
    Review,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::StudentDetails,
        Step::SubjectPerformance,
        Step::BacklogInformation,
        Step::OtherParameters,
        Step::Review,
    ];

    /// 1-based position in the step list.
    pub fn number(self) -> u8 {
        match self {
            Step::StudentDetails => 1,
            Step::SubjectPerformance => 2,
            Step::BacklogInformation => 3,
            Step::OtherParameters => 4,
            Step::Review => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Step::StudentDetails => "Student Details",
            Step::SubjectPerformance => "Subject Performance",
            Step::BacklogInformation => "Backlog Information",
            Step::OtherParameters => "Other Parameters",
            Step::Review => "Review",
        }
    }

    pub fn next(self) -> Step {
        Step::from(self.number() + 1)
    }

    /// Previous step, floored at the first.
    pub fn previous(self) -> Step {
        Step::from(self.number().saturating_sub(1))
    }
}

/// Out-of-range numbers clamp to the nearest valid step.
impl From<u8> for Step {
    fn from(n: u8) -> Self {
        match n {
            0 | 1 => Step::StudentDetails,
            2 => Step::SubjectPerformance,
            3 => Step::BacklogInformation,
            4 => Step::OtherParameters,
            _ => Step::Review,
        }
    }
}

impl From<Step> for u8 {
    fn from(step: Step) -> Self {
        step.number()
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

// ============================================================================
// State
// ============================================================================

/// Everything the draft store persists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    #[serde(default)]
    pub student_details: Option<StudentDetails>,
    #[serde(default)]
    pub subject_performance: Vec<SubjectPerformance>,
    #[serde(default)]
    pub backlog_information: Vec<BacklogInformation>,
    #[serde(default)]
    pub other_parameters: Option<OtherParameters>,
    #[serde(default)]
    pub current_step: Step,
}

/// The slice submitted by one collection step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepData {
    StudentDetails(StudentDetails),
    SubjectPerformance(Vec<SubjectPerformance>),
    BacklogInformation(Vec<BacklogInformation>),
    OtherParameters(OtherParameters),
}

impl StepData {
    pub fn step(&self) -> Step {
        match self {
            StepData::StudentDetails(_) => Step::StudentDetails,
            StepData::SubjectPerformance(_) => Step::SubjectPerformance,
            StepData::BacklogInformation(_) => Step::BacklogInformation,
            StepData::OtherParameters(_) => Step::OtherParameters,
        }
    }

    /// Parse the JSON body of a step submission. Row steps take an array,
    /// the others an object.
    pub fn from_json(step: Step, json: &str) -> Result<Self, AppError> {
        let data = match step {
            Step::StudentDetails => StepData::StudentDetails(serde_json::from_str(json)?),
            Step::SubjectPerformance => StepData::SubjectPerformance(serde_json::from_str(json)?),
            Step::BacklogInformation => StepData::BacklogInformation(serde_json::from_str(json)?),
            Step::OtherParameters => StepData::OtherParameters(serde_json::from_str(json)?),
            Step::Review => {
                return Err(AppError::StepDataError(
                    "the review step takes no data".to_string(),
                ))
            }
        };
        Ok(data)
    }
}

// ============================================================================
// Controller
// ============================================================================

pub struct Wizard<S: DraftStore> {
    state: WizardState,
    store: S,
}

impl<S: DraftStore> Wizard<S> {
    /// Restore the saved draft, or start fresh if there is none.
    pub fn open(store: S) -> Self {
        let state = match store.load() {
            Some(state) => {
                info!("Restored draft at step {}", state.current_step);
                state
            }
            None => WizardState::default(),
        };
        let mut wizard = Self { state, store };
        if wizard.seed_subject_row() {
            wizard.persist();
        }
        wizard
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn current_step(&self) -> Step {
        self.state.current_step
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate and store a step's slice, then advance by one step.
    /// On failure nothing changes.
    pub fn submit(&mut self, data: StepData) -> Result<Step, WizardError> {
        let current = self.state.current_step;
        if current == Step::Review {
            return Err(WizardError::NothingToSubmit);
        }
        if data.step() != current {
            return Err(WizardError::StepMismatch {
                current,
                submitted: data.step(),
            });
        }

        match data {
            StepData::StudentDetails(details) => {
                validate_student_details(&details).map_err(WizardError::Validation)?;
                self.state.student_details = Some(details);
            }
            StepData::SubjectPerformance(mut rows) => {
                validate_subjects(&rows).map_err(WizardError::Validation)?;
                assign_missing_ids(rows.iter_mut().map(|r| &mut r.id));
                self.state.subject_performance = rows;
            }
            StepData::BacklogInformation(mut rows) => {
                validate_backlog(&rows).map_err(WizardError::Validation)?;
                assign_missing_ids(rows.iter_mut().map(|r| &mut r.id));
                self.state.backlog_information = rows;
            }
            StepData::OtherParameters(params) => {
                validate_other_parameters(&params).map_err(WizardError::Validation)?;
                // Rows may have been edited after their step was submitted.
                self.check_collected_slices()?;
                self.state.other_parameters = Some(params);
            }
        }

        self.state.current_step = current.next();
        info!("Advanced from {} to {}", current, self.state.current_step);
        self.seed_subject_row();
        self.persist();
        Ok(self.state.current_step)
    }

    /// Go back one step without validating, stopping at the first.
    pub fn back(&mut self) -> Step {
        let previous = self.state.current_step.previous();
        if previous != self.state.current_step {
            debug!("Back from {} to {}", self.state.current_step, previous);
            self.state.current_step = previous;
            self.seed_subject_row();
            self.persist();
        }
        self.state.current_step
    }

    /// From review, return to the first step keeping every slice.
    pub fn edit(&mut self) -> Result<Step, WizardError> {
        if self.state.current_step != Step::Review {
            return Err(WizardError::NotOnReview(self.state.current_step));
        }
        self.state.current_step = Step::StudentDetails;
        self.persist();
        Ok(self.state.current_step)
    }

    /// Discard everything and remove the saved draft.
    pub fn new_entry(&mut self) -> Result<(), AppError> {
        self.state = WizardState::default();
        self.store.clear()?;
        info!("Started a new entry");
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Row editing
    // ------------------------------------------------------------------------

    /// Append a blank subject row and return its id.
    pub fn add_subject(&mut self) -> String {
        let row = SubjectPerformance::blank();
        let id = row.id.clone();
        self.state.subject_performance.push(row);
        self.persist();
        id
    }

    /// Remove a subject row. The last remaining row cannot be removed.
    pub fn remove_subject(&mut self, id: &str) -> bool {
        let rows = &mut self.state.subject_performance;
        if rows.len() <= 1 {
            return false;
        }
        let before = rows.len();
        rows.retain(|r| r.id != id);
        let removed = rows.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    pub fn update_subject(
        &mut self,
        id: &str,
        field: SubjectField,
        value: String,
    ) -> Result<(), WizardError> {
        let row = self
            .state
            .subject_performance
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| WizardError::UnknownRow(id.to_string()))?;
        row.set(field, value);
        self.persist();
        Ok(())
    }

    pub fn add_backlog(&mut self) -> String {
        let row = BacklogInformation::blank();
        let id = row.id.clone();
        self.state.backlog_information.push(row);
        self.persist();
        id
    }

    /// Remove a backlog row. Backlog may become empty.
    pub fn remove_backlog(&mut self, id: &str) -> bool {
        let rows = &mut self.state.backlog_information;
        let before = rows.len();
        rows.retain(|r| r.id != id);
        let removed = rows.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    pub fn update_backlog(
        &mut self,
        id: &str,
        field: BacklogField,
        value: String,
    ) -> Result<(), WizardError> {
        let row = self
            .state
            .backlog_information
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| WizardError::UnknownRow(id.to_string()))?;
        row.set(field, value);
        self.persist();
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Assembly
    // ------------------------------------------------------------------------

    /// Assemble the report from the four slices.
    pub fn report(&self) -> Result<MentoringReport, WizardError> {
        self.check_collected_slices()?;
        let student_details = self
            .state
            .student_details
            .clone()
            .ok_or_else(|| WizardError::Incomplete("student details not submitted".to_string()))?;
        let other_parameters = self
            .state
            .other_parameters
            .clone()
            .ok_or_else(|| WizardError::Incomplete("other parameters not submitted".to_string()))?;

        Ok(MentoringReport {
            student_details,
            subject_performance: self.state.subject_performance.clone(),
            backlog_information: self.state.backlog_information.clone(),
            other_parameters,
        })
    }

    fn check_collected_slices(&self) -> Result<(), WizardError> {
        let details = self
            .state
            .student_details
            .as_ref()
            .ok_or_else(|| WizardError::Incomplete("student details not submitted".to_string()))?;
        validate_student_details(details)
            .map_err(|e| WizardError::Incomplete(format!("student details: {}", e)))?;
        validate_subjects(&self.state.subject_performance)
            .map_err(|e| WizardError::Incomplete(format!("subject performance: {}", e)))?;
        validate_backlog(&self.state.backlog_information)
            .map_err(|e| WizardError::Incomplete(format!("backlog information: {}", e)))?;
        Ok(())
    }

    /// The subject step always shows at least one row. Returns whether a
    /// row was added.
    fn seed_subject_row(&mut self) -> bool {
        if self.state.current_step == Step::SubjectPerformance
            && self.state.subject_performance.is_empty()
        {
            self.state.subject_performance.push(SubjectPerformance::blank());
            return true;
        }
        false
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.state) {
            warn!("Failed to save draft: {}", e);
        }
    }
}

fn assign_missing_ids<'a>(ids: impl Iterator<Item = &'a mut String>) {
    for id in ids.filter(|id| id.is_empty()) {
        *id = new_row_id();
    }
}
