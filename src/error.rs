use thiserror::Error;

use crate::validation::ValidationErrors;
use crate::wizard::Step;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to create PDF: {0}")]
    PdfError(String),
    #[error("Draft store error: {0}")]
    DraftError(String),
    #[error("Failed to load image: {0}")]
    AssetError(String),
    #[error("Invalid step data: {0}")]
    StepDataError(String),
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Rejected wizard transitions. None of these change wizard state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("{0}")]
    Validation(ValidationErrors),
    #[error("{submitted} data submitted while on step {current}")]
    StepMismatch { current: Step, submitted: Step },
    #[error("The review step has nothing to submit")]
    NothingToSubmit,
    #[error("Only available from the review step (currently on {0})")]
    NotOnReview(Step),
    #[error("No row with id {0}")]
    UnknownRow(String),
    #[error("Report is incomplete: {0}")]
    Incomplete(String),
}
