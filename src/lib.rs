//! mentoring-report: collect a student mentoring report one step at a time
//! and export it as a paginated A4 PDF.

pub mod assets;
pub mod draft;
pub mod error;
pub mod export;
pub mod layout;
pub mod model;
pub mod preview;
pub mod render;
pub mod sections;
pub mod validation;
pub mod wizard;

pub use draft::{DraftStore, FileDraftStore, MemoryDraftStore};
pub use error::{AppError, WizardError};
pub use export::{export_report, ExportOptions, ExportSummary};
pub use model::{BacklogInformation, MentoringReport, OtherParameters, StudentDetails, SubjectPerformance};
pub use wizard::{Step, StepData, Wizard, WizardState};
