//! Draft persistence.
//!
//! A single key-value slot holds the whole `WizardState` as JSON. Saving
//! overwrites the slot; `clear` removes it. A draft that cannot be read
//! loads as "no draft".

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::wizard::WizardState;

/// Name of the draft slot.
pub const DRAFT_KEY: &str = "mentoringData";

pub trait DraftStore {
    /// Saved state, or `None` when there is no usable draft.
    fn load(&self) -> Option<WizardState>;
    /// Replace the saved state.
    fn save(&mut self, state: &WizardState) -> Result<(), AppError>;
    /// Remove the slot entirely.
    fn clear(&mut self) -> Result<(), AppError>;
}

// ============================================================================
// File Store
// ============================================================================

/// Draft kept as `<dir>/mentoringData.json`.
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    dir: PathBuf,
}

impl FileDraftStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Platform data directory, or the working directory if there is none.
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .map(|d| d.join("mentoring-report"))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", DRAFT_KEY))
    }

    pub fn exists(&self) -> bool {
        self.path().exists()
    }
}

impl DraftStore for FileDraftStore {
    fn load(&self) -> Option<WizardState> {
        let path = self.path();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                debug!("No draft at {:?}: {}", path, e);
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(state) => Some(state),
            Err(e) => {
                warn!("Ignoring unreadable draft at {:?}: {}", path, e);
                None
            }
        }
    }

    fn save(&mut self, state: &WizardState) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(state)?;
        write_atomic(&self.path(), json.as_bytes())?;
        debug!("Saved draft to {:?}", self.path());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), AppError> {
        let path = self.path();
        match std::fs::remove_file(&path) {
            Ok(()) => {
                info!("Removed draft {:?}", path);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::DraftError(format!("{:?}: {}", path, e))),
        }
    }
}

/// Temp file in the target directory, then rename over the target, so an
/// interrupted save leaves the previous draft intact.
fn write_atomic(target: &Path, bytes: &[u8]) -> Result<(), AppError> {
    let parent = target
        .parent()
        .ok_or_else(|| AppError::DraftError(format!("{:?} has no parent directory", target)))?;
    std::fs::create_dir_all(parent)?;

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(bytes)?;
    temp.flush()?;
    temp.persist(target)
        .map_err(|e| AppError::DraftError(format!("{:?}: {}", target, e)))?;
    Ok(())
}

// ============================================================================
// Memory Store
// ============================================================================

/// In-process slot map holding serialized drafts.
#[derive(Debug, Clone, Default)]
pub struct MemoryDraftStore {
    slots: HashMap<String, String>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_draft(&self) -> bool {
        self.slots.contains_key(DRAFT_KEY)
    }
}

impl DraftStore for MemoryDraftStore {
    fn load(&self) -> Option<WizardState> {
        self.slots
            .get(DRAFT_KEY)
            .and_then(|json| serde_json::from_str(json).ok())
    }

    fn save(&mut self, state: &WizardState) -> Result<(), AppError> {
        self.slots
            .insert(DRAFT_KEY.to_string(), serde_json::to_string(state)?);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), AppError> {
        self.slots.remove(DRAFT_KEY);
        Ok(())
    }
}
