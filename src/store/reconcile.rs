//! Reconciling externally supplied data with the store.
//!
//! Import and restore files arrive in three shapes that must be told apart
//! before anything mutates: a full backup (array of projects), a single
//! exported project, or a legacy bare list of APUs. Classification happens
//! on the parsed JSON value first and the store only mutates once the whole
//! payload deserialized cleanly: parse-then-commit, never
//! commit-while-parsing.

use serde_json::Value;
use thiserror::Error;

use crate::domain::{Apu, Project};
use crate::util::persistence::PersistError;
use crate::util::{generate_id, unix_now};

use super::{ProjectStore, StoreError};

/// Name given to the synthetic project wrapping a legacy APU list.
pub const IMPORTED_PROJECT_NAME: &str = "Imported project";

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unrecognized import format")]
    Unrecognized,
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Tagged classification of a parsed import payload.
#[derive(Clone, Debug, PartialEq)]
pub enum ImportShape {
    /// Array of project-shaped records; restoring replaces the whole store.
    FullBackup(Vec<Project>),
    /// One exported project; appended under a fresh id.
    SingleProject(Project),
    /// Pre-project-era export: a bare APU list, wrapped on import.
    LegacyApuList(Vec<Apu>),
    Unrecognized,
}

/// What an import did, for callers to surface.
#[derive(Clone, Debug, PartialEq)]
pub enum ImportOutcome {
    RestoredBackup { projects: usize },
    ImportedProject { id: String },
    ImportedLegacyApus { id: String, apus: usize },
}

/// Classifies a parsed JSON value by structure.
///
/// An array whose elements all carry `apus` is a backup (an empty array
/// vacuously qualifies: restoring it empties the store). An object carrying
/// both `apus` and `name` is a single project. Any other array is treated as
/// a legacy APU list if its elements deserialize as APUs. Everything else is
/// unrecognized.
pub fn classify(value: Value) -> ImportShape {
    if let Some(elements) = value.as_array() {
        let project_shaped = elements
            .iter()
            .all(|e| e.as_object().is_some_and(|o| o.contains_key("apus")));
        return if project_shaped {
            match serde_json::from_value::<Vec<Project>>(value) {
                Ok(projects) => ImportShape::FullBackup(projects),
                Err(_) => ImportShape::Unrecognized,
            }
        } else {
            match serde_json::from_value::<Vec<Apu>>(value) {
                Ok(apus) => ImportShape::LegacyApuList(apus),
                Err(_) => ImportShape::Unrecognized,
            }
        };
    }

    if let Some(fields) = value.as_object() {
        if fields.contains_key("apus") && fields.contains_key("name") {
            return match serde_json::from_value::<Project>(value) {
                Ok(project) => ImportShape::SingleProject(project),
                Err(_) => ImportShape::Unrecognized,
            };
        }
        return ImportShape::Unrecognized;
    }

    ImportShape::Unrecognized
}

impl ProjectStore {
    /// Parses and applies an import/restore payload.
    ///
    /// Backups replace the store wholesale (no undo; the caller owns the
    /// confirmation gate). The other two shapes append and never touch
    /// existing projects: imported ids are re-assigned so only ids stay
    /// unique, names may collide freely. Malformed or unrecognized input
    /// leaves the store exactly as it was.
    pub fn import_json(&mut self, raw: &str) -> Result<ImportOutcome, ImportError> {
        let value: Value = serde_json::from_str(raw)?;
        match classify(value) {
            ImportShape::FullBackup(projects) => {
                let count = self
                    .restore_backup(projects)
                    .map_err(into_import_error)?;
                Ok(ImportOutcome::RestoredBackup { projects: count })
            }
            ImportShape::SingleProject(mut project) => {
                // The imported id is discarded: it may collide with a project
                // already in the store.
                project.id = generate_id();
                let id = project.id.clone();
                self.append_imported(project).map_err(into_import_error)?;
                Ok(ImportOutcome::ImportedProject { id })
            }
            ImportShape::LegacyApuList(apus) => {
                let count = apus.len();
                let project = Project {
                    id: generate_id(),
                    name: IMPORTED_PROJECT_NAME.to_string(),
                    last_modified: unix_now(),
                    apus,
                    ..Project::default()
                };
                let id = project.id.clone();
                self.append_imported(project).map_err(into_import_error)?;
                Ok(ImportOutcome::ImportedLegacyApus { id, apus: count })
            }
            ImportShape::Unrecognized => Err(ImportError::Unrecognized),
        }
    }
}

fn into_import_error(err: StoreError) -> ImportError {
    match err {
        StoreError::Persist(persist) => ImportError::Persist(persist),
        // Imports never address a project by id, so this cannot happen; keep
        // the conversion total instead of panicking.
        StoreError::UnknownProject(_) => ImportError::Unrecognized,
    }
}
