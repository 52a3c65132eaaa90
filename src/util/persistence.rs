use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde_json::Error as SerdeError;

use crate::domain::Project;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "ApuEstimator";
const APP_NAME: &str = "ApuEstimator";

/// Platform-specific location of the persisted project collection. The whole
/// store lives in this one document.
pub fn data_file() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join("projects.json"))
}

/// Loads the persisted project collection. Any failure (missing file,
/// unreadable data, corrupt JSON) yields `None`: the store starts empty
/// rather than crashing on a bad document.
pub fn load_projects(path: &Path) -> Option<Vec<Project>> {
    let data = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&data) {
        Ok(projects) => Some(projects),
        Err(err) => {
            println!("[persistence] Discarding corrupt project file {}: {err}", path.display());
            None
        }
    }
}

/// Rewrites the persisted document in full. Every store mutation funnels
/// through here, so a reader never observes a partially applied change.
pub fn save_projects(path: &Path, projects: &[Project]) -> Result<(), PersistError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(projects)?;
    fs::write(path, json)?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}
