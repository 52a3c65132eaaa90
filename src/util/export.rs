//! Writing projects and backups out as shareable JSON files.

use std::fs;
use std::path::{Path, PathBuf};

use time::OffsetDateTime;

use crate::domain::Project;

use super::persistence::PersistError;

const BACKUP_PREFIX: &str = "apu_backup";

/// Default directory for exported files: the user's download folder, falling
/// back to the working directory.
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Filename for a single-project export: the project name with whitespace
/// collapsed to underscores.
pub fn project_export_filename(name: &str) -> String {
    let stem = name.split_whitespace().collect::<Vec<_>>().join("_");
    if stem.is_empty() {
        "project.json".to_string()
    } else {
        format!("{stem}.json")
    }
}

/// Filename for a full-store backup, date-stamped so repeated backups don't
/// clobber each other.
pub fn backup_filename() -> String {
    let date = OffsetDateTime::now_utc().date();
    format!(
        "{BACKUP_PREFIX}_{:04}-{:02}-{:02}.json",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Writes one project as a standalone JSON file. Returns the path written.
pub fn export_project(dir: &Path, project: &Project) -> Result<PathBuf, PersistError> {
    let path = dir.join(project_export_filename(&project.name));
    fs::create_dir_all(dir)?;
    let json = serde_json::to_string_pretty(project)?;
    fs::write(&path, json)?;
    Ok(path)
}

/// Writes the whole project collection as a backup file. Returns the path
/// written. Restoring it later replaces the store wholesale.
pub fn export_backup(dir: &Path, projects: &[Project]) -> Result<PathBuf, PersistError> {
    let path = dir.join(backup_filename());
    fs::create_dir_all(dir)?;
    let json = serde_json::to_string_pretty(projects)?;
    fs::write(&path, json)?;
    Ok(path)
}
