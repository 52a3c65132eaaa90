//! Authoritative project collection with durable persistence.
//!
//! - One `ProjectStore` owns every project. All mutation goes through its
//!   `&mut self` methods and runs to completion before the next is
//!   observable: single writer, no locks. Embedders with real threads must
//!   confine the store to one task and marshal requests into it.
//! - Every mutation persists the whole collection in a single write. That is
//!   O(total stored data) per edit: a deliberate tradeoff for atomicity and
//!   simplicity at single-user scale, not an oversight.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::{project_stats, Apu, ApuDraft, Project, ProjectStats};
use crate::util::persistence::{data_file, load_projects, save_projects, PersistError};
use crate::util::{generate_id, unix_now};

pub mod reconcile;

pub use reconcile::{classify, ImportError, ImportOutcome, ImportShape};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no project with id {0}")]
    UnknownProject(String),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// In-memory project collection backed by one JSON document on disk.
#[derive(Debug)]
pub struct ProjectStore {
    projects: Vec<Project>,
    active: Option<String>,
    path: PathBuf,
}

impl ProjectStore {
    /// Opens the store backed by the given file. A missing or corrupt
    /// document is not fatal: the store starts empty and the next mutation
    /// rewrites the file.
    pub fn load(path: PathBuf) -> Self {
        let projects = load_projects(&path).unwrap_or_else(|| {
            println!("[store] No usable project data at {}; starting empty", path.display());
            Vec::new()
        });
        Self {
            projects,
            active: None,
            path,
        }
    }

    /// Opens the store at the platform default location.
    pub fn open_default() -> Result<Self, StoreError> {
        let path = data_file().ok_or(PersistError::StorageUnavailable)?;
        Ok(Self::load(path))
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Derived cost roll-up for one project. Recomputed from source data on
    /// every call; nothing here is cached or persisted.
    pub fn stats(&self, id: &str) -> Option<ProjectStats> {
        self.get(id).map(|p| project_stats(&p.apus))
    }

    /// Creates an empty project, appends it and persists the collection.
    pub fn create(&mut self, name: &str) -> Result<Project, StoreError> {
        let project = Project {
            id: generate_id(),
            name: name.to_string(),
            last_modified: unix_now(),
            ..Project::default()
        };
        self.projects.push(project.clone());
        self.persist()?;
        Ok(project)
    }

    /// Sets the active-project pointer. Pure navigation state: nothing is
    /// persisted and nothing is mutated.
    pub fn open(&mut self, id: &str) -> Result<&Project, StoreError> {
        let project = self
            .projects
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::UnknownProject(id.to_string()))?;
        self.active = Some(project.id.clone());
        Ok(project)
    }

    pub fn close(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<&Project> {
        self.active.as_deref().and_then(|id| self.get(id))
    }

    /// The one mutation point for APU add/edit/delete: replaces the
    /// project's APU sequence wholesale, bumps `last_modified` and persists.
    pub fn replace_apus(&mut self, project_id: &str, apus: Vec<Apu>) -> Result<(), StoreError> {
        let project = self
            .projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or_else(|| StoreError::UnknownProject(project_id.to_string()))?;
        project.apus = apus;
        project.last_modified = unix_now();
        self.persist()
    }

    /// Commits an editor draft into a project. Keyed by id presence: when the
    /// drafted APU was deleted while the editor was open, nothing changes and
    /// `Ok(false)` comes back (a benign race, not a fault).
    pub fn commit_draft(&mut self, project_id: &str, draft: &ApuDraft) -> Result<bool, StoreError> {
        let project = self
            .projects
            .iter()
            .find(|p| p.id == project_id)
            .ok_or_else(|| StoreError::UnknownProject(project_id.to_string()))?;
        let mut apus = project.apus.clone();
        if !draft.commit_into(&mut apus) {
            return Ok(false);
        }
        self.replace_apus(project_id, apus)?;
        Ok(true)
    }

    /// Removes a project and persists. Irreversible except by restoring an
    /// external backup.
    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        if !self.projects.iter().any(|p| p.id == id) {
            return Err(StoreError::UnknownProject(id.to_string()));
        }
        self.projects.retain(|p| p.id != id);
        if self.active.as_deref() == Some(id) {
            self.active = None;
        }
        self.persist()
    }

    /// Replaces the entire collection with a restored backup. Destructive and
    /// unconditional once called; confirmation belongs to the caller; there
    /// is no undo.
    pub fn restore_backup(&mut self, projects: Vec<Project>) -> Result<usize, StoreError> {
        self.projects = projects;
        self.active = None;
        self.persist()?;
        Ok(self.projects.len())
    }

    /// Appends a project that already went through import reconciliation.
    /// Additive only: existing projects are never touched.
    fn append_imported(&mut self, project: Project) -> Result<(), StoreError> {
        self.projects.push(project);
        self.persist()
    }

    fn persist(&self) -> Result<(), StoreError> {
        save_projects(&self.path, &self.projects)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Resource, ResourceType};

    fn temp_store() -> (tempfile::TempDir, ProjectStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ProjectStore::load(dir.path().join("projects.json"));
        (dir, store)
    }

    fn sample_apu(id: &str) -> Apu {
        Apu {
            id: id.to_string(),
            code: "01.01".to_string(),
            description: "Excavation".to_string(),
            unit: "m3".to_string(),
            quantity: 80.0,
            resources: vec![Resource {
                id: "r1".to_string(),
                name: "Laborer".to_string(),
                unit: "hr".to_string(),
                price: 12.0,
                quantity: 1.5,
                kind: ResourceType::Labor,
            }],
            indirects_percentage: 10.0,
            profit_percentage: 5.0,
            category: String::new(),
        }
    }

    #[test]
    fn missing_file_starts_empty() {
        let (_dir, store) = temp_store();
        assert!(store.projects().is_empty());
    }

    #[test]
    fn corrupt_file_starts_empty_and_recovers_on_next_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        std::fs::write(&path, "{not json!").unwrap();

        let mut store = ProjectStore::load(path.clone());
        assert!(store.projects().is_empty());

        store.create("Fresh start").unwrap();
        let reloaded = ProjectStore::load(path);
        assert_eq!(reloaded.projects().len(), 1);
    }

    #[test]
    fn create_assigns_distinct_ids_and_persists() {
        let (dir, mut store) = temp_store();
        let a = store.create("First").unwrap().id.clone();
        let b = store.create("Second").unwrap().id.clone();
        assert_ne!(a, b);

        let reloaded = ProjectStore::load(dir.path().join("projects.json"));
        assert_eq!(reloaded.projects().len(), 2);
    }

    #[test]
    fn replace_apus_bumps_last_modified() {
        let (_dir, mut store) = temp_store();
        let id = store.create("Site works").unwrap().id.clone();
        let before = store.get(&id).unwrap().last_modified;

        store.replace_apus(&id, vec![sample_apu("a1")]).unwrap();
        let project = store.get(&id).unwrap();
        assert_eq!(project.apus.len(), 1);
        assert!(project.last_modified >= before);
    }

    #[test]
    fn replace_apus_rejects_unknown_project() {
        let (_dir, mut store) = temp_store();
        let err = store.replace_apus("nope", vec![]).unwrap_err();
        assert!(matches!(err, StoreError::UnknownProject(_)));
    }

    #[test]
    fn delete_survives_a_reload() {
        let (dir, mut store) = temp_store();
        let keep = store.create("Keep").unwrap().id.clone();
        let gone = store.create("Drop").unwrap().id.clone();

        store.delete(&gone).unwrap();
        assert!(store.get(&gone).is_none());

        let reloaded = ProjectStore::load(dir.path().join("projects.json"));
        assert_eq!(reloaded.projects().len(), 1);
        assert_eq!(reloaded.projects()[0].id, keep);
    }

    #[test]
    fn open_and_close_track_the_active_project() {
        let (_dir, mut store) = temp_store();
        let id = store.create("Active").unwrap().id.clone();

        store.open(&id).unwrap();
        assert_eq!(store.active().unwrap().id, id);

        store.close();
        assert!(store.active().is_none());
    }

    #[test]
    fn deleting_the_active_project_clears_the_pointer() {
        let (_dir, mut store) = temp_store();
        let id = store.create("Active").unwrap().id.clone();
        store.open(&id).unwrap();
        store.delete(&id).unwrap();
        assert!(store.active().is_none());
    }

    #[test]
    fn commit_draft_lands_by_id() {
        let (_dir, mut store) = temp_store();
        let id = store.create("Drafted").unwrap().id.clone();
        store.replace_apus(&id, vec![sample_apu("a1")]).unwrap();

        let mut draft = ApuDraft::from_apu(store.get(&id).unwrap().apu("a1").unwrap());
        draft.apu_mut().description = "Excavation, rock".to_string();
        assert!(store.commit_draft(&id, &draft).unwrap());
        assert_eq!(store.get(&id).unwrap().apus[0].description, "Excavation, rock");
    }

    #[test]
    fn commit_draft_for_deleted_apu_is_a_no_op() {
        let (_dir, mut store) = temp_store();
        let id = store.create("Drafted").unwrap().id.clone();
        store.replace_apus(&id, vec![sample_apu("a1")]).unwrap();

        let draft = ApuDraft::from_apu(store.get(&id).unwrap().apu("a1").unwrap());
        // The APU goes away while the draft is open.
        store.replace_apus(&id, vec![]).unwrap();

        assert!(!store.commit_draft(&id, &draft).unwrap());
        assert!(store.get(&id).unwrap().apus.is_empty());
    }

    #[test]
    fn stats_reflect_current_apus() {
        let (_dir, mut store) = temp_store();
        let id = store.create("Stats").unwrap().id.clone();
        store.replace_apus(&id, vec![sample_apu("a1")]).unwrap();

        let stats = store.stats(&id).unwrap();
        // direct 18, +10% indirects = 19.8, +5% profit = 20.79, ×80 units
        assert!((stats.total_price - 20.79 * 80.0).abs() < 1e-9);
        assert_eq!(stats.labor_cost, 18.0);
    }
}
