//! Cost-estimating core for construction budgets.
//!
//! A budget is a set of projects, each an ordered list of unit price
//! analyses (APUs). An APU is the recipe of priced resources (material,
//! labor, equipment, transport) needed to produce one unit of a work item.
//! This crate owns the cost roll-up, the authoritative project store with
//! its JSON persistence, and the reconciliation of imported and restored
//! data. Rendering, dialogs and file pickers are callers' business: they
//! hand plain data records in and get plain records (or derived stats) back.

pub mod domain;
pub mod infra;
pub mod store;
pub mod util;

pub use domain::{
    direct_cost, project_stats, unit_price, Apu, ApuDraft, GeneratedApu, Project, ProjectStats,
    Resource, ResourceType,
};
pub use infra::{GeneratorClient, GeneratorError};
pub use store::{
    classify, ImportError, ImportOutcome, ImportShape, ProjectStore, StoreError,
};
pub use util::export::{backup_filename, export_backup, export_project, project_export_filename};
