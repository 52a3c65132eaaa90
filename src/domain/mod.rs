//! Domain model and cost roll-up logic live here.

pub mod costing;
pub mod draft;
pub mod entities;

pub use costing::{direct_cost, project_stats, unit_price};
pub use draft::ApuDraft;
pub use entities::{Apu, GeneratedApu, Project, ProjectStats, Resource, ResourceType};
