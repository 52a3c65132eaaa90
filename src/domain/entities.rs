use serde::{Deserialize, Serialize};

/// What a resource contributes to a unit of work.
///
/// Serialized in uppercase because the on-disk project files (and every
/// import/backup file we accept) carry `"MATERIAL"`, `"LABOR"`, ...
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResourceType {
    #[default]
    Material,
    Labor,
    Equipment,
    Transport,
}

impl ResourceType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Material => "Material",
            Self::Labor => "Labor",
            Self::Equipment => "Equipment",
            Self::Transport => "Transport",
        }
    }
}

/// One priced input to a unit of work. Owned exclusively by its APU;
/// resources are never shared across APUs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub unit: String,
    /// Price per unit of this resource.
    #[serde(default)]
    pub price: f64,
    /// Consumption rate per unit of the parent work item, NOT a project-wide
    /// amount (that lives on the APU).
    #[serde(default)]
    pub quantity: f64,
    #[serde(rename = "type", default)]
    pub kind: ResourceType,
}

/// Unit price analysis: the recipe of priced resources needed to produce one
/// unit of a construction work item.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Apu {
    pub id: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub unit: String,
    /// Project-wide quantity of this work item (e.g. 500 m²). Distinct from
    /// each resource's own per-unit consumption rate.
    #[serde(default)]
    pub quantity: f64,
    /// Insertion order is preserved; ids are unique within the APU.
    #[serde(default)]
    pub resources: Vec<Resource>,
    /// Overhead percentage applied to direct cost.
    #[serde(default)]
    pub indirects_percentage: f64,
    /// Margin percentage applied to direct cost plus indirects.
    #[serde(default)]
    pub profit_percentage: f64,
    #[serde(default)]
    pub category: String,
}

impl Apu {
    /// Looks up a resource by id within this APU.
    pub fn resource(&self, resource_id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == resource_id)
    }
}

/// A construction project: an ordered list of APUs plus metadata.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Assigned once at creation; only reassigned when a project file is
    /// imported (to avoid colliding with an existing project).
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Unix timestamp (seconds); bumped on every mutation of `apus`.
    #[serde(default)]
    pub last_modified: u64,
    #[serde(default)]
    pub apus: Vec<Apu>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
}

impl Project {
    /// Looks up an APU by id within this project.
    pub fn apu(&self, apu_id: &str) -> Option<&Apu> {
        self.apus.iter().find(|a| a.id == apu_id)
    }
}

/// Result of the external text-to-APU generation service.
///
/// Every field is optional; an entirely empty result means "no generation"
/// and is not an error. Returned resources replace a draft's resource list
/// wholesale, they are never merged with existing ones.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GeneratedApu {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub resources: Option<Vec<Resource>>,
}

impl GeneratedApu {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.unit.is_none() && self.resources.is_none()
    }
}

/// Roll-up of a project's costs. Derived on demand from the APUs and never
/// persisted, so it cannot go stale.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectStats {
    /// Sum of every APU's direct cost, before any markup.
    pub total_direct_cost: f64,
    /// Marked-up total: Σ unit_price(apu) × apu.quantity.
    pub total_price: f64,
    pub material_cost: f64,
    pub labor_cost: f64,
    pub equipment_cost: f64,
    pub transport_cost: f64,
}

impl ProjectStats {
    pub fn category_cost(&self, kind: ResourceType) -> f64 {
        match kind {
            ResourceType::Material => self.material_cost,
            ResourceType::Labor => self.labor_cost,
            ResourceType::Equipment => self.equipment_cost,
            ResourceType::Transport => self.transport_cost,
        }
    }
}
