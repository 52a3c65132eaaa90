//! Staged editing of an APU.
//!
//! Edits never touch the project directly: the editor works on a deep copy
//! held here and commits it back in one step. Until then the stored APU is
//! untouched, so abandoning the editor loses nothing but the draft.

use crate::util::generate_id;

use super::entities::{Apu, GeneratedApu, Resource};

/// An in-memory, uncommitted working copy of an APU being edited.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApuDraft {
    apu: Apu,
}

impl ApuDraft {
    /// Starts a blank draft for a brand-new APU.
    pub fn blank() -> Self {
        Self {
            apu: Apu {
                id: generate_id(),
                ..Apu::default()
            },
        }
    }

    /// Starts a draft from an existing APU (deep copy).
    pub fn from_apu(apu: &Apu) -> Self {
        Self { apu: apu.clone() }
    }

    pub fn apu(&self) -> &Apu {
        &self.apu
    }

    pub fn apu_mut(&mut self) -> &mut Apu {
        &mut self.apu
    }

    /// Adds a resource to the draft. Rejected (returns false) when the id is
    /// already taken within this APU; resource ids must stay unique and this
    /// editing boundary is where that invariant is enforced.
    pub fn add_resource(&mut self, resource: Resource) -> bool {
        if self.apu.resources.iter().any(|r| r.id == resource.id) {
            return false;
        }
        self.apu.resources.push(resource);
        true
    }

    /// Replaces the resource with a matching id. Returns false when no
    /// resource carries that id.
    pub fn update_resource(&mut self, resource: Resource) -> bool {
        match self.apu.resources.iter_mut().find(|r| r.id == resource.id) {
            Some(slot) => {
                *slot = resource;
                true
            }
            None => false,
        }
    }

    pub fn remove_resource(&mut self, resource_id: &str) -> bool {
        let before = self.apu.resources.len();
        self.apu.resources.retain(|r| r.id != resource_id);
        self.apu.resources.len() != before
    }

    /// Applies a generation-service result: description and unit fill in when
    /// present, and any returned resources replace the draft's list wholesale.
    pub fn apply_generated(&mut self, generated: GeneratedApu) {
        if let Some(description) = generated.description {
            self.apu.description = description;
        }
        if let Some(unit) = generated.unit {
            self.apu.unit = unit;
        }
        if let Some(resources) = generated.resources {
            self.apu.resources = resources;
        }
    }

    /// Commits the draft into an APU list, keyed by id presence.
    ///
    /// When no APU carries the draft's id (it was deleted while the draft was
    /// open) the commit is silently discarded: recreating a deleted APU would
    /// override the user's intent. Returns whether the draft landed.
    pub fn commit_into(&self, apus: &mut Vec<Apu>) -> bool {
        match apus.iter_mut().find(|a| a.id == self.apu.id) {
            Some(slot) => {
                *slot = self.apu.clone();
                true
            }
            None => false,
        }
    }

    /// Consumes the draft as a standalone APU, for append flows where the APU
    /// does not exist in the project yet.
    pub fn into_apu(self) -> Apu {
        self.apu
    }
}
