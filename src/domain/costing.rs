//! Cost roll-up for APUs and projects.
//!
//! - Pure functions over the domain entities; nothing here mutates input
//!   or fails.
//! - Negative prices or quantities are propagated arithmetically, never
//!   rejected: validation belongs to the editing boundary, not the engine.
//! - No currency rounding happens here; formatting is a caller concern.

use super::entities::{Apu, ProjectStats, ResourceType};

/// Direct cost of one unit of work: Σ resource price × consumption rate.
pub fn direct_cost(apu: &Apu) -> f64 {
    apu.resources.iter().map(|r| r.price * r.quantity).sum()
}

/// Marked-up price of one unit of work.
///
/// Indirects apply to the direct cost only; profit applies to direct cost
/// plus indirects. The two-step compounding is intentional and must not be
/// collapsed into a single combined percentage.
pub fn unit_price(apu: &Apu) -> f64 {
    let direct = direct_cost(apu);
    let indirects = direct * apu.indirects_percentage / 100.0;
    let profit = (direct + indirects) * apu.profit_percentage / 100.0;
    direct + indirects + profit
}

/// Aggregates a project's APUs into [`ProjectStats`].
///
/// The total price carries each APU's markup and project-wide quantity; the
/// per-category subtotals are raw resource cost (no markup, no APU quantity)
/// so callers can show cost composition separately from the marked-up total.
/// That asymmetry is deliberate.
pub fn project_stats(apus: &[Apu]) -> ProjectStats {
    let mut stats = ProjectStats::default();

    for apu in apus {
        stats.total_direct_cost += direct_cost(apu);
        stats.total_price += unit_price(apu) * apu.quantity;

        for resource in &apu.resources {
            let cost = resource.price * resource.quantity;
            match resource.kind {
                ResourceType::Material => stats.material_cost += cost,
                ResourceType::Labor => stats.labor_cost += cost,
                ResourceType::Equipment => stats.equipment_cost += cost,
                ResourceType::Transport => stats.transport_cost += cost,
            }
        }
    }

    stats
}
