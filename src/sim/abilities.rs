//! Ability Slots & Usage Rules
//!
//! Slot identity plus the pure gating logic for casting: whether a champion
//! may use a slot right now, and the state changes committing a cast applies.
//! Keeping these free functions pure makes them trivially testable.

use serde::{Deserialize, Serialize};

use super::ability_config::AbilityConfig;
use super::components::{Champion, Unit};

/// The four ability slots every champion has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilitySlot {
    Q,
    W,
    E,
    R,
}

impl AbilitySlot {
    pub const ALL: [AbilitySlot; 4] = [
        AbilitySlot::Q,
        AbilitySlot::W,
        AbilitySlot::E,
        AbilitySlot::R,
    ];

    /// Index into `Champion::ability_cooldowns`.
    pub fn index(&self) -> usize {
        match self {
            AbilitySlot::Q => 0,
            AbilitySlot::W => 1,
            AbilitySlot::E => 2,
            AbilitySlot::R => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AbilitySlot::Q => "Q",
            AbilitySlot::W => "W",
            AbilitySlot::E => "E",
            AbilitySlot::R => "R",
        }
    }
}

/// Whether `champion` may cast `slot` right now: alive, off cooldown, and
/// enough mana for the cost.
pub fn can_use(unit: &Unit, champion: &Champion, slot: AbilitySlot, def: &AbilityConfig) -> bool {
    unit.is_alive() && champion.slot_ready(slot.index()) && champion.current_mana >= def.mana_cost
}

/// Applies the costs of casting `slot`: deducts mana and arms the slot
/// cooldown. Returns the ability's damage for the caller to deal.
///
/// Callers must check [`can_use`] first.
pub fn commit_use(champion: &mut Champion, slot: AbilitySlot, def: &AbilityConfig) -> f32 {
    champion.current_mana = (champion.current_mana - def.mana_cost).max(0.0);
    champion.ability_cooldowns[slot.index()] = def.cooldown;
    def.damage
}
