//! Ability Configuration
//!
//! Ability numbers are data, not code: they load from a RON file at startup
//! so damage, cooldowns and costs can be tuned without recompiling.

use std::collections::HashMap;

use bevy::prelude::*;
use serde::Deserialize;

use super::abilities::AbilitySlot;

/// Path to the ability definitions file, relative to the working directory.
const ABILITY_CONFIG_PATH: &str = "assets/config/abilities.ron";

/// One ability's tuning numbers as they appear in the RON file.
#[derive(Debug, Clone, Deserialize)]
pub struct AbilityConfig {
    pub name: String,
    pub damage: f32,
    /// Seconds before the slot can be cast again.
    pub cooldown: f32,
    #[serde(default)]
    pub mana_cost: f32,
    /// Targeting radius around the caster.
    pub radius: f32,
}

#[derive(Debug, Deserialize)]
struct AbilitiesConfig {
    abilities: HashMap<AbilitySlot, AbilityConfig>,
}

/// Loaded ability definitions, keyed by slot.
#[derive(Resource, Debug)]
pub struct AbilityDefinitions {
    definitions: HashMap<AbilitySlot, AbilityConfig>,
}

impl AbilityDefinitions {
    pub fn new(definitions: HashMap<AbilitySlot, AbilityConfig>) -> Self {
        Self { definitions }
    }

    pub fn get(&self, slot: AbilitySlot) -> Option<&AbilityConfig> {
        self.definitions.get(&slot)
    }

    /// Like [`Self::get`], for call sites where a missing slot is a bug.
    /// [`Self::validate`] runs at startup, so every slot is present.
    pub fn get_unchecked(&self, slot: AbilitySlot) -> &AbilityConfig {
        self.definitions
            .get(&slot)
            .unwrap_or_else(|| panic!("no ability definition for slot {}", slot.name()))
    }

    /// Checks that every slot has a definition. Returns the missing slots.
    pub fn validate(&self) -> Result<(), Vec<AbilitySlot>> {
        let missing: Vec<AbilitySlot> = AbilitySlot::ALL
            .into_iter()
            .filter(|slot| !self.definitions.contains_key(slot))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing)
        }
    }
}

#[cfg(test)]
impl Default for AbilityDefinitions {
    fn default() -> Self {
        load_ability_definitions().unwrap()
    }
}

/// Reads and parses the ability definitions file.
pub fn load_ability_definitions() -> Result<AbilityDefinitions, String> {
    let contents = std::fs::read_to_string(ABILITY_CONFIG_PATH)
        .map_err(|e| format!("failed to read {}: {}", ABILITY_CONFIG_PATH, e))?;
    let config: AbilitiesConfig = ron::from_str(&contents)
        .map_err(|e| format!("failed to parse {}: {}", ABILITY_CONFIG_PATH, e))?;
    Ok(AbilityDefinitions::new(config.abilities))
}

/// Loads ability definitions at startup and inserts them as a resource.
pub struct AbilityConfigPlugin;

impl Plugin for AbilityConfigPlugin {
    fn build(&self, app: &mut App) {
        // Config must always be valid; there is no hardcoded fallback.
        let definitions = match load_ability_definitions() {
            Ok(defs) => defs,
            Err(e) => panic!("ability config error: {}", e),
        };
        if let Err(missing) = definitions.validate() {
            let names: Vec<&str> = missing.iter().map(|s| s.name()).collect();
            panic!("ability config missing slots: {}", names.join(", "));
        }
        app.insert_resource(definitions);
    }
}
