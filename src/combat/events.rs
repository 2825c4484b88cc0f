//! Combat Events
//!
//! Events flow in two stages each tick: intent systems emit [`AttackEvent`]s
//! against a consistent snapshot of unit state, then the resolver applies
//! them all and emits the outcome events below.

use bevy::prelude::*;

use crate::sim::components::{Team, UnitKind};

/// What produced a hit. Used for log classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatCategory {
    BasicAttack,
    Ability,
    TowerStrike,
}

impl CombatCategory {
    pub fn name(&self) -> &'static str {
        match self {
            CombatCategory::BasicAttack => "basic attack",
            CombatCategory::Ability => "ability",
            CombatCategory::TowerStrike => "tower strike",
        }
    }
}

/// An attack declared this tick. Intent only: damage is applied by the
/// resolver after every intent system has run, so attack outcomes never
/// depend on system ordering within a tick.
#[derive(Event, Debug, Clone)]
pub struct AttackEvent {
    pub source: Entity,
    pub target: Entity,
    pub amount: f32,
    pub category: CombatCategory,
    /// Set for ability hits; names the ability for the log.
    pub ability_name: Option<String>,
}

/// Damage that was actually applied.
#[derive(Event, Debug, Clone)]
pub struct CombatEvent {
    pub source: Entity,
    pub target: Entity,
    pub amount: f32,
    pub lethal: bool,
    pub category: CombatCategory,
}

/// A unit's health reached zero this tick.
#[derive(Event, Debug, Clone)]
pub struct UnitDiedEvent {
    pub entity: Entity,
    pub kind: UnitKind,
    pub team: Team,
    pub killer: Entity,
}

/// A unit entered the arena.
#[derive(Event, Debug, Clone)]
pub struct UnitSpawnedEvent {
    pub entity: Entity,
    pub kind: UnitKind,
    pub team: Team,
}

/// A dead champion returned to its base.
#[derive(Event, Debug, Clone)]
pub struct ChampionRespawnedEvent {
    pub champion: Entity,
    pub team: Team,
}
