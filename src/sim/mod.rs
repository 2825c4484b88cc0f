//! Lane Combat Simulation
//!
//! Each tick runs four phases in a fixed order: timers, intent, resolution,
//! lifecycle. Intent systems declare attacks against a consistent snapshot;
//! resolution applies them all at once; lifecycle handles spawns and
//! respawns. This ordering is what makes a tick deterministic.

pub mod abilities;
pub mod ability_config;
pub mod arena;
pub mod combat_core;
pub mod components;
pub mod constants;
pub mod navigation;
pub mod player;
pub mod respawn;
pub mod targeting;

use bevy::prelude::*;

use crate::combat::events::{
    AttackEvent, ChampionRespawnedEvent, CombatEvent, UnitDiedEvent, UnitSpawnedEvent,
};
use crate::combat::log::CombatLog;

use components::{
    LanePaths, MatchState, MinionWaveTimer, PlayerScore, SimulationSpeed, SpawnPoints,
};
use player::{SetMoveTargetCommand, UseAbilityCommand};

/// Execution phases of one simulation tick.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimPhase {
    /// Clock, cooldowns, mana.
    Timers,
    /// Targeting, movement, attack declarations.
    Intent,
    /// Damage application and deaths.
    Resolution,
    /// Respawns and wave spawning.
    Lifecycle,
}

/// Run condition: the match has not ended.
pub fn match_running(state: Res<MatchState>) -> bool {
    !state.complete
}

/// Registers the core simulation systems in their phase order.
///
/// Split out from [`SimPlugin`] so tests can install the systems into a
/// minimal app without the startup arena.
pub fn add_core_sim_systems(app: &mut App) {
    app.configure_sets(
        Update,
        (
            SimPhase::Timers,
            SimPhase::Intent,
            SimPhase::Resolution,
            SimPhase::Lifecycle,
        )
            .chain(),
    );
    app.add_systems(
        Update,
        combat_core::tick_timers
            .in_set(SimPhase::Timers)
            .run_if(match_running),
    );
    app.add_systems(
        Update,
        (
            targeting::acquire_targets,
            navigation::follow_lane_waypoints,
            targeting::chase_targets,
            player::apply_player_commands,
            player::move_player_champion,
            targeting::declare_basic_attacks,
            targeting::hero_cast_ai,
        )
            .chain()
            .in_set(SimPhase::Intent)
            .run_if(match_running),
    );
    app.add_systems(
        Update,
        combat_core::resolve_attacks
            .in_set(SimPhase::Resolution)
            .run_if(match_running),
    );
    app.add_systems(
        Update,
        (respawn::process_respawns, arena::spawn_minion_waves)
            .in_set(SimPhase::Lifecycle)
            .run_if(match_running),
    );
    // Restart must work after a finished match too, so it skips the gate.
    app.add_systems(Update, arena::restart_match.in_set(SimPhase::Lifecycle));
}

/// The full simulation: resources, events, arena setup and core systems.
pub struct SimPlugin;

impl Plugin for SimPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationSpeed>()
            .init_resource::<LanePaths>()
            .init_resource::<SpawnPoints>()
            .init_resource::<PlayerScore>()
            .init_resource::<MinionWaveTimer>()
            .init_resource::<MatchState>()
            .init_resource::<CombatLog>()
            .add_event::<AttackEvent>()
            .add_event::<CombatEvent>()
            .add_event::<UnitDiedEvent>()
            .add_event::<UnitSpawnedEvent>()
            .add_event::<ChampionRespawnedEvent>()
            .add_event::<SetMoveTargetCommand>()
            .add_event::<UseAbilityCommand>()
            .add_event::<arena::RestartMatchEvent>()
            .add_systems(Startup, arena::setup_arena);
        add_core_sim_systems(app);
    }
}
