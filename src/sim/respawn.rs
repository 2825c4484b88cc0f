//! Champion Respawn
//!
//! Dead champions wait out a fixed delay, then return to their team's spawn
//! point at full health and mana. Only champions respawn; minions and
//! structures are gone for good.

use bevy::prelude::*;

use crate::combat::events::ChampionRespawnedEvent;
use crate::combat::log::{CombatLog, CombatLogEventType};

use super::components::{
    Champion, LaneFollower, MatchState, RespawnTimer, SimulationSpeed, SpawnPoints, Unit,
};

/// Ticks respawn timers and revives champions whose timer has expired.
pub fn process_respawns(
    time: Res<Time>,
    speed: Res<SimulationSpeed>,
    spawn_points: Res<SpawnPoints>,
    match_state: Res<MatchState>,
    mut log: ResMut<CombatLog>,
    mut respawns: EventWriter<ChampionRespawnedEvent>,
    mut commands: Commands,
    mut champions: Query<(
        Entity,
        &mut Unit,
        &mut Champion,
        &mut Transform,
        &mut RespawnTimer,
        Option<&mut LaneFollower>,
    )>,
) {
    if speed.is_paused() {
        return;
    }
    let delta = time.delta_secs() * speed.multiplier;

    for (entity, mut unit, mut champion, mut transform, mut timer, follower) in
        champions.iter_mut()
    {
        timer.remaining -= delta;
        if timer.remaining > 0.0 {
            continue;
        }

        unit.current_health = unit.max_health;
        unit.dead = false;
        unit.target = None;
        unit.attack_timer = 0.0;
        champion.current_mana = champion.max_mana;
        transform.translation = spawn_points.get(unit.team);
        // A lane follower restarts its path from the base.
        if let Some(mut follower) = follower {
            follower.waypoint_index = 0;
        }
        commands.entity(entity).remove::<RespawnTimer>();

        respawns.send(ChampionRespawnedEvent {
            champion: entity,
            team: unit.team,
        });
        log.log(
            match_state.elapsed,
            CombatLogEventType::Respawn,
            format!("{} respawned", unit.name),
        );
    }
}
