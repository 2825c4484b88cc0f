//! Core Combat Resolution
//!
//! Two halves: timer upkeep at the start of the tick, and attack resolution
//! at the end. The resolver consumes every [`AttackEvent`] declared this
//! tick, applies damage, and handles deaths exactly once per unit.

use bevy::prelude::*;
use bevy::utils::HashSet;

use crate::combat::events::{AttackEvent, CombatEvent, UnitDiedEvent};
use crate::combat::log::{CombatLog, CombatLogEventType};

use super::components::{
    Champion, MatchState, PlayerControlled, PlayerScore, RespawnTimer, Unit, UnitKind,
};
use super::constants::*;

/// Advances the match clock and ticks down attack timers, ability cooldowns
/// and mana regeneration for every living unit.
pub fn tick_timers(
    time: Res<Time>,
    speed: Res<super::components::SimulationSpeed>,
    mut match_state: ResMut<MatchState>,
    mut units: Query<(&mut Unit, Option<&mut Champion>)>,
) {
    if speed.is_paused() || match_state.complete {
        return;
    }
    let delta = time.delta_secs() * speed.multiplier;
    match_state.elapsed += delta;

    for (mut unit, champion) in units.iter_mut() {
        if !unit.is_alive() {
            continue;
        }
        unit.attack_timer = (unit.attack_timer - delta).max(0.0);
        if let Some(mut champion) = champion {
            for cooldown in champion.ability_cooldowns.iter_mut() {
                *cooldown = (*cooldown - delta).max(0.0);
            }
            champion.current_mana =
                (champion.current_mana + champion.mana_regen * delta).min(champion.max_mana);
        }
        unit.debug_validate();
    }
}

/// Applies every attack declared this tick.
///
/// Attacks against a unit that already died this tick (or earlier) are
/// dropped silently. A unit dies at most once: the first lethal hit marks it
/// dead, emits [`UnitDiedEvent`] and runs the per-kind death handling.
pub fn resolve_attacks(
    mut commands: Commands,
    mut attacks: EventReader<AttackEvent>,
    mut combat_events: EventWriter<CombatEvent>,
    mut death_events: EventWriter<UnitDiedEvent>,
    mut score: ResMut<PlayerScore>,
    mut match_state: ResMut<MatchState>,
    mut log: ResMut<CombatLog>,
    mut units: Query<(
        Entity,
        &mut Unit,
        Option<&mut Champion>,
        Option<&PlayerControlled>,
    )>,
) {
    let mut died_this_tick: HashSet<Entity> = HashSet::default();
    // Champion kills credited after the event loop, once the target borrow
    // is released.
    let mut kill_credits: Vec<Entity> = Vec::new();
    let timestamp = match_state.elapsed;
    let player_team = units
        .iter()
        .find(|(_, _, _, player)| player.is_some())
        .map(|(_, unit, _, _)| unit.team);

    for attack in attacks.read() {
        // A unit that died earlier this tick loses its queued attacks along
        // with its life.
        if died_this_tick.contains(&attack.source) || died_this_tick.contains(&attack.target) {
            continue;
        }

        let (source_name, source_is_player) = match units.get(attack.source) {
            Ok((_, unit, _, player)) => {
                if !unit.is_alive() {
                    continue;
                }
                (unit.name.clone(), player.is_some())
            }
            Err(_) => ("Unknown".to_string(), false),
        };

        let Ok((target_entity, mut target, target_champion, target_is_player)) =
            units.get_mut(attack.target)
        else {
            continue;
        };
        if !target.is_alive() {
            continue;
        }

        target.current_health = (target.current_health - attack.amount).max(0.0);
        let lethal = target.current_health <= 0.0;

        combat_events.send(CombatEvent {
            source: attack.source,
            target: attack.target,
            amount: attack.amount,
            lethal,
            category: attack.category,
        });
        log.log_damage(
            timestamp,
            &source_name,
            &target.name,
            attack.ability_name.as_deref(),
            attack.amount,
            lethal,
        );

        if !lethal {
            continue;
        }

        target.dead = true;
        target.target = None;
        died_this_tick.insert(target_entity);
        death_events.send(UnitDiedEvent {
            entity: target_entity,
            kind: target.kind,
            team: target.team,
            killer: attack.source,
        });
        log.log_death(timestamp, &target.name, &source_name);

        match target.kind {
            UnitKind::Minion => {
                if source_is_player {
                    score.gold += MINION_GOLD_REWARD;
                    score.experience += MINION_XP_REWARD;
                }
                commands.entity(target_entity).despawn();
            }
            UnitKind::Champion => {
                if let Some(mut champion) = target_champion {
                    champion.deaths += 1;
                }
                if target_is_player.is_some() {
                    score.deaths += 1;
                }
                if source_is_player {
                    score.kills += 1;
                    kill_credits.push(attack.source);
                }
                commands.entity(target_entity).insert(RespawnTimer {
                    remaining: CHAMPION_RESPAWN_DELAY,
                });
            }
            UnitKind::Tower => {
                // Tower bounty is team-wide: the player benefits whenever an
                // enemy tower falls.
                if player_team.map_or(false, |team| target.team == team.opponent()) {
                    score.gold += TOWER_GOLD_REWARD;
                }
                commands.entity(target_entity).despawn();
            }
            UnitKind::Nexus => {
                let winner = target.team.opponent();
                match_state.winner = Some(winner);
                match_state.complete = true;
                log.log(
                    timestamp,
                    CombatLogEventType::MatchEvent,
                    format!("{} nexus destroyed. {} wins!", target.team.name(), winner.name()),
                );
            }
        }
    }

    for killer in kill_credits {
        if let Ok((_, _, Some(mut champion), _)) = units.get_mut(killer) {
            champion.kills += 1;
        }
    }
}
