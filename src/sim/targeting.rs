//! Target Acquisition & Attack Intent
//!
//! Targeting runs against a snapshot of unit positions taken at the start of
//! each system, so acquisition decisions within a tick never see partially
//! updated state. Systems here only declare intent ([`AttackEvent`]); health
//! changes happen in the resolver.

use bevy::prelude::*;
use bevy::utils::HashMap;
use smallvec::SmallVec;

use crate::combat::events::{AttackEvent, CombatCategory};
use crate::combat::log::{CombatLog, CombatLogEventType};

use super::abilities::{can_use, commit_use, AbilitySlot};
use super::ability_config::AbilityDefinitions;
use super::components::{
    Champion, MatchState, PlayerControlled, SimulationSpeed, Team, Unit, UnitKind,
};
use super::constants::*;

/// A unit's state as seen by targeting decisions this tick.
#[derive(Debug, Clone, Copy)]
pub struct TargetCandidate {
    pub entity: Entity,
    pub position: Vec3,
    pub team: Team,
    pub kind: UnitKind,
    pub is_player: bool,
}

/// Which unit kinds a search may pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFilter {
    /// Champions and minions only. Towers use this: they defend, they don't
    /// siege.
    UnitsOnly,
    /// Champions, minions and towers. Lane units use this so a lane can be
    /// pushed to its end.
    UnitsAndTowers,
    /// Everything including the nexus. Player abilities use this; it is the
    /// only path by which a nexus takes damage.
    All,
}

impl TargetFilter {
    fn allows(&self, kind: UnitKind) -> bool {
        match self {
            TargetFilter::UnitsOnly => matches!(kind, UnitKind::Champion | UnitKind::Minion),
            TargetFilter::UnitsAndTowers => !matches!(kind, UnitKind::Nexus),
            TargetFilter::All => true,
        }
    }
}

/// Finds the closest living enemy of `team` within `radius`, honoring the
/// kind filter. Returns the entity and its distance.
pub fn find_nearest_enemy(
    position: Vec3,
    team: Team,
    radius: f32,
    filter: TargetFilter,
    candidates: &[TargetCandidate],
) -> Option<(Entity, f32)> {
    let mut best: Option<(Entity, f32)> = None;
    for candidate in candidates {
        if !team.is_hostile_to(candidate.team) || !filter.allows(candidate.kind) {
            continue;
        }
        let distance = position.distance(candidate.position);
        if distance > radius {
            continue;
        }
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((candidate.entity, distance));
        }
    }
    best
}

/// Per-kind acquisition radius. Doubles as the leash: a target that drifts
/// past this range is dropped.
fn aggro_radius(kind: UnitKind) -> f32 {
    match kind {
        UnitKind::Champion => HERO_AGGRO_RADIUS,
        UnitKind::Minion => MINION_AGGRO_RADIUS,
        UnitKind::Tower => TOWER_AGGRO_RADIUS,
        UnitKind::Nexus => 0.0,
    }
}

type UnitQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static mut Unit,
        &'static Transform,
        Option<&'static mut Champion>,
        Option<&'static PlayerControlled>,
    ),
>;

fn snapshot_living(units: &UnitQuery) -> Vec<TargetCandidate> {
    units
        .iter()
        .filter(|(_, unit, ..)| unit.is_alive())
        .map(|(entity, unit, transform, _, player)| TargetCandidate {
            entity,
            position: transform.translation,
            team: unit.team,
            kind: unit.kind,
            is_player: player.is_some(),
        })
        .collect()
}

/// Drops stale targets and acquires new ones for AI units.
///
/// Towers prefer minions over champions; everything else takes the nearest
/// hostile. The player champion never auto-acquires; it fights only through
/// commands.
pub fn acquire_targets(
    speed: Res<SimulationSpeed>,
    mut units: UnitQuery,
) {
    if speed.is_paused() {
        return;
    }
    let candidates = snapshot_living(&units);

    for (_, mut unit, transform, _, player) in units.iter_mut() {
        if !unit.is_alive() || player.is_some() {
            continue;
        }
        let leash = aggro_radius(unit.kind);

        // Drop a target that died or left the leash.
        if let Some(target) = unit.target {
            let still_valid = candidates.iter().any(|c| {
                c.entity == target && transform.translation.distance(c.position) <= leash
            });
            if !still_valid {
                unit.target = None;
            }
        }

        if unit.target.is_some() {
            continue;
        }

        let position = transform.translation;
        let acquired = match unit.kind {
            UnitKind::Tower => {
                // Minions soak tower aggro before champions do.
                let minions: SmallVec<[TargetCandidate; 8]> = candidates
                    .iter()
                    .copied()
                    .filter(|c| c.kind == UnitKind::Minion)
                    .collect();
                find_nearest_enemy(position, unit.team, leash, TargetFilter::UnitsOnly, &minions)
                    .or_else(|| {
                        find_nearest_enemy(
                            position,
                            unit.team,
                            leash,
                            TargetFilter::UnitsOnly,
                            &candidates,
                        )
                    })
            }
            UnitKind::Minion => find_nearest_enemy(
                position,
                unit.team,
                leash,
                TargetFilter::UnitsAndTowers,
                &candidates,
            ),
            // The AI hero hunts the player and nothing else; with the
            // player out of reach it goes back to pushing its lane.
            UnitKind::Champion => candidates
                .iter()
                .find(|c| {
                    c.is_player
                        && unit.team.is_hostile_to(c.team)
                        && position.distance(c.position) <= leash
                })
                .map(|c| (c.entity, 0.0)),
            UnitKind::Nexus => None,
        };

        unit.target = acquired.map(|(entity, _)| entity);
    }
}

/// Moves mobile AI units toward their target until it is in attack range.
pub fn chase_targets(
    time: Res<Time>,
    speed: Res<SimulationSpeed>,
    mut units: Query<(
        Entity,
        &Unit,
        &mut Transform,
        Option<&Champion>,
        Option<&PlayerControlled>,
    )>,
) {
    if speed.is_paused() {
        return;
    }
    let delta = time.delta_secs() * speed.multiplier;

    let positions: HashMap<Entity, Vec3> = units
        .iter()
        .filter(|(_, unit, ..)| unit.is_alive())
        .map(|(entity, _, transform, ..)| (entity, transform.translation))
        .collect();

    for (_, unit, mut transform, champion, player) in units.iter_mut() {
        if !unit.is_alive() || player.is_some() {
            continue;
        }
        let move_speed = match unit.kind {
            UnitKind::Champion => champion.map_or(CHAMPION_MOVE_SPEED, |c| c.movement_speed),
            UnitKind::Minion => MINION_MOVE_SPEED,
            UnitKind::Tower | UnitKind::Nexus => continue,
        };
        let Some(target) = unit.target else { continue };
        let Some(&target_position) = positions.get(&target) else {
            continue;
        };

        let to_target = target_position - transform.translation;
        let distance = to_target.length();
        if distance <= unit.attack_range {
            continue;
        }
        // Stop at the edge of attack range rather than stacking on top.
        let step = (move_speed * delta).min(distance - unit.attack_range);
        transform.translation += to_target / distance * step;
    }
}

/// Emits basic-attack intents for every unit whose target is in range and
/// whose attack timer has expired.
pub fn declare_basic_attacks(
    speed: Res<SimulationSpeed>,
    mut attacks: EventWriter<AttackEvent>,
    mut units: UnitQuery,
) {
    if speed.is_paused() {
        return;
    }
    let candidates = snapshot_living(&units);

    for (entity, mut unit, transform, _, _) in units.iter_mut() {
        if !unit.is_alive() || !unit.attack_ready() || unit.attack_damage <= 0.0 {
            continue;
        }
        let Some(target) = unit.target else { continue };
        let Some(candidate) = candidates.iter().find(|c| c.entity == target) else {
            continue;
        };
        if transform.translation.distance(candidate.position) > unit.attack_range {
            continue;
        }

        let category = match unit.kind {
            UnitKind::Tower => CombatCategory::TowerStrike,
            _ => CombatCategory::BasicAttack,
        };
        attacks.send(AttackEvent {
            source: entity,
            target,
            amount: unit.attack_damage,
            category,
            ability_name: None,
        });
        unit.reset_attack_timer();
    }
}

/// Ability usage for the AI-controlled champion: Q on its current target
/// whenever available, R as a panic button when its own health runs low.
pub fn hero_cast_ai(
    speed: Res<SimulationSpeed>,
    defs: Res<AbilityDefinitions>,
    match_state: Res<MatchState>,
    mut log: ResMut<CombatLog>,
    mut attacks: EventWriter<AttackEvent>,
    mut units: UnitQuery,
) {
    if speed.is_paused() {
        return;
    }
    let candidates = snapshot_living(&units);

    for (entity, unit, transform, champion, player) in units.iter_mut() {
        let Some(mut champion) = champion else { continue };
        if player.is_some() || !unit.is_alive() {
            continue;
        }
        let Some(target) = unit.target else { continue };
        let Some(candidate) = candidates.iter().find(|c| c.entity == target) else {
            continue;
        };
        let target_distance = transform.translation.distance(candidate.position);
        let health_fraction = unit.current_health / unit.max_health;

        // Q is rotation filler; R comes out on top of it once health runs
        // low.
        let mut slots: SmallVec<[AbilitySlot; 2]> = SmallVec::new();
        if health_fraction < ULTIMATE_HP_THRESHOLD {
            slots.push(AbilitySlot::R);
        }
        slots.push(AbilitySlot::Q);

        for slot in slots {
            let def = defs.get_unchecked(slot);
            if target_distance > def.radius || !can_use(&unit, &champion, slot, def) {
                continue;
            }
            let damage = commit_use(&mut champion, slot, def);
            attacks.send(AttackEvent {
                source: entity,
                target,
                amount: damage,
                category: CombatCategory::Ability,
                ability_name: Some(def.name.clone()),
            });
            log.log(
                match_state.elapsed,
                CombatLogEventType::AbilityUsed,
                format!("{} cast {} ({})", unit.name, def.name, slot.name()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(entity: Entity, x: f32, team: Team, kind: UnitKind) -> TargetCandidate {
        TargetCandidate {
            entity,
            position: Vec3::new(x, 0.0, 0.0),
            team,
            kind,
            is_player: false,
        }
    }

    #[test]
    fn test_find_nearest_picks_closest_hostile() {
        let near = Entity::from_raw(1);
        let far = Entity::from_raw(2);
        let friendly = Entity::from_raw(3);
        let candidates = [
            candidate(far, 8.0, Team::Red, UnitKind::Minion),
            candidate(near, 3.0, Team::Red, UnitKind::Minion),
            candidate(friendly, 1.0, Team::Blue, UnitKind::Minion),
        ];
        let found = find_nearest_enemy(
            Vec3::ZERO,
            Team::Blue,
            10.0,
            TargetFilter::UnitsAndTowers,
            &candidates,
        );
        assert_eq!(found.map(|(e, _)| e), Some(near));
    }

    #[test]
    fn test_find_nearest_respects_radius() {
        let candidates = [candidate(
            Entity::from_raw(1),
            5.0,
            Team::Red,
            UnitKind::Minion,
        )];
        assert!(find_nearest_enemy(
            Vec3::ZERO,
            Team::Blue,
            4.0,
            TargetFilter::UnitsAndTowers,
            &candidates
        )
        .is_none());
    }

    #[test]
    fn test_nexus_excluded_unless_all() {
        let nexus = Entity::from_raw(1);
        let candidates = [candidate(nexus, 2.0, Team::Red, UnitKind::Nexus)];
        assert!(find_nearest_enemy(
            Vec3::ZERO,
            Team::Blue,
            10.0,
            TargetFilter::UnitsAndTowers,
            &candidates
        )
        .is_none());
        assert_eq!(
            find_nearest_enemy(Vec3::ZERO, Team::Blue, 10.0, TargetFilter::All, &candidates)
                .map(|(e, _)| e),
            Some(nexus)
        );
    }

    #[test]
    fn test_units_only_filter_excludes_towers() {
        let tower = Entity::from_raw(1);
        let candidates = [candidate(tower, 2.0, Team::Red, UnitKind::Tower)];
        assert!(find_nearest_enemy(
            Vec3::ZERO,
            Team::Blue,
            10.0,
            TargetFilter::UnitsOnly,
            &candidates
        )
        .is_none());
    }

    #[test]
    fn test_neutral_is_hostile_to_both_teams() {
        let camp = Entity::from_raw(1);
        let candidates = [candidate(camp, 2.0, Team::Neutral, UnitKind::Minion)];
        for team in [Team::Blue, Team::Red] {
            assert!(find_nearest_enemy(
                Vec3::ZERO,
                team,
                10.0,
                TargetFilter::UnitsAndTowers,
                &candidates
            )
            .is_some());
        }
    }
}
