//! Player Commands
//!
//! The player champion never acts on its own. It moves when told to move and
//! casts when told to cast; invalid commands (dead champion, slot on
//! cooldown, not enough mana, nothing in range) are dropped.

use bevy::prelude::*;

use crate::combat::events::{AttackEvent, CombatCategory};
use crate::combat::log::{CombatLog, CombatLogEventType};

use super::abilities::{can_use, commit_use, AbilitySlot};
use super::ability_config::AbilityDefinitions;
use super::components::{
    Champion, MatchState, MoveTarget, PlayerControlled, SimulationSpeed, Unit,
};
use super::constants::MOVE_TARGET_ARRIVAL_THRESHOLD;
use super::targeting::{find_nearest_enemy, TargetCandidate, TargetFilter};

/// Orders the player champion to walk to a point.
#[derive(Event, Debug, Clone)]
pub struct SetMoveTargetCommand(pub Vec3);

/// Orders the player champion to cast an ability slot.
#[derive(Event, Debug, Clone)]
pub struct UseAbilityCommand(pub AbilitySlot);

/// Consumes queued player commands, validating each against current state.
///
/// Ability casts target the nearest enemy inside the ability's radius.
/// Unlike AI aggro, player abilities can hit structures including the nexus;
/// that is how a match is won.
pub fn apply_player_commands(
    defs: Res<AbilityDefinitions>,
    match_state: Res<MatchState>,
    mut log: ResMut<CombatLog>,
    mut move_commands: EventReader<SetMoveTargetCommand>,
    mut ability_commands: EventReader<UseAbilityCommand>,
    mut attacks: EventWriter<AttackEvent>,
    mut player: Query<(Entity, &Unit, &mut Champion, &mut MoveTarget), With<PlayerControlled>>,
    others: Query<(Entity, &Unit, &Transform), Without<PlayerControlled>>,
    player_transform: Query<&Transform, With<PlayerControlled>>,
) {
    let Ok((entity, unit, mut champion, mut move_target)) = player.get_single_mut() else {
        move_commands.clear();
        ability_commands.clear();
        return;
    };
    if !unit.is_alive() {
        // A dead champion ignores everything queued while it waits.
        move_commands.clear();
        ability_commands.clear();
        return;
    }

    for command in move_commands.read() {
        move_target.0 = Some(command.0);
    }

    let Ok(transform) = player_transform.get(entity) else {
        ability_commands.clear();
        return;
    };
    let position = transform.translation;

    for command in ability_commands.read() {
        let slot = command.0;
        let def = defs.get_unchecked(slot);
        if !can_use(unit, &champion, slot, def) {
            continue;
        }

        let candidates: Vec<TargetCandidate> = others
            .iter()
            .filter(|(_, other, _)| other.is_alive())
            .map(|(other_entity, other, other_transform)| TargetCandidate {
                entity: other_entity,
                position: other_transform.translation,
                team: other.team,
                kind: other.kind,
                is_player: false,
            })
            .collect();
        let Some((target, _)) = find_nearest_enemy(
            position,
            unit.team,
            def.radius,
            TargetFilter::All,
            &candidates,
        ) else {
            continue;
        };

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

/// Walks the player champion toward its commanded destination.
pub fn move_player_champion(
    time: Res<Time>,
    speed: Res<SimulationSpeed>,
    mut player: Query<
        (&Unit, &Champion, &mut MoveTarget, &mut Transform),
        With<PlayerControlled>,
    >,
) {
    if speed.is_paused() {
        return;
    }
    let delta = time.delta_secs() * speed.multiplier;

    for (unit, champion, mut move_target, mut transform) in player.iter_mut() {
        if !unit.is_alive() {
            move_target.0 = None;
            continue;
        }
        let Some(destination) = move_target.0 else {
            continue;
        };

        let to_destination = destination - transform.translation;
        let distance = to_destination.length();
        if distance < MOVE_TARGET_ARRIVAL_THRESHOLD {
            move_target.0 = None;
            continue;
        }
        let step = (champion.movement_speed * delta).min(distance);
        transform.translation += to_destination / distance * step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::events::AttackEvent;
    use crate::sim::ability_config::load_ability_definitions;
    use crate::sim::components::{Team, UnitKind};
    use std::time::Duration;

    fn test_app() -> App {
        let mut app = App::new();
        app.init_resource::<Time>();
        app.init_resource::<SimulationSpeed>();
        app.init_resource::<MatchState>();
        app.init_resource::<CombatLog>();
        app.insert_resource(load_ability_definitions().unwrap());
        app.add_event::<SetMoveTargetCommand>();
        app.add_event::<UseAbilityCommand>();
        app.add_event::<AttackEvent>();
        app.add_systems(
            Update,
            (apply_player_commands, move_player_champion).chain(),
        );
        app
    }

    fn spawn_player(app: &mut App) -> Entity {
        app.world_mut()
            .spawn((
                Unit::new(UnitKind::Champion, Team::Blue, "Player"),
                Champion::new(),
                PlayerControlled,
                MoveTarget::default(),
                Transform::from_translation(Vec3::ZERO),
            ))
            .id()
    }

    fn tick(app: &mut App, secs: f32) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(secs));
        app.update();
    }

    fn sent_attacks(app: &App) -> usize {
        app.world().resource::<Events<AttackEvent>>().len()
    }

    #[test]
    fn test_move_command_walks_and_stops() {
        let mut app = test_app();
        let player = spawn_player(&mut app);

        app.world_mut()
            .send_event(SetMoveTargetCommand(Vec3::new(2.0, 0.0, 0.0)));
        tick(&mut app, 0.25);

        let transform = app.world().get::<Transform>(player).unwrap();
        assert!(transform.translation.x > 0.0);
        assert!(app.world().get::<MoveTarget>(player).unwrap().0.is_some());

        // Plenty of time to arrive.
        tick(&mut app, 5.0);
        let transform = app.world().get::<Transform>(player).unwrap();
        assert!(transform.translation.distance(Vec3::new(2.0, 0.0, 0.0)) < 0.5);
        assert!(app.world().get::<MoveTarget>(player).unwrap().0.is_none());
    }

    #[test]
    fn test_ability_hits_nearest_enemy_in_radius() {
        let mut app = test_app();
        let player = spawn_player(&mut app);
        app.world_mut().spawn((
            Unit::new(UnitKind::Minion, Team::Red, "Red Minion"),
            Transform::from_translation(Vec3::new(3.0, 0.0, 0.0)),
        ));

        app.world_mut().send_event(UseAbilityCommand(AbilitySlot::Q));
        tick(&mut app, 0.016);

        assert_eq!(sent_attacks(&app), 1);
        let champion = app.world().get::<Champion>(player).unwrap();
        assert!(!champion.slot_ready(AbilitySlot::Q.index()));
        assert!(champion.current_mana < champion.max_mana);
    }

    #[test]
    fn test_ability_with_no_target_is_not_committed() {
        let mut app = test_app();
        let player = spawn_player(&mut app);

        app.world_mut().send_event(UseAbilityCommand(AbilitySlot::Q));
        tick(&mut app, 0.016);

        assert_eq!(sent_attacks(&app), 0);
        let champion = app.world().get::<Champion>(player).unwrap();
        assert!(champion.slot_ready(AbilitySlot::Q.index()));
        assert_eq!(champion.current_mana, champion.max_mana);
    }

    #[test]
    fn test_ability_on_cooldown_is_ignored() {
        let mut app = test_app();
        let player = spawn_player(&mut app);
        app.world_mut().spawn((
            Unit::new(UnitKind::Minion, Team::Red, "Red Minion"),
            Transform::from_translation(Vec3::new(3.0, 0.0, 0.0)),
        ));
        app.world_mut()
            .get_mut::<Champion>(player)
            .unwrap()
            .ability_cooldowns[AbilitySlot::Q.index()] = 2.0;

        app.world_mut().send_event(UseAbilityCommand(AbilitySlot::Q));
        tick(&mut app, 0.016);

        assert_eq!(sent_attacks(&app), 0);
    }

    #[test]
    fn test_dead_player_ignores_commands() {
        let mut app = test_app();
        let player = spawn_player(&mut app);
        {
            let mut unit = app.world_mut().get_mut::<Unit>(player).unwrap();
            unit.current_health = 0.0;
            unit.dead = true;
        }
        app.world_mut().spawn((
            Unit::new(UnitKind::Minion, Team::Red, "Red Minion"),
            Transform::from_translation(Vec3::new(3.0, 0.0, 0.0)),
        ));

        app.world_mut()
            .send_event(SetMoveTargetCommand(Vec3::new(5.0, 0.0, 0.0)));
        app.world_mut().send_event(UseAbilityCommand(AbilitySlot::Q));
        tick(&mut app, 0.016);

        assert_eq!(sent_attacks(&app), 0);
        assert!(app.world().get::<MoveTarget>(player).unwrap().0.is_none());
        assert_eq!(
            app.world().get::<Transform>(player).unwrap().translation,
            Vec3::ZERO
        );
    }

    #[test]
    fn test_player_ability_can_hit_nexus() {
        let mut app = test_app();
        spawn_player(&mut app);
        app.world_mut().spawn((
            Unit::new(UnitKind::Nexus, Team::Red, "Red Nexus"),
            Transform::from_translation(Vec3::new(4.0, 0.0, 0.0)),
        ));

        app.world_mut().send_event(UseAbilityCommand(AbilitySlot::Q));
        tick(&mut app, 0.016);

        assert_eq!(sent_attacks(&app), 1);
    }
}
