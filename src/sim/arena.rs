//! Arena Setup & Minion Waves
//!
//! Builds the map at startup: two bases with a nexus and one tower per lane,
//! lane waypoint paths for both teams, and the two champions. After that,
//! periodic minion waves march down every lane.

use bevy::prelude::*;

use crate::combat::events::UnitSpawnedEvent;
use crate::combat::log::{CombatLog, CombatLogEventType};

use super::components::{
    Champion, Lane, LaneFollower, LanePaths, MatchState, MinionWaveTimer, MoveTarget,
    PlayerControlled, PlayerScore, SimulationSpeed, SpawnPoints, Team, Unit, UnitKind,
};
use super::constants::*;

/// Half-width of the map along X. Bases sit at plus and minus this.
const BASE_X: f32 = 40.0;

/// Z offset of the top and bottom lanes. Mid runs along the X axis.
fn lane_z(lane: Lane) -> f32 {
    match lane {
        Lane::Top => 15.0,
        Lane::Mid => 0.0,
        Lane::Bot => -15.0,
    }
}

/// Waypoints for `team` pushing down `lane`, from its own base toward the
/// enemy nexus.
fn lane_waypoints(team: Team, lane: Lane) -> Vec<Vec3> {
    let z = lane_z(lane);
    let mut points = vec![
        Vec3::new(-30.0, 0.0, z),
        Vec3::new(-10.0, 0.0, z),
        Vec3::new(10.0, 0.0, z),
        Vec3::new(30.0, 0.0, z),
        // Funnel into the enemy nexus.
        Vec3::new(BASE_X - 2.0, 0.0, 0.0),
    ];
    if team == Team::Red {
        // Mirroring X turns the base-to-enemy order around automatically.
        for point in points.iter_mut() {
            point.x = -point.x;
        }
    }
    points
}

fn tower_position(team: Team, lane: Lane) -> Vec3 {
    let x = match team {
        Team::Blue => -20.0,
        Team::Red => 20.0,
        Team::Neutral => 0.0,
    };
    Vec3::new(x, 0.0, lane_z(lane))
}

fn nexus_position(team: Team) -> Vec3 {
    match team {
        Team::Blue => Vec3::new(-BASE_X, 0.0, 0.0),
        Team::Red => Vec3::new(BASE_X, 0.0, 0.0),
        Team::Neutral => Vec3::ZERO,
    }
}

fn spawn_position(team: Team) -> Vec3 {
    let nexus = nexus_position(team);
    // Just in front of the nexus.
    Vec3::new(nexus.x * 0.95, 0.0, 0.0)
}

/// Tears the current match down and starts a fresh one.
#[derive(Event, Debug, Default)]
pub struct RestartMatchEvent;

/// Startup system: builds lane paths, spawn points, structures and both
/// champions.
pub fn setup_arena(
    mut commands: Commands,
    mut paths: ResMut<LanePaths>,
    mut spawn_points: ResMut<SpawnPoints>,
    mut log: ResMut<CombatLog>,
) {
    spawn_arena(&mut commands, &mut paths, &mut spawn_points, &mut log);
}

/// Full reinitialization on explicit restart: every unit despawns, scores
/// and timers go back to zero, and the arena is rebuilt. The only way a
/// pending respawn is ever cancelled.
pub fn restart_match(
    mut restarts: EventReader<RestartMatchEvent>,
    mut commands: Commands,
    units: Query<Entity, With<Unit>>,
    mut paths: ResMut<LanePaths>,
    mut spawn_points: ResMut<SpawnPoints>,
    mut log: ResMut<CombatLog>,
    mut match_state: ResMut<MatchState>,
    mut score: ResMut<PlayerScore>,
    mut wave_timer: ResMut<MinionWaveTimer>,
) {
    if restarts.is_empty() {
        return;
    }
    restarts.clear();

    for entity in units.iter() {
        commands.entity(entity).despawn();
    }
    *match_state = MatchState::default();
    *score = PlayerScore::default();
    *wave_timer = MinionWaveTimer::default();
    log.clear();
    spawn_arena(&mut commands, &mut paths, &mut spawn_points, &mut log);
}

fn spawn_arena(
    commands: &mut Commands,
    paths: &mut LanePaths,
    spawn_points: &mut SpawnPoints,
    log: &mut CombatLog,
) {
    for team in [Team::Blue, Team::Red] {
        for lane in Lane::ALL {
            paths.insert(team, lane, lane_waypoints(team, lane));
            commands.spawn((
                Unit::new(UnitKind::Tower, team, format!("{} {} Tower", team.name(), lane.name())),
                Transform::from_translation(tower_position(team, lane)),
            ));
        }
        spawn_points.insert(team, spawn_position(team));
        commands.spawn((
            Unit::new(UnitKind::Nexus, team, format!("{} Nexus", team.name())),
            Transform::from_translation(nexus_position(team)),
        ));
    }

    // The player's champion answers only to commands.
    commands.spawn((
        Unit::new(UnitKind::Champion, Team::Blue, "Player"),
        Champion::new(),
        PlayerControlled,
        MoveTarget::default(),
        Transform::from_translation(spawn_position(Team::Blue)),
    ));

    // The enemy champion pushes mid under AI control.
    commands.spawn((
        Unit::new(UnitKind::Champion, Team::Red, "Rival"),
        Champion::new(),
        LaneFollower::new(Lane::Mid),
        Transform::from_translation(spawn_position(Team::Red)),
    ));

    log.log(0.0, CombatLogEventType::MatchEvent, "Match started".to_string());
}

/// Spawns a wave of minions for both teams in every lane each interval.
/// The first wave goes out on the first tick.
pub fn spawn_minion_waves(
    time: Res<Time>,
    speed: Res<SimulationSpeed>,
    paths: Res<LanePaths>,
    match_state: Res<MatchState>,
    mut timer: ResMut<MinionWaveTimer>,
    mut spawned: EventWriter<UnitSpawnedEvent>,
    mut log: ResMut<CombatLog>,
    mut commands: Commands,
) {
    if speed.is_paused() {
        return;
    }
    timer.remaining -= time.delta_secs() * speed.multiplier;
    if timer.remaining > 0.0 {
        return;
    }
    timer.remaining += MINION_WAVE_INTERVAL;

    let wave = timer.wave_number;
    for team in [Team::Blue, Team::Red] {
        for lane in Lane::ALL {
            let Some(waypoints) = paths.get(team, lane) else {
                continue;
            };
            let Some(&head) = waypoints.first() else {
                continue;
            };
            // Stagger the wave back toward its own base.
            let toward_base = match team {
                Team::Blue => Vec3::NEG_X,
                _ => Vec3::X,
            };
            for i in 0..MINIONS_PER_WAVE {
                let position = head + toward_base * (i as f32 * MINION_WAVE_SPACING);
                let entity = commands
                    .spawn((
                        Unit::new(
                            UnitKind::Minion,
                            team,
                            format!("{} {} Minion", team.name(), lane.name()),
                        ),
                        LaneFollower::new(lane),
                        Transform::from_translation(position),
                    ))
                    .id();
                spawned.send(UnitSpawnedEvent {
                    entity,
                    kind: UnitKind::Minion,
                    team,
                });
            }
        }
    }
    log.log(
        match_state.elapsed,
        CombatLogEventType::Spawn,
        format!("Minion wave {} spawned", wave),
    );
    timer.wave_number += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_app() -> App {
        let mut app = App::new();
        app.init_resource::<Time>();
        app.init_resource::<SimulationSpeed>();
        app.init_resource::<MatchState>();
        app.init_resource::<LanePaths>();
        app.init_resource::<SpawnPoints>();
        app.init_resource::<MinionWaveTimer>();
        app.init_resource::<CombatLog>();
        app.add_event::<UnitSpawnedEvent>();
        app.add_systems(Startup, setup_arena);
        app.add_systems(Update, spawn_minion_waves);
        app
    }

    fn tick(app: &mut App, secs: f32) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(secs));
        app.update();
    }

    fn count_units(app: &mut App, kind: UnitKind) -> usize {
        let mut query = app.world_mut().query::<&Unit>();
        query.iter(app.world()).filter(|u| u.kind == kind).count()
    }

    #[test]
    fn test_setup_builds_full_map() {
        let mut app = test_app();
        app.update();

        assert_eq!(count_units(&mut app, UnitKind::Nexus), 2);
        assert_eq!(count_units(&mut app, UnitKind::Tower), 6);
        assert_eq!(count_units(&mut app, UnitKind::Champion), 2);

        let paths = app.world().resource::<LanePaths>();
        for team in [Team::Blue, Team::Red] {
            for lane in Lane::ALL {
                assert!(paths.get(team, lane).is_some());
            }
        }
    }

    #[test]
    fn test_lane_paths_run_toward_enemy_base() {
        let blue = lane_waypoints(Team::Blue, Lane::Mid);
        assert!(blue.first().unwrap().x < blue.last().unwrap().x);
        let red = lane_waypoints(Team::Red, Lane::Mid);
        assert!(red.first().unwrap().x > red.last().unwrap().x);
    }

    #[test]
    fn test_first_wave_spawns_immediately() {
        let mut app = test_app();
        tick(&mut app, 0.016);

        // 3 minions per lane, 3 lanes, 2 teams.
        assert_eq!(count_units(&mut app, UnitKind::Minion), MINIONS_PER_WAVE * 6);
        assert_eq!(app.world().resource::<MinionWaveTimer>().wave_number, 2);
    }

    #[test]
    fn test_no_second_wave_before_interval() {
        let mut app = test_app();
        tick(&mut app, 0.016);
        tick(&mut app, MINION_WAVE_INTERVAL * 0.5);

        assert_eq!(count_units(&mut app, UnitKind::Minion), MINIONS_PER_WAVE * 6);
    }

    #[test]
    fn test_second_wave_after_interval() {
        let mut app = test_app();
        tick(&mut app, 0.016);
        tick(&mut app, MINION_WAVE_INTERVAL + 0.1);

        assert_eq!(
            count_units(&mut app, UnitKind::Minion),
            MINIONS_PER_WAVE * 12
        );
    }
}
