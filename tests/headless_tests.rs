//! Headless configuration and match-driver tests.
//!
//! The script/exit machinery is exercised with a manually ticked app rather
//! than a wall-clock run loop, so these stay fast and deterministic.

use std::time::Duration;

use bevy::app::AppExit;
use bevy::prelude::*;

use lanesim::headless::config::{CommandKind, HeadlessMatchConfig, ScriptedCommand};
use lanesim::headless::runner::HeadlessPlugin;
use lanesim::sim::abilities::AbilitySlot;
use lanesim::sim::ability_config::load_ability_definitions;
use lanesim::sim::components::{MatchState, MoveTarget, PlayerControlled, Team};
use lanesim::sim::SimPlugin;

fn headless_app(config: HeadlessMatchConfig) -> App {
    let mut app = App::new();
    app.init_resource::<Time>();
    app.insert_resource(load_ability_definitions().unwrap());
    app.add_plugins(SimPlugin);
    app.add_plugins(HeadlessPlugin { config });
    app
}

fn tick(app: &mut App, secs: f32) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(secs));
    app.update();
}

#[test]
fn config_file_round_trip() {
    let json = r#"{
        "max_duration_secs": 90.0,
        "game_speed": 2.0,
        "script": [
            { "at_secs": 0.5, "command": { "MoveTo": { "x": -10.0, "z": 5.0 } } },
            { "at_secs": 2.0, "command": { "UseAbility": { "slot": "R" } } }
        ]
    }"#;
    let path = std::env::temp_dir().join("lanesim_config_test.json");
    std::fs::write(&path, json).unwrap();

    let config = HeadlessMatchConfig::load_from_file(path.to_str().unwrap()).unwrap();
    assert_eq!(config.max_duration_secs, 90.0);
    assert_eq!(config.game_speed, 2.0);
    assert_eq!(config.script.len(), 2);
    assert!(matches!(
        config.script[1].command,
        CommandKind::UseAbility {
            slot: AbilitySlot::R
        }
    ));
    std::fs::remove_file(&path).ok();
}

#[test]
fn missing_config_file_is_an_error() {
    let err = HeadlessMatchConfig::load_from_file("/nonexistent/lanesim.json").unwrap_err();
    assert!(err.contains("/nonexistent/lanesim.json"));
}

#[test]
fn malformed_config_is_an_error() {
    let path = std::env::temp_dir().join("lanesim_bad_config_test.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = HeadlessMatchConfig::load_from_file(path.to_str().unwrap()).unwrap_err();
    assert!(err.contains("parse"));
    std::fs::remove_file(&path).ok();
}

#[test]
fn scripted_move_command_reaches_player() {
    let config = HeadlessMatchConfig {
        game_speed: 1.0,
        script: vec![ScriptedCommand {
            at_secs: 0.0,
            command: CommandKind::MoveTo { x: 0.0, z: 0.0 },
        }],
        ..Default::default()
    };
    let mut app = headless_app(config);

    // Startup spawns the arena; the scripted command fires on the first
    // simulated tick.
    tick(&mut app, 1.0 / 60.0);
    tick(&mut app, 1.0 / 60.0);

    let mut players = app
        .world_mut()
        .query_filtered::<&MoveTarget, With<PlayerControlled>>();
    let move_target = players.single(app.world());
    assert!(move_target.0.is_some());
}

#[test]
fn script_commands_fire_in_order_and_only_once() {
    let config = HeadlessMatchConfig {
        script: vec![
            ScriptedCommand {
                at_secs: 0.0,
                command: CommandKind::MoveTo { x: 1.0, z: 0.0 },
            },
            ScriptedCommand {
                at_secs: 100.0,
                command: CommandKind::MoveTo { x: 2.0, z: 0.0 },
            },
        ],
        ..Default::default()
    };
    let mut app = headless_app(config);

    tick(&mut app, 1.0 / 60.0);
    tick(&mut app, 1.0 / 60.0);

    let mut players = app
        .world_mut()
        .query_filtered::<&MoveTarget, With<PlayerControlled>>();
    let move_target = players.single(app.world());
    // Only the first command has fired; the second waits for its timestamp.
    assert_eq!(move_target.0.map(|v| v.x), Some(1.0));
}

#[test]
fn time_limit_ends_the_match_as_a_draw() {
    let config = HeadlessMatchConfig {
        max_duration_secs: 1.0,
        ..Default::default()
    };
    let mut app = headless_app(config);

    tick(&mut app, 0.6);
    assert!(!app.world().resource::<MatchState>().complete);

    tick(&mut app, 0.6);
    let state = app.world().resource::<MatchState>();
    assert!(state.complete);
    assert_eq!(state.winner, None);

    let exits = app.world().resource::<Events<AppExit>>();
    assert!(!exits.is_empty());
}

#[test]
fn arena_startup_spawns_both_teams() {
    let mut app = headless_app(HeadlessMatchConfig::default());
    tick(&mut app, 1.0 / 60.0);

    let mut units = app.world_mut().query::<&lanesim::sim::components::Unit>();
    let blue = units
        .iter(app.world())
        .filter(|u| u.team == Team::Blue)
        .count();
    let red = units
        .iter(app.world())
        .filter(|u| u.team == Team::Red)
        .count();
    // Nexus, three towers, champion and a first minion wave per side.
    assert_eq!(blue, red);
    assert!(blue >= 5);
}
