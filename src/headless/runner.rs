//! Headless Match Runner
//!
//! Runs a full match without rendering: minimal Bevy plugins, a fixed-rate
//! schedule runner, scripted player commands fed in at their timestamps, and
//! the combat log written out when the match ends.

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;

use crate::combat::log::{CombatLog, CombatLogEventType, MatchMetadata};
use crate::sim::ability_config::AbilityConfigPlugin;
use crate::sim::components::{MatchState, PlayerScore, SimulationSpeed};
use crate::sim::player::{SetMoveTargetCommand, UseAbilityCommand};
use crate::sim::{SimPhase, SimPlugin};

use super::config::{CommandKind, HeadlessMatchConfig};

/// Outcome of a headless match.
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// Winning team name, or `None` when the time limit expired first.
    pub winner: Option<String>,
    /// Simulated match duration in seconds.
    pub match_time: f32,
    pub player_kills: u32,
    pub player_deaths: u32,
    pub player_gold: u32,
}

#[derive(Resource)]
struct ActiveConfig(HeadlessMatchConfig);

/// Index of the next unfired script command.
#[derive(Resource, Default)]
struct ScriptCursor(usize);

/// Set once the match has been wrapped up.
#[derive(Resource, Default)]
struct FinalResult(Option<MatchResult>);

/// Fires script commands whose timestamp has been reached.
fn feed_scripted_commands(
    config: Res<ActiveConfig>,
    match_state: Res<MatchState>,
    mut cursor: ResMut<ScriptCursor>,
    mut moves: EventWriter<SetMoveTargetCommand>,
    mut abilities: EventWriter<UseAbilityCommand>,
) {
    while let Some(scripted) = config.0.script.get(cursor.0) {
        if scripted.at_secs > match_state.elapsed {
            break;
        }
        match scripted.command {
            CommandKind::MoveTo { x, z } => {
                moves.send(SetMoveTargetCommand(Vec3::new(x, 0.0, z)));
            }
            CommandKind::UseAbility { slot } => {
                abilities.send(UseAbilityCommand(slot));
            }
        }
        cursor.0 += 1;
    }
}

/// Ends the run when a nexus falls or the time limit expires, records the
/// result and writes the combat log.
fn check_match_end(
    config: Res<ActiveConfig>,
    score: Res<PlayerScore>,
    mut match_state: ResMut<MatchState>,
    mut log: ResMut<CombatLog>,
    mut result: ResMut<FinalResult>,
    mut exit: EventWriter<AppExit>,
) {
    if result.0.is_some() {
        return;
    }
    let timed_out = match_state.elapsed >= config.0.max_duration_secs;
    if !match_state.complete && !timed_out {
        return;
    }
    if timed_out && !match_state.complete {
        match_state.complete = true;
        log.log(
            match_state.elapsed,
            CombatLogEventType::MatchEvent,
            "Time limit reached, match is a draw".to_string(),
        );
    }

    let match_result = MatchResult {
        winner: match_state.winner.map(|team| team.name().to_string()),
        match_time: match_state.elapsed,
        player_kills: score.kills,
        player_deaths: score.deaths,
        player_gold: score.gold,
    };
    info!(
        "match over after {:.1}s, winner: {}",
        match_result.match_time,
        match_result.winner.as_deref().unwrap_or("none")
    );

    if let Some(path) = &config.0.output_path {
        let metadata = MatchMetadata {
            winner: match_result.winner.clone(),
            match_time: match_result.match_time,
            player_kills: match_result.player_kills,
            player_deaths: match_result.player_deaths,
            player_gold: match_result.player_gold,
        };
        match log.save_to_file(&metadata, path) {
            Ok(()) => info!("combat log written to {}", path),
            Err(e) => warn!("could not write combat log: {}", e),
        }
    }

    result.0 = Some(match_result);
    exit.send(AppExit::Success);
}

/// Wires the headless machinery into an app that already carries the
/// simulation.
pub struct HeadlessPlugin {
    pub config: HeadlessMatchConfig,
}

impl Plugin for HeadlessPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SimulationSpeed {
            multiplier: self.config.game_speed,
        })
        .insert_resource(ActiveConfig(self.config.clone()))
        .init_resource::<ScriptCursor>()
        .init_resource::<FinalResult>()
        .add_systems(
            Update,
            (
                feed_scripted_commands.before(SimPhase::Intent),
                check_match_end.after(SimPhase::Lifecycle),
            ),
        );
    }
}

/// Runs a match to completion at 60 ticks per second and returns the result.
pub fn run_headless_match(config: HeadlessMatchConfig) -> Result<MatchResult, String> {
    config.validate()?;

    let mut app = App::new();
    app.add_plugins(
        MinimalPlugins
            .set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(1.0 / 60.0))),
    )
    .add_plugins(bevy::log::LogPlugin::default())
    .add_plugins(TransformPlugin)
    .add_plugins(AbilityConfigPlugin)
    .add_plugins(SimPlugin)
    .add_plugins(HeadlessPlugin { config });

    app.run();

    app.world()
        .resource::<FinalResult>()
        .0
        .clone()
        .ok_or_else(|| "match loop exited without a result".to_string())
}
