//! Headless Match Configuration
//!
//! JSON description of an unattended match: duration cap, game speed, where
//! to write the combat log, and a script of timed player commands.

use serde::Deserialize;

use crate::sim::abilities::AbilitySlot;

fn default_max_duration() -> f32 {
    300.0
}

fn default_game_speed() -> f32 {
    1.0
}

/// One timed player command in the script.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptedCommand {
    /// Simulated seconds after match start at which the command fires.
    pub at_secs: f32,
    pub command: CommandKind,
}

#[derive(Debug, Clone, Deserialize)]
pub enum CommandKind {
    MoveTo { x: f32, z: f32 },
    UseAbility { slot: AbilitySlot },
}

/// Configuration for one headless match run.
#[derive(Debug, Clone, Deserialize)]
pub struct HeadlessMatchConfig {
    /// The match is called as a draw once this much simulated time passes.
    #[serde(default = "default_max_duration")]
    pub max_duration_secs: f32,
    /// Simulation speed multiplier.
    #[serde(default = "default_game_speed")]
    pub game_speed: f32,
    /// Combat log destination. No file is written when absent.
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub script: Vec<ScriptedCommand>,
}

impl Default for HeadlessMatchConfig {
    fn default() -> Self {
        Self {
            max_duration_secs: default_max_duration(),
            game_speed: default_game_speed(),
            output_path: None,
            script: Vec::new(),
        }
    }
}

impl HeadlessMatchConfig {
    pub fn load_from_file(path: &str) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path, e))?;
        serde_json::from_str(&contents).map_err(|e| format!("failed to parse {}: {}", path, e))
    }

    /// Rejects configurations that cannot produce a sensible match.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_duration_secs <= 0.0 {
            return Err(format!(
                "max_duration_secs must be positive, got {}",
                self.max_duration_secs
            ));
        }
        if self.game_speed <= 0.0 {
            return Err(format!(
                "game_speed must be positive, got {}",
                self.game_speed
            ));
        }
        for (i, command) in self.script.iter().enumerate() {
            if command.at_secs < 0.0 {
                return Err(format!(
                    "script command {} has negative at_secs: {}",
                    i, command.at_secs
                ));
            }
        }
        Ok(())
    }
}
