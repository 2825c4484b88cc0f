//! Combat Log
//!
//! Structured record of everything that happened in a match. Systems append
//! entries as events resolve; headless runs serialize the whole log to JSON
//! when the match ends.

use bevy::prelude::*;
use serde::Serialize;

/// Classification of a log entry for filtering and analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CombatLogEventType {
    Damage,
    AbilityUsed,
    Death,
    Respawn,
    Spawn,
    MatchEvent,
}

/// One timestamped entry in the combat log.
#[derive(Debug, Clone, Serialize)]
pub struct CombatLogEntry {
    /// Simulated seconds since match start.
    pub timestamp: f32,
    pub event_type: CombatLogEventType,
    pub message: String,
}

/// Match-level header written alongside the entries.
#[derive(Debug, Clone, Serialize)]
pub struct MatchMetadata {
    pub winner: Option<String>,
    pub match_time: f32,
    pub player_kills: u32,
    pub player_deaths: u32,
    pub player_gold: u32,
}

#[derive(Serialize)]
struct CombatLogFile<'a> {
    metadata: &'a MatchMetadata,
    entries: &'a [CombatLogEntry],
}

/// Append-only log of combat activity for the current match.
#[derive(Resource, Debug, Default)]
pub struct CombatLog {
    entries: Vec<CombatLogEntry>,
}

impl CombatLog {
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn log(&mut self, timestamp: f32, event_type: CombatLogEventType, message: String) {
        self.entries.push(CombatLogEntry {
            timestamp,
            event_type,
            message,
        });
    }

    pub fn log_damage(
        &mut self,
        timestamp: f32,
        source: &str,
        target: &str,
        ability: Option<&str>,
        amount: f32,
        killing_blow: bool,
    ) {
        let verb = match ability {
            Some(name) => format!("hit with {}", name),
            None => "attacked".to_string(),
        };
        let suffix = if killing_blow { " (killing blow)" } else { "" };
        self.log(
            timestamp,
            CombatLogEventType::Damage,
            format!("{} {} {} for {:.0}{}", source, verb, target, amount, suffix),
        );
    }

    pub fn log_death(&mut self, timestamp: f32, victim: &str, killer: &str) {
        self.log(
            timestamp,
            CombatLogEventType::Death,
            format!("{} was slain by {}", victim, killer),
        );
    }

    pub fn entries(&self) -> &[CombatLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent `count` entries, oldest first.
    pub fn recent(&self, count: usize) -> &[CombatLogEntry] {
        let start = self.entries.len().saturating_sub(count);
        &self.entries[start..]
    }

    pub fn filter_by_type(&self, event_type: CombatLogEventType) -> Vec<&CombatLogEntry> {
        self.entries
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Writes the log with its match header as pretty-printed JSON.
    pub fn save_to_file(&self, metadata: &MatchMetadata, path: &str) -> Result<(), String> {
        let file = CombatLogFile {
            metadata,
            entries: &self.entries,
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| format!("failed to serialize combat log: {}", e))?;
        std::fs::write(path, json).map_err(|e| format!("failed to write {}: {}", path, e))
    }
}
