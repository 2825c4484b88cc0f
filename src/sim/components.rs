//! Core Components & Resources
//!
//! Component and resource definitions shared by every simulation system.
//! Stat assignment lives here so a unit's kind fully determines its
//! baseline numbers.

use bevy::prelude::*;
use bevy::utils::HashMap;

use super::constants::*;

// ============================================================================
// Identity
// ============================================================================

/// Which side a unit fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    Blue,
    Red,
    /// Jungle camps and other non-aligned units. Hostile to both teams.
    Neutral,
}

impl Team {
    /// The opposing player team. Neutral has no opponent and returns itself.
    pub fn opponent(&self) -> Team {
        match self {
            Team::Blue => Team::Red,
            Team::Red => Team::Blue,
            Team::Neutral => Team::Neutral,
        }
    }

    /// Whether units of this team attack units of `other`.
    pub fn is_hostile_to(&self, other: Team) -> bool {
        if *self == other {
            return false;
        }
        // Neutral units are hostile to everyone else.
        true
    }

    pub fn name(&self) -> &'static str {
        match self {
            Team::Blue => "Blue",
            Team::Red => "Red",
            Team::Neutral => "Neutral",
        }
    }
}

/// The category of a combat unit. Determines base stats and AI behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Champion,
    Minion,
    Tower,
    Nexus,
}

impl UnitKind {
    pub fn name(&self) -> &'static str {
        match self {
            UnitKind::Champion => "Champion",
            UnitKind::Minion => "Minion",
            UnitKind::Tower => "Tower",
            UnitKind::Nexus => "Nexus",
        }
    }
}

/// A lane on the map. Lane followers walk the waypoint path of their lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    Top,
    Mid,
    Bot,
}

impl Lane {
    pub const ALL: [Lane; 3] = [Lane::Top, Lane::Mid, Lane::Bot];

    pub fn name(&self) -> &'static str {
        match self {
            Lane::Top => "Top",
            Lane::Mid => "Mid",
            Lane::Bot => "Bot",
        }
    }
}

// ============================================================================
// Combat Unit
// ============================================================================

/// Every fighting entity in the arena carries one of these.
///
/// Health, basic-attack stats and current target live here regardless of
/// unit kind; champion-only state (mana, ability cooldowns) lives on the
/// [`Champion`] component instead.
#[derive(Component, Debug, Clone)]
pub struct Unit {
    pub kind: UnitKind,
    pub team: Team,
    pub name: String,
    pub max_health: f32,
    pub current_health: f32,
    pub attack_damage: f32,
    pub attack_range: f32,
    /// Seconds between basic attacks.
    pub attack_cooldown: f32,
    /// Seconds until the next basic attack is ready. Zero means ready.
    pub attack_timer: f32,
    /// Current attack target, if any. Cleared when the target dies or
    /// leaves range.
    pub target: Option<Entity>,
    /// Set when health reaches zero. Dead units take no actions and are
    /// skipped by targeting.
    pub dead: bool,
}

impl Unit {
    /// Creates a unit with the baseline stats for its kind.
    pub fn new(kind: UnitKind, team: Team, name: impl Into<String>) -> Self {
        let (max_health, attack_damage, attack_range, attack_cooldown) = match kind {
            UnitKind::Champion => (
                CHAMPION_BASE_HEALTH,
                CHAMPION_ATTACK_DAMAGE,
                CHAMPION_ATTACK_RANGE,
                CHAMPION_ATTACK_COOLDOWN,
            ),
            UnitKind::Minion => (
                MINION_HEALTH,
                MINION_ATTACK_DAMAGE,
                MELEE_RANGE,
                MINION_ATTACK_COOLDOWN,
            ),
            UnitKind::Tower => (
                TOWER_HEALTH,
                TOWER_ATTACK_DAMAGE,
                TOWER_AGGRO_RADIUS,
                TOWER_ATTACK_COOLDOWN,
            ),
            // A nexus never attacks.
            UnitKind::Nexus => (NEXUS_HEALTH, 0.0, 0.0, f32::INFINITY),
        };

        Self {
            kind,
            team,
            name: name.into(),
            max_health,
            current_health: max_health,
            attack_damage,
            attack_range,
            attack_cooldown,
            attack_timer: 0.0,
            target: None,
            dead: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.dead && self.current_health > 0.0
    }

    pub fn attack_ready(&self) -> bool {
        self.attack_timer <= 0.0
    }

    pub fn reset_attack_timer(&mut self) {
        self.attack_timer = self.attack_cooldown;
    }

    /// Debug-build sanity checks for unit state. Compiled out in release.
    pub fn debug_validate(&self) {
        debug_assert!(
            self.current_health >= 0.0,
            "{} has negative health: {}",
            self.name,
            self.current_health
        );
        debug_assert!(
            self.current_health <= self.max_health,
            "{} exceeds max health: {} > {}",
            self.name,
            self.current_health,
            self.max_health
        );
        debug_assert!(
            self.attack_timer >= 0.0,
            "{} has negative attack timer",
            self.name
        );
        debug_assert!(
            !(self.dead && self.target.is_some()),
            "{} is dead but still holds a target",
            self.name
        );
    }
}

// ============================================================================
// Champion State
// ============================================================================

/// Champion-only state: movement, mana and per-slot ability cooldowns.
#[derive(Component, Debug, Clone)]
pub struct Champion {
    pub movement_speed: f32,
    pub max_mana: f32,
    pub current_mana: f32,
    pub mana_regen: f32,
    /// Remaining cooldown per ability slot, indexed by `AbilitySlot::index`.
    /// Zero means the slot is ready.
    pub ability_cooldowns: [f32; 4],
    pub kills: u32,
    pub deaths: u32,
}

impl Champion {
    pub fn new() -> Self {
        Self {
            movement_speed: CHAMPION_MOVE_SPEED,
            max_mana: CHAMPION_BASE_MANA,
            current_mana: CHAMPION_BASE_MANA,
            mana_regen: MANA_REGEN_PER_SEC,
            ability_cooldowns: [0.0; 4],
            kills: 0,
            deaths: 0,
        }
    }

    pub fn cooldown_remaining(&self, slot_index: usize) -> f32 {
        self.ability_cooldowns[slot_index]
    }

    pub fn slot_ready(&self, slot_index: usize) -> bool {
        self.ability_cooldowns[slot_index] <= 0.0
    }
}

impl Default for Champion {
    fn default() -> Self {
        Self::new()
    }
}

/// Marks the champion driven by player commands rather than AI.
#[derive(Component, Debug)]
pub struct PlayerControlled;

// ============================================================================
// Movement
// ============================================================================

/// Walks the waypoint path of its lane when it has no attack target.
#[derive(Component, Debug)]
pub struct LaneFollower {
    pub lane: Lane,
    /// Index into the lane's waypoint list. Past the end means the unit has
    /// finished its path and holds position.
    pub waypoint_index: usize,
}

impl LaneFollower {
    pub fn new(lane: Lane) -> Self {
        Self {
            lane,
            waypoint_index: 0,
        }
    }
}

/// Player-commanded destination. `None` when idle.
#[derive(Component, Debug, Default)]
pub struct MoveTarget(pub Option<Vec3>);

/// Attached to a dead champion; counts down to respawn.
#[derive(Component, Debug)]
pub struct RespawnTimer {
    pub remaining: f32,
}

// ============================================================================
// Resources
// ============================================================================

/// Global time-scale multiplier. Zero pauses the simulation.
#[derive(Resource, Debug, Clone)]
pub struct SimulationSpeed {
    pub multiplier: f32,
}

impl SimulationSpeed {
    pub fn is_paused(&self) -> bool {
        self.multiplier <= 0.0
    }
}

impl Default for SimulationSpeed {
    fn default() -> Self {
        Self { multiplier: 1.0 }
    }
}

/// Waypoint paths per team and lane. A team follows its own path from its
/// base toward the enemy base.
#[derive(Resource, Debug, Default)]
pub struct LanePaths {
    paths: HashMap<(Team, Lane), Vec<Vec3>>,
}

impl LanePaths {
    pub fn insert(&mut self, team: Team, lane: Lane, waypoints: Vec<Vec3>) {
        self.paths.insert((team, lane), waypoints);
    }

    pub fn get(&self, team: Team, lane: Lane) -> Option<&[Vec3]> {
        self.paths.get(&(team, lane)).map(|v| v.as_slice())
    }
}

/// Champion spawn location per team.
#[derive(Resource, Debug, Default)]
pub struct SpawnPoints {
    points: HashMap<Team, Vec3>,
}

impl SpawnPoints {
    pub fn insert(&mut self, team: Team, point: Vec3) {
        self.points.insert(team, point);
    }

    pub fn get(&self, team: Team) -> Vec3 {
        self.points.get(&team).copied().unwrap_or(Vec3::ZERO)
    }
}

/// Accumulated player rewards and score line.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerScore {
    pub gold: u32,
    pub experience: u32,
    pub kills: u32,
    pub deaths: u32,
}

/// Counts down to the next minion wave.
#[derive(Resource, Debug)]
pub struct MinionWaveTimer {
    pub remaining: f32,
    pub wave_number: u32,
}

impl Default for MinionWaveTimer {
    fn default() -> Self {
        // First wave fires on the first tick.
        Self {
            remaining: 0.0,
            wave_number: 1,
        }
    }
}

/// Match progress and outcome.
#[derive(Resource, Debug, Default)]
pub struct MatchState {
    /// Simulated seconds since match start.
    pub elapsed: f32,
    /// Winning team, set when a nexus falls.
    pub winner: Option<Team>,
    pub complete: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_opponent() {
        assert_eq!(Team::Blue.opponent(), Team::Red);
        assert_eq!(Team::Red.opponent(), Team::Blue);
        assert_eq!(Team::Neutral.opponent(), Team::Neutral);
    }

    #[test]
    fn test_hostility() {
        assert!(Team::Blue.is_hostile_to(Team::Red));
        assert!(!Team::Blue.is_hostile_to(Team::Blue));
        assert!(Team::Neutral.is_hostile_to(Team::Blue));
        assert!(Team::Neutral.is_hostile_to(Team::Red));
    }

    #[test]
    fn test_unit_starts_at_full_health() {
        let unit = Unit::new(UnitKind::Minion, Team::Blue, "Test Minion");
        assert_eq!(unit.current_health, unit.max_health);
        assert!(unit.is_alive());
        assert!(unit.attack_ready());
    }

    #[test]
    fn test_nexus_never_attacks() {
        let nexus = Unit::new(UnitKind::Nexus, Team::Red, "Red Nexus");
        assert_eq!(nexus.attack_damage, 0.0);
        assert!(nexus.attack_cooldown.is_infinite());
    }

    #[test]
    fn test_attack_timer_round_trip() {
        let mut unit = Unit::new(UnitKind::Champion, Team::Blue, "Hero");
        assert!(unit.attack_ready());
        unit.reset_attack_timer();
        assert!(!unit.attack_ready());
        assert_eq!(unit.attack_timer, unit.attack_cooldown);
    }

    #[test]
    fn test_champion_slots_start_ready() {
        let champion = Champion::new();
        for slot in 0..4 {
            assert!(champion.slot_ready(slot));
        }
        assert_eq!(champion.current_mana, champion.max_mana);
    }

    #[test]
    fn test_lane_paths_lookup() {
        let mut paths = LanePaths::default();
        paths.insert(Team::Blue, Lane::Mid, vec![Vec3::ZERO, Vec3::X]);
        assert_eq!(paths.get(Team::Blue, Lane::Mid).map(|p| p.len()), Some(2));
        assert!(paths.get(Team::Red, Lane::Mid).is_none());
    }
}
