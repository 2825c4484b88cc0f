//! Simulation Constants
//!
//! Centralized location for magic numbers used throughout the combat
//! simulation. This makes it easier to tune balance and ensures consistency.

// ============================================================================
// Combat Ranges
// ============================================================================

/// Melee attack range in units. Minions must be within this distance to swing.
pub const MELEE_RANGE: f32 = 1.5;

/// Aggro radius for towers. Towers notice enemies inside this radius.
pub const TOWER_AGGRO_RADIUS: f32 = 12.0;

/// Aggro radius for minions. Short - minions mostly push their lane.
pub const MINION_AGGRO_RADIUS: f32 = 4.0;

/// Aggro radius for the enemy hero AI. Wider than minion aggro so the hero
/// breaks off its lane to hunt the player.
pub const HERO_AGGRO_RADIUS: f32 = 9.0;

/// Distance below which a lane follower is considered to have arrived at its
/// current waypoint and advances to the next one.
pub const WAYPOINT_ARRIVAL_THRESHOLD: f32 = 0.5;

/// Distance below which the player champion stops at a commanded move target.
pub const MOVE_TARGET_ARRIVAL_THRESHOLD: f32 = 0.25;

// ============================================================================
// Attack Timing
// ============================================================================

/// Seconds between tower strikes. Towers hit hard but slowly.
pub const TOWER_ATTACK_COOLDOWN: f32 = 1.8;

/// Seconds between minion swings.
pub const MINION_ATTACK_COOLDOWN: f32 = 1.0;

/// Seconds between champion basic attacks.
pub const CHAMPION_ATTACK_COOLDOWN: f32 = 1.2;

// ============================================================================
// Health Thresholds
// ============================================================================

/// The hero AI holds its ultimate until its own health drops below this
/// fraction of max health.
pub const ULTIMATE_HP_THRESHOLD: f32 = 0.4;

// ============================================================================
// Resources & Rewards
// ============================================================================

/// Mana regenerated per second, up to max mana.
pub const MANA_REGEN_PER_SEC: f32 = 5.0;

/// Gold granted to the player for a minion killing blow.
pub const MINION_GOLD_REWARD: u32 = 20;

/// Experience granted to the player for a minion killing blow.
pub const MINION_XP_REWARD: u32 = 30;

/// One-time gold reward for destroying a tower.
pub const TOWER_GOLD_REWARD: u32 = 150;

// ============================================================================
// Lifecycle Timing
// ============================================================================

/// Seconds a champion stays dead before respawning at its base.
pub const CHAMPION_RESPAWN_DELAY: f32 = 5.0;

/// Seconds between minion waves.
pub const MINION_WAVE_INTERVAL: f32 = 30.0;

/// Minions spawned per lane per team each wave.
pub const MINIONS_PER_WAVE: usize = 3;

/// Spacing along the lane direction between minions in a wave.
pub const MINION_WAVE_SPACING: f32 = 1.2;

// ============================================================================
// Base Stats
// ============================================================================

/// Champion baseline health.
pub const CHAMPION_BASE_HEALTH: f32 = 500.0;

/// Champion baseline mana.
pub const CHAMPION_BASE_MANA: f32 = 300.0;

/// Champion basic-attack damage.
pub const CHAMPION_ATTACK_DAMAGE: f32 = 55.0;

/// Champion basic-attack range.
pub const CHAMPION_ATTACK_RANGE: f32 = 2.0;

/// Champion movement speed in units per second.
pub const CHAMPION_MOVE_SPEED: f32 = 4.0;

/// Minion health.
pub const MINION_HEALTH: f32 = 100.0;

/// Minion swing damage.
pub const MINION_ATTACK_DAMAGE: f32 = 12.0;

/// Minion movement speed in units per second.
pub const MINION_MOVE_SPEED: f32 = 2.5;

/// Tower health.
pub const TOWER_HEALTH: f32 = 1200.0;

/// Tower strike damage.
pub const TOWER_ATTACK_DAMAGE: f32 = 90.0;

/// Nexus health.
pub const NEXUS_HEALTH: f32 = 2500.0;
