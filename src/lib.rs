//! lanesim: a headless MOBA lane-combat simulator.
//!
//! The simulation is a tick-driven Bevy app: minion waves push lanes, towers
//! defend them, an AI champion hunts the player, and the player champion is
//! driven entirely by commands. Matches run unattended through the
//! [`headless`] module.

pub mod cli;
pub mod combat;
pub mod headless;
pub mod sim;

pub use sim::{SimPhase, SimPlugin};
