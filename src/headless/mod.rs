//! Unattended match execution for testing and balance work.

pub mod config;
pub mod runner;

pub use config::HeadlessMatchConfig;
pub use runner::{run_headless_match, MatchResult};
