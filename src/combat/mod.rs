//! Combat events and logging.

pub mod events;
pub mod log;
