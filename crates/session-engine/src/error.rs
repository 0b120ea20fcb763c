//! Error types for session-engine operations.
//!
//! Only the edges of the engine can fail (reading configuration, parsing a
//! roster, expanding a weekly schedule). Conflict, gap and slot queries are
//! total and never return these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Invalid recurrence rule: {0}")]
    InvalidRule(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid weekday number {0} (expected 0 = Sunday through 6 = Saturday)")]
    InvalidWeekday(u8),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Roster parse error: {0}")]
    Roster(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
