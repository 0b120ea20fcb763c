//! # session-engine
//!
//! Conflict detection and time-slot recommendation for tutoring session
//! rosters.
//!
//! Given a snapshot of students (and optionally groups) with their dated
//! sessions, the engine answers three kinds of question, all as pure
//! functions of the roster and an [`EngineConfig`]:
//!
//! - does a proposed session collide with the schedule, how badly, and what
//!   times would work instead ([`check_conflict`], [`check_restore_conflict`],
//!   [`scan_all_conflicts`]);
//! - how much room is there between the sessions of a day
//!   ([`get_sessions_with_gaps`]);
//! - which start times are still open ([`get_available_slots`],
//!   [`get_suggested_slots`]).
//!
//! ```rust
//! use chrono::NaiveDate;
//! use session_engine::{check_conflict, Candidate, EngineConfig, Roster, Severity};
//!
//! let roster = Roster::from_json(r#"{
//!     "students": [{
//!         "id": "s1", "name": "Sara", "sessionTime": "14:00",
//!         "sessions": [{ "id": "a", "date": "2026-03-01" }]
//!     }]
//! }"#).unwrap();
//!
//! let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
//! let result = check_conflict(
//!     &roster,
//!     &Candidate::new(date, "14:30", Some(60)),
//!     None,
//!     &EngineConfig::default(),
//! );
//! assert_eq!(result.severity, Severity::Error);
//! ```
//!
//! ## Modules
//!
//! - [`time`] — `HH:MM` ⇄ minutes, 12-hour formatting, day periods
//! - [`model`] — roster types, owners, resolved session blocks
//! - [`conflict`] — candidate classification and batch scans
//! - [`suggest`] — alternative start times for a conflicting check
//! - [`gaps`] — per-day gap analysis
//! - [`availability`] — open slots and curated slots
//! - [`expander`] — weekly schedule → dated sessions
//! - [`config`] — engine configuration
//! - [`error`] — error types

pub mod availability;
pub mod config;
pub mod conflict;
pub mod error;
pub mod expander;
pub mod gaps;
pub mod i18n;
pub mod model;
pub mod suggest;
pub mod time;

pub use availability::{get_available_slots, get_suggested_slots, TimeSlot};
pub use config::{EngineConfig, WorkingHours};
pub use conflict::{
    check_conflict, check_restore_conflict, scan_all_conflicts, ConflictDetail, ConflictResult,
    ConflictType, Severity,
};
pub use error::ScheduleError;
pub use expander::expand_weekly_sessions;
pub use gaps::{get_sessions_with_gaps, GapSeverity, SessionGap};
pub use i18n::{Locale, LocalizedText};
pub use model::{
    Candidate, Group, Owner, Roster, ScheduledBlock, Session, SessionOwner, SessionStatus, Student,
};
pub use suggest::TimeSuggestion;
pub use time::{
    format_time_12h, format_time_localized, get_time_period, minutes_to_time, time_to_minutes,
    TimePeriod,
};
