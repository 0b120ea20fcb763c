//! Engine-level configuration.
//!
//! Every knob the checker and analyzers consult lives here rather than being
//! re-declared at call sites. All fields have defaults, so an empty TOML file
//! (or no file at all) yields the canonical configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::time::{parse_time, DEFAULT_SESSION_MINUTES, DEFAULT_SESSION_TIME, MINUTES_PER_DAY};

/// A `[start, end)` wall-clock window, e.g. teaching hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start: String,
    pub end: String,
}

impl WorkingHours {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Full availability scan window, 08:00-22:00.
    pub fn availability() -> Self {
        Self::new("08:00", "22:00")
    }

    /// Window for curated suggestions, 14:00-22:00.
    pub fn curated() -> Self {
        Self::new("14:00", "22:00")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum buffer between two sessions. Anything shorter is a warning.
    pub min_gap_minutes: i32,
    /// Used when neither the session nor its owner carries a duration.
    pub default_duration_minutes: i32,
    /// Used when neither the session nor its owner carries a usable time.
    pub default_session_time: String,
    /// Whether group sessions take part in conflict checks and slot scans.
    pub include_groups: bool,
    pub max_suggestions: usize,
    /// Suggestions never start before this time.
    pub earliest_suggestion: String,
    /// Suggestions must start strictly before this time.
    pub latest_suggestion_start: String,
    pub slot_step_minutes: i32,
    pub availability_window: WorkingHours,
    pub curated_window: WorkingHours,
    /// Start times ranked first by curated suggestions, in this order.
    pub preferred_times: Vec<String>,
    pub max_curated_slots: usize,
    /// IANA zone the weekly schedule is expanded in.
    pub timezone: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_gap_minutes: 30,
            default_duration_minutes: 60,
            default_session_time: DEFAULT_SESSION_TIME.to_string(),
            include_groups: true,
            max_suggestions: 3,
            earliest_suggestion: "08:00".to_string(),
            latest_suggestion_start: "23:00".to_string(),
            slot_step_minutes: 30,
            availability_window: WorkingHours::availability(),
            curated_window: WorkingHours::curated(),
            preferred_times: (14..=20).map(|h| format!("{:02}:00", h)).collect(),
            max_curated_slots: 6,
            timezone: "Asia/Riyadh".to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content).map_err(|e| {
            ScheduleError::Config(format!("Failed to parse config: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ScheduleError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Reject values that would make the scans meaningless.
    pub fn validate(&self) -> Result<()> {
        if !(0..=MINUTES_PER_DAY).contains(&self.min_gap_minutes) {
            return Err(ScheduleError::Config(
                "min_gap_minutes must be between 0 and 1440".to_string(),
            ));
        }
        if !(1..=MINUTES_PER_DAY).contains(&self.default_duration_minutes) {
            return Err(ScheduleError::Config(
                "default_duration_minutes must be between 1 and 1440".to_string(),
            ));
        }
        if !(1..=MINUTES_PER_DAY).contains(&self.slot_step_minutes) {
            return Err(ScheduleError::Config(
                "slot_step_minutes must be between 1 and 1440".to_string(),
            ));
        }
        if parse_time(&self.default_session_time).is_none() {
            return Err(ScheduleError::Config(format!(
                "default_session_time '{}' is not HH:MM",
                self.default_session_time
            )));
        }
        Ok(())
    }

    /// [`EngineConfig::default_session_time`] in minutes.
    pub fn default_session_minutes(&self) -> i32 {
        parse_time(&self.default_session_time).unwrap_or(DEFAULT_SESSION_MINUTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.min_gap_minutes, 30);
        assert_eq!(config.default_session_minutes(), 960);
        assert_eq!(config.preferred_times.first().map(String::as_str), Some("14:00"));
        assert_eq!(config.preferred_times.last().map(String::as_str), Some("20:00"));
    }

    #[test]
    fn legacy_gap_threshold_can_be_selected() {
        let toml = r#"
            min_gap_minutes = 15
            include_groups = false

            [availability_window]
            start = "09:00"
            end = "21:00"
        "#;
        let config = EngineConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.min_gap_minutes, 15);
        assert!(!config.include_groups);
        assert_eq!(config.availability_window, WorkingHours::new("09:00", "21:00"));
        assert_eq!(config.curated_window, WorkingHours::curated());
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(EngineConfig::from_toml_str("min_gap_minutes = -5").is_err());
        assert!(EngineConfig::from_toml_str("slot_step_minutes = 0").is_err());
        assert!(EngineConfig::from_toml_str("min_gap_minutes = 2147483647").is_err());
        assert!(EngineConfig::from_toml_str("default_duration_minutes = 1441").is_err());
        assert!(EngineConfig::from_toml_str("slot_step_minutes = 100000").is_err());
        assert!(EngineConfig::from_toml_str("default_session_time = \"late\"").is_err());
        assert!(EngineConfig::from_toml_str("min_gap_minutes = \"thirty\"").is_err());
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = EngineConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ScheduleError::Config(_)));
    }
}
