//! WASM bindings for session-engine.
//!
//! Exposes conflict checks, gap analysis and slot scans to the JavaScript UI
//! via `wasm-bindgen`. Rosters, candidates, configuration and results all cross
//! the boundary as JSON strings in the same camelCase shape the data layer
//! already produces.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p session-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/src/engine/wasm/ \
//!   target/wasm32-unknown-unknown/release/session_engine_wasm.wasm
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use session_engine::{Candidate, EngineConfig, Roster, WorkingHours};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// JSON plumbing (plain Rust, so it can be tested off-wasm)
// ---------------------------------------------------------------------------

mod bridge {
    use super::*;

    pub fn parse_roster(json: &str) -> Result<Roster, String> {
        Roster::from_json(json).map_err(|e| format!("Invalid roster JSON: {}", e))
    }

    /// Missing or empty config JSON means the default configuration.
    pub fn parse_config(json: Option<&str>) -> Result<EngineConfig, String> {
        match json.map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(EngineConfig::default()),
            Some(json) => {
                let config: EngineConfig = serde_json::from_str(json)
                    .map_err(|e| format!("Invalid config JSON: {}", e))?;
                config.validate().map_err(|e| e.to_string())?;
                Ok(config)
            }
        }
    }

    pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| format!("Invalid date '{}': {}", s, e))
    }

    pub fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
        serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
    }

    pub fn check_conflict(
        roster_json: &str,
        candidate_json: &str,
        exclude_session_id: Option<&str>,
        config_json: Option<&str>,
    ) -> Result<String, String> {
        let roster = parse_roster(roster_json)?;
        let candidate: Candidate = serde_json::from_str(candidate_json)
            .map_err(|e| format!("Invalid candidate JSON: {}", e))?;
        let config = parse_config(config_json)?;
        to_json(&session_engine::check_conflict(
            &roster,
            &candidate,
            exclude_session_id,
            &config,
        ))
    }

    pub fn check_restore_conflict(
        roster_json: &str,
        owner_id: &str,
        session_id: &str,
        config_json: Option<&str>,
    ) -> Result<String, String> {
        let roster = parse_roster(roster_json)?;
        let config = parse_config(config_json)?;
        to_json(&session_engine::check_restore_conflict(
            &roster, owner_id, session_id, &config,
        ))
    }

    pub fn sessions_with_gaps(
        roster_json: &str,
        date: &str,
        config_json: Option<&str>,
    ) -> Result<String, String> {
        let roster = parse_roster(roster_json)?;
        let date = parse_date(date)?;
        let config = parse_config(config_json)?;
        to_json(&session_engine::get_sessions_with_gaps(&roster, date, &config))
    }

    pub fn available_slots(
        roster_json: &str,
        date: &str,
        duration: i32,
        work_start: Option<&str>,
        work_end: Option<&str>,
        config_json: Option<&str>,
    ) -> Result<String, String> {
        let roster = parse_roster(roster_json)?;
        let date = parse_date(date)?;
        let config = parse_config(config_json)?;
        let window = window_or(&config.availability_window, work_start, work_end);
        to_json(&session_engine::get_available_slots(
            &roster, date, duration, &window, &config,
        ))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn suggested_slots(
        roster_json: &str,
        date: &str,
        duration: i32,
        work_start: Option<&str>,
        work_end: Option<&str>,
        max: Option<usize>,
        config_json: Option<&str>,
    ) -> Result<String, String> {
        let roster = parse_roster(roster_json)?;
        let date = parse_date(date)?;
        let config = parse_config(config_json)?;
        let window = window_or(&config.curated_window, work_start, work_end);
        let max = max.unwrap_or(config.max_curated_slots);
        to_json(&session_engine::get_suggested_slots(
            &roster, date, duration, &window, max, &config,
        ))
    }

    pub fn scan_all_conflicts(roster_json: &str, config_json: Option<&str>) -> Result<String, String> {
        let roster = parse_roster(roster_json)?;
        let config = parse_config(config_json)?;
        to_json(&session_engine::scan_all_conflicts(&roster, &config))
    }

    fn window_or(default: &WorkingHours, start: Option<&str>, end: Option<&str>) -> WorkingHours {
        WorkingHours::new(
            start.unwrap_or(default.start.as_str()),
            end.unwrap_or(default.end.as_str()),
        )
    }
}

fn js_err(message: String) -> JsValue {
    JsValue::from_str(&message)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Check a candidate session (`{date, startTime, duration?}`) against the
/// roster. Returns the `ConflictResult` as JSON.
#[wasm_bindgen(js_name = "checkConflict")]
pub fn check_conflict(
    roster_json: &str,
    candidate_json: &str,
    exclude_session_id: Option<String>,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    bridge::check_conflict(
        roster_json,
        candidate_json,
        exclude_session_id.as_deref(),
        config_json.as_deref(),
    )
    .map_err(js_err)
}

/// Check whether restoring a cancelled or vacation session would conflict.
#[wasm_bindgen(js_name = "checkRestoreConflict")]
pub fn check_restore_conflict(
    roster_json: &str,
    owner_id: &str,
    session_id: &str,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    bridge::check_restore_conflict(roster_json, owner_id, session_id, config_json.as_deref())
        .map_err(js_err)
}

/// Sessions on `date` (`YYYY-MM-DD`) with their gaps and conflict flags.
#[wasm_bindgen(js_name = "getSessionsWithGaps")]
pub fn get_sessions_with_gaps(
    roster_json: &str,
    date: &str,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    bridge::sessions_with_gaps(roster_json, date, config_json.as_deref()).map_err(js_err)
}

/// Open start times on `date`. The window defaults to 08:00-22:00.
#[wasm_bindgen(js_name = "getAvailableSlots")]
pub fn get_available_slots(
    roster_json: &str,
    date: &str,
    duration: i32,
    work_start: Option<String>,
    work_end: Option<String>,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    bridge::available_slots(
        roster_json,
        date,
        duration,
        work_start.as_deref(),
        work_end.as_deref(),
        config_json.as_deref(),
    )
    .map_err(js_err)
}

/// Curated open start times. The window defaults to 14:00-22:00 and the
/// limit to 6.
#[wasm_bindgen(js_name = "getSuggestedSlots")]
pub fn get_suggested_slots(
    roster_json: &str,
    date: &str,
    duration: i32,
    work_start: Option<String>,
    work_end: Option<String>,
    max: Option<u32>,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    bridge::suggested_slots(
        roster_json,
        date,
        duration,
        work_start.as_deref(),
        work_end.as_deref(),
        max.map(|m| m as usize),
        config_json.as_deref(),
    )
    .map_err(js_err)
}

/// Map of session id to conflict result for every conflicting session.
#[wasm_bindgen(js_name = "scanAllConflicts")]
pub fn scan_all_conflicts(roster_json: &str, config_json: Option<String>) -> Result<String, JsValue> {
    bridge::scan_all_conflicts(roster_json, config_json.as_deref()).map_err(js_err)
}

#[wasm_bindgen(js_name = "timeToMinutes")]
pub fn time_to_minutes(time: &str) -> i32 {
    session_engine::time_to_minutes(time)
}

#[wasm_bindgen(js_name = "minutesToTime")]
pub fn minutes_to_time(minutes: i32) -> String {
    session_engine::minutes_to_time(minutes)
}

#[wasm_bindgen(js_name = "formatTimeLocalized")]
pub fn format_time_localized(time: &str) -> String {
    session_engine::format_time_localized(time)
}
