//! Open start times within working hours.
//!
//! A slot is a step-aligned start time whose interval, padded by the minimum
//! gap on the existing sessions' side, touches none of the day's sessions.
//! The curated variant reorders the same catalogue so that common teaching
//! hours come first.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{EngineConfig, WorkingHours};
use crate::i18n::Locale;
use crate::model::{Roster, ScheduledBlock};
use crate::time::{format_minutes_12h, minutes_to_time, parse_time, time_to_minutes, TimePeriod};

/// An open start time for a session of `duration` minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// `HH:MM`
    pub time: String,
    /// 12-hour rendering in the primary locale.
    pub display: String,
    pub duration: i32,
    pub period: TimePeriod,
}

impl TimeSlot {
    fn new(minutes: i32, duration: i32) -> Self {
        Self {
            time: minutes_to_time(minutes),
            display: format_minutes_12h(minutes, Locale::Arabic),
            duration,
            period: TimePeriod::from_minutes(minutes),
        }
    }
}

/// True when `[start, start + duration)` stays clear of every block's
/// `[start - min_gap, end + min_gap)` window.
fn fits_between(blocks: &[ScheduledBlock], start: i32, duration: i32, min_gap: i32) -> bool {
    let end = start + duration;
    blocks
        .iter()
        .all(|b| !(start < b.end + min_gap && end > b.start - min_gap))
}

/// Every open start time on `date` for a session of `duration` minutes.
///
/// Start times are aligned to `config.slot_step_minutes` and range over
/// `[window.start, window.end - duration]`. An empty day yields every aligned
/// start time in the window.
pub fn get_available_slots(
    roster: &Roster,
    date: NaiveDate,
    duration: i32,
    window: &WorkingHours,
    config: &EngineConfig,
) -> Vec<TimeSlot> {
    let duration = if duration > 0 {
        duration
    } else {
        config.default_duration_minutes
    };
    let step = config.slot_step_minutes.max(1);
    let work_start = time_to_minutes(&window.start);
    let work_end = time_to_minutes(&window.end);
    let blocks = roster.blocks_on(date, None, config);

    // Round the window start up to the next step boundary.
    let first = (work_start + step - 1).div_euclid(step) * step;
    let last = work_end - duration;

    let mut slots = Vec::new();
    let mut t = first;
    while t <= last {
        if fits_between(&blocks, t, duration, config.min_gap_minutes) {
            slots.push(TimeSlot::new(t, duration));
        }
        t += step;
    }

    debug!(
        %date,
        duration,
        sessions = blocks.len(),
        open = slots.len(),
        "available slots"
    );
    slots
}

/// Available slots reordered so the configured preferred times come first
/// (in their configured order), followed by the rest chronologically, then
/// truncated to `max`.
pub fn get_suggested_slots(
    roster: &Roster,
    date: NaiveDate,
    duration: i32,
    window: &WorkingHours,
    max: usize,
    config: &EngineConfig,
) -> Vec<TimeSlot> {
    let preferred: Vec<i32> = config
        .preferred_times
        .iter()
        .filter_map(|t| parse_time(t))
        .collect();

    let mut slots = get_available_slots(roster, date, duration, window, config);
    slots.sort_by_key(|slot| {
        let minutes = time_to_minutes(&slot.time);
        match preferred.iter().position(|p| *p == minutes) {
            Some(rank) => (0, rank as i32),
            None => (1, minutes),
        }
    });
    slots.truncate(max);
    slots
}
