//! Wall-clock time arithmetic for session start times.
//!
//! Session times travel as `HH:MM` strings (the data layer sometimes appends
//! `:SS`). Internally everything is minutes since midnight as `i32`, so that
//! intervals running past midnight and gaps that go negative stay plain
//! integer arithmetic.

use serde::{Deserialize, Serialize};

use crate::i18n::{Locale, LocalizedText};

/// Fallback start time for sessions with no usable time of their own.
pub const DEFAULT_SESSION_TIME: &str = "16:00";

/// [`DEFAULT_SESSION_TIME`] as minutes since midnight.
pub const DEFAULT_SESSION_MINUTES: i32 = 16 * 60;

pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// Coarse part of the day a start time falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePeriod {
    Morning,
    Afternoon,
    Evening,
}

impl TimePeriod {
    pub fn from_minutes(minutes: i32) -> Self {
        let minutes = minutes.rem_euclid(MINUTES_PER_DAY);
        if minutes < 12 * 60 {
            TimePeriod::Morning
        } else if minutes < 17 * 60 {
            TimePeriod::Afternoon
        } else {
            TimePeriod::Evening
        }
    }

    pub fn label(self) -> LocalizedText {
        match self {
            TimePeriod::Morning => LocalizedText::new("صباحاً", "Morning"),
            TimePeriod::Afternoon => LocalizedText::new("ظهراً", "Afternoon"),
            TimePeriod::Evening => LocalizedText::new("مساءً", "Evening"),
        }
    }
}

/// Strictly parse `HH:MM` (or `HH:MM:SS`) into minutes since midnight.
///
/// Hours take one or two digits; minutes and seconds exactly two. Signs,
/// inner whitespace and out-of-range values yield `None`. Seconds, when
/// present, are validated and then ignored.
pub fn parse_time(time: &str) -> Option<i32> {
    let mut parts = time.trim().split(':');
    let hours = digits(parts.next()?, 1..=2)?;
    let minutes = digits(parts.next()?, 2..=2)?;
    if let Some(seconds) = parts.next() {
        if digits(seconds, 2..=2)? >= 60 {
            return None;
        }
    }
    if parts.next().is_some() {
        return None;
    }
    if hours >= 24 || minutes >= 60 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Parse an unsigned ASCII-digit field whose length falls in `len`.
fn digits(field: &str, len: std::ops::RangeInclusive<usize>) -> Option<i32> {
    if !len.contains(&field.len()) || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Convert `HH:MM` into minutes since midnight.
///
/// Empty or malformed input yields 960 (16:00), the fallback session time
/// callers rely on.
pub fn time_to_minutes(time: &str) -> i32 {
    parse_time(time).unwrap_or(DEFAULT_SESSION_MINUTES)
}

/// Format minutes since midnight as `HH:MM`.
///
/// Values outside `[0, 1440)` wrap around the day, so 1530 (25:30) renders
/// as `01:30` and -30 as `23:30`. No date carry is implied.
pub fn minutes_to_time(minutes: i32) -> String {
    let minutes = minutes.rem_euclid(MINUTES_PER_DAY);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Render a time in 12-hour form with a day-half suffix for `locale`.
///
/// `"14:30"` becomes `"2:30 م"` in Arabic and `"2:30 PM"` in English.
pub fn format_time_12h(time: &str, locale: Locale) -> String {
    format_minutes_12h(time_to_minutes(time), locale)
}

/// 12-hour rendering straight from minutes since midnight.
pub fn format_minutes_12h(minutes: i32, locale: Locale) -> String {
    let minutes = minutes.rem_euclid(MINUTES_PER_DAY);
    let hours = minutes / 60;
    let is_pm = hours >= 12;
    let hours_12 = match hours % 12 {
        0 => 12,
        h => h,
    };
    let suffix = match (locale, is_pm) {
        (Locale::Arabic, false) => "ص",
        (Locale::Arabic, true) => "م",
        (Locale::English, false) => "AM",
        (Locale::English, true) => "PM",
    };
    format!("{}:{:02} {}", hours_12, minutes % 60, suffix)
}

/// 12-hour rendering in the application's primary (Arabic) locale.
pub fn format_time_localized(time: &str) -> String {
    format_time_12h(time, Locale::Arabic)
}

/// Classify a start time as morning (`< 12:00`), afternoon (`< 17:00`) or
/// evening.
pub fn get_time_period(time: &str) -> TimePeriod {
    TimePeriod::from_minutes(time_to_minutes(time))
}
