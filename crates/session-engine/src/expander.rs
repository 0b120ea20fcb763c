//! Weekly schedule expansion -- turns an owner's recurring weekdays into dated
//! sessions.
//!
//! Uses the `rrule` crate with a `FREQ=WEEKLY;BYDAY=...` rule anchored in the
//! configured timezone (validated with `chrono-tz`). Expanded sessions carry no
//! time or duration of their own, so the owner's defaults apply when they are
//! checked.

use chrono::{Datelike, NaiveDate};
use rrule::RRuleSet;
use tracing::debug;

use crate::error::{Result, ScheduleError};
use crate::model::{Session, SessionStatus};

/// RFC 5545 BYDAY codes indexed by weekday number, 0 = Sunday.
const BYDAY: [&str; 7] = ["SU", "MO", "TU", "WE", "TH", "FR", "SA"];

/// Build the `BYDAY` list for weekday numbers (0 = Sunday ... 6 = Saturday).
///
/// Duplicates are dropped; order follows the input.
pub fn byday_codes(schedule_days: &[u8]) -> Result<Vec<&'static str>> {
    let mut codes = Vec::with_capacity(schedule_days.len());
    for &day in schedule_days {
        let code = BYDAY
            .get(day as usize)
            .copied()
            .ok_or(ScheduleError::InvalidWeekday(day))?;
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    Ok(codes)
}

/// Expand weekly `schedule_days` into one scheduled session per matching date
/// between `from` and `until`, both inclusive.
///
/// Session ids are `<owner_id>-<YYYY-MM-DD>`.
///
/// # Errors
/// Returns `ScheduleError::InvalidWeekday` for day numbers above 6,
/// `ScheduleError::InvalidTimezone` if `timezone` is not an IANA identifier,
/// and `ScheduleError::InvalidRule` if the rule fails to parse.
pub fn expand_weekly_sessions(
    owner_id: &str,
    schedule_days: &[u8],
    from: NaiveDate,
    until: NaiveDate,
    timezone: &str,
) -> Result<Vec<Session>> {
    let codes = byday_codes(schedule_days)?;

    // Parsed only to reject unknown zones; the rule text carries the TZID.
    let _tz: chrono_tz::Tz = timezone
        .parse()
        .map_err(|_| ScheduleError::InvalidTimezone(timezone.to_string()))?;

    if codes.is_empty() || from > until {
        return Ok(Vec::new());
    }

    // Open-ended rule; the occurrence limit below bounds the expansion and
    // the date filter trims it to `until`.
    let rule_text = format!(
        "DTSTART;TZID={}:{}\nRRULE:FREQ=WEEKLY;BYDAY={}",
        timezone,
        from.format("%Y%m%dT000000"),
        codes.join(","),
    );

    let rule_set: RRuleSet = rule_text
        .parse()
        .map_err(|e| ScheduleError::InvalidRule(format!("{}", e)))?;

    // At most one occurrence per day in the range.
    let span_days = (until - from).num_days() + 1;
    let limit = u16::try_from(span_days).unwrap_or(u16::MAX);

    let sessions: Vec<Session> = rule_set
        .all(limit)
        .dates
        .into_iter()
        .map(|dt| dt.date_naive())
        .filter(|date| *date >= from && *date <= until)
        .filter(|date| codes.contains(&BYDAY[date.weekday().num_days_from_sunday() as usize]))
        .map(|date| Session {
            id: format!("{}-{}", owner_id, date.format("%Y-%m-%d")),
            date,
            time: None,
            duration: None,
            status: SessionStatus::Scheduled,
        })
        .collect();

    debug!(
        owner_id,
        days = ?codes,
        %from,
        %until,
        count = sessions.len(),
        "expanded weekly schedule"
    );
    Ok(sessions)
}
