//! Alternative start times offered alongside a conflicting check.
//!
//! Candidates are discovered in a fixed order: one slot ending a full gap
//! before the earliest session of the day, then one slot a full gap after each
//! session (in start order) that still leaves a gap before the next one.
//! Discovery order is kept; there is no ranking pass.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::conflict::{classify, Proximity};
use crate::i18n::{Locale, LocalizedText};
use crate::model::ScheduledBlock;
use crate::time::{format_minutes_12h, minutes_to_time, parse_time};

/// An alternative start time for the session being checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSuggestion {
    /// `HH:MM`
    pub time: String,
    /// 12-hour rendering in the primary locale.
    pub display: String,
    pub label: LocalizedText,
}

impl TimeSuggestion {
    fn new(minutes: i32, label: LocalizedText) -> Self {
        Self {
            time: minutes_to_time(minutes),
            display: format_minutes_12h(minutes, Locale::Arabic),
            label,
        }
    }
}

/// True when `[start, start + duration)` has no exact, partial or close
/// relationship with any of `blocks`.
pub fn is_clear(blocks: &[ScheduledBlock], start: i32, duration: i32, min_gap: i32) -> bool {
    let end = start + duration;
    blocks
        .iter()
        .all(|b| classify(start, end, b.start, b.end, min_gap) == Proximity::Clear)
}

/// Propose up to `config.max_suggestions` start times for a session of
/// `duration` minutes on a day holding `blocks`.
///
/// A discovered time is dropped if it would itself conflict with any session
/// of the day (e.g. when a long session encloses shorter ones), so every
/// suggestion checks clean when re-submitted.
pub fn suggest_alternatives(
    blocks: &[ScheduledBlock],
    duration: i32,
    config: &EngineConfig,
) -> Vec<TimeSuggestion> {
    let gap = config.min_gap_minutes;
    let earliest = parse_time(&config.earliest_suggestion).unwrap_or(8 * 60);
    let latest = parse_time(&config.latest_suggestion_start).unwrap_or(23 * 60);

    let mut sorted: Vec<&ScheduledBlock> = blocks.iter().collect();
    sorted.sort_by_key(|b| b.start);

    let mut found: Vec<(i32, LocalizedText)> = Vec::new();

    if let Some(first) = sorted.first() {
        let before = first.start - (duration + gap);
        if before >= earliest {
            let who = first.owner.label();
            found.push((
                before,
                LocalizedText::new(
                    format!("قبل جلسة {}", who.ar),
                    format!("Before {}'s session", who.en),
                ),
            ));
        }
    }

    for (i, block) in sorted.iter().enumerate() {
        let after = block.end + gap;
        let fits = match sorted.get(i + 1) {
            Some(next) => after + duration + gap <= next.start,
            None => true,
        };
        if fits && after < latest {
            let who = block.owner.label();
            found.push((
                after,
                LocalizedText::new(
                    format!("بعد جلسة {}", who.ar),
                    format!("After {}'s session", who.en),
                ),
            ));
        }
    }

    let mut suggestions: Vec<TimeSuggestion> = Vec::new();
    for (minutes, label) in found {
        if suggestions.len() >= config.max_suggestions {
            break;
        }
        let time = minutes_to_time(minutes);
        if suggestions.iter().any(|s| s.time == time) {
            continue;
        }
        if !is_clear(blocks, minutes, duration, gap) {
            continue;
        }
        suggestions.push(TimeSuggestion::new(minutes, label));
    }
    suggestions
}
