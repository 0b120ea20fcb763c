//! Classify how a candidate session collides with the existing schedule.
//!
//! Every active session on the candidate's date is compared against the
//! candidate interval. A shared start time is an exact conflict, any other
//! intersection is partial, and a non-overlapping neighbour closer than the
//! minimum gap is a close warning. Results aggregate over all neighbours: the
//! worst severity wins and the type follows `exact > partial > close`.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::i18n::LocalizedText;
use crate::model::{resolve_duration, resolve_start, Candidate, Roster, ScheduledBlock};
use crate::suggest::{suggest_alternatives, TimeSuggestion};
use crate::time::minutes_to_time;

/// Ordinal severity of a scheduling problem: `None < Warning < Error`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    None,
    /// Advisory; the caller may still save after confirmation.
    Warning,
    /// The session cannot be kept at this time.
    Error,
}

/// Kind of collision. Variant order is the reporting precedence, so the
/// strongest type seen is simply the maximum.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ConflictType {
    #[default]
    None,
    Close,
    Partial,
    Exact,
}

impl ConflictType {
    pub fn severity(self) -> Severity {
        match self {
            ConflictType::None => Severity::None,
            ConflictType::Close => Severity::Warning,
            ConflictType::Partial | ConflictType::Exact => Severity::Error,
        }
    }
}

/// Relationship between two intervals on the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proximity {
    Exact { overlap_minutes: i32 },
    Partial { overlap_minutes: i32 },
    Close { gap_minutes: i32 },
    Clear,
}

impl Proximity {
    pub fn conflict_type(self) -> ConflictType {
        match self {
            Proximity::Exact { .. } => ConflictType::Exact,
            Proximity::Partial { .. } => ConflictType::Partial,
            Proximity::Close { .. } => ConflictType::Close,
            Proximity::Clear => ConflictType::None,
        }
    }
}

/// Whether `[a_start, a_end)` and `[b_start, b_end)` intersect.
///
/// True when `a` starts inside `b`, ends inside `b`, or encloses `b`.
/// Intervals that merely touch (`a_end == b_start`) do not overlap.
pub fn intervals_overlap(a_start: i32, a_end: i32, b_start: i32, b_end: i32) -> bool {
    (a_start >= b_start && a_start < b_end)
        || (a_end > b_start && a_end <= b_end)
        || (a_start <= b_start && a_end >= b_end)
}

/// Classify interval `a` against interval `b` given the minimum gap.
pub fn classify(a_start: i32, a_end: i32, b_start: i32, b_end: i32, min_gap: i32) -> Proximity {
    if a_start == b_start {
        return Proximity::Exact {
            overlap_minutes: a_end.min(b_end) - a_start,
        };
    }
    if intervals_overlap(a_start, a_end, b_start, b_end) {
        return Proximity::Partial {
            overlap_minutes: a_end.min(b_end) - a_start.max(b_start),
        };
    }
    let gap = if b_start >= a_end {
        b_start - a_end
    } else {
        a_start - b_end
    };
    if (0..min_gap).contains(&gap) {
        Proximity::Close { gap_minutes: gap }
    } else {
        Proximity::Clear
    }
}

/// One existing session the candidate collides with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictDetail {
    pub session: ScheduledBlock,
    #[serde(rename = "type")]
    pub conflict_type: ConflictType,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlap_minutes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap_minutes: Option<i32>,
    pub message: LocalizedText,
}

impl ConflictDetail {
    fn new(session: ScheduledBlock, proximity: Proximity) -> Self {
        let who = session.owner.label();
        let range = format!("{} - {}", session.time, session.end_time);
        let (overlap_minutes, gap_minutes, message) = match proximity {
            Proximity::Exact { overlap_minutes } => (
                Some(overlap_minutes),
                None,
                LocalizedText::new(
                    format!("نفس موعد جلسة {} ({})", who.ar, session.time),
                    format!("Same start time as {}'s session ({})", who.en, session.time),
                ),
            ),
            Proximity::Partial { overlap_minutes } => (
                Some(overlap_minutes),
                None,
                LocalizedText::new(
                    format!(
                        "تتداخل مع جلسة {} ({}) بمقدار {} دقيقة",
                        who.ar, range, overlap_minutes
                    ),
                    format!(
                        "Overlaps {}'s session ({}) by {} minutes",
                        who.en, range, overlap_minutes
                    ),
                ),
            ),
            Proximity::Close { gap_minutes } => (
                None,
                Some(gap_minutes),
                LocalizedText::new(
                    format!(
                        "الفاصل {} دقيقة فقط عن جلسة {} ({})",
                        gap_minutes, who.ar, range
                    ),
                    format!(
                        "Only {} minutes from {}'s session ({})",
                        gap_minutes, who.en, range
                    ),
                ),
            ),
            Proximity::Clear => (None, None, LocalizedText::new("", "")),
        };
        let conflict_type = proximity.conflict_type();
        Self {
            session,
            conflict_type,
            severity: conflict_type.severity(),
            overlap_minutes,
            gap_minutes,
            message,
        }
    }
}

/// Outcome of checking one candidate time. Recomputed per query, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictResult {
    pub severity: Severity,
    #[serde(rename = "type")]
    pub conflict_type: ConflictType,
    pub conflicts: Vec<ConflictDetail>,
    pub suggestions: Vec<TimeSuggestion>,
}

impl ConflictResult {
    /// The empty result: no severity, no conflicts, no suggestions.
    pub fn none() -> Self {
        Self::default()
    }

    /// True when the session cannot be saved at this time.
    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn has_conflict(&self) -> bool {
        self.severity != Severity::None
    }
}

/// Check a candidate session against the roster.
///
/// `exclude_session_id` names the session being edited, so it is never
/// reported against itself.
pub fn check_conflict(
    roster: &Roster,
    candidate: &Candidate,
    exclude_session_id: Option<&str>,
    config: &EngineConfig,
) -> ConflictResult {
    let start = resolve_start(Some(&candidate.start_time), None, config);
    let duration = resolve_duration(candidate.duration, None, config);
    let neighbours = roster.blocks_on(candidate.date, exclude_session_id, config);
    evaluate(&neighbours, candidate.date, start, duration, config)
}

/// Classify `[start, start + duration)` against sessions already narrowed to
/// one date (and with any excluded session removed).
pub(crate) fn evaluate(
    neighbours: &[ScheduledBlock],
    date: NaiveDate,
    start: i32,
    duration: i32,
    config: &EngineConfig,
) -> ConflictResult {
    let end = start + duration;
    let mut result = ConflictResult::none();

    for block in neighbours {
        let proximity = classify(start, end, block.start, block.end, config.min_gap_minutes);
        trace!(
            session = %block.session_id,
            owner = block.owner.name(),
            ?proximity,
            "classified neighbour"
        );
        let conflict_type = proximity.conflict_type();
        if conflict_type == ConflictType::None {
            continue;
        }
        result.severity = result.severity.max(conflict_type.severity());
        result.conflict_type = result.conflict_type.max(conflict_type);
        result
            .conflicts
            .push(ConflictDetail::new(block.clone(), proximity));
    }

    if result.has_conflict() {
        result.suggestions = suggest_alternatives(neighbours, duration, config);
    }

    debug!(
        %date,
        time = %minutes_to_time(start),
        duration,
        severity = ?result.severity,
        conflicts = result.conflicts.len(),
        suggestions = result.suggestions.len(),
        "conflict check"
    );

    result
}

/// Check whether reactivating a cancelled or vacation session would collide
/// with the schedule as it stands now.
///
/// Unknown owner or session ids yield [`ConflictResult::none`].
pub fn check_restore_conflict(
    roster: &Roster,
    owner_id: &str,
    session_id: &str,
    config: &EngineConfig,
) -> ConflictResult {
    let Some(block) = roster.find_session(owner_id, session_id, config) else {
        debug!(owner_id, session_id, "restore check for unknown session");
        return ConflictResult::none();
    };
    let candidate = Candidate::new(block.date, block.time.clone(), Some(block.duration() as u32));
    check_conflict(roster, &candidate, Some(session_id), config)
}

/// Check every active session against the rest of the roster.
///
/// Returns only sessions with a non-`none` result, keyed by session id.
/// Sessions are bucketed by date once, so each check only scans its own day.
pub fn scan_all_conflicts(
    roster: &Roster,
    config: &EngineConfig,
) -> BTreeMap<String, ConflictResult> {
    let mut by_date: BTreeMap<NaiveDate, Vec<ScheduledBlock>> = BTreeMap::new();
    for block in roster.active_blocks(config) {
        by_date.entry(block.date).or_default().push(block);
    }

    let mut results = BTreeMap::new();
    for (date, blocks) in &by_date {
        for block in blocks {
            let others: Vec<ScheduledBlock> = blocks
                .iter()
                .filter(|other| other.session_id != block.session_id)
                .cloned()
                .collect();
            let result = evaluate(&others, *date, block.start, block.duration(), config);
            if result.has_conflict() {
                results.insert(block.session_id.clone(), result);
            }
        }
    }

    debug!(
        dates = by_date.len(),
        flagged = results.len(),
        "scanned roster for conflicts"
    );
    results
}
