//! Per-day gap analysis: how much breathing room follows each session, and
//! whether the session already collides with another one.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::conflict::{intervals_overlap, ConflictType};
use crate::model::{Roster, ScheduledBlock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapSeverity {
    /// At least the minimum gap.
    Good,
    /// Back-to-back or shorter than the minimum gap.
    Warning,
    /// Negative gap: the sessions overlap.
    Critical,
}

/// Grade the gap between a session and its successor.
pub fn classify_gap(gap_minutes: i32, min_gap: i32) -> GapSeverity {
    if gap_minutes < 0 {
        GapSeverity::Critical
    } else if gap_minutes < min_gap {
        GapSeverity::Warning
    } else {
        GapSeverity::Good
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionGap {
    pub session: ScheduledBlock,
    /// Start of the next session minus end of this one; `None` for the last.
    pub gap_after: Option<i32>,
    pub gap_severity: Option<GapSeverity>,
    pub has_conflict: bool,
    /// `Exact`, `Partial` or `None`; gap warnings are reported via
    /// `gap_severity` instead.
    pub conflict_type: ConflictType,
}

/// Active sessions on `date` sorted by start time, each with the gap to its
/// successor and its own conflict status.
pub fn get_sessions_with_gaps(
    roster: &Roster,
    date: NaiveDate,
    config: &EngineConfig,
) -> Vec<SessionGap> {
    let mut blocks = roster.blocks_on(date, None, config);
    blocks.sort_by_key(|b| b.start);

    let conflict_types: Vec<ConflictType> = blocks
        .iter()
        .enumerate()
        .map(|(i, block)| {
            blocks
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, other)| {
                    if block.start == other.start {
                        ConflictType::Exact
                    } else if intervals_overlap(block.start, block.end, other.start, other.end) {
                        ConflictType::Partial
                    } else {
                        ConflictType::None
                    }
                })
                .max()
                .unwrap_or_default()
        })
        .collect();

    let gaps: Vec<Option<i32>> = (0..blocks.len())
        .map(|i| blocks.get(i + 1).map(|next| next.start - blocks[i].end))
        .collect();

    blocks
        .into_iter()
        .zip(gaps)
        .zip(conflict_types)
        .map(|((session, gap_after), conflict_type)| SessionGap {
            session,
            gap_after,
            gap_severity: gap_after.map(|g| classify_gap(g, config.min_gap_minutes)),
            has_conflict: conflict_type != ConflictType::None,
            conflict_type,
        })
        .collect()
}
