//! Roster data supplied by the data layer, and the resolved view the engine
//! computes over it.
//!
//! The roster types mirror the camelCase JSON the data layer hands over.
//! [`ScheduledBlock`] is the engine's own view of a session: owner attached,
//! defaults applied, start/end in minutes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::i18n::LocalizedText;
use crate::time::{minutes_to_time, parse_time, MINUTES_PER_DAY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
    Vacation,
}

impl SessionStatus {
    /// Cancelled and vacation sessions are inert for collision purposes.
    pub fn is_active(self) -> bool {
        !matches!(self, SessionStatus::Cancelled | SessionStatus::Vacation)
    }
}

/// One dated session of a student or a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub date: NaiveDate,
    /// `HH:MM`; falls back to the owner's default when absent or blank.
    #[serde(default)]
    pub time: Option<String>,
    /// Minutes; falls back to the owner's default when absent or zero.
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub status: SessionStatus,
}

impl Session {
    pub fn new(id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            date,
            time: None,
            duration: None,
            status: SessionStatus::Scheduled,
        }
    }

    pub fn at(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn lasting(mut self, minutes: u32) -> Self {
        self.duration = Some(minutes);
        self
    }

    pub fn with_status(mut self, status: SessionStatus) -> Self {
        self.status = status;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub session_time: Option<String>,
    #[serde(default)]
    pub session_duration: Option<u32>,
    /// Weekdays of the recurring schedule, 0 = Sunday.
    #[serde(default)]
    pub schedule_days: Vec<u8>,
    #[serde(default)]
    pub sessions: Vec<Session>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub session_time: Option<String>,
    #[serde(default)]
    pub session_duration: Option<u32>,
    #[serde(default)]
    pub schedule_days: Vec<u8>,
    #[serde(default)]
    pub sessions: Vec<Session>,
}

/// Who a session belongs to, for conflict attribution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Owner {
    Student { id: String, name: String },
    Group { id: String, name: String },
}

impl Owner {
    pub fn id(&self) -> &str {
        match self {
            Owner::Student { id, .. } | Owner::Group { id, .. } => id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Owner::Student { name, .. } | Owner::Group { name, .. } => name,
        }
    }

    /// Name as shown in conflict messages; groups get a "Group X" prefix.
    pub fn label(&self) -> LocalizedText {
        match self {
            Owner::Student { name, .. } => LocalizedText::new(name.as_str(), name.as_str()),
            Owner::Group { name, .. } => {
                LocalizedText::new(format!("مجموعة {}", name), format!("Group {}", name))
            }
        }
    }
}

/// Anything that owns dated sessions and supplies defaults for them.
pub trait SessionOwner {
    fn owner(&self) -> Owner;
    fn default_time(&self) -> Option<&str>;
    fn default_duration(&self) -> Option<u32>;
    fn schedule_days(&self) -> &[u8];
    fn sessions(&self) -> &[Session];
}

impl SessionOwner for Student {
    fn owner(&self) -> Owner {
        Owner::Student {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }

    fn default_time(&self) -> Option<&str> {
        self.session_time.as_deref()
    }

    fn default_duration(&self) -> Option<u32> {
        self.session_duration
    }

    fn schedule_days(&self) -> &[u8] {
        &self.schedule_days
    }

    fn sessions(&self) -> &[Session] {
        &self.sessions
    }
}

impl SessionOwner for Group {
    fn owner(&self) -> Owner {
        Owner::Group {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }

    fn default_time(&self) -> Option<&str> {
        self.session_time.as_deref()
    }

    fn default_duration(&self) -> Option<u32> {
        self.session_duration
    }

    fn schedule_days(&self) -> &[u8] {
        &self.schedule_days
    }

    fn sessions(&self) -> &[Session] {
        &self.sessions
    }
}

/// A session resolved against its owner's defaults.
///
/// `start` and `end` are minutes since midnight on `date`; `end` may exceed
/// 1440 for sessions running past midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledBlock {
    pub session_id: String,
    pub owner: Owner,
    pub date: NaiveDate,
    pub time: String,
    pub end_time: String,
    pub start: i32,
    pub end: i32,
    pub status: SessionStatus,
}

impl ScheduledBlock {
    pub fn resolve<O: SessionOwner + ?Sized>(
        owner: &O,
        session: &Session,
        config: &EngineConfig,
    ) -> Self {
        let start = resolve_start(session.time.as_deref(), owner.default_time(), config);
        let duration = resolve_duration(session.duration, owner.default_duration(), config);
        let end = start + duration;
        Self {
            session_id: session.id.clone(),
            owner: owner.owner(),
            date: session.date,
            time: minutes_to_time(start),
            end_time: minutes_to_time(end),
            start,
            end,
            status: session.status,
        }
    }

    pub fn duration(&self) -> i32 {
        self.end - self.start
    }
}

/// Resolve a start time through the fallback chain: the given time, then the
/// owner default, then the configured default. Blank strings count as absent;
/// an unparseable string degrades straight to the configured default.
pub fn resolve_start(time: Option<&str>, owner_default: Option<&str>, config: &EngineConfig) -> i32 {
    let chosen = time
        .filter(|t| !t.trim().is_empty())
        .or_else(|| owner_default.filter(|t| !t.trim().is_empty()));
    match chosen {
        Some(t) => parse_time(t).unwrap_or_else(|| {
            warn!(time = t, fallback = %config.default_session_time, "malformed session time");
            config.default_session_minutes()
        }),
        None => config.default_session_minutes(),
    }
}

/// Resolve a duration: the given value, then the owner default, then the
/// configured default. Zero counts as absent. The result is capped at one
/// day, so `start + duration` stays well inside `i32`.
pub fn resolve_duration(duration: Option<u32>, owner_default: Option<u32>, config: &EngineConfig) -> i32 {
    duration
        .filter(|d| *d > 0)
        .or_else(|| owner_default.filter(|d| *d > 0))
        .map(|d| d.min(MINUTES_PER_DAY as u32) as i32)
        .unwrap_or(config.default_duration_minutes)
        .min(MINUTES_PER_DAY)
}

/// A proposed session time to check against the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub date: NaiveDate,
    pub start_time: String,
    #[serde(default)]
    pub duration: Option<u32>,
}

impl Candidate {
    pub fn new(date: NaiveDate, start_time: impl Into<String>, duration: Option<u32>) -> Self {
        Self {
            date,
            start_time: start_time.into(),
            duration,
        }
    }
}

/// The full snapshot of students and groups for one query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl Roster {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn owners<'a>(&'a self, config: &EngineConfig) -> Vec<&'a dyn SessionOwner> {
        let mut owners: Vec<&dyn SessionOwner> = self
            .students
            .iter()
            .map(|s| s as &dyn SessionOwner)
            .collect();
        if config.include_groups {
            owners.extend(self.groups.iter().map(|g| g as &dyn SessionOwner));
        }
        owners
    }

    /// Every active session across every owner, students first, in roster order.
    pub fn active_blocks(&self, config: &EngineConfig) -> Vec<ScheduledBlock> {
        self.owners(config)
            .into_iter()
            .flat_map(|owner| {
                owner
                    .sessions()
                    .iter()
                    .filter(|s| s.status.is_active())
                    .map(move |s| ScheduledBlock::resolve(owner, s, config))
            })
            .collect()
    }

    /// Active sessions on `date`, minus `exclude_session_id`, in roster order.
    pub fn blocks_on(
        &self,
        date: NaiveDate,
        exclude_session_id: Option<&str>,
        config: &EngineConfig,
    ) -> Vec<ScheduledBlock> {
        self.owners(config)
            .into_iter()
            .flat_map(|owner| {
                owner
                    .sessions()
                    .iter()
                    .filter(|s| s.date == date && s.status.is_active())
                    .filter(|s| Some(s.id.as_str()) != exclude_session_id)
                    .map(move |s| ScheduledBlock::resolve(owner, s, config))
            })
            .collect()
    }

    /// Look up a student or group by id, students first.
    ///
    /// Groups are searched even when `include_groups` is off, since the caller
    /// names the owner explicitly.
    pub fn find_owner(&self, owner_id: &str) -> Option<&dyn SessionOwner> {
        if let Some(student) = self.students.iter().find(|s| s.id == owner_id) {
            return Some(student as &dyn SessionOwner);
        }
        self.groups
            .iter()
            .find(|g| g.id == owner_id)
            .map(|g| g as &dyn SessionOwner)
    }

    /// Look up one session of one owner regardless of its status.
    pub fn find_session(
        &self,
        owner_id: &str,
        session_id: &str,
        config: &EngineConfig,
    ) -> Option<ScheduledBlock> {
        let owner = self.find_owner(owner_id)?;
        owner
            .sessions()
            .iter()
            .find(|s| s.id == session_id)
            .map(|s| ScheduledBlock::resolve(owner, s, config))
    }
}
