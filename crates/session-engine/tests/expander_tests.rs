//! Tests for weekly schedule expansion.

use chrono::NaiveDate;
use session_engine::{
    check_conflict, expand_weekly_sessions, Candidate, ConflictType, EngineConfig, Roster,
    ScheduleError, SessionStatus, Student,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
}

#[test]
fn sundays_and_tuesdays_over_two_weeks() {
    // 2026-03-01 is a Sunday.
    let sessions = expand_weekly_sessions("s1", &[0, 2], day(1), day(14), "Asia/Riyadh").unwrap();

    let dates: Vec<NaiveDate> = sessions.iter().map(|s| s.date).collect();
    assert_eq!(dates, vec![day(1), day(3), day(8), day(10)]);
    assert_eq!(sessions[0].id, "s1-2026-03-01");
    assert!(sessions
        .iter()
        .all(|s| s.status == SessionStatus::Scheduled && s.time.is_none() && s.duration.is_none()));
}

#[test]
fn range_starting_off_schedule_begins_at_next_match() {
    // Monday the 2nd through Saturday the 14th, Sundays only.
    let sessions = expand_weekly_sessions("s1", &[0], day(2), day(14), "UTC").unwrap();

    let dates: Vec<NaiveDate> = sessions.iter().map(|s| s.date).collect();
    assert_eq!(dates, vec![day(8)]);
}

#[test]
fn until_date_is_inclusive() {
    let sessions = expand_weekly_sessions("s1", &[0], day(1), day(8), "UTC").unwrap();
    assert_eq!(sessions.len(), 2);
}

#[test]
fn duplicate_days_do_not_duplicate_sessions() {
    let sessions = expand_weekly_sessions("s1", &[3, 3], day(1), day(7), "UTC").unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].date, day(4));
}

#[test]
fn empty_schedule_or_reversed_range_is_empty() {
    assert!(expand_weekly_sessions("s1", &[], day(1), day(30), "UTC")
        .unwrap()
        .is_empty());
    assert!(expand_weekly_sessions("s1", &[0], day(30), day(1), "UTC")
        .unwrap()
        .is_empty());
}

#[test]
fn weekday_out_of_range_is_rejected() {
    let err = expand_weekly_sessions("s1", &[7], day(1), day(30), "UTC").unwrap_err();
    assert!(matches!(err, ScheduleError::InvalidWeekday(7)));
}

#[test]
fn unknown_timezone_is_rejected() {
    let err = expand_weekly_sessions("s1", &[0], day(1), day(30), "Mars/Olympus").unwrap_err();
    assert!(matches!(err, ScheduleError::InvalidTimezone(_)));
}

#[test]
fn expanded_sessions_take_owner_defaults_in_checks() {
    let sessions = expand_weekly_sessions("s1", &[0], day(1), day(31), "Asia/Riyadh").unwrap();
    let roster = Roster {
        students: vec![Student {
            id: "s1".to_string(),
            name: "Sara".to_string(),
            session_time: Some("14:00".to_string()),
            session_duration: Some(60),
            schedule_days: vec![0],
            sessions,
        }],
        groups: vec![],
    };

    let result = check_conflict(
        &roster,
        &Candidate::new(day(8), "14:00", Some(60)),
        None,
        &EngineConfig::default(),
    );

    assert_eq!(result.conflict_type, ConflictType::Exact);
    assert_eq!(result.conflicts[0].session.session_id, "s1-2026-03-08");
}
