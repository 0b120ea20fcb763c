//! Tests for open-slot scanning and curated slot ordering.

use chrono::NaiveDate;
use session_engine::{
    check_conflict, get_available_slots, get_suggested_slots, Candidate, EngineConfig, Group,
    Roster, Session, SessionStatus, Severity, Student, TimePeriod, WorkingHours,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
}

fn roster_of(sessions: Vec<Session>) -> Roster {
    Roster {
        students: vec![Student {
            id: "s1".to_string(),
            name: "Sara".to_string(),
            session_time: None,
            session_duration: None,
            schedule_days: vec![],
            sessions,
        }],
        groups: vec![],
    }
}

fn times(slots: &[session_engine::TimeSlot]) -> Vec<&str> {
    slots.iter().map(|s| s.time.as_str()).collect()
}

// ── Available slots ─────────────────────────────────────────────────────────

#[test]
fn empty_day_offers_every_half_hour_until_last_fitting_start() {
    let config = EngineConfig::default();
    let slots = get_available_slots(
        &Roster::default(),
        day(1),
        60,
        &WorkingHours::new("08:00", "22:00"),
        &config,
    );

    assert_eq!(slots.len(), 27);
    assert_eq!(slots.first().unwrap().time, "08:00");
    assert_eq!(slots.last().unwrap().time, "21:00");
    for pair in slots.windows(2) {
        let a = session_engine::time_to_minutes(&pair[0].time);
        let b = session_engine::time_to_minutes(&pair[1].time);
        assert_eq!(b - a, 30);
    }
    assert!(slots.iter().all(|s| s.duration == 60));
}

#[test]
fn slots_carry_their_period() {
    let slots = get_available_slots(
        &Roster::default(),
        day(1),
        60,
        &WorkingHours::availability(),
        &EngineConfig::default(),
    );
    let period_of = |t: &str| slots.iter().find(|s| s.time == t).unwrap().period;

    assert_eq!(period_of("08:00"), TimePeriod::Morning);
    assert_eq!(period_of("11:30"), TimePeriod::Morning);
    assert_eq!(period_of("12:00"), TimePeriod::Afternoon);
    assert_eq!(period_of("17:00"), TimePeriod::Evening);
    assert_eq!(
        slots.iter().find(|s| s.time == "08:00").unwrap().display,
        "8:00 ص"
    );
}

#[test]
fn sessions_block_their_padded_window() {
    let roster = roster_of(vec![Session::new("a", day(1)).at("14:00").lasting(60)]);

    let slots = get_available_slots(
        &roster,
        day(1),
        60,
        &WorkingHours::availability(),
        &EngineConfig::default(),
    );
    let open = times(&slots);

    assert_eq!(slots.len(), 22);
    assert!(open.contains(&"12:30"));
    assert!(open.contains(&"15:30"));
    for blocked in ["13:00", "13:30", "14:00", "14:30", "15:00"] {
        assert!(!open.contains(&blocked), "{} should be blocked", blocked);
    }
}

#[test]
fn every_open_slot_checks_clean() {
    let roster = roster_of(vec![
        Session::new("a", day(1)).at("09:10").lasting(45),
        Session::new("b", day(1)).at("13:00").lasting(90),
        Session::new("c", day(1)).at("18:20").lasting(60),
    ]);
    let config = EngineConfig::default();

    let slots = get_available_slots(&roster, day(1), 60, &config.availability_window, &config);

    assert!(!slots.is_empty());
    for slot in &slots {
        let result = check_conflict(
            &roster,
            &Candidate::new(day(1), slot.time.clone(), Some(60)),
            None,
            &config,
        );
        assert_eq!(result.severity, Severity::None, "slot {}", slot.time);
    }
}

#[test]
fn inactive_sessions_do_not_block() {
    let roster = roster_of(vec![Session::new("a", day(1))
        .at("14:00")
        .with_status(SessionStatus::Cancelled)]);

    let slots = get_available_slots(
        &roster,
        day(1),
        60,
        &WorkingHours::availability(),
        &EngineConfig::default(),
    );

    assert_eq!(slots.len(), 27);
}

#[test]
fn group_sessions_block_slots() {
    let roster = Roster {
        students: vec![],
        groups: vec![Group {
            id: "g1".to_string(),
            name: "Math".to_string(),
            session_time: Some("14:00".to_string()),
            session_duration: Some(60),
            schedule_days: vec![],
            sessions: vec![Session::new("ga", day(1))],
        }],
    };

    let slots = get_available_slots(
        &roster,
        day(1),
        60,
        &WorkingHours::availability(),
        &EngineConfig::default(),
    );

    assert!(!times(&slots).contains(&"14:00"));
}

#[test]
fn window_start_is_rounded_up_to_the_step() {
    let slots = get_available_slots(
        &Roster::default(),
        day(1),
        60,
        &WorkingHours::new("08:15", "10:00"),
        &EngineConfig::default(),
    );
    assert_eq!(times(&slots), vec!["08:30", "09:00"]);
}

#[test]
fn duration_longer_than_window_yields_nothing() {
    let slots = get_available_slots(
        &Roster::default(),
        day(1),
        180,
        &WorkingHours::new("08:00", "10:00"),
        &EngineConfig::default(),
    );
    assert!(slots.is_empty());
}

// ── Curated slots ───────────────────────────────────────────────────────────

#[test]
fn curated_slots_prefer_round_afternoon_hours() {
    let slots = get_suggested_slots(
        &Roster::default(),
        day(1),
        60,
        &WorkingHours::curated(),
        6,
        &EngineConfig::default(),
    );

    assert_eq!(
        times(&slots),
        vec!["14:00", "15:00", "16:00", "17:00", "18:00", "19:00"]
    );
}

#[test]
fn non_preferred_slots_follow_chronologically() {
    let roster = roster_of(vec![Session::new("a", day(1)).at("15:00").lasting(60)]);

    let slots = get_suggested_slots(
        &roster,
        day(1),
        60,
        &WorkingHours::curated(),
        6,
        &EngineConfig::default(),
    );

    assert_eq!(
        times(&slots),
        vec!["17:00", "18:00", "19:00", "20:00", "16:30", "17:30"]
    );
}

#[test]
fn curated_limit_larger_than_catalogue_returns_everything() {
    let slots = get_suggested_slots(
        &Roster::default(),
        day(1),
        60,
        &WorkingHours::new("20:00", "22:00"),
        10,
        &EngineConfig::default(),
    );

    assert_eq!(times(&slots), vec!["20:00", "20:30", "21:00"]);
}
