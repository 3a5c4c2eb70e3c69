#![forbid(unsafe_code)]
use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use rosterflow::{week_start_key, Engine, EngineError, RestrictionLimits, Severity, Shift, ShiftId};

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

fn shift(workplace: &str, date: &str, start: &str, end: &str) -> Shift {
    Shift::new(workplace, d(date), t(start), t(end), None).unwrap()
}

fn known(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn empty_snapshot_gives_empty_views() {
    let engine = Engine::new(vec![], known(&["Cafe", "Bar"])).unwrap();
    assert!(engine.weekly_buckets().is_empty());
    assert!(engine.conflicts().is_empty());
    assert!(engine.availability().is_empty());
    assert!(engine.block_advice().is_empty());
    assert!(engine.workplace_totals().is_empty());

    let r = engine.restrictions_at(d("2024-01-10"), RestrictionLimits::default());
    assert_eq!(r.week.hours, 0.0);
    assert_eq!(r.fortnight.severity, Severity::Ok);
}

#[test]
fn conflict_example_from_two_jobs() {
    let engine = Engine::new(
        vec![
            shift("Cafe", "2024-01-01", "09:00", "17:00"),
            shift("Bar", "2024-01-01", "15:00", "20:00"),
        ],
        known(&["Cafe", "Bar"]),
    )
    .unwrap();
    let conflicts = engine.conflicts();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].overlap_start, t("15:00"));
    assert_eq!(conflicts[0].overlap_end, t("17:00"));
    assert_eq!(conflicts[0].overlap_hours(), 2.0);
}

#[test]
fn monday_and_saturday_share_a_bucket() {
    let monday = d("2024-01-01");
    assert_eq!(monday.weekday(), Weekday::Mon);
    assert_eq!(week_start_key(monday), d("2023-12-31"));
    assert_eq!(week_start_key(d("2024-01-06")), d("2023-12-31"));

    let engine = Engine::new(
        vec![
            shift("Cafe", "2024-01-06", "09:00", "10:00"),
            shift("Cafe", "2024-01-07", "09:00", "10:00"),
            shift("Cafe", "2024-01-01", "09:00", "10:00"),
        ],
        vec![],
    )
    .unwrap();
    let weeks = engine.weekly_buckets();
    assert_eq!(weeks.len(), 2);
    assert_eq!(weeks[0].week_start, d("2023-12-31"));
    assert_eq!(weeks[0].total_hours, 2.0);
    assert_eq!(weeks[1].week_start, d("2024-01-07"));
}

#[test]
fn recomputation_is_identical() {
    let shifts = vec![
        shift("Cafe", "2024-01-03", "09:00", "17:00"),
        shift("Bar", "2024-01-03", "16:00", "22:00"),
        shift("Bar", "2024-01-01", "18:00", "22:00"),
    ];
    let a = Engine::new(shifts.clone(), known(&["Cafe", "Bar", "Shop"])).unwrap();
    let b = Engine::new(shifts, known(&["Cafe", "Bar", "Shop"])).unwrap();
    assert_eq!(a.weekly_buckets(), b.weekly_buckets());
    assert_eq!(a.conflicts(), b.conflicts());
    assert_eq!(a.block_advice(), b.block_advice());
    assert_eq!(a.availability(), a.availability());
}

#[test]
fn snapshot_rejects_hand_built_invalid_shift() {
    let mut bad = shift("Cafe", "2024-01-01", "09:00", "17:00");
    bad.id = ShiftId::new("broken");
    bad.end_time = t("08:00");
    let err = Engine::new(vec![bad], vec![]).unwrap_err();
    assert!(matches!(err, EngineError::InvalidShift { ref shift_id, .. } if shift_id == "broken"));
}

#[test]
fn snapshot_does_not_alter_input() {
    let shifts = vec![
        shift("Bar", "2024-01-05", "09:00", "10:00"),
        shift("Cafe", "2024-01-02", "09:00", "10:00"),
    ];
    let engine = Engine::new(shifts.clone(), vec![]).unwrap();
    let _ = engine.conflicts();
    let _ = engine.calendar_days();
    assert_eq!(engine.shifts(), shifts.as_slice());
}
