//! Tests for the transactional editing session.

use chrono::{NaiveDate, Weekday};
use slot_engine::config::ScheduleConfig;
use slot_engine::{
    EditingSession, EventConfig, Notice, PersistedEvent, PersistedSlot, Severity, SlotError,
    TimeOfDay, ValidationFailure,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn t(s: &str) -> TimeOfDay {
    TimeOfDay::parse(s).unwrap()
}

fn complete_event() -> EventConfig {
    EventConfig {
        title: "Capstone Demo Day".to_string(),
        description: "Final year project presentations".to_string(),
        target_year: "4th Year".to_string(),
        target_school: "School of Engineering".to_string(),
        target_department: "Computer Science".to_string(),
        venue: "Hall B".to_string(),
        duration: 30,
        buffer_time: 5,
        ..EventConfig::default()
    }
}

fn session() -> EditingSession<Vec<Notice>> {
    let mut s = EditingSession::new(ScheduleConfig::default(), Vec::<Notice>::new());
    s.set_event(complete_event());
    s
}

#[test]
fn selecting_a_weekday_adds_its_first_slot() {
    let mut s = session();
    s.set_date_range(Some(date(2024, 6, 3)), Some(date(2024, 6, 10)));

    assert!(s.toggle_weekday(Weekday::Mon));

    assert_eq!(s.range().selected_weekdays(), &[Weekday::Mon]);
    let slots = s.store().slots(Weekday::Mon);
    assert_eq!(slots.len(), 1);
    // Default Monday suggestions start at 09:00.
    assert_eq!(slots[0].start_time, t("09:00"));
    assert_eq!(slots[0].end_time, t("09:35"));
}

#[test]
fn deselecting_keeps_slots_and_reselecting_does_not_duplicate() {
    let mut s = session();
    s.set_date_range(Some(date(2024, 6, 3)), Some(date(2024, 6, 10)));
    s.toggle_weekday(Weekday::Mon);
    s.add_slot(Weekday::Mon);

    assert!(!s.toggle_weekday(Weekday::Mon));
    assert!(s.range().selected_weekdays().is_empty());
    assert_eq!(s.store().slot_count(Weekday::Mon), 2);

    assert!(s.toggle_weekday(Weekday::Mon));
    assert_eq!(s.store().slot_count(Weekday::Mon), 2);
}

#[test]
fn selecting_a_day_outside_the_range_is_refused() {
    let mut s = session();
    // Mon..Tue.
    s.set_date_range(Some(date(2024, 6, 3)), Some(date(2024, 6, 4)));

    assert!(!s.toggle_weekday(Weekday::Fri));

    assert!(s.range().selected_weekdays().is_empty());
    assert_eq!(s.store().slot_count(Weekday::Fri), 0);
    let last = s.sink().last().unwrap();
    assert_eq!(last.severity, Severity::Warning);
    assert!(last.message.contains("Friday"));
}

#[test]
fn selecting_before_dates_are_set_is_allowed() {
    let mut s = session();
    assert!(s.toggle_weekday(Weekday::Fri));
    assert_eq!(s.store().slot_count(Weekday::Fri), 1);
}

#[test]
fn narrowing_the_range_prunes_weekdays() {
    let mut s = session();
    s.set_date_range(Some(date(2024, 6, 3)), Some(date(2024, 6, 9)));
    s.toggle_weekday(Weekday::Mon);
    s.toggle_weekday(Weekday::Thu);

    let dropped = s.set_date_range(Some(date(2024, 6, 3)), Some(date(2024, 6, 4)));

    assert_eq!(dropped, vec![Weekday::Thu]);
    assert_eq!(s.range().selected_weekdays(), &[Weekday::Mon]);
    let warnings: Vec<&Notice> = s
        .sink()
        .iter()
        .filter(|n| n.severity == Severity::Warning)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("Thursday"));
}

#[test]
fn changing_duration_retimes_slots() {
    let mut s = session();
    s.toggle_weekday(Weekday::Mon);
    s.add_slot(Weekday::Mon);

    s.set_event(EventConfig {
        duration: 45,
        buffer_time: 15,
        ..complete_event()
    });

    let ends: Vec<String> = s
        .store()
        .slots(Weekday::Mon)
        .iter()
        .map(|slot| slot.end_time.to_string())
        .collect();
    // Starts were 09:00 and 09:35.
    assert_eq!(ends, vec!["10:00", "10:35"]);
}

#[test]
fn update_and_remove_go_through_the_session() {
    let mut s = session();
    s.toggle_weekday(Weekday::Wed);
    let id = s.store().slots(Weekday::Wed)[0].id;

    assert!(s.update_slot_start(Weekday::Wed, id, t("14:00")));
    assert_eq!(s.store().slots(Weekday::Wed)[0].end_time, t("14:35"));

    assert!(s.remove_slot(Weekday::Wed, id));
    assert!(!s.remove_slot(Weekday::Wed, id));
    assert_eq!(s.store().slot_count(Weekday::Wed), 0);
}

#[test]
fn auto_suggest_through_the_session() {
    let mut s = session();
    assert_eq!(s.auto_suggest(Weekday::Tue), 4);
    assert_eq!(s.store().slots(Weekday::Tue)[3].start_time, t("10:45"));
}

#[test]
fn submit_produces_batch_and_info_notice() {
    let mut s = session();
    s.set_date_range(Some(date(2024, 6, 3)), Some(date(2024, 6, 10)));
    s.toggle_weekday(Weekday::Mon);

    let submission = s.submit().unwrap();

    assert_eq!(submission.editing_id, None);
    assert_eq!(submission.batch.dates.len(), 2);
    assert_eq!(submission.batch.time_slots.len(), 1);
    assert_eq!(s.sink().last().unwrap().severity, Severity::Info);
}

#[test]
fn failed_submit_sends_exactly_one_blocking_notice() {
    let mut s = EditingSession::new(ScheduleConfig::default(), Vec::<Notice>::new());
    // Blank title and no weekday: the title wins.
    s.set_date_range(Some(date(2024, 6, 3)), Some(date(2024, 6, 10)));

    let err = s.submit().unwrap_err();

    assert_eq!(err, ValidationFailure::MissingField { field: "title" });
    let blocking: Vec<&Notice> = s
        .sink()
        .iter()
        .filter(|n| n.severity == Severity::Blocking)
        .collect();
    assert_eq!(blocking.len(), 1);
    assert_eq!(blocking[0].message, err.to_string());
}

#[test]
fn overlapping_edit_blocks_submission() {
    let mut s = session();
    s.set_date_range(Some(date(2024, 6, 3)), Some(date(2024, 6, 10)));
    s.toggle_weekday(Weekday::Mon);
    let second = s.add_slot(Weekday::Mon);
    s.update_slot_start(Weekday::Mon, second, t("09:15"));

    assert!(matches!(
        s.submit(),
        Err(ValidationFailure::OverlappingSlots { .. })
    ));
}

#[test]
fn preview_requires_both_dates() {
    let s = session();
    assert!(matches!(s.preview(), Err(SlotError::IncompleteRange)));
}

#[test]
fn editing_an_existing_event_carries_its_id() {
    let persisted = PersistedEvent {
        id: Some("evt-7".to_string()),
        event: complete_event(),
        slots: vec![
            PersistedSlot {
                date: date(2024, 6, 3),
                start_time: t("09:00"),
                end_time: t("09:35"),
            },
            PersistedSlot {
                date: date(2024, 6, 10),
                start_time: t("09:00"),
                end_time: t("09:35"),
            },
        ],
    };

    let mut s = EditingSession::from_existing(ScheduleConfig::default(), persisted, Vec::<Notice>::new());

    assert_eq!(s.editing_id(), Some("evt-7"));
    assert_eq!(s.range().selected_weekdays(), &[Weekday::Mon]);
    let submission = s.submit().unwrap();
    assert_eq!(submission.editing_id.as_deref(), Some("evt-7"));
    assert_eq!(submission.batch.dates.len(), 2);
}

#[test]
fn existing_event_with_unordered_entries_can_be_submitted() {
    let slot = |d: NaiveDate, start: &str, end: &str| PersistedSlot {
        date: d,
        start_time: t(start),
        end_time: t(end),
    };
    let persisted = PersistedEvent {
        id: Some("evt-8".to_string()),
        event: complete_event(),
        slots: vec![
            slot(date(2024, 6, 10), "09:00", "09:35"),
            slot(date(2024, 6, 3), "09:00", "09:35"),
            slot(date(2024, 6, 4), "10:00", "10:35"),
        ],
    };

    let mut s = EditingSession::from_existing(ScheduleConfig::default(), persisted, Vec::<Notice>::new());

    assert_eq!(s.range().bounds(), Some((date(2024, 6, 3), date(2024, 6, 10))));
    let submission = s.submit().unwrap();
    assert_eq!(submission.batch.dates.len(), 3);
    assert_eq!(submission.batch.time_slots.len(), 2);
}
