//! Property-based tests for time arithmetic, calendar expansion and overlap
//! detection using proptest.
//!
//! These check invariants that hold for *any* input, not just the examples in
//! the other test files.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use proptest::prelude::*;
use slot_engine::calendar::ALL_WEEKDAYS;
use slot_engine::time::MINUTES_PER_DAY;
use slot_engine::{
    add_duration, expand_dates, find_overlap, minutes_since_midnight, weekday_occurs_in_range,
    SlotId, TimeOfDay, TimeSlot,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_time() -> impl Strategy<Value = TimeOfDay> {
    (0u8..=23, 0u8..=59).prop_map(|(h, m)| TimeOfDay::new(h, m).unwrap())
}

/// A date in 2024-2027.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..(4 * 366)).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(offset)
    })
}

/// A start date and a span of up to ~4 months (negative spans give an
/// inverted range).
fn arb_range() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    (arb_date(), -10i64..120).prop_map(|(start, span)| (start, start + Duration::days(span)))
}

fn arb_weekday() -> impl Strategy<Value = Weekday> {
    (0usize..7).prop_map(|i| ALL_WEEKDAYS[i])
}

fn arb_selection() -> impl Strategy<Value = Vec<Weekday>> {
    proptest::collection::vec(arb_weekday(), 0..7).prop_map(|mut days| {
        let mut seen = Vec::new();
        days.retain(|d| {
            if seen.contains(d) {
                false
            } else {
                seen.push(*d);
                true
            }
        });
        days
    })
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Time arithmetic
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn add_duration_is_modular_addition(
        start in arb_time(),
        duration in 0u32..=600,
        buffer in 0u32..=120,
    ) {
        let end = add_duration(start, duration, buffer);
        prop_assert_eq!(
            minutes_since_midnight(end) % MINUTES_PER_DAY,
            (minutes_since_midnight(start) + duration + buffer) % MINUTES_PER_DAY
        );
    }

    #[test]
    fn display_then_parse_is_identity(t in arb_time()) {
        prop_assert_eq!(TimeOfDay::parse(&t.to_string()).unwrap(), t);
    }
}

// ---------------------------------------------------------------------------
// Calendar expansion
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn occurs_in_range_matches_full_expansion(
        (start, end) in arb_range(),
        weekday in arb_weekday(),
    ) {
        let all = expand_dates(start, end, &ALL_WEEKDAYS);
        let expected = all.iter().any(|d| d.weekday == weekday);
        prop_assert_eq!(weekday_occurs_in_range(weekday, start, end), expected);
    }

    #[test]
    fn expansion_is_sorted_and_within_range(
        (start, end) in arb_range(),
        selected in arb_selection(),
    ) {
        let dates = expand_dates(start, end, &selected);
        for pair in dates.windows(2) {
            prop_assert!(pair[0].date < pair[1].date, "not strictly increasing");
        }
        for d in &dates {
            prop_assert!(d.date >= start && d.date <= end, "{} outside range", d.date);
            prop_assert!(selected.contains(&d.weekday));
            prop_assert_eq!(d.date.weekday(), d.weekday);
        }
    }

    #[test]
    fn expansion_counts_every_matching_day(
        (start, end) in arb_range(),
        selected in arb_selection(),
    ) {
        let dates = expand_dates(start, end, &selected);
        let mut expected = 0usize;
        let mut day = start;
        while day <= end {
            if selected.contains(&day.weekday()) {
                expected += 1;
            }
            day += Duration::days(1);
        }
        prop_assert_eq!(dates.len(), expected);
    }
}

// ---------------------------------------------------------------------------
// Overlap detection
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    /// Back-to-back chained slots never overlap, whatever the order they are
    /// listed in.
    #[test]
    fn chained_slots_never_overlap(
        first in 0u32..600,
        span in 1u32..90,
        count in 1usize..8,
        rotate in 0usize..8,
    ) {
        let mut slots: Vec<TimeSlot> = (0..count)
            .map(|i| {
                let start = TimeOfDay::from_minutes(first + span * i as u32);
                TimeSlot {
                    id: SlotId::new(),
                    start_time: start,
                    end_time: add_duration(start, span, 0),
                }
            })
            .collect();
        let len = slots.len();
        slots.rotate_left(rotate % len);
        prop_assert!(find_overlap(&slots).is_none());
    }

    /// Two slots overlap iff their intervals intersect.
    #[test]
    fn overlap_matches_interval_intersection(
        a_start in 0u32..1200,
        a_len in 1u32..120,
        b_start in 0u32..1200,
        b_len in 1u32..120,
    ) {
        let slot = |start: u32, len: u32| TimeSlot {
            id: SlotId::new(),
            start_time: TimeOfDay::from_minutes(start),
            end_time: TimeOfDay::from_minutes(start + len),
        };
        let intersect = a_start < b_start + b_len && b_start < a_start + a_len;
        let found = find_overlap(&[slot(a_start, a_len), slot(b_start, b_len)]).is_some();
        prop_assert_eq!(found, intersect);
    }
}
