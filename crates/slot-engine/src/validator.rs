//! Submission-readiness checks and the weekday/range reconciliation pass.
//!
//! [`validate_submission`] evaluates its rules in a fixed order and reports
//! only the first failure, so the user always sees exactly one message per
//! attempt.

use chrono::Weekday;
use thiserror::Error;

use crate::config::ScheduleConfig;
use crate::event::EventConfig;
use crate::notify::{NotificationSink, Notice};
use crate::overlap::find_overlap;
use crate::range::DateRange;
use crate::store::DaySlotStore;
use crate::time::TimeOfDay;

/// Why a schedule cannot be submitted. The `Display` text is user-facing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    #[error("Please fill in all required fields (missing: {field})")]
    MissingField { field: &'static str },

    #[error("Please select both a start date and an end date")]
    MissingDates,

    #[error("Please select at least one day of the week")]
    NoWeekdaySelected,

    #[error("Please add at least one time slot for {day}")]
    EmptyDay { day: String },

    #[error("The end date must be on or after the start date")]
    StartAfterEnd,

    #[error("The selected date range does not include: {days}")]
    DaysOutOfRange { days: String },

    #[error("No dates in the selected range match the selected days")]
    NoMatchingDates,

    #[error(
        "Time slots overlap on {day}: {earlier_start}-{earlier_end} and {later_start}-{later_end}"
    )]
    OverlappingSlots {
        day: String,
        earlier_start: TimeOfDay,
        earlier_end: TimeOfDay,
        later_start: TimeOfDay,
        later_end: TimeOfDay,
    },
}

/// Check that the schedule is ready to be materialized.
///
/// Rules, first failure wins:
/// 1. required event fields are non-blank
/// 2. both dates are set
/// 3. at least one weekday is selected
/// 4. every selected weekday has a slot
/// 5. start date is not after end date
/// 6. every selected weekday occurs in the range
/// 7. the range expands to at least one date
/// 8. no selected weekday has overlapping slots
pub fn validate_submission(
    event: &EventConfig,
    range: &DateRange,
    store: &DaySlotStore,
    config: &ScheduleConfig,
) -> Result<(), ValidationFailure> {
    if let Some((field, _)) = event
        .required_fields()
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
    {
        return Err(ValidationFailure::MissingField { field });
    }

    let Some((start, end)) = range.bounds() else {
        return Err(ValidationFailure::MissingDates);
    };

    let selected = range.selected_weekdays();
    if selected.is_empty() {
        return Err(ValidationFailure::NoWeekdaySelected);
    }

    if let Some(day) = selected.iter().find(|w| store.slot_count(**w) == 0) {
        return Err(ValidationFailure::EmptyDay {
            day: config.label(*day),
        });
    }

    if start > end {
        return Err(ValidationFailure::StartAfterEnd);
    }

    let unreachable = range.unreachable_weekdays();
    if !unreachable.is_empty() {
        return Err(ValidationFailure::DaysOutOfRange {
            days: config.labels(&unreachable),
        });
    }

    if range.dates().is_empty() {
        return Err(ValidationFailure::NoMatchingDates);
    }

    for day in selected {
        if let Some(overlap) = find_overlap(store.slots(*day)) {
            return Err(ValidationFailure::OverlappingSlots {
                day: config.label(*day),
                earlier_start: overlap.earlier.start_time,
                earlier_end: overlap.earlier.end_time,
                later_start: overlap.later.start_time,
                later_end: overlap.later.end_time,
            });
        }
    }

    Ok(())
}

/// Drop selected weekdays that no longer occur in the date range.
///
/// Runs only when both dates are set and ordered; an inverted range is left
/// for [`validate_submission`] to report. Emits one warning naming every
/// dropped day and returns the dropped days in selection order.
pub fn reconcile_weekdays<S: NotificationSink + ?Sized>(
    range: &mut DateRange,
    config: &ScheduleConfig,
    sink: &mut S,
) -> Vec<Weekday> {
    match range.bounds() {
        Some((start, end)) if start <= end => {}
        _ => return Vec::new(),
    }

    let dropped = range.unreachable_weekdays();
    if dropped.is_empty() {
        return dropped;
    }
    for day in &dropped {
        range.deselect(*day);
    }

    let labels = config.labels(&dropped);
    tracing::debug!(dropped = %labels, "pruned weekdays outside the date range");
    sink.notify(Notice::warning(format!(
        "Removed days not in the selected date range: {}",
        labels
    )));
    dropped
}
