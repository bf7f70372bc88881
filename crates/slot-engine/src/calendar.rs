//! Calendar expansion -- turns a date range plus a weekday selection into
//! concrete dates.
//!
//! Ranges are inclusive on both ends: the end date counts through its final
//! instant. Dates are local calendar dates with no timezone attached.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// All seven weekdays in index order (0 = Sunday).
pub const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// A concrete date produced by [`expand_dates`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandedDate {
    pub date: NaiveDate,
    pub weekday: Weekday,
}

/// Weekday index with 0 = Sunday .. 6 = Saturday.
pub fn weekday_index(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8
}

/// Inverse of [`weekday_index`].
///
/// # Errors
/// Returns `SlotError::InvalidWeekday` if `index > 6`.
pub fn weekday_from_index(index: u8) -> Result<Weekday> {
    ALL_WEEKDAYS
        .get(usize::from(index))
        .copied()
        .ok_or(SlotError::InvalidWeekday(index))
}

/// Whether at least one date in `[start, end]` falls on `weekday`.
///
/// Scans day by day from `start`. Any seven consecutive days cover every
/// weekday, so the scan never looks further than a week ahead.
pub fn weekday_occurs_in_range(weekday: Weekday, start: NaiveDate, end: NaiveDate) -> bool {
    if start > end {
        return false;
    }
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .take(7)
        .any(|d| d.weekday() == weekday)
}

/// Every date in `[start, end]` whose weekday is in `selected`, in
/// chronological order.
///
/// Returns an empty list if `selected` is empty or `start > end`.
pub fn expand_dates(start: NaiveDate, end: NaiveDate, selected: &[Weekday]) -> Vec<ExpandedDate> {
    if selected.is_empty() || start > end {
        return Vec::new();
    }
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| selected.contains(&d.weekday()))
        .map(|date| ExpandedDate {
            date,
            weekday: date.weekday(),
        })
        .collect()
}
