//! The date range and weekday selection being scheduled.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::calendar::{expand_dates, weekday_occurs_in_range, ExpandedDate};

/// A date range plus the weekdays selected within it.
///
/// `selected_weekdays` keeps selection order (first selected first) and never
/// contains duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    selected_weekdays: Vec<Weekday>,
}

impl DateRange {
    pub fn new(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self {
        Self {
            start_date,
            end_date,
            selected_weekdays: Vec::new(),
        }
    }

    /// Both bounds, if both are set.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.start_date.zip(self.end_date)
    }

    pub fn selected_weekdays(&self) -> &[Weekday] {
        &self.selected_weekdays
    }

    pub fn is_selected(&self, weekday: Weekday) -> bool {
        self.selected_weekdays.contains(&weekday)
    }

    /// Add `weekday` to the selection. Returns `false` if it was already there.
    pub fn select(&mut self, weekday: Weekday) -> bool {
        if self.is_selected(weekday) {
            return false;
        }
        self.selected_weekdays.push(weekday);
        true
    }

    /// Remove `weekday` from the selection. Returns `false` if it was not
    /// selected.
    pub fn deselect(&mut self, weekday: Weekday) -> bool {
        let before = self.selected_weekdays.len();
        self.selected_weekdays.retain(|w| *w != weekday);
        self.selected_weekdays.len() != before
    }

    /// Whether `weekday` has at least one date in the range. `None` while
    /// either bound is unset.
    pub fn contains_weekday(&self, weekday: Weekday) -> Option<bool> {
        self.bounds()
            .map(|(start, end)| weekday_occurs_in_range(weekday, start, end))
    }

    /// Selected weekdays with no date in the range, in selection order. Empty
    /// while either bound is unset.
    pub fn unreachable_weekdays(&self) -> Vec<Weekday> {
        self.selected_weekdays
            .iter()
            .copied()
            .filter(|w| self.contains_weekday(*w) == Some(false))
            .collect()
    }

    /// Concrete dates for the current selection. Empty while either bound is
    /// unset.
    pub fn dates(&self) -> Vec<ExpandedDate> {
        match self.bounds() {
            Some((start, end)) => expand_dates(start, end, &self.selected_weekdays),
            None => Vec::new(),
        }
    }
}
