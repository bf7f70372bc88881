//! Rebuild an editing state from an event that was already persisted.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::ALL_WEEKDAYS;
use crate::event::EventConfig;
use crate::range::DateRange;
use crate::store::DaySlotStore;
use crate::time::TimeOfDay;

/// One persisted booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSlot {
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

/// A previously saved event, as handed back by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub event: EventConfig,
    #[serde(default)]
    pub slots: Vec<PersistedSlot>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditingSeed {
    pub range: DateRange,
    pub store: DaySlotStore,
}

/// Derive the date range, weekday selection and per-weekday slots from a
/// flat list of persisted bookings.
///
/// Entries are grouped by the weekday of their date; within a weekday,
/// entries repeating an earlier (start, end) pair are dropped. The range runs
/// from the first entry's date to the last entry's date when those two are in
/// order; otherwise it spans the earliest to the latest entry date. Selected
/// weekdays are those with at least one entry, Sunday first.
pub fn seed_from_entries(entries: &[PersistedSlot]) -> EditingSeed {
    let (Some(first), Some(last)) = (entries.first(), entries.last()) else {
        return EditingSeed::default();
    };

    let (start, end) = if first.date <= last.date {
        (first.date, last.date)
    } else {
        entries.iter().fold((first.date, first.date), |(lo, hi), e| {
            (lo.min(e.date), hi.max(e.date))
        })
    };

    let mut range = DateRange::new(Some(start), Some(end));
    let mut store = DaySlotStore::new();

    for weekday in ALL_WEEKDAYS {
        let mut seen: Vec<(TimeOfDay, TimeOfDay)> = Vec::new();
        for entry in entries.iter().filter(|e| e.date.weekday() == weekday) {
            let pair = (entry.start_time, entry.end_time);
            if !seen.contains(&pair) {
                seen.push(pair);
                store.push_slot(weekday, entry.start_time, entry.end_time);
            }
        }
        if !seen.is_empty() {
            range.select(weekday);
        }
    }

    tracing::debug!(
        entries = entries.len(),
        slots = store.total_slots(),
        "seeded editing state from persisted event"
    );
    EditingSeed { range, store }
}
