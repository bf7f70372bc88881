//! Build the submission payload from a validated schedule.
//!
//! A [`BookingBatch`] carries the event metadata, every concrete date in the
//! range, and the per-weekday slot templates. Pairing dates with slots is the
//! job of whoever persists the batch; [`BookingBatch::bookings`] implements
//! that pairing for consumers that want it done locally.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::calendar::weekday_index;
use crate::error::{Result, SlotError};
use crate::event::{EventConfig, PresentationType};
use crate::range::DateRange;
use crate::store::DaySlotStore;
use crate::time::TimeOfDay;

/// Smallest allowed team size.
pub const MIN_TEAM_SIZE: u32 = 2;

/// Event metadata as submitted. Team sizes are present only for team events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonData {
    pub title: String,
    pub description: String,
    pub target_year: String,
    pub target_school: String,
    pub target_department: String,
    pub presentation_type: PresentationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_team_members: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_team_members: Option<u32>,
    pub venue: String,
    pub duration: u32,
    pub buffer_time: u32,
}

impl From<&EventConfig> for CommonData {
    fn from(event: &EventConfig) -> Self {
        let (min_team_members, max_team_members) = match event.presentation_type {
            PresentationType::Team => {
                let min = event.min_team_members.max(MIN_TEAM_SIZE);
                let max = event.max_team_members.max(min);
                (Some(min), Some(max))
            }
            PresentationType::Single => (None, None),
        };
        Self {
            title: event.title.clone(),
            description: event.description.clone(),
            target_year: event.target_year.clone(),
            target_school: event.target_school.clone(),
            target_department: event.target_department.clone(),
            presentation_type: event.presentation_type,
            min_team_members,
            max_team_members,
            venue: event.venue.clone(),
            duration: event.duration,
            buffer_time: event.buffer_time,
        }
    }
}

/// A slot template recurring on every matching date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotTemplate {
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    /// Weekday index, 0 = Sunday.
    pub day_of_week: u8,
}

/// One concrete booking: a slot template placed on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub day_of_week: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingBatch {
    pub common_data: CommonData,
    /// Matching dates at local midnight, chronological.
    pub dates: Vec<NaiveDateTime>,
    /// Slot templates, grouped by weekday in selection order.
    pub time_slots: Vec<SlotTemplate>,
}

impl BookingBatch {
    /// Pair every date with every template on the same weekday.
    ///
    /// Ordered by date, then by template order.
    pub fn bookings(&self) -> Vec<Booking> {
        self.dates
            .iter()
            .flat_map(|dt| {
                let date = dt.date();
                let day = weekday_index(date.weekday());
                self.time_slots
                    .iter()
                    .filter(move |t| t.day_of_week == day)
                    .map(move |t| Booking {
                        date,
                        start_time: t.start_time,
                        end_time: t.end_time,
                        day_of_week: t.day_of_week,
                    })
            })
            .collect()
    }
}

/// Build the payload for `event` over `range` using the slots in `store`.
///
/// Expects a schedule that already passed
/// [`validate_submission`](crate::validator::validate_submission); it does
/// not re-check overlaps or required fields.
///
/// # Errors
/// Returns `SlotError::IncompleteRange` if either date is unset.
pub fn materialize(event: &EventConfig, range: &DateRange, store: &DaySlotStore) -> Result<BookingBatch> {
    if range.bounds().is_none() {
        return Err(SlotError::IncompleteRange);
    }

    let dates = range
        .dates()
        .into_iter()
        .map(|d| d.date.and_time(NaiveTime::MIN))
        .collect();

    let time_slots = range
        .selected_weekdays()
        .iter()
        .flat_map(|day| {
            let day_of_week = weekday_index(*day);
            store.slots(*day).iter().map(move |slot| SlotTemplate {
                start_time: slot.start_time,
                end_time: slot.end_time,
                day_of_week,
            })
        })
        .collect();

    Ok(BookingBatch {
        common_data: CommonData::from(event),
        dates,
        time_slots,
    })
}
