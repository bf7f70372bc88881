//! JSON documents read and written by the CLI.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use slot_engine::calendar::{weekday_from_index, weekday_index};
use slot_engine::config::ScheduleConfig;
use slot_engine::seed::EditingSeed;
use slot_engine::{add_duration, DateRange, DaySlotStore, EventConfig, TimeOfDay, TimeSlot};

/// A complete schedule as submitted on the command line.
///
/// `slots` maps a weekday index (0 = Sunday) to slot start times; end times
/// are derived from the event's duration and buffer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    #[serde(default)]
    pub event: EventConfig,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub weekdays: Vec<u8>,
    #[serde(default)]
    pub slots: BTreeMap<u8, Vec<TimeOfDay>>,
}

impl ScheduleRequest {
    /// Build the date range and slot store described by the request.
    ///
    /// With `suggest`, every selected weekday that has no listed slots is
    /// filled by auto-suggest.
    pub fn build(&self, config: &ScheduleConfig, suggest: bool) -> Result<(DateRange, DaySlotStore)> {
        let mut range = DateRange::new(self.start_date, self.end_date);
        for index in &self.weekdays {
            let day = weekday_from_index(*index).context("Invalid entry in \"weekdays\"")?;
            range.select(day);
        }

        let mut store = DaySlotStore::new();
        for (index, starts) in &self.slots {
            let day = weekday_from_index(*index).context("Invalid key in \"slots\"")?;
            for start in starts {
                let end = add_duration(*start, self.event.duration, self.event.buffer_time);
                store.push_slot(day, *start, end);
            }
        }

        if suggest {
            for day in range.selected_weekdays() {
                if store.slot_count(*day) == 0 {
                    store.auto_suggest(*day, &self.event, config);
                }
            }
        }

        Ok((range, store))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotView {
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl From<&TimeSlot> for SlotView {
    fn from(slot: &TimeSlot) -> Self {
        Self {
            start_time: slot.start_time,
            end_time: slot.end_time,
        }
    }
}

/// Editing state derived from a persisted event, keyed by weekday index.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedView {
    pub id: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub weekdays: Vec<u8>,
    pub slots: BTreeMap<u8, Vec<SlotView>>,
}

impl SeedView {
    pub fn new(id: Option<String>, seed: &EditingSeed) -> Self {
        let slots = seed
            .store
            .iter()
            .filter(|(_, slots)| !slots.is_empty())
            .map(|(day, slots)| (weekday_index(day), slots.iter().map(SlotView::from).collect()))
            .collect();
        Self {
            id,
            start_date: seed.range.start_date,
            end_date: seed.range.end_date,
            weekdays: seed
                .range
                .selected_weekdays()
                .iter()
                .map(|d| weekday_index(*d))
                .collect(),
            slots,
        }
    }
}
