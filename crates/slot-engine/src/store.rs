//! Per-weekday time-slot store.
//!
//! Every weekday (0 = Sunday .. 6 = Saturday) always has a sequence, possibly
//! empty. Sequences keep insertion order, which is the order slots are shown
//! and edited in; they are not sorted by time.
//!
//! A slot's end time is always derived from its start and the event's
//! duration and buffer. The only way to move an end time is to move the start
//! (or change the event's duration/buffer and call
//! [`DaySlotStore::recompute_end_times`]).

use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::{weekday_index, ALL_WEEKDAYS};
use crate::config::ScheduleConfig;
use crate::event::EventConfig;
use crate::notify::{NotificationSink, Notice};
use crate::time::{add_duration, TimeOfDay};

/// Identifies a slot within its weekday's sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(Uuid);

impl SlotId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SlotId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: SlotId,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl TimeSlot {
    fn derived(start_time: TimeOfDay, event: &EventConfig) -> Self {
        Self {
            id: SlotId::new(),
            start_time,
            end_time: add_duration(start_time, event.duration, event.buffer_time),
        }
    }
}

/// Time slots for each of the seven weekdays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySlotStore {
    days: [Vec<TimeSlot>; 7],
}

impl DaySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn day(&self, weekday: Weekday) -> &Vec<TimeSlot> {
        &self.days[usize::from(weekday_index(weekday))]
    }

    fn day_mut(&mut self, weekday: Weekday) -> &mut Vec<TimeSlot> {
        &mut self.days[usize::from(weekday_index(weekday))]
    }

    pub fn slots(&self, weekday: Weekday) -> &[TimeSlot] {
        self.day(weekday)
    }

    pub fn slot_count(&self, weekday: Weekday) -> usize {
        self.day(weekday).len()
    }

    /// Slot counts indexed by weekday index.
    pub fn counts(&self) -> [usize; 7] {
        let mut counts = [0; 7];
        for (count, day) in counts.iter_mut().zip(&self.days) {
            *count = day.len();
        }
        counts
    }

    pub fn total_slots(&self) -> usize {
        self.days.iter().map(Vec::len).sum()
    }

    /// Append a slot with explicit times, bypassing end-time derivation.
    ///
    /// Used when loading slots that were already persisted with their end
    /// times.
    pub fn push_slot(&mut self, weekday: Weekday, start_time: TimeOfDay, end_time: TimeOfDay) -> SlotId {
        let id = SlotId::new();
        self.day_mut(weekday).push(TimeSlot {
            id,
            start_time,
            end_time,
        });
        id
    }

    /// Append a new slot to `weekday`.
    ///
    /// The first slot of a day starts at the day's first suggested time (or
    /// `rules.default_start` when the table has none). Later slots chain: each
    /// starts where the previous one ends. A start at or after
    /// `rules.late_start_warning`, or one that wrapped past midnight, sends a
    /// warning to `sink`.
    pub fn add_slot<S: NotificationSink + ?Sized>(
        &mut self,
        weekday: Weekday,
        event: &EventConfig,
        config: &ScheduleConfig,
        sink: &mut S,
    ) -> SlotId {
        let (start, wrapped) = match self.day(weekday).last() {
            Some(previous) => (previous.end_time, previous.end_time < previous.start_time),
            None => (
                config
                    .suggested_times(weekday)
                    .first()
                    .copied()
                    .unwrap_or(config.rules.default_start),
                false,
            ),
        };

        if wrapped {
            sink.notify(Notice::warning(format!(
                "{} slot starts at {}, past midnight",
                config.label(weekday),
                start
            )));
        } else if start >= config.rules.late_start_warning {
            sink.notify(Notice::warning(format!(
                "{} slot starts at {}, which is at or after {}",
                config.label(weekday),
                start,
                config.rules.late_start_warning
            )));
        }

        let slot = TimeSlot::derived(start, event);
        let id = slot.id;
        tracing::debug!(
            weekday = %weekday,
            start = %slot.start_time,
            end = %slot.end_time,
            "slot added"
        );
        self.day_mut(weekday).push(slot);
        id
    }

    /// Remove a slot. Returns `false` (and changes nothing) if `id` is not in
    /// `weekday`'s sequence.
    pub fn remove_slot(&mut self, weekday: Weekday, id: SlotId) -> bool {
        let day = self.day_mut(weekday);
        match day.iter().position(|s| s.id == id) {
            Some(pos) => {
                day.remove(pos);
                tracing::debug!(weekday = %weekday, %id, "slot removed");
                true
            }
            None => false,
        }
    }

    /// Move a slot's start and re-derive its end. Returns `false` if `id` is
    /// not in `weekday`'s sequence.
    pub fn update_slot_start(
        &mut self,
        weekday: Weekday,
        id: SlotId,
        new_start: TimeOfDay,
        event: &EventConfig,
    ) -> bool {
        let Some(slot) = self.day_mut(weekday).iter_mut().find(|s| s.id == id) else {
            return false;
        };
        slot.start_time = new_start;
        slot.end_time = add_duration(new_start, event.duration, event.buffer_time);
        tracing::debug!(weekday = %weekday, %id, start = %slot.start_time, end = %slot.end_time, "slot moved");
        true
    }

    /// Replace `weekday`'s whole sequence with a suggested chain.
    ///
    /// The chain starts at the day's first suggested time and produces at most
    /// one slot per suggestion, capped at `rules.max_suggested_slots`. Each
    /// following slot starts at the previous computed end. Generation stops
    /// before the first slot that would start at or after
    /// `rules.suggestion_cutoff`, or past midnight. A day without suggestions
    /// gets a single slot at `rules.default_start`.
    ///
    /// Returns the number of slots generated.
    pub fn auto_suggest(&mut self, weekday: Weekday, event: &EventConfig, config: &ScheduleConfig) -> usize {
        let suggestions = config.suggested_times(weekday);
        let first = suggestions
            .first()
            .copied()
            .unwrap_or(config.rules.default_start);
        let limit = suggestions.len().clamp(1, config.rules.max_suggested_slots.max(1));
        let cutoff = config.rules.suggestion_cutoff.minutes();

        // Absolute minutes so that a chain running past midnight is caught by
        // the cutoff instead of wrapping back into the morning.
        let step = u64::from(event.duration) + u64::from(event.buffer_time);
        let mut start_abs = u64::from(first.minutes());
        let mut chain = Vec::with_capacity(limit);
        for _ in 0..limit {
            if start_abs >= u64::from(cutoff) {
                break;
            }
            let start = TimeOfDay::from_minutes(start_abs as u32);
            chain.push(TimeSlot::derived(start, event));
            start_abs += step;
        }

        let generated = chain.len();
        tracing::debug!(weekday = %weekday, generated, "auto-suggested slots");
        *self.day_mut(weekday) = chain;
        generated
    }

    /// Re-derive every end time after the event's duration or buffer changed.
    pub fn recompute_end_times(&mut self, event: &EventConfig) {
        for slot in self.days.iter_mut().flatten() {
            slot.end_time = add_duration(slot.start_time, event.duration, event.buffer_time);
        }
    }

    /// Iterate `(weekday, slots)` pairs in index order, Sunday first.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[TimeSlot])> {
        ALL_WEEKDAYS
            .into_iter()
            .zip(&self.days)
            .map(|(w, slots)| (w, slots.as_slice()))
    }
}
