//! Editing session -- the state a scheduling form owns, with every mutation
//! applied as one transactional update.
//!
//! Any change to the date range or weekday selection runs
//! [`reconcile_weekdays`] before returning, so callers never observe a
//! selected weekday that falls outside the range. Selecting a weekday and
//! giving it its first slot happen in the same call.

use chrono::{NaiveDate, Weekday};

use crate::config::ScheduleConfig;
use crate::error::Result;
use crate::event::EventConfig;
use crate::materializer::{materialize, BookingBatch};
use crate::notify::{NotificationSink, Notice, TracingSink};
use crate::range::DateRange;
use crate::seed::{seed_from_entries, PersistedEvent};
use crate::store::{DaySlotStore, SlotId};
use crate::time::TimeOfDay;
use crate::validator::{reconcile_weekdays, validate_submission, ValidationFailure};

/// What a successful submission hands to the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub batch: BookingBatch,
    /// Id of the event being edited; `None` when creating a new one.
    pub editing_id: Option<String>,
}

#[derive(Debug)]
pub struct EditingSession<S: NotificationSink = TracingSink> {
    config: ScheduleConfig,
    event: EventConfig,
    range: DateRange,
    store: DaySlotStore,
    editing_id: Option<String>,
    sink: S,
}

impl EditingSession<TracingSink> {
    /// Start an empty session that reports notices through `tracing`.
    pub fn with_config(config: ScheduleConfig) -> Self {
        Self::new(config, TracingSink)
    }
}

impl<S: NotificationSink> EditingSession<S> {
    pub fn new(config: ScheduleConfig, sink: S) -> Self {
        Self {
            config,
            event: EventConfig::default(),
            range: DateRange::default(),
            store: DaySlotStore::new(),
            editing_id: None,
            sink,
        }
    }

    /// Start a session editing a persisted event.
    pub fn from_existing(config: ScheduleConfig, persisted: PersistedEvent, sink: S) -> Self {
        let seed = seed_from_entries(&persisted.slots);
        tracing::info!(
            id = persisted.id.as_deref().unwrap_or("<new>"),
            weekdays = seed.range.selected_weekdays().len(),
            "editing existing event"
        );
        let mut session = Self {
            config,
            event: persisted.event,
            range: seed.range,
            store: seed.store,
            editing_id: persisted.id,
            sink,
        };
        session.reconcile();
        session
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    pub fn event(&self) -> &EventConfig {
        &self.event
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    pub fn store(&self) -> &DaySlotStore {
        &self.store
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    /// Replace the event metadata. Slot end times follow the new duration and
    /// buffer.
    pub fn set_event(&mut self, event: EventConfig) {
        let retimed = event.duration != self.event.duration || event.buffer_time != self.event.buffer_time;
        self.event = event;
        if retimed {
            self.store.recompute_end_times(&self.event);
        }
    }

    /// Set the date range, then drop any selected weekday it no longer covers.
    /// Returns the dropped weekdays.
    pub fn set_date_range(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Vec<Weekday> {
        self.range.start_date = start;
        self.range.end_date = end;
        self.reconcile()
    }

    /// Toggle a weekday in the selection.
    ///
    /// Deselecting keeps the day's slots so re-selecting restores them.
    /// Selecting a weekday that has no date in the current range is refused
    /// with a warning. Selecting a day with no slots adds its first slot in
    /// the same update. Returns whether the weekday is selected afterwards.
    pub fn toggle_weekday(&mut self, weekday: Weekday) -> bool {
        if self.range.deselect(weekday) {
            self.reconcile();
            return false;
        }

        if self.range.contains_weekday(weekday) == Some(false) {
            self.sink.notify(Notice::warning(format!(
                "{} does not occur in the selected date range",
                self.config.label(weekday)
            )));
            return false;
        }

        self.range.select(weekday);
        if self.store.slot_count(weekday) == 0 {
            self.store
                .add_slot(weekday, &self.event, &self.config, &mut self.sink);
        }
        self.reconcile();
        self.range.is_selected(weekday)
    }

    pub fn add_slot(&mut self, weekday: Weekday) -> SlotId {
        self.store
            .add_slot(weekday, &self.event, &self.config, &mut self.sink)
    }

    pub fn remove_slot(&mut self, weekday: Weekday, id: SlotId) -> bool {
        self.store.remove_slot(weekday, id)
    }

    pub fn update_slot_start(&mut self, weekday: Weekday, id: SlotId, start: TimeOfDay) -> bool {
        self.store.update_slot_start(weekday, id, start, &self.event)
    }

    pub fn auto_suggest(&mut self, weekday: Weekday) -> usize {
        self.store.auto_suggest(weekday, &self.event, &self.config)
    }

    /// Run the full submission check without side effects.
    pub fn validate(&self) -> std::result::Result<(), ValidationFailure> {
        validate_submission(&self.event, &self.range, &self.store, &self.config)
    }

    /// Reconcile, validate and materialize.
    ///
    /// A failed check sends exactly one blocking notice and returns the
    /// failure; nothing is materialized.
    pub fn submit(&mut self) -> std::result::Result<Submission, ValidationFailure> {
        self.reconcile();
        if let Err(failure) = self.validate() {
            self.sink.notify(Notice::blocking(failure.to_string()));
            return Err(failure);
        }

        let batch = match materialize(&self.event, &self.range, &self.store) {
            Ok(batch) => batch,
            // Validation has already checked both dates.
            Err(err) => {
                tracing::error!(error = %err, "materialization failed after validation");
                let failure = ValidationFailure::MissingDates;
                self.sink.notify(Notice::blocking(failure.to_string()));
                return Err(failure);
            }
        };

        self.sink.notify(Notice::info(format!(
            "{} dates and {} time slots ready to save",
            batch.dates.len(),
            batch.time_slots.len()
        )));
        Ok(Submission {
            batch,
            editing_id: self.editing_id.clone(),
        })
    }

    /// Materialize the current state without validating it first.
    ///
    /// # Errors
    /// Returns `SlotError::IncompleteRange` if either date is unset.
    pub fn preview(&self) -> Result<BookingBatch> {
        materialize(&self.event, &self.range, &self.store)
    }

    fn reconcile(&mut self) -> Vec<Weekday> {
        reconcile_weekdays(&mut self.range, &self.config, &mut self.sink)
    }
}
