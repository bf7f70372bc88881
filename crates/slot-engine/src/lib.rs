//! # slot-engine
//!
//! Recurring time-slot generation and validation for presentation events.
//!
//! Given a date range, a set of selected weekdays and per-weekday time slots,
//! the engine checks that every selected weekday occurs in the range, detects
//! overlapping slots within a day, expands the weekdays into concrete dates,
//! and builds the [`BookingBatch`] handed to the persistence layer.
//!
//! ## Modules
//!
//! - [`time`] — `"HH:MM"` clock times and end-time arithmetic
//! - [`calendar`] — weekday-in-range checks and date expansion
//! - [`range`] — date range and weekday selection
//! - [`event`] — event details shared by every booking
//! - [`store`] — per-weekday slot sequences with chaining and auto-suggest
//! - [`overlap`] — intra-day overlap detection
//! - [`validator`] — ordered submission checks and weekday reconciliation
//! - [`materializer`] — `BookingBatch` construction
//! - [`seed`] — editing state derived from a persisted event
//! - [`session`] — transactional editing session tying it all together
//! - [`config`] — injected lookup tables and slot rules
//! - [`notify`] — notification sink for warnings and rejections
//! - [`error`] — Error types

pub mod calendar;
pub mod config;
pub mod error;
pub mod event;
pub mod materializer;
pub mod notify;
pub mod overlap;
pub mod range;
pub mod seed;
pub mod session;
pub mod store;
pub mod time;
pub mod validator;

pub use calendar::{expand_dates, weekday_occurs_in_range, ExpandedDate};
pub use config::ScheduleConfig;
pub use error::SlotError;
pub use event::{EventConfig, PresentationType};
pub use materializer::{materialize, Booking, BookingBatch};
pub use notify::{NotificationSink, Notice, Severity, TracingSink};
pub use overlap::find_overlap;
pub use range::DateRange;
pub use seed::{seed_from_entries, PersistedEvent, PersistedSlot};
pub use session::{EditingSession, Submission};
pub use store::{DaySlotStore, SlotId, TimeSlot};
pub use time::{add_duration, minutes_since_midnight, TimeOfDay};
pub use validator::{reconcile_weekdays, validate_submission, ValidationFailure};
