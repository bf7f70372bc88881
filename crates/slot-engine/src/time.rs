//! Wall-clock time arithmetic.
//!
//! A [`TimeOfDay`] has no date and no timezone attached. Adding minutes wraps
//! around midnight, so a computed end time can be numerically smaller than its
//! start: callers treat that as a same-day overflow, not an error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// Minutes in one day; all clock arithmetic is modulo this value.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A wall-clock time, serialized as zero-padded `"HH:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Build a time from its components.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidTime` if `hour > 23` or `minute > 59`.
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(SlotError::InvalidTime(format!("{:02}:{:02}", hour, minute)));
        }
        Ok(Self { hour, minute })
    }

    /// Build a time from a minute offset, wrapping past midnight.
    pub fn from_minutes(minutes: u32) -> Self {
        let wrapped = minutes % MINUTES_PER_DAY;
        Self {
            hour: (wrapped / 60) as u8,
            minute: (wrapped % 60) as u8,
        }
    }

    /// Parse an `"HH:MM"` clock string.
    ///
    /// Single-digit hours (`"9:05"`) are accepted, as is a trailing `":00"`
    /// seconds field as produced by some time pickers.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidTime` for anything else.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || SlotError::InvalidTime(s.to_string());
        let mut parts = s.trim().split(':');

        let hour = parts.next().ok_or_else(invalid)?;
        let minute = parts.next().ok_or_else(invalid)?;
        if let Some(seconds) = parts.next() {
            if seconds != "00" {
                return Err(invalid());
            }
        }
        if parts.next().is_some() {
            return Err(invalid());
        }

        let digits = |p: &str, max_len: usize| {
            !p.is_empty() && p.len() <= max_len && p.bytes().all(|b| b.is_ascii_digit())
        };
        if !digits(hour, 2) || minute.len() != 2 || !digits(minute, 2) {
            return Err(invalid());
        }

        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    /// Equivalent to [`minutes_since_midnight`].
    pub fn minutes(self) -> u32 {
        minutes_since_midnight(self)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = SlotError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        t.to_string()
    }
}

/// `hour * 60 + minute`.
pub fn minutes_since_midnight(t: TimeOfDay) -> u32 {
    u32::from(t.hour) * 60 + u32::from(t.minute)
}

/// End time of a slot starting at `start`: `start + duration + buffer`,
/// wrapping modulo 24 hours.
pub fn add_duration(start: TimeOfDay, duration_minutes: u32, buffer_minutes: u32) -> TimeOfDay {
    let total = u64::from(minutes_since_midnight(start))
        + u64::from(duration_minutes)
        + u64::from(buffer_minutes);
    TimeOfDay::from_minutes((total % u64::from(MINUTES_PER_DAY)) as u32)
}
