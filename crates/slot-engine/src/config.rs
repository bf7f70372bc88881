//! Static lookup tables consumed by the engine.
//!
//! Weekday labels, per-weekday suggested start times, the academic taxonomy
//! and the slot rules are injected as one immutable [`ScheduleConfig`]. The
//! built-in [`Default`] covers a typical deployment; [`ScheduleConfig::load`]
//! reads a TOML file with the same shape.

use std::path::Path;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::calendar::weekday_index;
use crate::error::{Result, SlotError};
use crate::time::TimeOfDay;

/// One row of the weekday table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayEntry {
    /// Weekday index, 0 = Sunday.
    pub value: u8,
    pub label: String,
    /// Suggested start times, in the order they are offered.
    #[serde(default)]
    pub suggested_times: Vec<TimeOfDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct School {
    pub name: String,
    #[serde(default)]
    pub departments: Vec<String>,
}

/// Thresholds used when generating slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotRules {
    /// Start of the first slot on a day without suggestions.
    pub default_start: TimeOfDay,
    /// Slots starting at or after this time raise a warning.
    pub late_start_warning: TimeOfDay,
    /// Auto-suggest stops before a slot starting at or after this time.
    pub suggestion_cutoff: TimeOfDay,
    /// Maximum number of slots produced by auto-suggest.
    pub max_suggested_slots: usize,
}

impl Default for SlotRules {
    fn default() -> Self {
        Self {
            default_start: TimeOfDay::from_minutes(9 * 60),
            late_start_warning: TimeOfDay::from_minutes(18 * 60),
            suggestion_cutoff: TimeOfDay::from_minutes(17 * 60),
            max_suggested_slots: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub weekdays: Vec<WeekdayEntry>,
    #[serde(default)]
    pub schools: Vec<School>,
    #[serde(default)]
    pub years: Vec<String>,
    #[serde(default)]
    pub rules: SlotRules,
}

impl ScheduleConfig {
    /// Parse and validate a TOML configuration.
    ///
    /// # Errors
    /// Returns `SlotError::ConfigParse` for malformed TOML and
    /// `SlotError::InvalidConfig` if the tables fail [`ScheduleConfig::validate`].
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: ScheduleConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML configuration file.
    ///
    /// # Errors
    /// Returns `SlotError::ConfigRead` if the file cannot be read, otherwise
    /// the errors of [`ScheduleConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| SlotError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Check that the weekday table has exactly one row per weekday 0-6 and
    /// that the slot rules are usable.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidConfig` describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        let mut seen = [false; 7];
        for entry in &self.weekdays {
            let slot = seen.get_mut(usize::from(entry.value)).ok_or_else(|| {
                SlotError::InvalidConfig(format!("weekday value {} is out of range 0-6", entry.value))
            })?;
            if *slot {
                return Err(SlotError::InvalidConfig(format!(
                    "weekday value {} appears more than once",
                    entry.value
                )));
            }
            *slot = true;
        }
        if let Some(missing) = seen.iter().position(|s| !s) {
            return Err(SlotError::InvalidConfig(format!(
                "weekday value {} has no entry",
                missing
            )));
        }
        if self.rules.max_suggested_slots == 0 {
            return Err(SlotError::InvalidConfig(
                "rules.max_suggested_slots must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn entry(&self, weekday: Weekday) -> Option<&WeekdayEntry> {
        let index = weekday_index(weekday);
        self.weekdays.iter().find(|e| e.value == index)
    }

    /// Display label for a weekday, falling back to chrono's short name.
    pub fn label(&self, weekday: Weekday) -> String {
        self.entry(weekday)
            .map(|e| e.label.clone())
            .unwrap_or_else(|| weekday.to_string())
    }

    /// Labels for several weekdays joined with `", "`.
    pub fn labels(&self, weekdays: &[Weekday]) -> String {
        weekdays
            .iter()
            .map(|w| self.label(*w))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn suggested_times(&self, weekday: Weekday) -> &[TimeOfDay] {
        self.entry(weekday)
            .map(|e| e.suggested_times.as_slice())
            .unwrap_or(&[])
    }

    /// Departments of a school, or `None` if the school is unknown.
    pub fn departments(&self, school: &str) -> Option<&[String]> {
        self.schools
            .iter()
            .find(|s| s.name == school)
            .map(|s| s.departments.as_slice())
    }
}

fn times(list: &[(u32, u32)]) -> Vec<TimeOfDay> {
    list.iter()
        .map(|&(h, m)| TimeOfDay::from_minutes(h * 60 + m))
        .collect()
}

fn school(name: &str, departments: &[&str]) -> School {
    School {
        name: name.to_string(),
        departments: departments.iter().map(|d| d.to_string()).collect(),
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        let weekday = |value: u8, label: &str, suggested: &[(u32, u32)]| WeekdayEntry {
            value,
            label: label.to_string(),
            suggested_times: times(suggested),
        };
        let weekday_slots = [(9, 0), (10, 0), (11, 0), (13, 0), (14, 0), (15, 0), (16, 0)];
        let saturday_slots = [(10, 0), (11, 0), (13, 0)];

        Self {
            weekdays: vec![
                weekday(0, "Sunday", &[]),
                weekday(1, "Monday", &weekday_slots),
                weekday(2, "Tuesday", &weekday_slots),
                weekday(3, "Wednesday", &weekday_slots),
                weekday(4, "Thursday", &weekday_slots),
                weekday(5, "Friday", &[(9, 0), (10, 0), (11, 0), (13, 0), (14, 0)]),
                weekday(6, "Saturday", &saturday_slots),
            ],
            schools: vec![
                school(
                    "School of Engineering",
                    &[
                        "Computer Science",
                        "Electrical Engineering",
                        "Mechanical Engineering",
                        "Civil Engineering",
                    ],
                ),
                school(
                    "School of Sciences",
                    &["Mathematics", "Physics", "Chemistry", "Biology"],
                ),
                school(
                    "School of Business",
                    &["Accounting", "Finance", "Management", "Marketing"],
                ),
                school(
                    "School of Humanities",
                    &["History", "Philosophy", "Linguistics"],
                ),
            ],
            years: vec![
                "1st Year".to_string(),
                "2nd Year".to_string(),
                "3rd Year".to_string(),
                "4th Year".to_string(),
            ],
            rules: SlotRules::default(),
        }
    }
}
