//! Scalar, non-schedule fields of a presentation event.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationType {
    #[default]
    Single,
    Team,
}

/// Event metadata owned by the editing form.
///
/// `min_team_members` / `max_team_members` only mean something when
/// `presentation_type` is [`PresentationType::Team`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventConfig {
    pub title: String,
    pub description: String,
    pub target_year: String,
    pub target_school: String,
    pub target_department: String,
    pub presentation_type: PresentationType,
    pub min_team_members: u32,
    pub max_team_members: u32,
    pub venue: String,
    /// Presentation length in minutes.
    pub duration: u32,
    /// Gap after each presentation in minutes.
    pub buffer_time: u32,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            target_year: String::new(),
            target_school: String::new(),
            target_department: String::new(),
            presentation_type: PresentationType::Single,
            min_team_members: 2,
            max_team_members: 4,
            venue: String::new(),
            duration: 30,
            buffer_time: 5,
        }
    }
}

impl EventConfig {
    /// Required text fields paired with their display names, in the order
    /// they are checked.
    pub fn required_fields(&self) -> [(&'static str, &str); 6] {
        [
            ("title", &self.title),
            ("description", &self.description),
            ("venue", &self.venue),
            ("target year", &self.target_year),
            ("target school", &self.target_school),
            ("target department", &self.target_department),
        ]
    }
}
