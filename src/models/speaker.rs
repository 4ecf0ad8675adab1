//! Speaker models.

use serde::{Deserialize, Serialize};

use super::question::Answer;

/// A time range a speaker is available in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerAvailability {
    /// Availability id
    pub id: u64,
    /// Start time
    pub start: String,
    /// End time
    pub end: String,
    /// Whether the range covers whole days
    #[serde(alias = "allDay")]
    pub all_day: bool,
}

/// A speaker with all their submissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Speaker {
    /// Speaker code
    pub code: String,
    /// Display name
    pub name: String,
    /// Biography (Markdown)
    #[serde(default)]
    pub biography: Option<String>,
    /// Avatar URL
    #[serde(default)]
    pub avatar: Option<String>,
    /// Only visible with organizer permissions
    #[serde(default)]
    pub email: Option<String>,
    /// Codes of this speaker's submissions
    pub submissions: Vec<String>,
    /// Availabilities (organizer only)
    #[serde(default)]
    pub availabilities: Option<Vec<SpeakerAvailability>>,
    /// Answers to speaker and submission questions (organizer only)
    #[serde(default)]
    pub answers: Option<Vec<Answer>>,
}
