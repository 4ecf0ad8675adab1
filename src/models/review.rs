//! Review, room and tag models.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::common::{number_or_string, MultiLingualStr};

/// A review of a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Review id
    pub id: u64,
    /// Code of the reviewed submission
    pub submission: String,
    /// Reviewer name (the API docs claim name and email, but it is a string)
    pub user: String,
    /// Free-text review
    #[serde(default)]
    pub text: Option<String>,
    /// Score; the API sends it as a string
    #[serde(default, deserialize_with = "number_or_string")]
    pub score: Option<f64>,
    /// Creation time
    pub created: DateTime<FixedOffset>,
    /// Last modification time
    pub updated: DateTime<FixedOffset>,
    /// Answers to reviewer questions
    pub answers: Vec<String>,
}

/// A time range a room is available in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomAvailability {
    /// Start of the range
    pub start: DateTime<FixedOffset>,
    /// End of the range
    pub end: DateTime<FixedOffset>,
}

/// A room of the venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Room id
    pub id: u64,
    /// Room name
    pub name: MultiLingualStr,
    /// Room description
    pub description: MultiLingualStr,
    /// Number of seats
    #[serde(default)]
    pub capacity: Option<u32>,
    /// Sort position in the schedule
    #[serde(default)]
    pub position: Option<u32>,
    /// Information for speakers in this room
    #[serde(default)]
    pub speaker_info: Option<MultiLingualStr>,
    /// Availabilities (organizer only)
    #[serde(default)]
    pub availabilities: Option<Vec<RoomAvailability>>,
}

/// A tag organizers attach to submissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name
    pub tag: String,
    /// Tag description
    pub description: MultiLingualStr,
    /// Hex color, e.g. "#2185d0"
    pub color: String,
}
