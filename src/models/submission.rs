//! Submission (proposal) and talk models.

use std::fmt;
use std::ops::Deref;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::common::MultiLingualStr;
use super::question::Answer;

/// Review state of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    /// Newly submitted
    Submitted,
    /// Accepted, not yet confirmed by the speakers
    Accepted,
    /// Shown as "Not accepted" in the web UI
    Rejected,
    /// Confirmed by the speakers
    Confirmed,
    /// Withdrawn by the speakers
    Withdrawn,
    /// Canceled after acceptance
    Canceled,
    /// Deleted
    Deleted,
}

impl State {
    /// The state as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            State::Submitted => "submitted",
            State::Accepted => "accepted",
            State::Rejected => "rejected",
            State::Confirmed => "confirmed",
            State::Withdrawn => "withdrawn",
            State::Canceled => "canceled",
            State::Deleted => "deleted",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A speaker as embedded in a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionSpeaker {
    /// Speaker code
    pub code: String,
    /// Display name
    pub name: String,
    /// Speaker biography
    #[serde(default)]
    pub biography: Option<String>,
    /// Avatar URL
    #[serde(default)]
    pub avatar: Option<String>,
    /// Only visible with organizer permissions
    #[serde(default)]
    pub email: Option<String>,
}

/// Scheduled time and room of a talk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    /// Start time
    pub start: DateTime<FixedOffset>,
    /// End time
    pub end: DateTime<FixedOffset>,
    /// Room name
    pub room: MultiLingualStr,
    /// Room id
    pub room_id: u64,
}

/// A file or link attached to a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource URL
    pub resource: String,
    /// Resource description
    pub description: String,
}

/// A proposal submitted to an event.
///
/// Several fields are only returned for tokens with organizer permissions;
/// `answers` additionally requires the `questions` query parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Unique submission code, e.g. "MD9SLQ"
    pub code: String,
    /// Speakers of this submission
    pub speakers: Vec<SubmissionSpeaker>,
    /// Creation time (organizer only)
    #[serde(default)]
    pub created: Option<DateTime<FixedOffset>>,
    /// Title
    pub title: String,
    /// Submission type, e.g. "Talk" or "Tutorial"
    pub submission_type: MultiLingualStr,
    /// Id of the submission type
    pub submission_type_id: u64,
    /// Track, if the event uses tracks
    #[serde(default)]
    pub track: Option<MultiLingualStr>,
    /// Id of the track
    #[serde(default)]
    pub track_id: Option<u64>,
    /// Current state
    pub state: State,
    /// State that becomes active once the organizers release it (organizer only)
    #[serde(default)]
    pub pending_state: Option<State>,
    /// Abstract
    #[serde(rename = "abstract")]
    pub abstract_: String,
    /// Description
    pub description: String,
    /// Duration in minutes
    #[serde(default)]
    pub duration: Option<u32>,
    /// Whether the speakers opted out of recording
    pub do_not_record: bool,
    /// Whether the submission is featured
    pub is_featured: bool,
    /// Language of the talk, e.g. "en"
    pub content_locale: String,
    /// Schedule slot, only after a schedule has been released
    #[serde(default)]
    pub slot: Option<Slot>,
    /// Number of slots this submission occupies
    pub slot_count: u32,
    /// Header image URL
    #[serde(default)]
    pub image: Option<String>,
    /// Answers to submission questions
    #[serde(default)]
    pub answers: Option<Vec<Answer>>,
    /// Notes for the organizers (organizer only)
    #[serde(default)]
    pub notes: Option<String>,
    /// Internal notes (organizer only)
    #[serde(default)]
    pub internal_notes: Option<String>,
    /// Attached resources
    pub resources: Vec<Resource>,
    /// Tag names (organizer only)
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Tag ids (organizer only)
    #[serde(default)]
    pub tag_ids: Option<Vec<u64>>,
}

/// An accepted and scheduled submission, as served by the talks endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Talk(pub Submission);

impl Deref for Talk {
    type Target = Submission;

    fn deref(&self) -> &Submission {
        &self.0
    }
}

impl From<Talk> for Submission {
    fn from(talk: Talk) -> Self {
        talk.0
    }
}
