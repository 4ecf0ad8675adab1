//! Event and user models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::MultiLingualStr;

/// The user the API token belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Me {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Preferred locale
    #[serde(default)]
    pub locale: Option<String>,
    /// Time zone, e.g. "Europe/Berlin"
    pub timezone: String,
}

/// Public URLs of an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Urls {
    /// Landing page
    pub base: String,
    /// Schedule page
    pub schedule: String,
    /// Login page
    pub login: String,
    /// iCal/RSS feed of the schedule
    pub feed: String,
}

/// A conference hosted on Pretalx.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event name
    pub name: MultiLingualStr,
    /// Short identifier used in every event-scoped path
    pub slug: String,
    /// Whether the event is publicly visible
    pub is_public: bool,
    /// First day
    pub date_from: NaiveDate,
    /// Last day, absent for one-day events
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
    /// Time zone of the schedule
    pub timezone: String,
    /// Public URLs
    pub urls: Urls,
}
