//! HelpDesk models.
//!
//! The HelpDesk API documents only part of its response shapes, so every
//! record keeps the keys it does not model in an `extra` map. They are
//! serialized back unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reference to another HelpDesk object by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Id {
    /// Object id
    #[serde(rename = "ID")]
    pub id: String,
}

impl Id {
    /// Create a reference from an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// A HelpDesk agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Agent id
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Login email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Everything else the API returned
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A team of agents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Team id
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Team name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Everything else the API returned
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a ticket message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Message body
    pub text: String,
    /// Everything else the API returned
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The person a ticket is sent to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    /// Recipient email
    pub email: String,
    /// Recipient name
    pub name: String,
}

/// Team and agent responsible for a ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Responsible team
    pub team: Id,
    /// Responsible agent
    pub agent: Id,
    /// Everything else the API returned
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload for creating a new ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTicket {
    /// First message of the ticket
    pub message: Message,
    /// Recipient
    pub requester: Requester,
    /// Ticket status after creation, e.g. "solved"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Subject line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Teams that can see the ticket
    #[serde(rename = "teamIDs", default, skip_serializing_if = "Option::is_none")]
    pub team_ids: Option<Vec<String>>,
    /// Responsible team and agent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignment: Option<Assignment>,
    /// Everything else the API returned
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewTicket {
    /// A ticket with only a requester and a message text.
    pub fn new(requester: Requester, text: impl Into<String>) -> Self {
        Self {
            message: Message {
                text: text.into(),
                extra: Map::new(),
            },
            requester,
            status: None,
            subject: None,
            team_ids: None,
            assignment: None,
            extra: Map::new(),
        }
    }

    /// Set the subject line.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the status the ticket is created with.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Assign the ticket to a team and agent; the team also gets visibility.
    pub fn assign(mut self, team_id: impl Into<String>, agent_id: impl Into<String>) -> Self {
        let team_id = team_id.into();
        self.team_ids = Some(vec![team_id.clone()]);
        self.assignment = Some(Assignment {
            team: Id::new(team_id),
            agent: Id::new(agent_id),
            extra: Map::new(),
        });
        self
    }
}

/// A ticket as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Ticket id
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Everything else the API returned
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
