//! Data models for the Pretalx and HelpDesk APIs.
//!
//! Models are organized by domain:
//!
//! - [`common`] - Multilingual strings and shared helpers
//! - [`event`] - Events and the current user
//! - [`submission`] - Submissions, talks and their slots
//! - [`speaker`] - Speakers
//! - [`question`] - Questions and answers
//! - [`review`] - Reviews, rooms and tags
//! - [`helpdesk`] - HelpDesk agents, teams and tickets
//!
//! The Pretalx API frequently returns something other than what its
//! documentation says; fields that are only visible with organizer
//! permissions are optional.

pub mod common;
pub mod event;
pub mod helpdesk;
pub mod question;
pub mod review;
pub mod speaker;
pub mod submission;

// Re-export commonly used types
pub use common::*;
pub use event::*;
pub use helpdesk::*;
pub use question::*;
pub use review::*;
pub use speaker::*;
pub use submission::*;
