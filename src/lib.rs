//! # pytanis-rs
//!
//! Async clients for the tools conference organizers work with: the
//! [Pretalx](https://pretalx.com) conference-management API and the
//! [HelpDesk](https://helpdesk.com) ticketing API.
//!
//! ## Features
//!
//! - **Transparent pagination**: list calls return a [`Paged`] whose
//!   stream follows `next` links lazily, one page at a time
//! - **Throttling**: every client enforces a sliding-window call quota,
//!   adjustable at runtime with `set_throttling`
//! - **Typed records**: responses are deserialized into the structs in
//!   [`models`]; violations surface as [`Error::Schema`]
//! - **Actionable errors**: HelpDesk permission failures explain how to fix
//!   the token or the client's [`AccessMode`]
//! - **Review bookkeeping**: [`tabular`] flattens records into rows
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use futures_util::StreamExt;
//! use pytanis_rs::{PretalxClient, Settings};
//!
//! #[tokio::main]
//! async fn main() -> pytanis_rs::Result<()> {
//!     let settings = Settings::load()?;
//!     let client = PretalxClient::from_settings(&settings)?;
//!
//!     let me = client.me().await?;
//!     println!("Logged in as {}", me.name);
//!
//!     let subs = client.submissions().list("pyconde-pydata-berlin-2023").await?;
//!     println!("{} submissions", subs.count());
//!
//!     let mut stream = subs.into_stream();
//!     while let Some(sub) = stream.next().await {
//!         let sub = sub?;
//!         println!("{}: {}", sub.code, sub.title);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Creating a ticket
//!
//! ```rust,no_run
//! use pytanis_rs::{AccessMode, HelpDeskClient, Settings};
//! use pytanis_rs::models::{NewTicket, Requester};
//!
//! #[tokio::main]
//! async fn main() -> pytanis_rs::Result<()> {
//!     let settings = Settings::load()?;
//!     let client = HelpDeskClient::from_settings(&settings, AccessMode::ReadWrite)?;
//!
//!     let teams = client.list_teams().await?;
//!     let agents = client.list_agents().await?;
//!
//!     let ticket = NewTicket::new(
//!         Requester { email: "ada@example.org".into(), name: "Ada".into() },
//!         "Thanks for your proposal!",
//!     )
//!     .subject("Your proposal")
//!     .status("solved");
//!     client.create_ticket(&ticket).await?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod client;
pub mod error;
pub mod models;
pub mod settings;
pub mod tabular;

// Re-export primary types at crate root for convenience
pub use client::{AccessMode, ClientConfig, HelpDeskClient, Paged, PretalxClient, Throttle};
pub use error::{Error, Result};
pub use settings::Settings;

/// Prelude module for convenient imports.
///
/// ```rust
/// use pytanis_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::{
        AccessMode, ClientConfig, HelpDeskClient, Paged, Params, PretalxClient, Throttle,
    };
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        // Pretalx
        Answer, Event, Me, MultiLingualStr, Question, Review, Room, Speaker, State, Submission,
        Tag, Talk,
        // HelpDesk
        Agent, NewTicket, Requester, Team, Ticket,
    };
    pub use crate::settings::Settings;
    pub use crate::tabular::{
        assignment_rows, read_assignments, review_rows, save_assignments, speaker_rows,
        submission_rows, Assignments, Col, Row,
    };
}
