//! Pretalx API services.
//!
//! Each service covers one resource collection and offers `get` for a
//! single record and `list` for a [`Paged`](crate::client::Paged) result.

mod events;
mod resources;

pub use events::EventsService;
pub use resources::{EventResource, ResourceService};
