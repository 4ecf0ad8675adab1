//! HTTP clients for the Pretalx and HelpDesk APIs.
//!
//! Both clients share one request layer: a `reqwest` client, credentials
//! and a sliding-window [`RateLimiter`] that every call passes through.
//!
//! # Example
//!
//! ```no_run
//! use pytanis_rs::{PretalxClient, Settings};
//!
//! # async fn example() -> pytanis_rs::Result<()> {
//! let settings = Settings::load()?;
//! let client = PretalxClient::from_settings(&settings)?;
//! client.set_throttling(2, 1).await?;
//!
//! let talks = client.talks().list("pyconde-pydata-berlin-2023").await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod endpoint;
mod helpdesk;
mod http;
pub mod paginated;
mod pretalx;
mod throttle;

pub use config::{
    ClientConfig, Throttle, HELPDESK_BASE_URL, HELPDESK_USER_AGENT, MAX_THROTTLE_SECONDS,
    PRETALX_BASE_URL,
};
pub use endpoint::{Endpoint, Params, API_PREFIX};
pub use helpdesk::{AccessMode, HelpDeskClient};
pub use paginated::{PageEnvelope, Paged, PaginatedStream};
pub use pretalx::PretalxClient;
pub use throttle::RateLimiter;
pub(crate) use http::ClientInner;
