//! Events service.

use std::sync::Arc;

use crate::client::{ClientInner, Endpoint, Paged, Params};
use crate::models::Event;
use crate::Result;

/// Service for the events visible to the API token.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: pytanis_rs::PretalxClient) -> pytanis_rs::Result<()> {
/// let event = client.events().get("pyconde-pydata-berlin-2023").await?;
/// println!("{} starts on {}", event.name, event.date_from);
/// # Ok(())
/// # }
/// ```
pub struct EventsService {
    inner: Arc<ClientInner>,
}

impl EventsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get an event by its slug.
    pub async fn get(&self, slug: &str) -> Result<Event> {
        self.get_with_params(slug, Params::new()).await
    }

    /// Get an event, passing extra query parameters.
    pub async fn get_with_params(&self, slug: &str, params: Params) -> Result<Event> {
        let endpoint = Endpoint::events().with_id(slug).with_params(params);
        self.inner.get_one(&endpoint).await
    }

    /// List all events.
    pub async fn list(&self) -> Result<Paged<Event>> {
        self.list_with_params(Params::new()).await
    }

    /// List all events, passing extra query parameters.
    pub async fn list_with_params(&self, params: Params) -> Result<Paged<Event>> {
        let endpoint = Endpoint::events().with_params(params);
        self.inner.get_many(&endpoint).await
    }
}
