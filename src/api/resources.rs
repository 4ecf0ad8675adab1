//! Event-scoped resource collections (submissions, talks, speakers, ...).

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::client::{ClientInner, Endpoint, Paged, Params};
use crate::models::{Answer, Question, Review, Room, Speaker, Submission, Tag, Talk};
use crate::Result;

/// A record type served below `/api/events/{event}/{COLLECTION}/`.
pub trait EventResource: DeserializeOwned + Send + 'static {
    /// Collection name in the endpoint path.
    const COLLECTION: &'static str;
}

impl EventResource for Submission {
    const COLLECTION: &'static str = "submissions";
}

impl EventResource for Talk {
    const COLLECTION: &'static str = "talks";
}

impl EventResource for Speaker {
    const COLLECTION: &'static str = "speakers";
}

impl EventResource for Review {
    const COLLECTION: &'static str = "reviews";
}

impl EventResource for Room {
    const COLLECTION: &'static str = "rooms";
}

impl EventResource for Question {
    const COLLECTION: &'static str = "questions";
}

impl EventResource for Answer {
    const COLLECTION: &'static str = "answers";
}

impl EventResource for Tag {
    const COLLECTION: &'static str = "tags";
}

/// Service for one resource collection of an event.
///
/// # Example
///
/// ```no_run
/// use pytanis_rs::client::Params;
///
/// # async fn example(client: pytanis_rs::PretalxClient) -> pytanis_rs::Result<()> {
/// // A single submission by its code
/// let sub = client.submissions().get("pycon-2024", "MD9SLQ").await?;
///
/// // All reviews, including answers to reviewer questions
/// let mut params = Params::new();
/// params.insert("questions".into(), "all".into());
/// let reviews = client.reviews().list_with_params("pycon-2024", params).await?;
/// println!("{} reviews", reviews.count());
/// # Ok(())
/// # }
/// ```
pub struct ResourceService<R> {
    inner: Arc<ClientInner>,
    _marker: PhantomData<fn() -> R>,
}

impl<R: EventResource> ResourceService<R> {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }

    /// Get one resource by its code or id.
    pub async fn get(&self, event: &str, id: impl fmt::Display) -> Result<R> {
        self.get_with_params(event, id, Params::new()).await
    }

    /// Get one resource, passing extra query parameters.
    pub async fn get_with_params(
        &self,
        event: &str,
        id: impl fmt::Display,
        params: Params,
    ) -> Result<R> {
        let endpoint = Endpoint::collection(event, R::COLLECTION)
            .with_id(id)
            .with_params(params);
        self.inner.get_one(&endpoint).await
    }

    /// List all resources of the event.
    pub async fn list(&self, event: &str) -> Result<Paged<R>> {
        self.list_with_params(event, Params::new()).await
    }

    /// List all resources, passing extra query parameters
    /// (e.g. `questions=all` or a page size).
    pub async fn list_with_params(&self, event: &str, params: Params) -> Result<Paged<R>> {
        let endpoint = Endpoint::collection(event, R::COLLECTION).with_params(params);
        self.inner.get_many(&endpoint).await
    }
}
