//! Lazy and eager resolution of `next`-linked page chains.
//!
//! Collection endpoints answer either with a bare JSON list or with a page
//! envelope `{"count": .., "next": .., "results": [..]}`. A
//! [`PaginatedStream`] yields the items of the first page and fetches the
//! page behind `next` only once the current page has been drained.

use std::collections::VecDeque;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::{Stream, StreamExt};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, Span};

use crate::{Error, Result};

/// Type alias for a boxed future used internally.
pub(crate) type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Fetches the page envelope behind a `next` link.
pub(crate) type PageFetcher = Box<dyn Fn(String) -> BoxFuture<'static, Result<PageEnvelope>> + Send + Sync>;

/// One page of a collection response.
#[derive(Debug, Clone, PartialEq)]
pub struct PageEnvelope {
    /// Raw result objects of this page, in order.
    pub results: Vec<Value>,
    /// Advertised total across all pages, if the API sent one.
    pub count: Option<u64>,
    /// Link to the next page; `None` on the last page.
    pub next: Option<String>,
}

impl PageEnvelope {
    /// Parse a collection response.
    ///
    /// A bare list becomes a single complete page whose count is its length.
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Array(results) => Ok(Self {
                count: Some(results.len() as u64),
                next: None,
                results,
            }),
            Value::Object(mut map) => {
                let results = match map.remove("results") {
                    Some(Value::Array(results)) => results,
                    _ => {
                        return Err(Error::SchemaShape(
                            "page envelope has no `results` list".to_string(),
                        ))
                    }
                };
                let meta = Value::Object(map.clone());
                debug!(response = %meta, "response");

                let count = match map.get("count") {
                    None | Some(Value::Null) => None,
                    Some(count) => Some(count.as_u64().ok_or_else(|| {
                        Error::SchemaShape(format!("page envelope count is not a number: {count}"))
                    })?),
                };
                let next = match map.remove("next") {
                    None | Some(Value::Null) => None,
                    Some(Value::String(next)) => Some(next),
                    Some(other) => {
                        return Err(Error::SchemaShape(format!(
                            "page envelope `next` is not a link: {other}"
                        )))
                    }
                };
                Ok(Self {
                    results,
                    count,
                    next,
                })
            }
            other => Err(Error::SchemaShape(format!(
                "expected a list or a page envelope, got {other}"
            ))),
        }
    }

    /// The advertised count, falling back to the length of this page.
    pub fn total(&self) -> u64 {
        self.count.unwrap_or(self.results.len() as u64)
    }
}

/// Decode one raw item into its record type.
pub(crate) fn decode<T: DeserializeOwned>(raw: Value) -> Result<T> {
    debug!(resp = %raw, "result");
    serde_json::from_value(raw).map_err(Error::schema::<T>)
}

/// A stream that lazily walks a page chain, yielding typed items.
///
/// Each traversal issues its own requests; nothing is cached. After an
/// error has been yielded the stream ends.
///
/// # Example
///
/// ```no_run
/// use futures_util::StreamExt;
///
/// # async fn example(client: pytanis_rs::PretalxClient) -> pytanis_rs::Result<()> {
/// let mut submissions = client.submissions().list("pycon-2024").await?.into_stream();
///
/// while let Some(submission) = submissions.next().await {
///     println!("{}", submission?.title);
/// }
/// # Ok(())
/// # }
/// ```
pub struct PaginatedStream<T> {
    /// Function to fetch the page behind a `next` link.
    fetch_page: PageFetcher,
    /// Remaining raw items of the current page.
    current_items: VecDeque<Value>,
    /// Link to the next page, `None` once the chain is exhausted.
    next_link: Option<String>,
    /// Current in-flight fetch future.
    pending_fetch: Option<BoxFuture<'static, Result<PageEnvelope>>>,
    pages_fetched: usize,
    span: Span,
    _marker: PhantomData<fn() -> T>,
}

impl<T> PaginatedStream<T> {
    /// Start from an envelope that has already been fetched.
    pub(crate) fn new<F>(first_page: PageEnvelope, span: Span, fetch_page: F) -> Self
    where
        F: Fn(String) -> BoxFuture<'static, Result<PageEnvelope>> + Send + Sync + 'static,
    {
        Self {
            fetch_page: Box::new(fetch_page),
            current_items: first_page.results.into(),
            next_link: first_page.next,
            pending_fetch: None,
            pages_fetched: 1,
            span,
            _marker: PhantomData,
        }
    }

    /// Number of pages received so far, including the first one.
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    fn finish(&mut self) {
        self.current_items.clear();
        self.next_link = None;
        self.pending_fetch = None;
    }
}

impl<T: DeserializeOwned> Stream for PaginatedStream<T> {
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;
        let span = this.span.clone();
        let _entered = span.enter();

        loop {
            if let Some(raw) = this.current_items.pop_front() {
                let item = decode::<T>(raw);
                if item.is_err() {
                    this.finish();
                }
                return Poll::Ready(Some(item));
            }

            if let Some(ref mut fut) = this.pending_fetch {
                match fut.as_mut().poll(cx) {
                    Poll::Ready(Ok(page)) => {
                        this.pending_fetch = None;
                        this.pages_fetched += 1;
                        this.current_items = page.results.into();
                        this.next_link = page.next;
                        continue;
                    }
                    Poll::Ready(Err(e)) => {
                        this.finish();
                        return Poll::Ready(Some(Err(e)));
                    }
                    Poll::Pending => return Poll::Pending,
                }
            }

            if let Some(next) = this.next_link.take() {
                this.pending_fetch = Some((this.fetch_page)(next));
                continue;
            }

            return Poll::Ready(None);
        }
    }
}

/// Result of a collection request: the advertised count plus the items.
///
/// The count is whatever the API claimed on the first page; it is not
/// reconciled with the number of items actually yielded.
pub struct Paged<T> {
    count: u64,
    items: PaginatedStream<T>,
}

impl<T: DeserializeOwned> Paged<T> {
    pub(crate) fn new(count: u64, items: PaginatedStream<T>) -> Self {
        Self { count, items }
    }

    /// Total number of results advertised by the API.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Lazy stream over all items.
    pub fn into_stream(self) -> PaginatedStream<T> {
        self.items
    }

    /// Walk the whole chain now and return every item in order.
    pub async fn collect_all(self) -> Result<Vec<T>> {
        let total = self.count;
        let mut stream = self.items;
        let mut items = Vec::new();
        let mut pages_seen = 0;

        while let Some(item) = stream.next().await {
            items.push(item?);
            if stream.pages_fetched() != pages_seen {
                pages_seen = stream.pages_fetched();
                info!(
                    parent: &stream.span,
                    page = pages_seen,
                    fetched = items.len(),
                    total,
                    "resolving pagination"
                );
            }
        }
        Ok(items)
    }
}

impl<T> std::fmt::Debug for Paged<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paged")
            .field("count", &self.count)
            .field("pages_fetched", &self.items.pages_fetched)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u32,
    }

    /// Serves pages from a map keyed by link and counts fetches.
    fn fake_chain(
        first: Value,
        rest: Vec<(&str, Value)>,
    ) -> (PaginatedStream<Item>, u64, Arc<AtomicUsize>) {
        let pages: HashMap<String, Value> = rest
            .into_iter()
            .map(|(link, page)| (link.to_string(), page))
            .collect();
        let pages = Arc::new(pages);
        let fetches = Arc::new(AtomicUsize::new(1));
        let counter = fetches.clone();

        let first = PageEnvelope::from_json(first).unwrap();
        let total = first.total();
        let stream = PaginatedStream::new(first, Span::none(), move |link: String| {
            let pages = pages.clone();
            counter.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move {
                match pages.get(&link) {
                    Some(page) => PageEnvelope::from_json(page.clone()),
                    None => Err(Error::HttpStatus {
                        status: 404,
                        body: Value::Null,
                    }),
                }
            })
        });
        (stream, total, fetches)
    }

    #[test]
    fn test_bare_list_is_single_page() {
        let page = PageEnvelope::from_json(json!([{"id": 1}, {"id": 2}])).unwrap();
        assert_eq!(page.count, Some(2));
        assert_eq!(page.next, None);
        assert_eq!(page.results.len(), 2);
    }

    #[test]
    fn test_envelope_parsing() {
        let page = PageEnvelope::from_json(json!({
            "count": 3,
            "next": "https://host/api/x/?page=2",
            "previous": null,
            "results": [{"id": 1}]
        }))
        .unwrap();
        assert_eq!(page.count, Some(3));
        assert_eq!(page.next.as_deref(), Some("https://host/api/x/?page=2"));
        assert_eq!(page.total(), 3);
    }

    #[test]
    fn test_malformed_envelopes() {
        assert!(matches!(
            PageEnvelope::from_json(json!({"count": 1})),
            Err(Error::SchemaShape(_))
        ));
        assert!(matches!(
            PageEnvelope::from_json(json!({"results": [], "next": 5})),
            Err(Error::SchemaShape(_))
        ));
        assert!(matches!(
            PageEnvelope::from_json(json!("nope")),
            Err(Error::SchemaShape(_))
        ));
    }

    #[tokio::test]
    async fn test_two_page_chain() {
        let (stream, total, fetches) = fake_chain(
            json!({"count": 3, "next": "p2", "results": [{"id": 1}, {"id": 2}]}),
            vec![("p2", json!({"count": 3, "next": null, "results": [{"id": 3}]}))],
        );
        let items: Vec<Item> = stream.map(|r| r.unwrap()).collect().await;

        assert_eq!(total, 3);
        assert_eq!(items, vec![Item { id: 1 }, Item { id: 2 }, Item { id: 3 }]);
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_chain_of_uneven_pages() {
        let (stream, _, fetches) = fake_chain(
            json!({"count": 6, "next": "p2", "results": [{"id": 0}]}),
            vec![
                ("p2", json!({"count": 6, "next": "p3", "results": []})),
                ("p3", json!({"count": 6, "next": "p4", "results": [{"id": 1}, {"id": 2}, {"id": 3}]})),
                ("p4", json!({"count": 6, "next": null, "results": [{"id": 4}, {"id": 5}]})),
            ],
        );
        let ids: Vec<u32> = stream.map(|r| r.unwrap().id).collect().await;

        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(fetches.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_next_page_fetched_only_after_drain() {
        let (mut stream, _, fetches) = fake_chain(
            json!({"count": 3, "next": "p2", "results": [{"id": 1}, {"id": 2}]}),
            vec![("p2", json!({"count": 3, "next": null, "results": [{"id": 3}]}))],
        );

        stream.next().await.unwrap().unwrap();
        stream.next().await.unwrap().unwrap();
        assert_eq!(fetches.load(Ordering::SeqCst), 1);

        stream.next().await.unwrap().unwrap();
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
        assert!(stream.next().await.is_none());
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_error_ends_stream_after_yielded_items() {
        let (mut stream, _, _) = fake_chain(
            json!({"count": 4, "next": "missing", "results": [{"id": 1}]}),
            vec![],
        );

        assert_eq!(stream.next().await.unwrap().unwrap(), Item { id: 1 });
        assert!(matches!(
            stream.next().await,
            Some(Err(Error::HttpStatus { status: 404, .. }))
        ));
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_schema_error_on_bad_item() {
        let (mut stream, _, _) = fake_chain(
            json!([{"id": "not-a-number"}, {"id": 2}]),
            vec![],
        );
        assert!(matches!(
            stream.next().await,
            Some(Err(Error::Schema { .. }))
        ));
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_collect_all_keeps_advertised_count() {
        let (stream, total, _) = fake_chain(
            json!({"count": 5, "next": "p2", "results": [{"id": 1}]}),
            vec![("p2", json!({"count": 5, "next": null, "results": [{"id": 2}]}))],
        );
        let paged = Paged::new(total, stream);
        assert_eq!(paged.count(), 5);

        let items = paged.collect_all().await.unwrap();
        assert_eq!(items.len(), 2);
    }
}
