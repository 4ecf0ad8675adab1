//! Endpoint descriptors for the Pretalx resource API.

use std::collections::BTreeMap;
use std::fmt;

/// Query parameters passed through verbatim, e.g. `{"questions": "all"}`.
pub type Params = BTreeMap<String, String>;

/// Prefix of every event-scoped Pretalx endpoint.
pub const API_PREFIX: &str = "/api/events";

/// Logical identity of a request: scope, collection, optional id and query.
///
/// A descriptor with an id addresses a single resource; without one it
/// addresses a collection.
///
/// ```
/// use pytanis_rs::client::Endpoint;
///
/// let endpoint = Endpoint::collection("pycon-2024", "submissions");
/// assert_eq!(endpoint.path(), "/api/events/pycon-2024/submissions/");
///
/// let endpoint = Endpoint::collection("pycon-2024", "reviews").with_id(17);
/// assert_eq!(endpoint.path(), "/api/events/pycon-2024/reviews/17/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    scope: String,
    collection: String,
    id: Option<String>,
    params: Params,
}

impl Endpoint {
    /// Address the `collection` of resources below the event `scope`.
    pub fn collection(scope: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            collection: collection.into(),
            id: None,
            params: Params::new(),
        }
    }

    /// Address the list of events itself.
    pub fn events() -> Self {
        Self::collection("", "")
    }

    /// Switch to single-resource mode.
    pub fn with_id(mut self, id: impl fmt::Display) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Attach query parameters.
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Whether this descriptor addresses a single resource.
    pub fn is_single(&self) -> bool {
        self.id.is_some()
    }

    /// Query parameters of the request.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// `/api/events/{scope}/{collection}/{id}/` with empty segments collapsed.
    pub fn path(&self) -> String {
        let raw = format!(
            "{}/{}/{}/{}/",
            API_PREFIX,
            self.scope,
            self.collection,
            self.id.as_deref().unwrap_or_default()
        );
        collapse_slashes(&raw)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn collapse_slashes(path: &str) -> String {
    let mut collapsed = String::with_capacity(path.len());
    let mut previous_slash = false;
    for c in path.chars() {
        if c == '/' {
            if !previous_slash {
                collapsed.push(c);
            }
            previous_slash = true;
        } else {
            collapsed.push(c);
            previous_slash = false;
        }
    }
    collapsed
}
