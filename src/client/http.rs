//! Request layer shared by the Pretalx and HelpDesk clients.

use std::sync::Arc;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, Instrument, Span};
use url::Url;

use super::config::{ClientConfig, Throttle};
use super::endpoint::{Endpoint, Params};
use super::paginated::{decode, PageEnvelope, Paged, PaginatedStream};
use super::throttle::RateLimiter;
use crate::{Error, Result};

/// How every outgoing request is authenticated.
pub(crate) enum Credentials {
    /// `Authorization: Token <token>` as expected by Pretalx
    Token(SecretString),
    /// HTTP basic auth as expected by HelpDesk
    Basic {
        account: String,
        token: SecretString,
    },
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: Url,
    pub(crate) config: ClientConfig,
    credentials: Credentials,
    limiter: RateLimiter,
    pub(crate) span: Span,
}

impl ClientInner {
    pub(crate) fn new(config: ClientConfig, credentials: Credentials, span: Span) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;
        let base_url = config.parsed_base_url()?;
        let limiter = RateLimiter::new(config.throttle)?;

        Ok(Self {
            http,
            base_url,
            config,
            credentials,
            limiter,
            span,
        })
    }

    pub(crate) async fn set_throttling(&self, throttle: Throttle) -> Result<()> {
        self.limiter
            .reconfigure(throttle)
            .instrument(self.span.clone())
            .await
    }

    pub(crate) async fn throttling(&self) -> Throttle {
        self.limiter.current().await
    }

    /// Resolve `path` against the base URL and merge in `params`.
    pub(crate) fn url(&self, path: &str, params: &Params) -> Result<Url> {
        let mut url = self.base_url.join(path)?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        match &self.credentials {
            Credentials::Token(token) => {
                let token = token.expose_secret();
                let value = if token.starts_with("Token ") {
                    token.to_string()
                } else {
                    format!("Token {token}")
                };
                let value = HeaderValue::from_str(&value)
                    .map_err(|_| Error::Config("Invalid token format".to_string()))?;
                Ok(request.header(AUTHORIZATION, value))
            }
            Credentials::Basic { account, token } => {
                Ok(request.basic_auth(account, Some(token.expose_secret())))
            }
        }
    }

    /// Issue a throttled GET. The status is not checked.
    pub(crate) async fn get(&self, path: &str, params: &Params) -> Result<Response> {
        let url = self.url(path, params)?;
        let request = self.authorize(self.http.get(url.clone()))?;
        self.limiter
            .throttle(move || async move {
                debug!(%url, "GET");
                request.send().await.map_err(Error::from)
            })
            .instrument(self.span.clone())
            .await
    }

    /// Issue a throttled POST with a JSON body. The status is not checked.
    pub(crate) async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        params: &Params,
    ) -> Result<Response> {
        let url = self.url(path, params)?;
        let request = self.authorize(self.http.post(url.clone()))?.json(body);
        self.limiter
            .throttle(move || async move {
                debug!(%url, "POST");
                request.send().await.map_err(Error::from)
            })
            .instrument(self.span.clone())
            .await
    }

    /// Turn a response into JSON, or into [`Error::HttpStatus`] on failure.
    pub(crate) async fn json_body(response: Response) -> Result<Value> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_success() {
            serde_json::from_slice(&bytes).map_err(Error::schema::<Value>)
        } else {
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                    Value::String(String::from_utf8_lossy(&bytes).into_owned())
                })
            };
            Err(Error::HttpStatus {
                status: status.as_u16(),
                body,
            })
        }
    }

    pub(crate) async fn get_json(&self, path: &str, params: &Params) -> Result<Value> {
        let response = self.get(path, params).await?;
        Self::json_body(response).await
    }

    /// Fetch one resource at a raw path and deserialize it.
    pub(crate) async fn get_one_at<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &Params,
    ) -> Result<T> {
        let value = self.get_json(path, params).await?;
        let _entered = self.span.enter();
        decode(value)
    }

    /// Fetch the single resource addressed by `endpoint`.
    pub(crate) async fn get_one<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T> {
        if !endpoint.is_single() {
            return Err(Error::Config(format!(
                "{endpoint} addresses a collection, not a single resource"
            )));
        }
        self.get_one_at(&endpoint.path(), endpoint.params()).await
    }

    /// Fetch the collection addressed by `endpoint` as a lazily paged result.
    pub(crate) async fn get_many<T: DeserializeOwned>(
        self: &Arc<Self>,
        endpoint: &Endpoint,
    ) -> Result<Paged<T>> {
        if endpoint.is_single() {
            return Err(Error::Config(format!(
                "{endpoint} addresses a single resource, not a collection"
            )));
        }
        let value = self.get_json(&endpoint.path(), endpoint.params()).await?;
        let first_page = {
            let _entered = self.span.enter();
            PageEnvelope::from_json(value)?
        };
        let count = first_page.total();
        if first_page.next.is_some() {
            debug!(parent: &self.span, "Resolving pagination...");
        }

        let inner = Arc::clone(self);
        let items = PaginatedStream::new(first_page, self.span.clone(), move |next: String| {
            let inner = inner.clone();
            Box::pin(async move { inner.fetch_page(&next).await })
        });
        Ok(Paged::new(count, items))
    }

    /// Follow a `next` link, re-issuing its path and query through the
    /// throttled request layer.
    async fn fetch_page(&self, next: &str) -> Result<PageEnvelope> {
        let link = Url::parse(next)?;
        let params: Params = link.query_pairs().into_owned().collect();
        let value = self.get_json(link.path(), &params).await?;
        let _entered = self.span.enter();
        PageEnvelope::from_json(value)
    }
}
