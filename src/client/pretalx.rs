//! Client for the Pretalx conference-management API.
//!
//! Documentation: <https://docs.pretalx.org/api/>

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::info_span;

use super::config::{ClientConfig, Throttle};
use super::endpoint::Params;
use super::http::{ClientInner, Credentials};
use crate::api::{EventsService, ResourceService};
use crate::models::{Answer, Me, Question, Review, Room, Speaker, Submission, Tag, Talk};
use crate::{Error, Result, Settings};

/// The main client for the Pretalx API.
///
/// Every request passes through a sliding-window throttle; by default only
/// one call every two seconds is made. Use
/// [`set_throttling`](Self::set_throttling) to change that.
///
/// # Example
///
/// ```no_run
/// use pytanis_rs::PretalxClient;
///
/// # async fn example() -> pytanis_rs::Result<()> {
/// let client = PretalxClient::new("your-api-token")?;
///
/// let me = client.me().await?;
/// println!("Hello, {}!", me.name);
///
/// let submissions = client.submissions().list("pycon-2024").await?;
/// println!("{} submissions", submissions.count());
/// let all = submissions.collect_all().await?;
/// # Ok(())
/// # }
/// ```
pub struct PretalxClient {
    pub(crate) inner: Arc<ClientInner>,
}

impl PretalxClient {
    /// Create a client for pretalx.com with default configuration.
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        Self::with_config(api_token, ClientConfig::pretalx())
    }

    /// Create a client with custom configuration.
    pub fn with_config(api_token: impl Into<String>, config: ClientConfig) -> Result<Self> {
        Self::with_secret(SecretString::from(api_token.into()), config)
    }

    fn with_secret(api_token: SecretString, config: ClientConfig) -> Result<Self> {
        if api_token.expose_secret().trim().is_empty() {
            return Err(Error::Config("Pretalx API token is empty".to_string()));
        }
        let span = info_span!("pretalx", base_url = %config.base_url);
        let inner = ClientInner::new(config, Credentials::Token(api_token), span)?;
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Create a client from the `[Pretalx]` table of a settings file.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::from_settings_with_config(settings, ClientConfig::pretalx())
    }

    /// Create a client from settings with custom configuration.
    pub fn from_settings_with_config(settings: &Settings, config: ClientConfig) -> Result<Self> {
        let token = settings.pretalx.api_token.clone().ok_or_else(|| {
            Error::Config("You have to set Pretalx.api_token in your config.toml!".to_string())
        })?;
        Self::with_secret(token, config)
    }

    /// Allow at most `calls` requests per `seconds`.
    pub async fn set_throttling(&self, calls: u32, seconds: u64) -> Result<()> {
        self.inner.set_throttling(Throttle::new(calls, seconds)?).await
    }

    /// The quota currently enforced.
    pub async fn throttling(&self) -> Throttle {
        self.inner.throttling().await
    }

    /// The user the API token belongs to.
    pub async fn me(&self) -> Result<Me> {
        self.inner.get_one_at("/api/me", &Params::new()).await
    }

    /// Get the events service.
    pub fn events(&self) -> EventsService {
        EventsService::new(self.inner.clone())
    }

    /// Get the submissions service.
    pub fn submissions(&self) -> ResourceService<Submission> {
        ResourceService::new(self.inner.clone())
    }

    /// Get the talks service.
    pub fn talks(&self) -> ResourceService<Talk> {
        ResourceService::new(self.inner.clone())
    }

    /// Get the speakers service.
    pub fn speakers(&self) -> ResourceService<Speaker> {
        ResourceService::new(self.inner.clone())
    }

    /// Get the reviews service.
    pub fn reviews(&self) -> ResourceService<Review> {
        ResourceService::new(self.inner.clone())
    }

    /// Get the rooms service.
    pub fn rooms(&self) -> ResourceService<Room> {
        ResourceService::new(self.inner.clone())
    }

    /// Get the questions service.
    pub fn questions(&self) -> ResourceService<Question> {
        ResourceService::new(self.inner.clone())
    }

    /// Get the answers service.
    pub fn answers(&self) -> ResourceService<Answer> {
        ResourceService::new(self.inner.clone())
    }

    /// Get the tags service.
    pub fn tags(&self) -> ResourceService<Tag> {
        ResourceService::new(self.inner.clone())
    }
}

impl Clone for PretalxClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for PretalxClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PretalxClient")
            .field("config", &self.inner.config)
            .finish()
    }
}
