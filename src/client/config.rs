//! Client configuration options.

use std::time::Duration;

use crate::{Error, Result};

/// Base URL of the hosted Pretalx instance.
pub const PRETALX_BASE_URL: &str = "https://pretalx.com/";

/// Base URL of the HelpDesk v1 API.
pub const HELPDESK_BASE_URL: &str = "https://api.helpdesk.com/v1/";

/// Fixed User-Agent sent to HelpDesk.
pub const HELPDESK_USER_AGENT: &str = "Pytanis";

/// Configuration for a [`PretalxClient`](crate::PretalxClient) or
/// [`HelpDeskClient`](crate::HelpDeskClient).
///
/// # Example
///
/// ```
/// use pytanis_rs::{ClientConfig, Throttle};
/// use std::time::Duration;
///
/// let config = ClientConfig::pretalx()
///     .with_timeout(Duration::from_secs(120))
///     .with_throttle(Throttle::new(2, 1).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every endpoint path is resolved against
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
    /// Sliding-window call quota
    pub throttle: Throttle,
}

impl ClientConfig {
    /// Defaults for the Pretalx API: one call every two seconds and a
    /// long timeout, since the API is slow for large events.
    pub fn pretalx() -> Self {
        Self {
            base_url: PRETALX_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            user_agent: default_user_agent(),
            throttle: Throttle {
                calls: 1,
                seconds: 2,
            },
        }
    }

    /// Defaults for the HelpDesk API: two calls per second.
    pub fn helpdesk() -> Self {
        Self {
            base_url: HELPDESK_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            // HelpDesk filters generic user agents as spam.
            user_agent: HELPDESK_USER_AGENT.to_string(),
            throttle: Throttle {
                calls: 2,
                seconds: 1,
            },
        }
    }

    /// Point the client at a different base URL (self-hosted instance, mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the initial call quota.
    pub fn with_throttle(mut self, throttle: Throttle) -> Self {
        self.throttle = throttle;
        self
    }

    /// Parse the base URL, making sure relative paths resolve below it.
    pub(crate) fn parsed_base_url(&self) -> Result<url::Url> {
        let mut base = self.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(url::Url::parse(&base)?)
    }
}

fn default_user_agent() -> String {
    format!("pytanis-rs/{}", env!("CARGO_PKG_VERSION"))
}

/// Longest throttle window accepted, one year.
pub const MAX_THROTTLE_SECONDS: u64 = 365 * 24 * 60 * 60;

/// At most `calls` requests within any trailing `seconds`-long window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    /// Number of calls allowed per window
    pub calls: u32,
    /// Window length in seconds
    pub seconds: u64,
}

impl Throttle {
    /// Create a quota, rejecting zero values and windows longer than
    /// [`MAX_THROTTLE_SECONDS`].
    pub fn new(calls: u32, seconds: u64) -> Result<Self> {
        let throttle = Self { calls, seconds };
        throttle.validate()?;
        Ok(throttle)
    }

    /// Window length as a [`Duration`].
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.seconds)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.calls == 0 {
            return Err(Error::Config(
                "number of calls must be a positive integer".to_string(),
            ));
        }
        if self.seconds == 0 {
            return Err(Error::Config(
                "number of seconds must be a positive integer".to_string(),
            ));
        }
        if self.seconds > MAX_THROTTLE_SECONDS {
            return Err(Error::Config(format!(
                "number of seconds must not exceed {MAX_THROTTLE_SECONDS}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let pretalx = ClientConfig::pretalx();
        assert_eq!(pretalx.throttle, Throttle { calls: 1, seconds: 2 });
        assert_eq!(pretalx.timeout, Duration::from_secs(60));

        let helpdesk = ClientConfig::helpdesk();
        assert_eq!(helpdesk.throttle, Throttle { calls: 2, seconds: 1 });
        assert_eq!(helpdesk.user_agent, HELPDESK_USER_AGENT);
        assert!(pretalx.user_agent.starts_with("pytanis-rs/"));
    }

    #[test]
    fn test_throttle_rejects_zero() {
        assert!(matches!(Throttle::new(0, 1), Err(Error::Config(_))));
        assert!(matches!(Throttle::new(1, 0), Err(Error::Config(_))));
        assert_eq!(Throttle::new(3, 5).unwrap().window(), Duration::from_secs(5));
    }

    #[test]
    fn test_throttle_rejects_oversized_window() {
        assert!(matches!(Throttle::new(1, u64::MAX), Err(Error::Config(_))));
        assert!(matches!(
            Throttle::new(1, MAX_THROTTLE_SECONDS + 1),
            Err(Error::Config(_))
        ));
        assert!(Throttle::new(1, MAX_THROTTLE_SECONDS).is_ok());
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = ClientConfig::helpdesk().with_base_url("http://127.0.0.1:9000/v1");
        let url = config.parsed_base_url().unwrap();
        assert_eq!(url.join("agents").unwrap().path(), "/v1/agents");
    }
}
