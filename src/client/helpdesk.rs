//! Client for the HelpDesk ticketing API.
//!
//! Documentation: <https://api.helpdesk.com/docs>

use std::fmt;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{info_span, warn};

use super::config::{ClientConfig, Throttle};
use super::endpoint::Params;
use super::http::{ClientInner, Credentials};
use super::paginated::decode;
use crate::models::{Agent, NewTicket, Team, Ticket};
use crate::{Error, Result, Settings};

/// Whether the credential token was issued for reading only or also for
/// writing. Only used to make permission errors actionable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessMode {
    /// Token can only read
    #[default]
    ReadOnly,
    /// Token can read and write
    ReadWrite,
}

/// The main client for the HelpDesk API.
///
/// # Example
///
/// ```no_run
/// use pytanis_rs::{AccessMode, HelpDeskClient};
/// use pytanis_rs::models::{NewTicket, Requester};
///
/// # async fn example() -> pytanis_rs::Result<()> {
/// let client = HelpDeskClient::new("account-id", "token", AccessMode::ReadWrite)?;
///
/// let agents = client.list_agents().await?;
/// let ticket = NewTicket::new(
///     Requester { email: "ada@example.org".into(), name: "Ada".into() },
///     "Your talk was accepted!",
/// )
/// .subject("PyCon 2024");
/// client.create_ticket(&ticket).await?;
/// # Ok(())
/// # }
/// ```
pub struct HelpDeskClient {
    inner: Arc<ClientInner>,
    mode: AccessMode,
}

impl HelpDeskClient {
    /// Create a client with default configuration.
    pub fn new(
        account: impl Into<String>,
        token: impl Into<String>,
        mode: AccessMode,
    ) -> Result<Self> {
        Self::with_config(account, token, mode, ClientConfig::helpdesk())
    }

    /// Create a client with custom configuration.
    pub fn with_config(
        account: impl Into<String>,
        token: impl Into<String>,
        mode: AccessMode,
        config: ClientConfig,
    ) -> Result<Self> {
        Self::with_secret(account.into(), SecretString::from(token.into()), mode, config)
    }

    fn with_secret(
        account: String,
        token: SecretString,
        mode: AccessMode,
        config: ClientConfig,
    ) -> Result<Self> {
        if account.trim().is_empty() || token.expose_secret().trim().is_empty() {
            return Err(Error::Config(
                "HelpDesk account and token must not be empty".to_string(),
            ));
        }
        let span = info_span!("helpdesk", base_url = %config.base_url);
        let credentials = Credentials::Basic { account, token };
        let inner = ClientInner::new(config, credentials, span)?;
        Ok(Self {
            inner: Arc::new(inner),
            mode,
        })
    }

    /// Create a client from the `[HelpDesk]` table of a settings file.
    pub fn from_settings(settings: &Settings, mode: AccessMode) -> Result<Self> {
        Self::from_settings_with_config(settings, mode, ClientConfig::helpdesk())
    }

    /// Create a client from settings with custom configuration.
    pub fn from_settings_with_config(
        settings: &Settings,
        mode: AccessMode,
        config: ClientConfig,
    ) -> Result<Self> {
        let helpdesk = &settings.helpdesk;
        let account = helpdesk.account.clone().ok_or_else(|| {
            Error::Config("You have to set HelpDesk.account in your config.toml!".to_string())
        })?;
        let token = helpdesk.token.clone().ok_or_else(|| {
            Error::Config("You have to set HelpDesk.token in your config.toml!".to_string())
        })?;
        Self::with_secret(account, token, mode, config)
    }

    /// The access mode the client was created with.
    pub fn access_mode(&self) -> AccessMode {
        self.mode
    }

    /// Allow at most `calls` requests per `seconds`.
    pub async fn set_throttling(&self, calls: u32, seconds: u64) -> Result<()> {
        self.inner.set_throttling(Throttle::new(calls, seconds)?).await
    }

    /// The quota currently enforced.
    pub async fn throttling(&self) -> Throttle {
        self.inner.throttling().await
    }

    /// GET a path below the API root and return the decoded JSON.
    pub async fn get(&self, path: &str, params: &Params) -> Result<Value> {
        let result = self.inner.get_json(relative(path), params).await;
        result.map_err(|err| translate_failure(self.mode, err))
    }

    /// POST a JSON body to a path below the API root and return the decoded
    /// JSON response.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        params: &Params,
    ) -> Result<Value> {
        let result = async {
            let response = self.inner.post(relative(path), body, params).await?;
            ClientInner::json_body(response).await
        }
        .await;
        result.map_err(|err| translate_failure(self.mode, err))
    }

    /// All agents of the account.
    pub async fn list_agents(&self) -> Result<Vec<Agent>> {
        self.list("agents").await
    }

    /// All teams of the account.
    pub async fn list_teams(&self) -> Result<Vec<Team>> {
        self.list("teams").await
    }

    /// Create a ticket.
    pub async fn create_ticket(&self, ticket: &NewTicket) -> Result<Ticket> {
        let value = self.post("tickets", ticket, &Params::new()).await?;
        let _entered = self.inner.span.enter();
        decode(value)
    }

    async fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let value = self.get(path, &Params::new()).await?;
        let _entered = self.inner.span.enter();
        match value {
            Value::Array(items) => items.into_iter().map(decode).collect(),
            other => Err(Error::SchemaShape(format!(
                "expected a JSON array from '{path}', got: {other}"
            ))),
        }
    }
}

/// Paths are resolved below the versioned API root.
fn relative(path: &str) -> &str {
    path.trim_start_matches('/')
}

/// Turn an upstream `PERMISSION_DENIED` failure into an actionable
/// [`Error::PermissionDenied`]. Every other error passes through unchanged.
pub(crate) fn translate_failure(mode: AccessMode, err: Error) -> Error {
    let Error::HttpStatus { status, body } = err else {
        return err;
    };
    let denied = body
        .get("error")
        .and_then(|error| error.get("status"))
        .and_then(Value::as_str)
        == Some("PERMISSION_DENIED");
    if !denied {
        return Error::HttpStatus { status, body };
    }

    let message = match mode {
        AccessMode::ReadOnly => {
            "the HelpDesk token is read-only; construct the client with \
             AccessMode::ReadWrite and a read/write token for this operation"
        }
        AccessMode::ReadWrite => {
            "the HelpDesk token was rejected; refresh or recreate the \
             credential token in the HelpDesk account settings"
        }
    };
    warn!(status, ?mode, "permission denied");
    Error::PermissionDenied {
        message: message.to_string(),
        body,
    }
}

impl Clone for HelpDeskClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            mode: self.mode,
        }
    }
}

impl fmt::Debug for HelpDeskClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HelpDeskClient")
            .field("config", &self.inner.config)
            .field("mode", &self.mode)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn denied_body() -> Value {
        json!({
            "error": {
                "status": "PERMISSION_DENIED",
                "message": "insufficient scope"
            }
        })
    }

    #[test]
    fn test_permission_denied_read_only() {
        let err = Error::HttpStatus {
            status: 403,
            body: denied_body(),
        };
        match translate_failure(AccessMode::ReadOnly, err) {
            Error::PermissionDenied { message, body } => {
                assert!(message.contains("AccessMode::ReadWrite"));
                assert_eq!(body, denied_body());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_permission_denied_read_write() {
        let err = Error::HttpStatus {
            status: 403,
            body: denied_body(),
        };
        match translate_failure(AccessMode::ReadWrite, err) {
            Error::PermissionDenied { message, .. } => {
                assert!(message.contains("recreate the credential token"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_other_failures_pass_through() {
        let body = json!({"error": {"status": "NOT_FOUND"}});
        let err = Error::HttpStatus {
            status: 404,
            body: body.clone(),
        };
        match translate_failure(AccessMode::ReadOnly, err) {
            Error::HttpStatus { status, body: got } => {
                assert_eq!(status, 404);
                assert_eq!(got, body);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = translate_failure(AccessMode::ReadWrite, Error::Config("x".to_string()));
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_missing_settings() {
        let settings = Settings::default();
        let err = HelpDeskClient::from_settings(&settings, AccessMode::ReadOnly).unwrap_err();
        assert!(err.to_string().contains("HelpDesk.account"));
    }

    #[test]
    fn test_relative_paths() {
        assert_eq!(relative("/agents"), "agents");
        assert_eq!(relative("tickets"), "tickets");
    }

    #[tokio::test]
    async fn test_default_throttle() {
        let client = HelpDeskClient::new("acc", "tok", AccessMode::ReadWrite).unwrap();
        assert_eq!(client.throttling().await, Throttle { calls: 2, seconds: 1 });
        assert_eq!(client.access_mode(), AccessMode::ReadWrite);
    }
}
