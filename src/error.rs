//! Error types for the Pretalx and HelpDesk clients.
//!
//! Every fallible operation in this crate returns [`Result`]. No error is
//! retried automatically; failures surface to the immediate caller.

use serde_json::Value;
use thiserror::Error;

/// A specialized `Result` type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all client operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure (DNS, timeout, connection reset)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The upstream API answered with a non-2xx status
    #[error("HTTP status error: status={status}, body={body}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Parsed error body; raw text if it was not JSON, `Value::Null` if empty
        body: Value,
    },

    /// The upstream API denied access; the message says how to fix it
    #[error("Permission denied: {message}")]
    PermissionDenied {
        /// Remediation advice for the caller
        message: String,
        /// Parsed error body as returned by the API
        body: Value,
    },

    /// A JSON body did not satisfy the target record type
    #[error("Schema error while parsing {type_name}: {source}")]
    Schema {
        /// Name of the type that failed to deserialize
        type_name: &'static str,
        /// Underlying deserialization failure
        #[source]
        source: serde_json::Error,
    },

    /// A response did not have the expected overall shape
    #[error("Unexpected response shape: {0}")]
    SchemaShape(String),

    /// Invalid throttle parameters or missing configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Reading the settings file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid TOML for [`Settings`](crate::Settings)
    #[error("Settings file error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Returns the HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if this error indicates a client-side issue
    /// (bad request, missing permissions, invalid configuration).
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::HttpStatus { status, .. } => (400..500).contains(status),
            Error::PermissionDenied { .. } | Error::Config(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::HttpStatus { status, .. } if *status >= 500)
    }

    pub(crate) fn schema<T>(source: serde_json::Error) -> Self {
        Error::Schema {
            type_name: std::any::type_name::<T>(),
            source,
        }
    }
}
