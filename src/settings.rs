//! Credentials loaded from the pytanis TOML settings file.
//!
//! The file is looked up at the path in the `PYTANIS_CONFIG` environment
//! variable, falling back to `~/.pytanis/config.toml`:
//!
//! ```toml
//! [Pretalx]
//! api_token = "932ndsf9uk32nf9sdkn3454532nj32jn"
//!
//! [HelpDesk]
//! account = "934jcjkdf-39df-9df-93kf-934jfhuuij39fd"
//! entity_id = "email@host.com"
//! token = "dal:Sx4id934C3Y-X934jldjdfjk"
//! ```

use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::Deserialize;
use tracing::debug;

use crate::{Error, Result};

/// Environment variable overriding the settings file location.
pub const CONFIG_ENV: &str = "PYTANIS_CONFIG";

/// Settings file location relative to the home directory.
pub const CONFIG_PATH: &str = ".pytanis/config.toml";

/// Contents of the settings file. Every table and key is optional; clients
/// report which one is missing when they are created.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// `[Pretalx]` table
    #[serde(rename = "Pretalx", default)]
    pub pretalx: PretalxSettings,
    /// `[HelpDesk]` table
    #[serde(rename = "HelpDesk", default)]
    pub helpdesk: HelpDeskSettings,
}

/// The `[Pretalx]` table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PretalxSettings {
    /// API token shown at `https://pretalx.com/orga/me`
    #[serde(default)]
    pub api_token: Option<SecretString>,
}

/// The `[HelpDesk]` table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HelpDeskSettings {
    /// Account id used as basic-auth user name
    #[serde(default)]
    pub account: Option<String>,
    /// Email of the agent the token belongs to
    #[serde(default)]
    pub entity_id: Option<String>,
    /// Personal access token
    #[serde(default)]
    pub token: Option<SecretString>,
}

impl Settings {
    /// Load the settings file from its default location.
    pub fn load() -> Result<Self> {
        Self::from_file(settings_path()?)
    }

    /// Load settings from an explicit path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading settings");
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Where [`Settings::load`] looks for the settings file.
pub fn settings_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }
    let home = dirs::home_dir()
        .ok_or_else(|| Error::Config("cannot determine the home directory".to_string()))?;
    Ok(home.join(CONFIG_PATH))
}
