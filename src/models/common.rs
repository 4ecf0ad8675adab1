//! Types shared by several Pretalx records.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A string translated into several languages.
///
/// Only English and German are modelled explicitly; any other language key
/// the event is configured with ends up in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiLingualStr {
    /// English text, assumed to be present on most events
    #[serde(default)]
    pub en: Option<String>,
    /// German text
    #[serde(default)]
    pub de: Option<String>,
    /// Further languages, keyed by language code
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl MultiLingualStr {
    /// English text, falling back to German, then to any other string value.
    pub fn text(&self) -> Option<&str> {
        self.en
            .as_deref()
            .or(self.de.as_deref())
            .or_else(|| self.extra.values().find_map(Value::as_str))
    }
}

impl fmt::Display for MultiLingualStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text().unwrap_or_default())
    }
}

/// Accepts `3`, `3.5`, `"3.5"` or `null`.
pub(crate) fn number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Raw::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid number: {s}"))),
    }
}
