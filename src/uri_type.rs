//! Classification of agent URIs by encoding.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::constants::BASE64_DATA_PREFIX;
use crate::error::UriAgentTypeError;

/// The encoding of an agent URI.
///
/// Every possible input maps to exactly one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UriAgentType {
    /// No URI, or only whitespace
    Empty,
    /// `data:application/json;base64,<payload>`
    Base64,
    /// A `data:` URI flagged `enc=gzip`
    Gzip,
    /// `http://` or `https://` URL
    Http,
    /// `ipfs://<cid>`
    Ipfs,
    /// Inline JSON object or array
    Json,
    /// Anything else
    Unknown,
}

impl UriAgentType {
    /// All variants, in classification order.
    pub const ALL: [Self; 7] = [
        Self::Empty,
        Self::Gzip,
        Self::Base64,
        Self::Http,
        Self::Ipfs,
        Self::Json,
        Self::Unknown,
    ];

    /// Classifies an agent URI. `None` is treated as empty.
    ///
    /// Checks run in order and the first match wins, so a gzip-flagged data
    /// URI is never mistaken for plain base64.
    ///
    /// # Examples
    ///
    /// ```
    /// use erc8004_registry::UriAgentType;
    ///
    /// assert_eq!(UriAgentType::classify(None), UriAgentType::Empty);
    /// assert_eq!(UriAgentType::classify(Some("   ")), UriAgentType::Empty);
    /// assert_eq!(UriAgentType::classify(Some("ipfs://bafy")), UriAgentType::Ipfs);
    /// assert_eq!(
    ///     UriAgentType::classify(Some("data:application/json;enc=gzip;base64,H4sI")),
    ///     UriAgentType::Gzip
    /// );
    /// ```
    #[must_use]
    pub fn classify(uri: Option<&str>) -> Self {
        let Some(uri) = uri else {
            return Self::Empty;
        };

        let trimmed = uri.trim();
        if trimmed.is_empty() {
            Self::Empty
        } else if trimmed.starts_with("data:") && trimmed.contains("enc=gzip") {
            Self::Gzip
        } else if trimmed.starts_with(BASE64_DATA_PREFIX) {
            Self::Base64
        } else if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
            Self::Http
        } else if trimmed.starts_with("ipfs://") {
            Self::Ipfs
        } else if trimmed.starts_with('{') || trimmed.starts_with('[') {
            Self::Json
        } else {
            Self::Unknown
        }
    }

    /// Classifies an untyped value: null is empty, strings are classified,
    /// and any other JSON value is unknown.
    #[must_use]
    pub fn classify_value(value: &Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::String(s) => Self::classify(Some(s)),
            _ => Self::Unknown,
        }
    }

    /// Returns the lowercase tag name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Base64 => "base64",
            Self::Gzip => "gzip",
            Self::Http => "http",
            Self::Ipfs => "ipfs",
            Self::Json => "json",
            Self::Unknown => "unknown",
        }
    }

    /// Returns true for encodings this crate can turn into a document.
    #[must_use]
    pub const fn is_inline(&self) -> bool {
        matches!(self, Self::Base64 | Self::Gzip | Self::Json)
    }
}

impl fmt::Display for UriAgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UriAgentType {
    type Err = UriAgentTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UriAgentTypeError {
                name: s.to_string(),
            })
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for UriAgentType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for UriAgentType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
