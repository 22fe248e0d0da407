//! Service entries and the field aliases registration documents use for them.
//!
//! The registration format names a service's protocol `type` and its endpoint
//! `url`. Documents in the wild often use `name` and `endpoint` instead, so
//! every reader of a service object resolves both spellings, spec name first.

use serde_json::Value;

/// Spec field and alias holding a service's protocol identifier.
pub(crate) const PROTOCOL_KEYS: (&str, &str) = ("type", "name");

/// Spec field and alias holding a service's endpoint.
pub(crate) const ENDPOINT_KEYS: (&str, &str) = ("url", "endpoint");

/// A normalized `{protocol, endpoint}` pair taken from one service object.
///
/// # Examples
///
/// ```
/// use erc8004_registry::ServiceEntry;
/// use serde_json::json;
///
/// let entry = ServiceEntry::from_raw(&json!({"name": "MCP", "endpoint": "https://mcp.example.com"}));
/// assert_eq!(entry.protocol.as_deref(), Some("MCP"));
/// assert_eq!(entry.endpoint.as_deref(), Some("https://mcp.example.com"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ServiceEntry {
    /// Protocol identifier as written in the document (case preserved)
    pub protocol: Option<String>,
    /// Endpoint as written in the document
    pub endpoint: Option<String>,
}

impl ServiceEntry {
    /// Builds an entry from a raw service value.
    ///
    /// Non-object values yield an entry with both fields `None`.
    #[must_use]
    pub fn from_raw(service: &Value) -> Self {
        Self {
            protocol: resolve(service, PROTOCOL_KEYS)
                .and_then(Value::as_str)
                .map(str::to_string),
            endpoint: resolve(service, ENDPOINT_KEYS)
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }

    /// Returns true when the protocol matches `name`, ignoring ASCII case.
    #[must_use]
    pub fn is_protocol(&self, name: &str) -> bool {
        self.protocol
            .as_deref()
            .is_some_and(|p| p.eq_ignore_ascii_case(name))
    }
}

/// Returns the first truthy value among the spec key and its alias.
///
/// An empty string, `false`, `0`, or `null` under the spec key falls through
/// to the alias.
pub(crate) fn resolve<'a>(service: &'a Value, (primary, alias): (&str, &str)) -> Option<&'a Value> {
    [primary, alias]
        .into_iter()
        .filter_map(|key| service.get(key))
        .find(|value| is_truthy(value))
}

/// Returns true when `key` exists on the object, even if its value is null.
pub(crate) fn has_key(value: &Value, key: &str) -> bool {
    value.get(key).is_some()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() > 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// The entries under `services`; empty when the field is absent or not an array.
pub(crate) fn service_list(document: &Value) -> &[Value] {
    document
        .get("services")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}
