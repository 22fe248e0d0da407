//! Normalized summary of a registration: category flags plus extracted entries.

use serde_json::Value;

use crate::constants::{SPEC_TYPE_VALUE, X402_LOWERCASE_ALIAS};
use crate::service::{ENDPOINT_KEYS, PROTOCOL_KEYS, ServiceEntry, has_key, service_list};
use crate::uri_type::UriAgentType;

/// Boolean summary of a registration.
///
/// The URI type is stored once, so exactly one of the seven URI flags
/// (`is_empty()` through `is_unknown()`) is ever true.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Categories {
    /// Encoding of the agent URI
    pub uri_agent_type: UriAgentType,
    /// A registration document was decoded
    pub is_parseable: bool,
    /// The document follows the registration format without deviations
    pub is_spec_compliant: bool,
    /// The document advertises x402 payment support
    pub is_x402: bool,
    /// At least one service is MCP
    pub is_mcp: bool,
    /// At least one service is A2A
    pub is_a2a: bool,
    /// The `active` field, when it holds a boolean
    pub is_active: Option<bool>,
}

impl Categories {
    /// Categories for a URI that yielded no document.
    #[must_use]
    pub const fn unparsed(uri_agent_type: UriAgentType) -> Self {
        Self {
            uri_agent_type,
            is_parseable: false,
            is_spec_compliant: false,
            is_x402: false,
            is_mcp: false,
            is_a2a: false,
            is_active: None,
        }
    }

    /// Categories derived from a decoded document.
    #[must_use]
    pub fn from_document(document: &Value, uri_agent_type: UriAgentType) -> Self {
        let services: Vec<ServiceEntry> = service_list(document)
            .iter()
            .map(ServiceEntry::from_raw)
            .collect();

        Self {
            uri_agent_type,
            is_parseable: true,
            is_spec_compliant: is_spec_compliant(document),
            is_x402: x402_value(document) == Some(&Value::Bool(true)),
            is_mcp: services.iter().any(|s| s.is_protocol("mcp")),
            is_a2a: services.iter().any(|s| s.is_protocol("a2a")),
            is_active: document.get("active").and_then(Value::as_bool),
        }
    }

    /// URI was missing or blank.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self.uri_agent_type, UriAgentType::Empty)
    }

    /// URI was a base64 data URI.
    #[must_use]
    pub const fn is_base64(&self) -> bool {
        matches!(self.uri_agent_type, UriAgentType::Base64)
    }

    /// URI was a gzip data URI.
    #[must_use]
    pub const fn is_gzip(&self) -> bool {
        matches!(self.uri_agent_type, UriAgentType::Gzip)
    }

    /// URI was an HTTP(S) URL.
    #[must_use]
    pub const fn is_http(&self) -> bool {
        matches!(self.uri_agent_type, UriAgentType::Http)
    }

    /// URI was an IPFS URI.
    #[must_use]
    pub const fn is_ipfs(&self) -> bool {
        matches!(self.uri_agent_type, UriAgentType::Ipfs)
    }

    /// URI was inline JSON.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self.uri_agent_type, UriAgentType::Json)
    }

    /// URI matched no known format.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self.uri_agent_type, UriAgentType::Unknown)
    }

    /// The seven URI flags, in `ALL` order.
    #[must_use]
    pub fn uri_flags(&self) -> [bool; 7] {
        UriAgentType::ALL.map(|t| t == self.uri_agent_type)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Categories {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Categories", 13)?;
        state.serialize_field("isEmpty", &self.is_empty())?;
        state.serialize_field("isBase64", &self.is_base64())?;
        state.serialize_field("isHttp", &self.is_http())?;
        state.serialize_field("isIpfs", &self.is_ipfs())?;
        state.serialize_field("isJson", &self.is_json())?;
        state.serialize_field("isGzip", &self.is_gzip())?;
        state.serialize_field("isUnknown", &self.is_unknown())?;
        state.serialize_field("isParseable", &self.is_parseable)?;
        state.serialize_field("isSpecCompliant", &self.is_spec_compliant)?;
        state.serialize_field("isX402", &self.is_x402)?;
        state.serialize_field("isMcp", &self.is_mcp)?;
        state.serialize_field("isA2A", &self.is_a2a)?;
        state.serialize_field("isActive", &self.is_active)?;
        state.end()
    }
}

/// Normalized fields extracted from a registration.
///
/// Every field is always present; values absent from the document are `None`,
/// `false`, or empty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Entries {
    /// Decimal agent ID from the event log
    pub agent_id: Option<String>,
    /// Checksummed owner address from the event log
    pub owner_address: Option<String>,
    /// Encoding of the agent URI
    pub uri_agent_type: UriAgentType,
    /// Agent name
    pub name: Option<String>,
    /// Agent description
    pub description: Option<String>,
    /// True only when the x402 flag is literally `true`
    pub x402_support: bool,
    /// Services in document order
    pub services: Vec<ServiceEntry>,
    /// Endpoint of the first MCP service
    pub mcp_endpoint: Option<String>,
    /// Endpoint of the first A2A service
    pub a2a_endpoint: Option<String>,
    /// Image URL
    pub image: Option<String>,
    /// The `active` field, when it holds a boolean
    pub active: Option<bool>,
    /// String members of `supportedTrust`, when it is an array
    pub supported_trust: Option<Vec<String>>,
    /// The document serialized back to JSON
    pub raw: Option<String>,
}

impl Entries {
    /// Entries for a URI that yielded no document.
    #[must_use]
    pub fn unparsed(
        uri_agent_type: UriAgentType,
        agent_id: Option<&str>,
        owner_address: Option<&str>,
    ) -> Self {
        Self {
            agent_id: non_empty(agent_id),
            owner_address: non_empty(owner_address),
            uri_agent_type,
            name: None,
            description: None,
            x402_support: false,
            services: Vec::new(),
            mcp_endpoint: None,
            a2a_endpoint: None,
            image: None,
            active: None,
            supported_trust: None,
            raw: None,
        }
    }

    /// Entries extracted from a decoded document.
    #[must_use]
    pub fn from_document(
        document: &Value,
        uri_agent_type: UriAgentType,
        agent_id: Option<&str>,
        owner_address: Option<&str>,
    ) -> Self {
        let services: Vec<ServiceEntry> = service_list(document)
            .iter()
            .map(ServiceEntry::from_raw)
            .collect();

        let first_endpoint = |protocol: &str| {
            services
                .iter()
                .find(|s| s.is_protocol(protocol) && s.endpoint.is_some())
                .and_then(|s| s.endpoint.clone())
        };
        let mcp_endpoint = first_endpoint("mcp");
        let a2a_endpoint = first_endpoint("a2a");

        Self {
            agent_id: non_empty(agent_id),
            owner_address: non_empty(owner_address),
            uri_agent_type,
            name: string_field(document, "name"),
            description: string_field(document, "description"),
            x402_support: x402_value(document) == Some(&Value::Bool(true)),
            services,
            mcp_endpoint,
            a2a_endpoint,
            image: string_field(document, "image"),
            active: document.get("active").and_then(Value::as_bool),
            supported_trust: document
                .get("supportedTrust")
                .and_then(Value::as_array)
                .map(|values| {
                    values
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                }),
            raw: Some(document.to_string()),
        }
    }
}

/// Categories and entries for one registration.
///
/// # Examples
///
/// ```
/// use erc8004_registry::{Metadata, UriAgentType};
/// use serde_json::json;
///
/// let document = json!({
///     "name": "Agent",
///     "services": [{"type": "a2a", "url": "https://a2a.example.com"}],
/// });
/// let metadata = Metadata::from_document(&document, UriAgentType::Json, Some("7"), None);
/// assert!(metadata.categories.is_a2a);
/// assert!(!metadata.categories.is_spec_compliant);
/// assert_eq!(metadata.entries.a2a_endpoint.as_deref(), Some("https://a2a.example.com"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Metadata {
    /// Flags
    pub categories: Categories,
    /// Extracted fields
    pub entries: Entries,
}

impl Metadata {
    /// Metadata for a URI that yielded no document.
    ///
    /// Only the URI type flag and the event-log identifiers are set.
    #[must_use]
    pub fn empty(
        uri_agent_type: UriAgentType,
        agent_id: Option<&str>,
        owner_address: Option<&str>,
    ) -> Self {
        Self {
            categories: Categories::unparsed(uri_agent_type),
            entries: Entries::unparsed(uri_agent_type, agent_id, owner_address),
        }
    }

    /// Metadata extracted from a decoded document.
    ///
    /// A `null` document carries nothing to extract and is treated like a
    /// missing one.
    #[must_use]
    pub fn from_document(
        document: &Value,
        uri_agent_type: UriAgentType,
        agent_id: Option<&str>,
        owner_address: Option<&str>,
    ) -> Self {
        if document.is_null() {
            return Self::empty(uri_agent_type, agent_id, owner_address);
        }

        Self {
            categories: Categories::from_document(document, uri_agent_type),
            entries: Entries::from_document(document, uri_agent_type, agent_id, owner_address),
        }
    }
}

/// Coarse conformance check, independent of the full validator.
fn is_spec_compliant(document: &Value) -> bool {
    if document.get("type").and_then(Value::as_str) != Some(SPEC_TYPE_VALUE) {
        return false;
    }

    if string_field(document, "name").is_none() {
        return false;
    }

    if has_key(document, X402_LOWERCASE_ALIAS) && !has_key(document, "x402Support") {
        return false;
    }

    !service_list(document).iter().any(|service| {
        let uses_name = has_key(service, PROTOCOL_KEYS.1) && !has_key(service, PROTOCOL_KEYS.0);
        let uses_endpoint = has_key(service, ENDPOINT_KEYS.1) && !has_key(service, ENDPOINT_KEYS.0);
        uses_name || uses_endpoint
    })
}

/// The x402 flag, preferring the correctly-cased key.
fn x402_value(document: &Value) -> Option<&Value> {
    document
        .get("x402Support")
        .or_else(|| document.get(X402_LOWERCASE_ALIAS))
}

fn string_field(document: &Value, key: &str) -> Option<String> {
    non_empty(document.get(key).and_then(Value::as_str))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}
