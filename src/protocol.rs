//! Pluggable endpoint checks for MCP and A2A services.
//!
//! The pipeline never touches the network. Callers that want endpoints probed
//! supply a [`ProtocolValidator`] per protocol through [`ProtocolValidators`];
//! each failing report is folded into the pipeline's messages.

use std::fmt;

/// Result of checking one service endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EndpointReport {
    /// True when the endpoint passed
    pub status: bool,
    /// Problems found; ignored when `status` is true
    pub messages: Vec<String>,
}

impl EndpointReport {
    /// A passing report.
    #[must_use]
    pub const fn passed() -> Self {
        Self {
            status: true,
            messages: Vec::new(),
        }
    }

    /// A failing report carrying `messages`.
    #[must_use]
    pub fn failed<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            status: false,
            messages: messages.into_iter().map(Into::into).collect(),
        }
    }
}

/// Checks a service endpoint for one protocol.
///
/// Implementations must be synchronous. Closures taking the endpoint and
/// returning an [`EndpointReport`] implement this trait directly.
///
/// # Examples
///
/// ```
/// use erc8004_registry::{EndpointReport, ProtocolValidator};
///
/// let require_tls = |endpoint: &str| {
///     if endpoint.starts_with("https://") {
///         EndpointReport::passed()
///     } else {
///         EndpointReport::failed(["Endpoint is not TLS"])
///     }
/// };
/// assert!(require_tls.validate("https://mcp.example.com").status);
/// assert!(!require_tls.validate("http://mcp.example.com").status);
/// ```
pub trait ProtocolValidator: Send + Sync {
    /// Checks `endpoint`.
    fn validate(&self, endpoint: &str) -> EndpointReport;
}

impl<F> ProtocolValidator for F
where
    F: Fn(&str) -> EndpointReport + Send + Sync,
{
    fn validate(&self, endpoint: &str) -> EndpointReport {
        self(endpoint)
    }
}

/// A service protocol that accepts an injected validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceProtocol {
    /// Model Context Protocol
    Mcp,
    /// Agent-to-Agent protocol
    A2a,
}

impl ServiceProtocol {
    /// Both protocols, in the order validators run for a service.
    pub const ALL: [Self; 2] = [Self::Mcp, Self::A2a];

    /// Lower-case protocol identifier as used in `services[].type`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mcp => "mcp",
            Self::A2a => "a2a",
        }
    }

    /// Upper-case label used when relabelling validator messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Mcp => "MCP",
            Self::A2a => "A2A",
        }
    }
}

impl fmt::Display for ServiceProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Optional validators keyed by protocol.
///
/// Protocols without a validator are never checked.
///
/// # Examples
///
/// ```
/// use erc8004_registry::{EndpointReport, ProtocolValidators, ServiceProtocol};
///
/// let validators = ProtocolValidators::new()
///     .with_mcp(|_: &str| EndpointReport::failed(["Unreachable"]));
///
/// assert!(validators.get(ServiceProtocol::Mcp).is_some());
/// assert!(validators.get(ServiceProtocol::A2a).is_none());
/// ```
#[derive(Default)]
pub struct ProtocolValidators {
    mcp: Option<Box<dyn ProtocolValidator>>,
    a2a: Option<Box<dyn ProtocolValidator>>,
}

impl ProtocolValidators {
    /// Creates an empty set; no endpoint is checked.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the MCP validator.
    #[must_use]
    pub fn with_mcp(mut self, validator: impl ProtocolValidator + 'static) -> Self {
        self.mcp = Some(Box::new(validator));
        self
    }

    /// Sets the A2A validator.
    #[must_use]
    pub fn with_a2a(mut self, validator: impl ProtocolValidator + 'static) -> Self {
        self.a2a = Some(Box::new(validator));
        self
    }

    /// Returns the validator registered for `protocol`.
    #[must_use]
    pub fn get(&self, protocol: ServiceProtocol) -> Option<&dyn ProtocolValidator> {
        match protocol {
            ServiceProtocol::Mcp => self.mcp.as_deref(),
            ServiceProtocol::A2a => self.a2a.as_deref(),
        }
    }

    /// Returns true when no validator is registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.mcp.is_none() && self.a2a.is_none()
    }
}

impl fmt::Debug for ProtocolValidators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtocolValidators")
            .field("mcp", &self.mcp.is_some())
            .field("a2a", &self.a2a.is_some())
            .finish()
    }
}
