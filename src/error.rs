//! Error types for registration event decoding.
//!
//! [`ParameterError`] is the only type returned through `Err`. The remaining
//! enums describe domain findings; their `Display` output is the message text
//! placed in result `messages`.

use std::fmt;

/// Malformed call-time arguments, raised before any pipeline stage runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterError {
    /// Every violation found, in argument order
    pub violations: Vec<String>,
}

impl ParameterError {
    pub(crate) fn check(violations: Vec<String>) -> Result<(), Self> {
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Self { violations })
        }
    }
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.violations.join(", "))
    }
}

impl std::error::Error for ParameterError {}

/// Unrecognised URI agent type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriAgentTypeError {
    /// The name that was rejected
    pub name: String,
}

impl fmt::Display for UriAgentTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown URI agent type '{}'; expected one of empty, base64, gzip, http, ipfs, json, unknown",
            self.name
        )
    }
}

impl std::error::Error for UriAgentTypeError {}

/// Problems found while decoding a raw event log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogError {
    /// `topics` is absent or empty
    MissingTopics,
    /// `topics[0]` is not a known event signature
    UnknownEventSignature,
    /// `data` is absent
    MissingData,
    /// `data` is shorter than an ABI string header
    DataTooShort {
        /// Length of the supplied data string
        actual: usize,
    },
    /// `topics[1]` is not a uint256
    InvalidAgentId,
    /// `topics[2]` does not hold an address
    InvalidOwnerAddress,
    /// `data` is not a single ABI-encoded string
    AbiDecodingFailed,
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTopics => write!(f, "log: Missing or empty topics array"),
            Self::UnknownEventSignature => write!(
                f,
                "log.topics[0]: Unknown event signature, not a recognized ERC-8004 event"
            ),
            Self::MissingData => write!(f, "log: Missing data field"),
            Self::DataTooShort { .. } => write!(
                f,
                "log.data: Too short for ABI-encoded string (minimum 66 bytes)"
            ),
            Self::InvalidAgentId => write!(f, "log.topics[1]: Cannot decode as uint256 agentId"),
            Self::InvalidOwnerAddress => write!(f, "log.topics[2]: Cannot decode as address"),
            Self::AbiDecodingFailed => write!(f, "log.data: ABI string decoding failed"),
        }
    }
}

impl std::error::Error for LogError {}

/// Reasons an agent URI could not be turned into a registration document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UriError {
    /// No URI at all
    Empty,
    /// Document lives behind an HTTP(S) URL
    HttpUnresolved,
    /// IPFS content identifier has the shape of an Ethereum address
    IpfsCidIsAddress,
    /// Document lives on IPFS
    IpfsUnresolved,
    /// Gzip payload could not be unpacked
    GzipUndecodable,
    /// Base64 payload is malformed
    InvalidBase64,
    /// Base64 payload does not decode to UTF-8 text
    Base64NotUtf8,
    /// Decoded text is not JSON
    InvalidJson,
    /// URI matches no known format
    UnknownFormat,
}

impl fmt::Display for UriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "uri: Is empty, agent has no Registration File"),
            Self::HttpUnresolved => write!(
                f,
                "uri: HTTP URL detected, metadata not resolved (requires fetch)"
            ),
            Self::IpfsCidIsAddress => write!(
                f,
                "uri: IPFS CID looks like an Ethereum address, not a valid content hash"
            ),
            Self::IpfsUnresolved => write!(
                f,
                "uri: IPFS URI detected, metadata not resolved (requires gateway)"
            ),
            Self::GzipUndecodable => write!(
                f,
                "uri: Gzip encoding detected but not decodable in this environment"
            ),
            Self::InvalidBase64 => write!(f, "uri: Invalid base64 encoding"),
            Self::Base64NotUtf8 => write!(f, "uri: Decoded base64 is not valid UTF-8"),
            Self::InvalidJson => write!(f, "uri: Contains inline JSON but parsing failed"),
            Self::UnknownFormat => write!(f, "uri: Unknown format, cannot classify"),
        }
    }
}

impl std::error::Error for UriError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_error_joins_violations() {
        let err = ParameterError {
            violations: vec![
                "agentUri: Missing value".to_string(),
                "agentId: Must be a string or null".to_string(),
            ],
        };
        assert_eq!(
            err.to_string(),
            "agentUri: Missing value, agentId: Must be a string or null"
        );
    }

    #[test]
    fn parameter_check_passes_without_violations() {
        assert!(ParameterError::check(Vec::new()).is_ok());
        assert!(ParameterError::check(vec!["x: bad".into()]).is_err());
    }

    #[test]
    fn log_error_messages_carry_field_path() {
        assert_eq!(
            LogError::DataTooShort { actual: 18 }.to_string(),
            "log.data: Too short for ABI-encoded string (minimum 66 bytes)"
        );
        assert!(LogError::InvalidAgentId.to_string().starts_with("log.topics[1]: "));
    }

    #[test]
    fn uri_error_messages_carry_field_path() {
        for err in [UriError::Empty, UriError::InvalidJson, UriError::UnknownFormat] {
            assert!(err.to_string().starts_with("uri: "));
        }
    }
}
