//! Turning classified agent URIs into registration documents.

use std::io::Read;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use flate2::read::GzDecoder;
use serde_json::Value;
use tracing::debug;

use crate::constants::BASE64_DATA_PREFIX;
use crate::error::UriError;
use crate::uri_type::UriAgentType;

const BASE64_MARKER: &str = "base64,";

/// The outcome of decoding an agent URI.
///
/// `status` is true only when an inline document (base64, gzip, or JSON) was
/// parsed. HTTP and IPFS URIs are reported as unresolved, since fetching
/// them is left to the caller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct UriDecoding {
    /// True when a document was produced
    pub status: bool,
    /// Reasons no document was produced
    pub messages: Vec<String>,
    /// The parsed registration document
    pub decoded_registration_file: Option<Value>,
}

impl UriDecoding {
    /// Decodes `uri` according to an already-determined type tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use erc8004_registry::{UriAgentType, UriDecoding};
    ///
    /// let uri = r#"{"name":"Inline Agent"}"#;
    /// let decoded = UriDecoding::decode(Some(uri), UriAgentType::Json);
    /// assert!(decoded.status);
    /// assert_eq!(decoded.decoded_registration_file.unwrap()["name"], "Inline Agent");
    ///
    /// let decoded = UriDecoding::decode(Some("https://a.example"), UriAgentType::Http);
    /// assert!(!decoded.status);
    /// ```
    #[must_use]
    pub fn decode(uri: Option<&str>, uri_agent_type: UriAgentType) -> Self {
        let uri = uri.map_or("", str::trim);

        let outcome = match uri_agent_type {
            UriAgentType::Empty => Err(vec![UriError::Empty]),
            UriAgentType::Http => Err(vec![UriError::HttpUnresolved]),
            UriAgentType::Ipfs => Err(ipfs_findings(uri)),
            UriAgentType::Gzip => decode_gzip(uri).map_err(|e| vec![e]),
            UriAgentType::Base64 => decode_base64(uri).map_err(|e| vec![e]),
            UriAgentType::Json => parse_json(uri).map_err(|e| vec![e]),
            UriAgentType::Unknown => Err(vec![UriError::UnknownFormat]),
        };

        match outcome {
            Ok(document) => {
                debug!(uri_agent_type = %uri_agent_type, "decoded inline registration file");
                Self {
                    status: true,
                    messages: Vec::new(),
                    decoded_registration_file: Some(document),
                }
            }
            Err(errors) => {
                debug!(uri_agent_type = %uri_agent_type, findings = errors.len(), "no registration file");
                Self {
                    status: false,
                    messages: errors.iter().map(ToString::to_string).collect(),
                    decoded_registration_file: None,
                }
            }
        }
    }
}

fn ipfs_findings(uri: &str) -> Vec<UriError> {
    let cid = uri.strip_prefix("ipfs://").unwrap_or(uri);
    let mut findings = Vec::with_capacity(2);
    if looks_like_address(cid) {
        findings.push(UriError::IpfsCidIsAddress);
    }
    findings.push(UriError::IpfsUnresolved);
    findings
}

/// Shape check only (`0x` + 40 hex digits); the CID itself is never verified.
fn looks_like_address(cid: &str) -> bool {
    cid.strip_prefix("0x")
        .is_some_and(|hex| hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit()))
}

fn decode_gzip(uri: &str) -> Result<Value, UriError> {
    let payload = uri
        .rfind(BASE64_MARKER)
        .map(|idx| &uri[idx + BASE64_MARKER.len()..])
        .filter(|payload| !payload.is_empty())
        .ok_or(UriError::GzipUndecodable)?;

    let compressed = STANDARD
        .decode(payload)
        .map_err(|_| UriError::GzipUndecodable)?;

    let mut inflated = Vec::new();
    GzDecoder::new(compressed.as_slice())
        .read_to_end(&mut inflated)
        .map_err(|_| UriError::GzipUndecodable)?;
    let text = String::from_utf8(inflated).map_err(|_| UriError::GzipUndecodable)?;

    parse_json(&text)
}

fn decode_base64(uri: &str) -> Result<Value, UriError> {
    let payload = uri
        .strip_prefix(BASE64_DATA_PREFIX)
        .ok_or(UriError::InvalidBase64)?;

    let bytes = STANDARD
        .decode(payload)
        .map_err(|_| UriError::InvalidBase64)?;
    let text = String::from_utf8(bytes).map_err(|_| UriError::Base64NotUtf8)?;

    // Re-encoding must reproduce the payload exactly.
    if STANDARD.encode(text.as_bytes()) != payload {
        return Err(UriError::Base64NotUtf8);
    }

    parse_json(&text)
}

fn parse_json(text: &str) -> Result<Value, UriError> {
    serde_json::from_str(text).map_err(|_| UriError::InvalidJson)
}
