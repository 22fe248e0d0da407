//! Decoding of raw registry logs into agent ID, owner, and URI.

use std::str::FromStr;

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolValue;
use tracing::{debug, trace};

use crate::constants::{KNOWN_TOPIC0S, MIN_DATA_HEX_LENGTH};
use crate::error::LogError;
use crate::event_log::EventLog;

const WORD: usize = 32;

/// Offset of the 20-byte address inside a hex topic (`0x` + 12 zero bytes).
const ADDRESS_TOPIC_OFFSET: usize = 26;

/// The fields extracted from a `Registered` or `URIUpdated` log.
///
/// Decoding never fails outright. Problems are reported in `messages` and
/// the affected fields are left as `None`; fields decoded before the problem
/// are kept.
///
/// # Examples
///
/// ```
/// use erc8004_registry::{DecodedEvent, EventLog};
///
/// let decoded = DecodedEvent::from_log(&EventLog::default());
/// assert!(!decoded.status);
/// assert_eq!(decoded.messages, vec!["log: Missing or empty topics array"]);
/// assert!(decoded.agent_id.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DecodedEvent {
    /// True when no message was produced
    pub status: bool,
    /// Problems found, in check order
    pub messages: Vec<String>,
    /// `topics[1]` as a decimal uint256
    pub agent_id: Option<String>,
    /// `topics[2]` as an EIP-55 checksummed address
    pub owner_address: Option<String>,
    /// The ABI-decoded agent URI from `data`
    pub decoded_agent_uri: Option<String>,
}

impl DecodedEvent {
    /// Decodes a raw registry log.
    ///
    /// Checks run in order: topics present, known event signature, data
    /// present and long enough, agent ID, owner address, then the URI string.
    /// A failure in the first four checks stops all extraction. A bad agent
    /// ID or owner address skips URI decoding.
    ///
    /// `topics[0]` must be the lowercase `0x`-prefixed signature hash;
    /// the same hash in upper case is an unknown signature. `data` must be
    /// the canonical ABI encoding of one `string`, padding included.
    #[must_use]
    pub fn from_log(log: &EventLog) -> Self {
        let data = match check_log_shape(log) {
            Ok(data) => data,
            Err(err) => {
                trace!(error = %err, "rejected event log");
                return Self::rejected(vec![err.to_string()], None, None);
            }
        };

        let mut messages = Vec::new();

        let agent_id = log.topic(1).and_then(parse_agent_id);
        if agent_id.is_none() {
            messages.push(LogError::InvalidAgentId.to_string());
        }

        let owner_address = log.topic(2).and_then(parse_owner_address);
        if owner_address.is_none() {
            messages.push(LogError::InvalidOwnerAddress.to_string());
        }

        if !messages.is_empty() {
            return Self::rejected(messages, agent_id, owner_address);
        }

        let Some(uri) = decode_agent_uri(data) else {
            return Self::rejected(
                vec![LogError::AbiDecodingFailed.to_string()],
                agent_id,
                owner_address,
            );
        };

        debug!(agent_id = ?agent_id, owner = ?owner_address, "decoded registration event");

        Self {
            status: true,
            messages,
            agent_id,
            owner_address,
            decoded_agent_uri: Some(uri),
        }
    }

    fn rejected(
        messages: Vec<String>,
        agent_id: Option<String>,
        owner_address: Option<String>,
    ) -> Self {
        Self {
            status: false,
            messages,
            agent_id,
            owner_address,
            decoded_agent_uri: None,
        }
    }
}

fn check_log_shape(log: &EventLog) -> Result<&str, LogError> {
    let topic0 = log.topic(0).ok_or(LogError::MissingTopics)?;
    if !KNOWN_TOPIC0S.iter().any(|known| known.to_string() == topic0) {
        return Err(LogError::UnknownEventSignature);
    }

    let data = log.data.as_deref().ok_or(LogError::MissingData)?;
    if data.len() < MIN_DATA_HEX_LENGTH {
        return Err(LogError::DataTooShort { actual: data.len() });
    }

    Ok(data)
}

/// Hex topics (`0x`-prefixed) parse base 16, anything else base 10.
fn parse_agent_id(topic: &str) -> Option<String> {
    let trimmed = topic.trim();
    let (digits, radix) = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex_digits) => (hex_digits, 16),
        None => (trimmed, 10),
    };

    let valid = !digits.is_empty()
        && digits.chars().all(|c| c.is_digit(radix))
        && (radix == 10 || digits.len() <= 2 * WORD);
    if !valid {
        return None;
    }

    U256::from_str_radix(digits, u64::from(radix))
        .ok()
        .map(|value| value.to_string())
}

fn parse_owner_address(topic: &str) -> Option<String> {
    let tail = topic.get(ADDRESS_TOPIC_OFFSET..)?;
    if tail.len() != 40 || !tail.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let prefixed = format!("0x{tail}");
    let mixed_case =
        tail.bytes().any(|b| b.is_ascii_uppercase()) && tail.bytes().any(|b| b.is_ascii_lowercase());

    // Mixed case claims an EIP-55 checksum, which must then hold.
    let address = if mixed_case {
        Address::parse_checksummed(&prefixed, None).ok()?
    } else {
        Address::from_str(&prefixed).ok()?
    };

    Some(address.to_checksum(None))
}

/// Decodes `data` as the ABI encoding of a single dynamic `string`.
fn decode_agent_uri(data: &str) -> Option<String> {
    let bytes = hex::decode(data.strip_prefix("0x").unwrap_or(data)).ok()?;
    String::abi_decode_validate(&bytes).ok()
}
