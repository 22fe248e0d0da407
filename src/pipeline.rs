//! Entry points composing the decoding, validation, and extraction stages.
//!
//! Stages run in a fixed order and every message is kept in that order:
//! event log, URI decoding, document validation, then protocol validators.
//! Each entry point returns a fully populated result regardless of where the
//! first problem appeared.

use serde_json::Value;
use tracing::debug;

use crate::event_decoder::DecodedEvent;
use crate::event_log::EventLog;
use crate::metadata::{Categories, Entries, Metadata};
use crate::protocol::{ProtocolValidators, ServiceProtocol};
use crate::service::{ServiceEntry, service_list};
use crate::uri_decoder::UriDecoding;
use crate::uri_type::UriAgentType;
use crate::validator::ValidationReport;

/// Outcome of a full registration pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RegistrationResult {
    /// True exactly when `messages` is empty
    pub status: bool,
    /// Findings from every stage, in execution order
    pub messages: Vec<String>,
    /// Category flags
    pub categories: Categories,
    /// Extracted fields
    pub entries: Entries,
}

impl RegistrationResult {
    fn new(messages: Vec<String>, metadata: Metadata) -> Self {
        Self {
            status: messages.is_empty(),
            messages,
            categories: metadata.categories,
            entries: metadata.entries,
        }
    }
}

/// The URI type of an agent URI together with its preview categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct UriClassification {
    /// Encoding of the URI
    pub uri_agent_type: UriAgentType,
    /// Categories with only the URI type flag set
    pub categories: Categories,
}

/// Runs the whole pipeline on a raw registry log.
///
/// When the log cannot be decoded, the result still carries whatever agent ID
/// and owner address were recovered, with the URI type reported as empty.
///
/// # Examples
///
/// ```
/// use erc8004_registry::{EventLog, ProtocolValidators, full_pipeline};
///
/// let log = EventLog::new(vec!["0xdeadbeef".to_string()], "0x");
/// let result = full_pipeline(&log, &ProtocolValidators::new());
///
/// assert!(!result.status);
/// assert!(result.categories.is_empty());
/// assert_eq!(
///     result.messages,
///     vec!["log.topics[0]: Unknown event signature, not a recognized ERC-8004 event"]
/// );
/// ```
#[must_use]
pub fn full_pipeline(log: &EventLog, validators: &ProtocolValidators) -> RegistrationResult {
    let DecodedEvent {
        status,
        mut messages,
        agent_id,
        owner_address,
        decoded_agent_uri,
    } = DecodedEvent::from_log(log);

    let metadata = match decoded_agent_uri {
        Some(uri) if status => run_stages(
            Some(&uri),
            agent_id.as_deref(),
            owner_address.as_deref(),
            validators,
            &mut messages,
        ),
        _ => Metadata::empty(
            UriAgentType::Empty,
            agent_id.as_deref(),
            owner_address.as_deref(),
        ),
    };

    RegistrationResult::new(messages, metadata)
}

/// Runs the pipeline from an already-known agent URI, skipping log decoding.
///
/// A URI whose payload decodes to JSON `null` is still validated, so it
/// yields `json: Is null or undefined` with `status` false rather than an
/// empty passing result.
///
/// # Examples
///
/// ```
/// use erc8004_registry::{ProtocolValidators, validate_from_uri};
///
/// let result = validate_from_uri(Some(""), Some("42"), None, &ProtocolValidators::new());
/// assert!(!result.status);
/// assert_eq!(result.messages, vec!["uri: Is empty, agent has no Registration File"]);
/// assert_eq!(result.entries.agent_id.as_deref(), Some("42"));
/// ```
#[must_use]
pub fn validate_from_uri(
    agent_uri: Option<&str>,
    agent_id: Option<&str>,
    owner_address: Option<&str>,
    validators: &ProtocolValidators,
) -> RegistrationResult {
    let mut messages = Vec::new();
    let metadata = run_stages(agent_uri, agent_id, owner_address, validators, &mut messages);
    RegistrationResult::new(messages, metadata)
}

/// Classifies a URI and previews its categories without decoding it.
#[must_use]
pub fn classify_uri(uri: Option<&str>) -> UriClassification {
    let uri_agent_type = UriAgentType::classify(uri);
    UriClassification {
        uri_agent_type,
        categories: Categories::unparsed(uri_agent_type),
    }
}

/// Decodes a URI into its registration document without validating it.
///
/// The URI is classified first unless `uri_agent_type` is given.
#[must_use]
pub fn decode_uri(uri: Option<&str>, uri_agent_type: Option<UriAgentType>) -> UriDecoding {
    let uri_agent_type = uri_agent_type.unwrap_or_else(|| UriAgentType::classify(uri));
    UriDecoding::decode(uri, uri_agent_type)
}

/// Decodes a raw registry log without running later stages.
#[must_use]
pub fn decode_event_log(log: &EventLog) -> DecodedEvent {
    DecodedEvent::from_log(log)
}

/// Extracts categories and entries from an already-parsed document.
///
/// The document is treated as having arrived through a base64 URI.
#[must_use]
pub fn categorize_registration(document: &Value) -> Metadata {
    Metadata::from_document(document, UriAgentType::Base64, None, None)
}

fn run_stages(
    uri: Option<&str>,
    agent_id: Option<&str>,
    owner_address: Option<&str>,
    validators: &ProtocolValidators,
    messages: &mut Vec<String>,
) -> Metadata {
    let uri_agent_type = UriAgentType::classify(uri);

    let UriDecoding {
        status,
        messages: decode_messages,
        decoded_registration_file,
    } = UriDecoding::decode(uri, uri_agent_type);
    messages.extend(decode_messages);

    let document = match decoded_registration_file {
        Some(document) if status => document,
        _ => {
            debug!(uri_agent_type = %uri_agent_type, "registration file unavailable");
            return Metadata::empty(uri_agent_type, agent_id, owner_address);
        }
    };

    let report = ValidationReport::validate(&document, uri_agent_type);
    messages.extend(report.messages);

    let metadata = Metadata::from_document(&document, uri_agent_type, agent_id, owner_address);

    run_protocol_validators(&document, validators, messages);

    debug!(
        uri_agent_type = %uri_agent_type,
        spec_compliant = metadata.categories.is_spec_compliant,
        findings = messages.len(),
        "registration pipeline finished"
    );

    metadata
}

fn run_protocol_validators(
    document: &Value,
    validators: &ProtocolValidators,
    messages: &mut Vec<String>,
) {
    if validators.is_empty() {
        return;
    }

    for (index, service) in service_list(document).iter().enumerate() {
        let entry = ServiceEntry::from_raw(service);
        let Some(endpoint) = entry.endpoint.as_deref() else {
            continue;
        };

        for protocol in ServiceProtocol::ALL {
            if !entry.is_protocol(protocol.as_str()) {
                continue;
            }
            let Some(validator) = validators.get(protocol) else {
                continue;
            };

            let report = validator.validate(endpoint);
            debug!(index, protocol = %protocol, endpoint, passed = report.status, "protocol validator ran");
            if !report.status {
                messages.extend(report.messages.into_iter().map(|message| {
                    format!("services[{index}].url ({}): {message}", protocol.label())
                }));
            }
        }
    }
}
