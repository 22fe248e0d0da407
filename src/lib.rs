//! Decoder and validator for ERC-8004 agent registration events.
//!
//! The ERC-8004 identity registry emits a log each time an agent is
//! registered or its metadata URI changes. This crate turns such a log into a
//! normalized summary of the agent, reporting every problem it finds along
//! the way.
//!
//! # Overview
//!
//! A pipeline run passes through five stages:
//!
//! 1. **Event decoding**: agent ID, owner address, and agent URI from the log
//! 2. **URI classification**: empty, base64, gzip, http, ipfs, json, or unknown
//! 3. **URI decoding**: inline documents are decoded; remote ones are not fetched
//! 4. **Validation**: the document is checked against the registration format
//! 5. **Extraction**: category flags and normalized entries
//!
//! Problems never abort a run. Each one becomes a `"<field>: <problem>"`
//! message, and `status` is true only when there are none.
//!
//! # Quick Start
//!
//! ```rust
//! use erc8004_registry::{ProtocolValidators, validate_from_uri};
//!
//! let uri = "data:application/json;base64,eyJuYW1lIjoiUmVhbCBBZ2VudCIsImRlc2NyaXB0aW9uIjoiQSByZWFsIGFnZW50Iiwic2VydmljZXMiOlt7Im5hbWUiOiJNQ1AiLCJlbmRwb2ludCI6Imh0dHBzOi8vbWNwLmV4YW1wbGUuY29tIn1dLCJ4NDAyc3VwcG9ydCI6dHJ1ZX0=";
//! let result = validate_from_uri(Some(uri), Some("42"), None, &ProtocolValidators::new());
//!
//! assert!(!result.status);
//! assert!(result.categories.is_base64());
//! assert!(result.categories.is_mcp);
//! assert!(!result.categories.is_spec_compliant);
//! assert_eq!(result.entries.mcp_endpoint.as_deref(), Some("https://mcp.example.com"));
//! ```
//!
//! # Endpoint Validators
//!
//! MCP and A2A endpoints can be checked by caller-supplied validators. Their
//! failures are prefixed with the service path and protocol:
//!
//! ```rust
//! use erc8004_registry::{EndpointReport, ProtocolValidators, validate_from_uri};
//!
//! let validators = ProtocolValidators::new()
//!     .with_mcp(|_: &str| EndpointReport::failed(["Connection refused"]));
//!
//! let uri = r#"{"services":[{"type":"mcp","url":"https://mcp.example.com"}]}"#;
//! let result = validate_from_uri(Some(uri), None, None, &validators);
//!
//! assert_eq!(
//!     result.messages.last().map(String::as_str),
//!     Some("services[0].url (MCP): Connection refused")
//! );
//! ```
//!
//! # Supported URI Formats
//!
//! | Type | Form | Decoded here |
//! |------|------|--------------|
//! | `empty` | missing or blank | no |
//! | `base64` | `data:application/json;base64,...` | yes |
//! | `gzip` | `data:...;enc=gzip;...;base64,...` | yes |
//! | `http` | `http://...`, `https://...` | no |
//! | `ipfs` | `ipfs://<cid>` | no |
//! | `json` | inline `{...}` or `[...]` | yes |
//! | `unknown` | anything else | no |

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

#[allow(dead_code)]
mod abi;
mod constants;
mod error;
mod event_decoder;
mod event_log;
mod metadata;
mod params;
mod pipeline;
pub mod prelude;
mod protocol;
mod service;
mod uri_decoder;
mod uri_type;
mod validator;

pub use constants::{
    BASE64_DATA_PREFIX, KNOWN_PROTOCOLS, KNOWN_SPEC_FIELDS, KNOWN_TOPIC0S, KNOWN_TRUST_TYPES,
    MIN_DATA_HEX_LENGTH, REGISTERED_TOPIC0, SPEC_TYPE_VALUE, URI_UPDATED_TOPIC0,
    X402_LOWERCASE_ALIAS,
};
pub use error::{LogError, ParameterError, UriAgentTypeError, UriError};
pub use event_decoder::DecodedEvent;
pub use event_log::EventLog;
pub use metadata::{Categories, Entries, Metadata};
pub use params::{
    classify_uri_json, decode_event_log_json, decode_uri_json, full_pipeline_json,
    validate_from_uri_json,
};
pub use pipeline::{
    RegistrationResult, UriClassification, categorize_registration, classify_uri, decode_event_log,
    decode_uri, full_pipeline, validate_from_uri,
};
pub use protocol::{EndpointReport, ProtocolValidator, ProtocolValidators, ServiceProtocol};
pub use service::ServiceEntry;
pub use uri_decoder::UriDecoding;
pub use uri_type::UriAgentType;
pub use validator::ValidationReport;
