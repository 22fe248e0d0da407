//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use erc8004_registry::prelude::*;
//!
//! let preview = classify_uri(Some("ipfs://bafy"));
//! assert_eq!(preview.uri_agent_type, UriAgentType::Ipfs);
//! ```
//!
//! Constants and per-stage error enums are left out; import them from the
//! crate root when needed.

pub use crate::{
    // Inputs
    EventLog,
    // Results
    Categories, DecodedEvent, Entries, Metadata, RegistrationResult, ServiceEntry,
    UriClassification, UriDecoding, ValidationReport,
    // Types
    UriAgentType,
    // Validators
    EndpointReport, ProtocolValidator, ProtocolValidators, ServiceProtocol,
    // Entry points
    categorize_registration, classify_uri, classify_uri_json, decode_event_log,
    decode_event_log_json, decode_uri, decode_uri_json, full_pipeline, full_pipeline_json,
    validate_from_uri, validate_from_uri_json,
    // Errors
    ParameterError,
};
