//! Entry points taking untyped JSON arguments.
//!
//! Each entry point takes one JSON object of named arguments. Argument shape
//! is checked before any stage runs. Every violation is collected and
//! returned together as a [`ParameterError`]; nothing about a malformed
//! argument ever reaches a result's `messages`.

use serde_json::{Map, Value};

use crate::error::ParameterError;
use crate::event_decoder::DecodedEvent;
use crate::event_log::EventLog;
use crate::pipeline::{
    RegistrationResult, UriClassification, classify_uri, decode_event_log, decode_uri,
    full_pipeline, validate_from_uri,
};
use crate::protocol::ProtocolValidators;
use crate::uri_decoder::UriDecoding;
use crate::uri_type::UriAgentType;

/// Runs [`full_pipeline`] on `{eventLog}`, where the log is `{topics, data}`.
///
/// A missing or non-array `topics`, or a missing `data`, is not an argument
/// error; the decoder reports it as a finding.
///
/// # Errors
///
/// Returns [`ParameterError`] if `params` is not an object, `eventLog` is
/// missing or not an object, a topic is not a string, or `data` is present
/// with a non-string value.
///
/// # Examples
///
/// ```
/// use erc8004_registry::{ProtocolValidators, full_pipeline_json};
/// use serde_json::json;
///
/// let err = full_pipeline_json(&json!({"eventLog": []}), &ProtocolValidators::new()).unwrap_err();
/// assert_eq!(err.to_string(), "eventLog: Must be an object");
///
/// let params = json!({"eventLog": {"topics": []}});
/// let result = full_pipeline_json(&params, &ProtocolValidators::new()).unwrap();
/// assert_eq!(result.messages, vec!["log: Missing or empty topics array"]);
/// ```
pub fn full_pipeline_json(
    params: &Value,
    validators: &ProtocolValidators,
) -> Result<RegistrationResult, ParameterError> {
    let log = event_log_param(params)?;
    Ok(full_pipeline(&log, validators))
}

/// Runs [`validate_from_uri`] on `{agentUri, agentId?, ownerAddress?}`.
///
/// `agentUri` must be present but may be `null`.
///
/// # Errors
///
/// Returns [`ParameterError`] if `params` is not an object, `agentUri` is
/// missing, or any field holds something other than a string or `null`.
pub fn validate_from_uri_json(
    params: &Value,
    validators: &ProtocolValidators,
) -> Result<RegistrationResult, ParameterError> {
    let fields = params_object(params)?;

    let mut violations = Vec::new();
    let agent_uri = required_string(fields, "agentUri", &mut violations);
    let agent_id = optional_string(fields, "agentId", &mut violations);
    let owner_address = optional_string(fields, "ownerAddress", &mut violations);
    ParameterError::check(violations)?;

    Ok(validate_from_uri(agent_uri, agent_id, owner_address, validators))
}

/// Runs [`classify_uri`] on `{decodedAgentUri}`.
///
/// # Errors
///
/// Returns [`ParameterError`] if `params` is not an object, or
/// `decodedAgentUri` is missing or neither a string nor `null`.
pub fn classify_uri_json(params: &Value) -> Result<UriClassification, ParameterError> {
    let fields = params_object(params)?;

    let mut violations = Vec::new();
    let uri = required_string(fields, "decodedAgentUri", &mut violations);
    ParameterError::check(violations)?;

    Ok(classify_uri(uri))
}

/// Runs [`decode_uri`] on `{decodedAgentUri, uriAgentType?}`.
///
/// A `null`, absent or empty `uriAgentType` means the URI is classified.
/// A tag name that is not recognised decodes as [`UriAgentType::Unknown`].
///
/// # Errors
///
/// Returns [`ParameterError`] if `params` is not an object,
/// `decodedAgentUri` is missing, or either field holds something other than
/// a string or `null`.
///
/// # Examples
///
/// ```
/// use erc8004_registry::decode_uri_json;
/// use serde_json::json;
///
/// let params = json!({"decodedAgentUri": "{}", "uriAgentType": "ftp"});
/// let decoded = decode_uri_json(&params).unwrap();
/// assert_eq!(decoded.messages, vec!["uri: Unknown format, cannot classify"]);
/// ```
pub fn decode_uri_json(params: &Value) -> Result<UriDecoding, ParameterError> {
    let fields = params_object(params)?;

    let mut violations = Vec::new();
    let uri = required_string(fields, "decodedAgentUri", &mut violations);
    let tag = optional_string(fields, "uriAgentType", &mut violations);
    ParameterError::check(violations)?;

    let uri_agent_type = tag
        .filter(|tag| !tag.is_empty())
        .map(|tag| tag.parse().unwrap_or(UriAgentType::Unknown));

    Ok(decode_uri(uri, uri_agent_type))
}

/// Runs [`decode_event_log`] on `{eventLog}`.
///
/// # Errors
///
/// Returns [`ParameterError`] under the same conditions as
/// [`full_pipeline_json`].
pub fn decode_event_log_json(params: &Value) -> Result<DecodedEvent, ParameterError> {
    let log = event_log_param(params)?;
    Ok(decode_event_log(&log))
}

fn params_object(params: &Value) -> Result<&Map<String, Value>, ParameterError> {
    params
        .as_object()
        .ok_or_else(|| violation("params: Must be an object"))
}

fn event_log_param(params: &Value) -> Result<EventLog, ParameterError> {
    let fields = match params_object(params)?.get("eventLog") {
        None => return Err(violation("eventLog: Missing value")),
        Some(Value::Object(fields)) => fields,
        Some(_) => return Err(violation("eventLog: Must be an object")),
    };

    let mut violations = Vec::new();

    let topics = fields
        .get("topics")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let mut topic_strings = Vec::with_capacity(topics.len());
    for (index, topic) in topics.iter().enumerate() {
        match topic.as_str() {
            Some(topic) => topic_strings.push(topic.to_string()),
            None => violations.push(format!("eventLog.topics[{index}]: Must be a string")),
        }
    }

    let data = match fields.get("data") {
        None | Some(Value::Null) => None,
        Some(Value::String(data)) => Some(data.clone()),
        Some(_) => {
            violations.push("eventLog.data: Must be a string".to_string());
            None
        }
    };

    ParameterError::check(violations)?;

    Ok(EventLog {
        topics: topic_strings,
        data,
    })
}

fn violation(message: &str) -> ParameterError {
    ParameterError {
        violations: vec![message.to_string()],
    }
}

/// Like [`optional_string`], but an absent key is a violation.
fn required_string<'a>(
    fields: &'a Map<String, Value>,
    key: &str,
    violations: &mut Vec<String>,
) -> Option<&'a str> {
    if !fields.contains_key(key) {
        violations.push(format!("{key}: Missing value"));
    }
    optional_string(fields, key, violations)
}

/// A string or `null` field; anything else is recorded as a violation.
fn optional_string<'a>(
    fields: &'a Map<String, Value>,
    key: &str,
    violations: &mut Vec<String>,
) -> Option<&'a str> {
    match fields.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(value)) => Some(value.as_str()),
        Some(_) => {
            violations.push(format!("{key}: Must be a string or null"));
            None
        }
    }
}
