//! Conformance checks for decoded registration documents.
//!
//! Every check runs; findings accumulate in document order so that a single
//! report lists all deviations at once.

use serde_json::{Map, Value};
use tracing::trace;

use crate::constants::{
    KNOWN_PROTOCOLS, KNOWN_SPEC_FIELDS, KNOWN_TRUST_TYPES, SPEC_TYPE_VALUE, X402_LOWERCASE_ALIAS,
};
use crate::service::{ENDPOINT_KEYS, PROTOCOL_KEYS, has_key, resolve};
use crate::uri_type::UriAgentType;

/// Findings from validating one registration document.
///
/// # Examples
///
/// ```
/// use erc8004_registry::{UriAgentType, ValidationReport};
/// use serde_json::json;
///
/// let report = ValidationReport::validate(&json!({"name": ""}), UriAgentType::Json);
/// assert!(!report.status);
/// assert!(report.messages.contains(&"name: Is empty string".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValidationReport {
    /// True when no finding was produced
    pub status: bool,
    /// Findings, in check order
    pub messages: Vec<String>,
}

impl ValidationReport {
    /// Validates `document` against the ERC-8004 registration format.
    ///
    /// Presence checks test for the key, so a field set to `null` counts as
    /// present and is then reported for its type.
    #[must_use]
    pub fn validate(document: &Value, uri_agent_type: UriAgentType) -> Self {
        let messages = match document {
            Value::Null => vec!["json: Is null or undefined".to_string()],
            Value::Object(fields) => {
                let mut messages = Vec::new();
                check_required_fields(fields, &mut messages);
                check_services(fields, &mut messages);
                check_x402(fields, &mut messages);
                check_optional_fields(fields, &mut messages);
                check_unknown_fields(fields, &mut messages);
                messages
            }
            _ => vec!["json: Is not a valid object".to_string()],
        };

        trace!(uri_agent_type = %uri_agent_type, findings = messages.len(), "validated registration file");

        Self {
            status: messages.is_empty(),
            messages,
        }
    }
}

fn check_required_fields(fields: &Map<String, Value>, messages: &mut Vec<String>) {
    match fields.get("type") {
        None => messages.push(format!(
            "type: Missing required field (expected \"{SPEC_TYPE_VALUE}\")"
        )),
        Some(Value::String(value)) if value != SPEC_TYPE_VALUE => messages.push(format!(
            "type: Invalid value \"{value}\" (expected \"{SPEC_TYPE_VALUE}\")"
        )),
        Some(Value::String(_)) => {}
        Some(_) => messages.push("type: Is not type of \"string\"".to_string()),
    }

    match fields.get("name") {
        None => messages.push("name: Missing required field".to_string()),
        Some(Value::String(value)) if value.is_empty() => {
            messages.push("name: Is empty string".to_string());
        }
        Some(Value::String(_)) => {}
        Some(_) => messages.push("name: Is not type of \"string\"".to_string()),
    }

    match fields.get("description") {
        None => messages.push("description: Missing field".to_string()),
        Some(Value::String(value)) if value.is_empty() => {
            messages.push("description: Is empty string".to_string());
        }
        Some(Value::String(_)) => {}
        Some(_) => messages.push("description: Is not type of \"string\"".to_string()),
    }
}

fn check_services(fields: &Map<String, Value>, messages: &mut Vec<String>) {
    let services = match fields.get("services") {
        None => return,
        Some(Value::Array(services)) => services,
        Some(_) => {
            messages.push("services: Is not type of \"array\"".to_string());
            return;
        }
    };

    if services.is_empty() {
        messages.push("services: Is empty array".to_string());
        return;
    }

    for (index, service) in services.iter().enumerate() {
        check_service(index, service, messages);
    }
}

fn check_service(index: usize, service: &Value, messages: &mut Vec<String>) {
    match (has_key(service, PROTOCOL_KEYS.0), has_key(service, PROTOCOL_KEYS.1)) {
        (false, false) => messages.push(format!(
            "services[{index}]: Missing protocol identifier (\"type\" or \"name\")"
        )),
        (false, true) => messages.push(format!(
            "services[{index}].name: Uses \"name\" instead of spec-defined \"type\""
        )),
        _ => {}
    }

    match (has_key(service, ENDPOINT_KEYS.0), has_key(service, ENDPOINT_KEYS.1)) {
        (false, false) => messages.push(format!(
            "services[{index}]: Missing endpoint (\"url\" or \"endpoint\")"
        )),
        (false, true) => messages.push(format!(
            "services[{index}].endpoint: Uses \"endpoint\" instead of spec-defined \"url\""
        )),
        _ => {}
    }

    if let Some(protocol) = resolve(service, PROTOCOL_KEYS) {
        let protocol = display_value(protocol);
        let normalized = protocol.to_lowercase();
        if !KNOWN_PROTOCOLS.contains(&normalized.as_str()) {
            messages.push(format!(
                "services[{index}]: Unknown protocol \"{protocol}\" (known: {})",
                KNOWN_PROTOCOLS.join(", ")
            ));
        }
    }

    let endpoint = resolve(service, ENDPOINT_KEYS);
    if endpoint.is_some_and(|endpoint| !endpoint.as_str().is_some_and(is_valid_url)) {
        messages.push(format!("services[{index}].url: Invalid URL format"));
    }
}

fn check_x402(fields: &Map<String, Value>, messages: &mut Vec<String>) {
    let (field, value) = match (fields.get("x402Support"), fields.get(X402_LOWERCASE_ALIAS)) {
        (Some(value), _) => ("x402Support", value),
        (None, Some(value)) => {
            messages.push(format!(
                "{X402_LOWERCASE_ALIAS}: Uses lowercase \"{X402_LOWERCASE_ALIAS}\" instead of spec-defined \"x402Support\""
            ));
            (X402_LOWERCASE_ALIAS, value)
        }
        (None, None) => return,
    };

    if !value.is_boolean() {
        messages.push(format!(
            "{field}: Is not type of \"boolean\", got \"{}\"",
            json_type_name(value)
        ));
    }
}

fn check_optional_fields(fields: &Map<String, Value>, messages: &mut Vec<String>) {
    match fields.get("image") {
        None => {}
        Some(Value::String(image)) => {
            if !is_valid_url(image) {
                messages.push("image: Is not a valid URL".to_string());
            }
        }
        Some(_) => messages.push("image: Is not type of \"string\"".to_string()),
    }

    if fields.get("active").is_some_and(|active| !active.is_boolean()) {
        messages.push("active: Is not type of \"boolean\"".to_string());
    }

    match fields.get("supportedTrust") {
        None => {}
        Some(Value::Array(values)) => {
            for (index, value) in values.iter().enumerate() {
                let known = value
                    .as_str()
                    .is_some_and(|v| KNOWN_TRUST_TYPES.contains(&v));
                if !known {
                    messages.push(format!(
                        "supportedTrust[{index}]: Unknown value \"{}\" (known: {})",
                        display_value(value),
                        KNOWN_TRUST_TYPES.join(", ")
                    ));
                }
            }
        }
        Some(_) => messages.push("supportedTrust: Is not type of \"array\"".to_string()),
    }
}

fn check_unknown_fields(fields: &Map<String, Value>, messages: &mut Vec<String>) {
    messages.extend(
        fields
            .keys()
            .filter(|key| {
                !KNOWN_SPEC_FIELDS.contains(&key.as_str()) && key.as_str() != X402_LOWERCASE_ALIAS
            })
            .map(|key| format!("{key}: Unknown field not defined in ERC-8004 spec")),
    );
}

pub(crate) fn is_valid_url(candidate: &str) -> bool {
    url::Url::parse(candidate).is_ok()
}

/// Strings render bare, everything else as JSON text.
fn display_value(value: &Value) -> String {
    value
        .as_str()
        .map_or_else(|| value.to_string(), str::to_string)
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
