//! End-to-end tests over the public entry points.

use erc8004_registry::{
    EndpointReport, EventLog, ProtocolValidators, REGISTERED_TOPIC0, SPEC_TYPE_VALUE,
    URI_UPDATED_TOPIC0, UriAgentType, categorize_registration, classify_uri, decode_event_log,
    decode_uri, full_pipeline, full_pipeline_json, validate_from_uri,
};
use std::io::Write;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use flate2::Compression;
use flate2::write::GzEncoder;
use serde_json::json;

const AGENT_ID_42_TOPIC: &str =
    "0x000000000000000000000000000000000000000000000000000000000000002a";
const OWNER_TOPIC: &str = "0x0000000000000000000000008ec6c9a8a6b0d69f48734c4b7ecd1cbb190a0d69";
const OWNER_ADDRESS: &str = "0x8Ec6C9A8A6b0d69f48734c4b7Ecd1cbb190a0D69";

const SPEC_COMPLIANT_BASE64: &str = "eyJuYW1lIjoiVGVzdCBBZ2VudCIsImRlc2NyaXB0aW9uIjoiQSB0ZXN0IGFnZW50IiwidHlwZSI6Imh0dHBzOi8vZWlwcy5ldGhlcmV1bS5vcmcvRUlQUy9laXAtODAwNCNyZWdpc3RyYXRpb24tdjEiLCJzZXJ2aWNlcyI6W3sidHlwZSI6Im1jcCIsInVybCI6Imh0dHBzOi8vbWNwLmV4YW1wbGUuY29tIn1dLCJ4NDAyU3VwcG9ydCI6dHJ1ZSwiYWN0aXZlIjp0cnVlfQ==";
const REAL_WORLD_BASE64: &str = "eyJuYW1lIjoiUmVhbCBBZ2VudCIsImRlc2NyaXB0aW9uIjoiQSByZWFsIGFnZW50Iiwic2VydmljZXMiOlt7Im5hbWUiOiJNQ1AiLCJlbmRwb2ludCI6Imh0dHBzOi8vbWNwLmV4YW1wbGUuY29tIn1dLCJ4NDAyc3VwcG9ydCI6dHJ1ZX0=";

const ABI_ENCODED_SPEC_URI: &str = "0x00000000000000000000000000000000000000000000000000000000000000200000000000000000000000000000000000000000000000000000000000000135646174613a6170706c69636174696f6e2f6a736f6e3b6261736536342c65794a755957316c496a6f695647567a644342425a32567564434973496d526c63324e796158423061573975496a6f69515342305a584e304947466e5a5735304969776964486c775a534936496d68306448427a4f6938765a576c776379356c6447686c636d563162533576636d637652556c515579396c615841744f4441774e434e795a576470633352795958527062323474646a45694c434a7a5a584a3261574e6c637949365733736964486c775a534936496d316a63434973496e567962434936496d68306448427a4f69387662574e774c6d5634595731776247557559323974496e31644c434a344e44417955335677634739796443493664484a315a53776959574e3061585a6c496a7030636e566c66513d3d0000000000000000000000";
const ABI_ENCODED_EMPTY_URI: &str = "0x00000000000000000000000000000000000000000000000000000000000000200000000000000000000000000000000000000000000000000000000000000000";

fn registered_log(data: &str) -> EventLog {
    EventLog::new(
        vec![
            REGISTERED_TOPIC0.to_string(),
            AGENT_ID_42_TOPIC.to_string(),
            OWNER_TOPIC.to_string(),
        ],
        data,
    )
}

fn abi_string(value: &str) -> String {
    let mut body = value.as_bytes().to_vec();
    body.resize(value.len().div_ceil(32) * 32, 0);
    format!("0x{:064x}{:064x}{}", 32, value.len(), hex::encode(body))
}

fn base64_uri(payload: &str) -> String {
    format!("data:application/json;base64,{payload}")
}

fn no_validators() -> ProtocolValidators {
    ProtocolValidators::new()
}

// Event logs

#[test]
fn spec_compliant_log_passes_every_stage() {
    let result = full_pipeline(&registered_log(ABI_ENCODED_SPEC_URI), &no_validators());

    assert!(result.status, "{:?}", result.messages);
    assert!(result.messages.is_empty());
    assert!(result.categories.is_base64());
    assert!(result.categories.is_parseable);
    assert!(result.categories.is_spec_compliant);
    assert!(result.categories.is_x402);
    assert!(result.categories.is_mcp);
    assert_eq!(result.categories.is_active, Some(true));
    assert_eq!(result.entries.agent_id.as_deref(), Some("42"));
    assert_eq!(result.entries.owner_address.as_deref(), Some(OWNER_ADDRESS));
    assert_eq!(result.entries.name.as_deref(), Some("Test Agent"));
    assert_eq!(result.entries.mcp_endpoint.as_deref(), Some("https://mcp.example.com"));
}

#[test]
fn uri_updated_log_decodes_the_same_way() {
    let log = EventLog::new(
        vec![
            URI_UPDATED_TOPIC0.to_string(),
            AGENT_ID_42_TOPIC.to_string(),
            OWNER_TOPIC.to_string(),
        ],
        ABI_ENCODED_SPEC_URI,
    );
    let result = full_pipeline(&log, &no_validators());
    assert!(result.status);
    assert_eq!(result.entries.uri_agent_type, UriAgentType::Base64);
}

#[test]
fn log_with_empty_uri_keeps_identifiers() {
    let result = full_pipeline(&registered_log(ABI_ENCODED_EMPTY_URI), &no_validators());

    assert!(!result.status);
    assert_eq!(result.messages, vec!["uri: Is empty, agent has no Registration File"]);
    assert!(result.categories.is_empty());
    assert_eq!(result.categories.is_active, None);
    assert_eq!(result.entries.agent_id.as_deref(), Some("42"));
    assert_eq!(result.entries.owner_address.as_deref(), Some(OWNER_ADDRESS));
}

#[test]
fn unknown_topic0_stops_before_extraction() {
    let log = EventLog::new(
        vec![
            "0x0000000000000000000000000000000000000000000000000000000000000001".to_string(),
            AGENT_ID_42_TOPIC.to_string(),
            OWNER_TOPIC.to_string(),
        ],
        ABI_ENCODED_SPEC_URI,
    );
    let result = full_pipeline(&log, &no_validators());

    assert!(!result.status);
    assert_eq!(
        result.messages,
        vec!["log.topics[0]: Unknown event signature, not a recognized ERC-8004 event"]
    );
    assert_eq!(result.entries.agent_id, None);
    assert_eq!(result.entries.owner_address, None);
    assert!(result.categories.is_empty());
}

#[test]
fn missing_topics_and_data() {
    let result = full_pipeline(&EventLog::default(), &no_validators());
    assert_eq!(result.messages, vec!["log: Missing or empty topics array"]);

    let log = EventLog::without_data(vec![REGISTERED_TOPIC0.to_string()]);
    let result = full_pipeline(&log, &no_validators());
    assert_eq!(result.messages, vec!["log: Missing data field"]);
}

#[test]
fn short_data_is_rejected() {
    let result = full_pipeline(&registered_log("0x1234"), &no_validators());
    assert_eq!(
        result.messages,
        vec!["log.data: Too short for ABI-encoded string (minimum 66 bytes)"]
    );
}

#[test]
fn bad_owner_keeps_agent_id() {
    let log = EventLog::new(
        vec![
            REGISTERED_TOPIC0.to_string(),
            AGENT_ID_42_TOPIC.to_string(),
            "0xnot-an-address".to_string(),
        ],
        ABI_ENCODED_SPEC_URI,
    );
    let result = full_pipeline(&log, &no_validators());

    assert_eq!(result.messages, vec!["log.topics[2]: Cannot decode as address"]);
    assert_eq!(result.entries.agent_id.as_deref(), Some("42"));
    assert!(result.categories.is_empty());
}

#[test]
fn decode_event_log_exposes_raw_fields() {
    let decoded = decode_event_log(&registered_log(ABI_ENCODED_SPEC_URI));
    assert!(decoded.status);
    assert_eq!(decoded.agent_id.as_deref(), Some("42"));
    assert_eq!(decoded.owner_address.as_deref(), Some(OWNER_ADDRESS));
    assert_eq!(
        decoded.decoded_agent_uri,
        Some(base64_uri(SPEC_COMPLIANT_BASE64))
    );
}

#[test]
fn json_log_matches_typed_log() {
    let value = json!({
        "eventLog": {
            "topics": [REGISTERED_TOPIC0.to_string(), AGENT_ID_42_TOPIC, OWNER_TOPIC],
            "data": ABI_ENCODED_SPEC_URI,
        }
    });
    let from_json = full_pipeline_json(&value, &no_validators()).unwrap();
    let typed = full_pipeline(&registered_log(ABI_ENCODED_SPEC_URI), &no_validators());
    assert_eq!(from_json, typed);
}

// URIs

#[test]
fn real_world_document_reports_each_deviation() {
    let uri = base64_uri(REAL_WORLD_BASE64);
    let result = validate_from_uri(Some(&uri), None, None, &no_validators());

    assert!(!result.status);
    assert_eq!(
        result.messages,
        vec![
            format!("type: Missing required field (expected \"{SPEC_TYPE_VALUE}\")"),
            "services[0].name: Uses \"name\" instead of spec-defined \"type\"".to_string(),
            "services[0].endpoint: Uses \"endpoint\" instead of spec-defined \"url\"".to_string(),
            "x402support: Uses lowercase \"x402support\" instead of spec-defined \"x402Support\""
                .to_string(),
        ]
    );
    assert!(!result.categories.is_spec_compliant);
    assert!(result.categories.is_mcp);
    assert!(result.entries.x402_support);
    assert_eq!(result.entries.mcp_endpoint.as_deref(), Some("https://mcp.example.com"));
}

#[test]
fn http_and_ipfs_are_deferred() {
    let result = validate_from_uri(
        Some("https://myagent.com/.well-known/erc8004.json"),
        None,
        None,
        &no_validators(),
    );
    assert!(result.categories.is_http());
    assert!(!result.categories.is_parseable);
    assert_eq!(
        result.messages,
        vec!["uri: HTTP URL detected, metadata not resolved (requires fetch)"]
    );

    let result = validate_from_uri(
        Some("ipfs://0x8ec6c9a8a6b0d69f48734c4b7ecd1cbb190a0d69"),
        None,
        None,
        &no_validators(),
    );
    assert!(result.categories.is_ipfs());
    assert_eq!(
        result.messages,
        vec![
            "uri: IPFS CID looks like an Ethereum address, not a valid content hash",
            "uri: IPFS URI detected, metadata not resolved (requires gateway)",
        ]
    );
}

#[test]
fn gzip_uri_in_log_passes_every_stage() {
    let document = STANDARD.decode(SPEC_COMPLIANT_BASE64).unwrap();
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&document).unwrap();
    let uri = format!(
        "data:application/json;enc=gzip;level=6;base64,{}",
        STANDARD.encode(encoder.finish().unwrap())
    );

    let result = full_pipeline(&registered_log(&abi_string(&uri)), &no_validators());

    assert!(result.status, "{:?}", result.messages);
    assert!(result.categories.is_gzip());
    assert!(result.categories.is_parseable);
    assert!(result.categories.is_spec_compliant);
    assert_eq!(result.entries.uri_agent_type, UriAgentType::Gzip);
    assert_eq!(result.entries.agent_id.as_deref(), Some("42"));
    assert_eq!(result.entries.name.as_deref(), Some("Test Agent"));
    assert_eq!(result.entries.mcp_endpoint.as_deref(), Some("https://mcp.example.com"));
}

#[test]
fn corrupt_gzip_fixture_is_undecodable() {
    let uri = "data:application/json;enc=gzip;level=6;base64,H4sIAAAAAAAAA6tWKkktLlGyUlAqS8wpTtVRSizIULJRKs9ILUpVslIqzy9KSQUAVcHkNSUAAAA=";
    let result = validate_from_uri(Some(uri), None, None, &no_validators());
    assert!(result.categories.is_gzip());
    assert_eq!(
        result.messages,
        vec!["uri: Gzip encoding detected but not decodable in this environment"]
    );
}

#[test]
fn invalid_base64_and_unknown_uris() {
    let result = validate_from_uri(
        Some("data:application/json;base64,!!!invalid-base64!!!"),
        None,
        None,
        &no_validators(),
    );
    assert_eq!(result.messages, vec!["uri: Invalid base64 encoding"]);
    assert!(result.categories.is_base64());

    let result = validate_from_uri(
        Some("ftp://some.server.com/file.json"),
        None,
        None,
        &no_validators(),
    );
    assert_eq!(result.messages, vec!["uri: Unknown format, cannot classify"]);
    assert!(result.categories.is_unknown());
}

#[test]
fn missing_uri_is_empty() {
    let result = validate_from_uri(None, None, None, &no_validators());
    assert!(result.categories.is_empty());
    assert_eq!(result.messages, vec!["uri: Is empty, agent has no Registration File"]);
}

#[test]
fn classify_and_decode_entry_points() {
    let preview = classify_uri(Some(&base64_uri(SPEC_COMPLIANT_BASE64)));
    assert_eq!(preview.uri_agent_type, UriAgentType::Base64);
    assert!(preview.categories.is_base64());
    assert!(!preview.categories.is_parseable);

    let decoded = decode_uri(Some(&base64_uri(SPEC_COMPLIANT_BASE64)), None);
    assert!(decoded.status);
    let document = decoded.decoded_registration_file.unwrap();
    assert_eq!(document["type"], SPEC_TYPE_VALUE);
    assert_eq!(document["services"][0]["url"], "https://mcp.example.com");
}

#[test]
fn categorize_registration_from_document() {
    let metadata = categorize_registration(&json!({
        "type": SPEC_TYPE_VALUE,
        "name": "Agent",
        "services": [{"type": "a2a", "url": "https://a2a.example.com"}],
        "supportedTrust": ["reputation"],
    }));
    assert!(metadata.categories.is_base64());
    assert!(metadata.categories.is_spec_compliant);
    assert!(metadata.categories.is_a2a);
    assert_eq!(metadata.entries.supported_trust, Some(vec!["reputation".to_string()]));
}

// Protocol validators

#[test]
fn validators_run_after_document_findings() {
    let validators = ProtocolValidators::new()
        .with_mcp(|endpoint: &str| EndpointReport::failed([format!("{endpoint} unreachable")]));

    let uri = base64_uri(REAL_WORLD_BASE64);
    let result = validate_from_uri(Some(&uri), None, None, &validators);

    assert_eq!(result.messages.len(), 5);
    assert_eq!(
        result.messages[4],
        "services[0].url (MCP): https://mcp.example.com unreachable"
    );
}

#[test]
fn validators_are_skipped_for_undecoded_uris() {
    let validators = ProtocolValidators::new()
        .with_mcp(|_: &str| -> EndpointReport { panic!("must not be called") });
    let result = validate_from_uri(Some("https://a.example"), None, None, &validators);
    assert_eq!(result.messages.len(), 1);
}

#[test]
fn passing_validators_keep_status() {
    let validators = ProtocolValidators::new().with_mcp(|_: &str| EndpointReport::passed());
    let result = full_pipeline(&registered_log(ABI_ENCODED_SPEC_URI), &validators);
    assert!(result.status);
}

#[cfg(feature = "serde")]
#[test]
fn serialized_result_uses_camel_case_keys() {
    let result = full_pipeline(&registered_log(ABI_ENCODED_SPEC_URI), &no_validators());
    let value = serde_json::to_value(&result).unwrap();

    let categories: Vec<&str> = value["categories"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        categories,
        vec![
            "isEmpty", "isBase64", "isHttp", "isIpfs", "isJson", "isGzip", "isUnknown",
            "isParseable", "isSpecCompliant", "isX402", "isMcp", "isA2A", "isActive",
        ]
    );

    assert_eq!(value["entries"]["uriAgentType"], "base64");
    assert_eq!(value["entries"]["x402Support"], true);
    assert_eq!(value["entries"]["agentId"], "42");
    assert_eq!(
        value["entries"]["services"],
        json!([{"protocol": "mcp", "endpoint": "https://mcp.example.com"}])
    );
}
