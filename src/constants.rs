//! Constants for ERC-8004 event decoding and registration validation.

use alloy_primitives::B256;
use alloy_sol_types::SolEvent;

use crate::abi::IIdentityRegistry::{Registered, URIUpdated};

/// `topics[0]` of the identity registry `Registered` event.
pub const REGISTERED_TOPIC0: B256 = Registered::SIGNATURE_HASH;

/// `topics[0]` of the identity registry `URIUpdated` event.
pub const URI_UPDATED_TOPIC0: B256 = URIUpdated::SIGNATURE_HASH;

/// Event signatures this crate decodes. Both carry the same layout.
pub const KNOWN_TOPIC0S: [B256; 2] = [REGISTERED_TOPIC0, URI_UPDATED_TOPIC0];

/// Minimum length of the `data` string: one offset word plus one length word.
pub const MIN_DATA_HEX_LENGTH: usize = 66;

/// Required value of the registration document `type` field.
pub const SPEC_TYPE_VALUE: &str = "https://eips.ethereum.org/EIPS/eip-8004#registration-v1";

/// Service protocols defined by the registration format.
pub const KNOWN_PROTOCOLS: [&str; 5] = ["mcp", "a2a", "oasf", "ens", "did"];

/// Values accepted in `supportedTrust`.
pub const KNOWN_TRUST_TYPES: [&str; 3] = ["reputation", "crypto-economic", "tee-attestation"];

/// Top-level fields defined by the registration format.
pub const KNOWN_SPEC_FIELDS: [&str; 8] = [
    "type",
    "name",
    "description",
    "image",
    "services",
    "x402Support",
    "active",
    "supportedTrust",
];

/// Lower-case alias of `x402Support` seen in deployed registrations.
pub const X402_LOWERCASE_ALIAS: &str = "x402support";

/// Prefix of a plain base64 data URI.
pub const BASE64_DATA_PREFIX: &str = "data:application/json;base64,";
