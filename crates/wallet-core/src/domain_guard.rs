// xHD Wallet Core — ARC-0052 BIP32-Ed25519 wallet
// SPDX-License-Identifier: GPL-3.0-or-later
//
// domain_guard: the security-critical gate in front of signData (§4.9, §6)
//
// Types:
//   Encoding     — None | Base64 | MsgPack
//   SignMetadata — { encoding, schema }
// Functions:
//   validate_data() — reserved-prefix + decode + JSON-Schema check
//   is_valid()      — bool wrapper matching the spec's validateData()

use base64::Engine;
use serde_json::Value;

use crate::error::WalletError;

/// Reserved ASCII prefixes a signed blob must never start with, raw or
/// decoded — these tag blockchain-native signed objects (§6).
pub const RESERVED_PREFIXES: &[&str] = &[
    "appID", "arc", "aB", "aD", "aO", "aP", "aS", "AS", "B256", "BH", "BR", "CR", "GE", "KP",
    "MA", "MB", "MX", "NIC", "NIR", "NIV", "NPR", "OT1", "OT2", "PF", "PL", "Program", "ProgData",
    "PS", "PK", "SD", "SpecialAddr", "STIB", "spc", "spm", "spp", "sps", "spv", "TE", "TG", "TL",
    "TX", "VO",
];

/// How `signData`'s payload is encoded before the domain guard and schema
/// validation see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    None,
    Base64,
    MsgPack,
}

/// The metadata `signData` needs to decode and validate a payload.
#[derive(Debug, Clone)]
pub struct SignMetadata {
    pub encoding: Encoding,
    pub schema: Value,
}

impl SignMetadata {
    pub fn new(encoding: Encoding, schema: Value) -> Self {
        Self { encoding, schema }
    }
}

fn has_reserved_prefix(data: &[u8]) -> bool {
    RESERVED_PREFIXES.iter().any(|prefix| data.starts_with(prefix.as_bytes()))
}

fn decode(data: &[u8], encoding: Encoding) -> Result<Vec<u8>, WalletError> {
    match encoding {
        Encoding::None => Ok(data.to_vec()),
        Encoding::Base64 => base64::engine::general_purpose::STANDARD
            .decode(data)
            .map_err(|e| WalletError::DataValidation(format!("base64 decode failed: {e}"))),
        Encoding::MsgPack => {
            let value: Value = rmp_serde::from_slice(data)
                .map_err(|e| WalletError::DataValidation(format!("msgpack decode failed: {e}")))?;
            serde_json::to_vec(&value)
                .map_err(|e| WalletError::DataValidation(format!("canonical JSON re-encode failed: {e}")))
        }
    }
}

/// `validateData` (§4.9): reserved-prefix check on the raw bytes, decode by
/// `metadata.encoding`, reserved-prefix check again on the decoded bytes,
/// then JSON-Schema validation of the decoded bytes as JSON text.
pub fn validate_data(data: &[u8], metadata: &SignMetadata) -> Result<(), WalletError> {
    if has_reserved_prefix(data) {
        return Err(WalletError::DataValidation(
            "raw input matches a reserved blockchain tag prefix".into(),
        ));
    }

    let decoded = decode(data, metadata.encoding)?;

    if has_reserved_prefix(&decoded) {
        return Err(WalletError::DataValidation(
            "decoded input matches a reserved blockchain tag prefix".into(),
        ));
    }

    let json_text = std::str::from_utf8(&decoded)
        .map_err(|e| WalletError::DataValidation(format!("decoded payload is not valid UTF-8: {e}")))?;
    let instance: Value = serde_json::from_str(json_text)
        .map_err(|e| WalletError::DataValidation(format!("decoded payload is not valid JSON: {e}")))?;

    let validator = jsonschema::validator_for(&metadata.schema)
        .map_err(|e| WalletError::DataValidation(format!("invalid JSON schema: {e}")))?;
    validator
        .validate(&instance)
        .map_err(|e| WalletError::DataValidation(format!("schema validation failed: {e}")))?;

    Ok(())
}

/// Bool-returning form matching the spec's `validateData(data, encoding) -> bool`.
pub fn is_valid(data: &[u8], metadata: &SignMetadata) -> bool {
    validate_data(data, metadata).is_ok()
}
