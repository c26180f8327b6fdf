//! Decoding of type-tagged application state.
//!
//! The node reports application state as a list of entries whose values
//! carry a numeric type tag (1 = bytes, 2 = uint). Interpretation of the
//! tag is an explicit, total function: an unknown tag is a decode error,
//! never a silent fallthrough.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Deserialize;

use crate::ledger::types::{LedgerError, LedgerResult};

/// A decoded state value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TealValue {
    Uint(u64),
    Bytes(Vec<u8>),
}

/// Decoded key/value state, keyed by the UTF-8 form of the key.
pub type StateMap = BTreeMap<String, TealValue>;

/// Wire shape of one state entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStateEntry {
    /// Base64-encoded key.
    pub key: String,
    pub value: RawTealValue,
}

/// Wire shape of a type-tagged value.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTealValue {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub bytes: String,
    #[serde(default)]
    pub uint: u64,
}

/// Decode a list of raw entries into a typed map.
pub fn decode_state(entries: &[RawStateEntry]) -> LedgerResult<StateMap> {
    let mut out = StateMap::new();
    for entry in entries {
        let key_bytes = BASE64
            .decode(&entry.key)
            .map_err(|e| LedgerError::Decode(format!("state key: {}", e)))?;
        let key = String::from_utf8_lossy(&key_bytes).into_owned();

        let value = match entry.value.kind {
            1 => {
                let bytes = BASE64
                    .decode(&entry.value.bytes)
                    .map_err(|e| LedgerError::Decode(format!("state value for '{}': {}", key, e)))?;
                TealValue::Bytes(bytes)
            }
            2 => TealValue::Uint(entry.value.uint),
            other => {
                return Err(LedgerError::Decode(format!(
                    "unknown state value tag {} for '{}'",
                    other, key
                )))
            }
        };
        out.insert(key, value);
    }
    Ok(out)
}

/// Read an unsigned value from a decoded map, defaulting to zero.
///
/// Absent keys read as zero: the contract only writes counters once they
/// become nonzero.
pub fn uint_value(state: &StateMap, key: &str) -> u64 {
    match state.get(key) {
        Some(TealValue::Uint(v)) => *v,
        _ => 0,
    }
}
