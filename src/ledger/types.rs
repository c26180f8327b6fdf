//! Ledger-facing types and error definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha512_256};
use thiserror::Error;

/// Application id on the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppId(pub u64);

impl AppId {
    /// Derive the application's escrow address.
    ///
    /// The escrow is the hash of a domain-separated encoding of the id,
    /// so it can be computed without any network round-trip.
    pub fn escrow_address(&self) -> Address {
        let mut hasher = Sha512_256::new();
        hasher.update(b"appID");
        hasher.update(self.0.to_be_bytes());
        Address(hasher.finalize().into())
    }
}

/// Ledger-native asset id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(pub u64);

/// Amount in microalgos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct MicroAlgos(pub u64);

/// Ledger round number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Round(pub u64);

/// Transaction id as reported by the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxId(pub String);

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A 32-byte account address (ed25519 public key).
///
/// Displayed and parsed as base58-check; obtained from a wallet or parsed
/// from user input, never constructed from key material in this crate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub [u8; 32]);

impl Address {
    /// The zero address. Assigning an asset authority to it revokes
    /// that authority permanently.
    pub const ZERO: Address = Address([0u8; 32]);

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(&self.0).with_check().into_string())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

/// Error parsing an address from its string form.
#[derive(Debug, Error)]
#[error("invalid address: {0}")]
pub struct AddressParseError(String);

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s)
            .with_check(None)
            .into_vec()
            .map_err(|e| AddressParseError(e.to_string()))?;
        let array: [u8; 32] = bytes
            .try_into()
            .map_err(|_| AddressParseError("wrong length".to_string()))?;
        Ok(Address(array))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors from ledger node interaction.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Network-level failure reaching the node. Retryable by the caller.
    #[error("node transport error: {0}")]
    Transport(String),

    /// The node answered with a non-success status.
    #[error("node returned {status}: {message}")]
    Node { status: u16, message: String },

    /// The submitted transaction was rejected by the ledger.
    #[error("transaction rejected: {0}")]
    Rejected(String),

    /// The round budget was exhausted before the transaction settled.
    /// Distinct from rejection; the transaction may still apply later.
    #[error("transaction not settled after {0} rounds")]
    SettlementTimeout(u64),

    /// Remote state could not be decoded.
    #[error("state decode error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for LedgerError {
    fn from(e: reqwest::Error) -> Self {
        LedgerError::Transport(e.to_string())
    }
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
