//! Local test-key signer.
//!
//! # Security
//! - The signing seed is loaded ONLY from an environment variable
//! - Seeds are never logged or serialized
//!
//! Intended for development networks; production deployments connect a
//! remote wallet instead.

use async_trait::async_trait;
use ed25519_dalek::{Signer as _, SigningKey};

use crate::ledger::types::Address;
use crate::txn::{SignedTxn, Transaction};
use crate::wallet::signer::{TxnSigner, WalletError, WalletResult};

/// Domain separator prepended to transaction encodings before signing.
const SIGN_PREFIX: &[u8] = b"TX";

/// Signer backed by a locally-held ed25519 seed.
pub struct LocalSigner {
    key: SigningKey,
    address: Address,
}

impl LocalSigner {
    /// Create a signer from a hex-encoded 32-byte seed.
    pub fn from_hex_seed(seed_hex: &str) -> WalletResult<Self> {
        let bytes = hex::decode(seed_hex.trim())
            .map_err(|e| WalletError::Key(format!("invalid seed hex: {}", e)))?;
        let seed: [u8; 32] = bytes
            .try_into()
            .map_err(|_| WalletError::Key("seed must be 32 bytes".to_string()))?;
        let key = SigningKey::from_bytes(&seed);
        let address = Address(key.verifying_key().to_bytes());

        tracing::info!(address = %address, "Local signer initialized");

        Ok(Self { key, address })
    }

    /// Load the seed from the named environment variable.
    pub fn from_env(var: &str) -> WalletResult<Self> {
        let seed = std::env::var(var)
            .map_err(|_| WalletError::Key(format!("environment variable {} not set", var)))?;
        Self::from_hex_seed(&seed)
    }
}

#[async_trait]
impl TxnSigner for LocalSigner {
    fn address(&self) -> Address {
        self.address
    }

    async fn sign(&self, txns: &[Transaction]) -> WalletResult<Vec<SignedTxn>> {
        let mut signed = Vec::with_capacity(txns.len());
        for txn in txns {
            let mut message = SIGN_PREFIX.to_vec();
            message.extend_from_slice(&txn.encode());
            let sig = self.key.sign(&message);
            signed.push(SignedTxn {
                txn: txn.clone(),
                sig: sig.to_bytes().to_vec(),
            });
        }
        Ok(signed)
    }
}

impl std::fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose key material.
        f.debug_struct("LocalSigner")
            .field("address", &self.address)
            .finish()
    }
}
