//! Signing capability abstraction.
//!
//! A signer is obtained externally and bound to a key the application
//! never sees. The trait exposes only the address and a bulk signing
//! operation over unsigned transactions.

use async_trait::async_trait;
use thiserror::Error;

use crate::ledger::types::Address;
use crate::txn::{SignedTxn, Transaction};

/// Errors from wallet interaction.
#[derive(Debug, Error)]
pub enum WalletError {
    /// No session is established. Cleared by connecting.
    #[error("no wallet connected")]
    NotConnected,

    /// The user declined to sign. Recoverable: the caller may resubmit.
    #[error("signing rejected by wallet")]
    Rejected,

    /// Key loading or signing machinery failed.
    #[error("wallet key error: {0}")]
    Key(String),
}

/// Result type for wallet operations.
pub type WalletResult<T> = Result<T, WalletError>;

/// A signing capability bound to an externally-held key.
#[async_trait]
pub trait TxnSigner: Send + Sync {
    /// The address this signer authorizes for.
    fn address(&self) -> Address;

    /// Sign the given transactions, preserving order.
    ///
    /// Key material never crosses this boundary; only signed encodings
    /// are returned.
    async fn sign(&self, txns: &[Transaction]) -> WalletResult<Vec<SignedTxn>>;
}
