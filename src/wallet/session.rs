//! Wallet session lifecycle.
//!
//! Tracks the single connected signer for the process. Connecting an
//! already-connected session is a no-op returning the existing address;
//! after disconnect, signing fails with a "not connected" condition
//! until reconnected.

use std::sync::{Arc, Mutex};

use crate::ledger::types::Address;
use crate::txn::{SignedTxn, Transaction};
use crate::wallet::signer::{TxnSigner, WalletError, WalletResult};

/// The session holding the current signing capability, if any.
#[derive(Default)]
pub struct WalletSession {
    current: Mutex<Option<Arc<dyn TxnSigner>>>,
}

impl WalletSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<Arc<dyn TxnSigner>>> {
        self.current.lock().expect("wallet session lock poisoned")
    }

    /// Establish a session. Idempotent: if a signer is already connected
    /// its address is returned and the new signer is dropped.
    pub fn connect(&self, signer: Arc<dyn TxnSigner>) -> Address {
        let mut slot = self.slot();
        if let Some(existing) = slot.as_ref() {
            return existing.address();
        }
        let address = signer.address();
        *slot = Some(signer);
        tracing::info!(address = %address, "Wallet connected");
        address
    }

    /// Tear down the session.
    pub fn disconnect(&self) {
        if self.slot().take().is_some() {
            tracing::info!("Wallet disconnected");
        }
    }

    pub fn is_connected(&self) -> bool {
        self.slot().is_some()
    }

    /// Address of the connected signer.
    pub fn address(&self) -> WalletResult<Address> {
        self.slot()
            .as_ref()
            .map(|s| s.address())
            .ok_or(WalletError::NotConnected)
    }

    /// Sign through the connected signer.
    pub async fn sign(&self, txns: &[Transaction]) -> WalletResult<Vec<SignedTxn>> {
        let signer = self.slot().clone().ok_or(WalletError::NotConnected)?;
        signer.sign(txns).await
    }
}

impl std::fmt::Debug for WalletSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletSession")
            .field("connected", &self.is_connected())
            .finish()
    }
}
