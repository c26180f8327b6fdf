//! Fixed-supply asset creation.
//!
//! Creates ledger-native assets with every authority revoked at birth:
//! no manager, reserve, freeze, or clawback. Supply is fixed forever at
//! creation time.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ledger::client::AlgodClient;
use crate::ledger::types::{Address, TxId};
use crate::txn::{encode_group, AssetParams, Transaction};
use crate::wallet::WalletSession;

use super::app::ConsoleError;

/// Longest unit name the ledger accepts.
const MAX_UNIT_NAME_LEN: usize = 8;
/// Largest decimals value the ledger accepts.
const MAX_DECIMALS: u32 = 19;

/// A request to mint a new fixed-supply asset.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetCreateRequest {
    pub asset_name: String,
    pub unit_name: String,
    /// Supply in whole units; scaled by `decimals` into base units.
    pub supply: u64,
    #[serde(default)]
    pub decimals: u32,
}

impl AssetCreateRequest {
    /// Validate and scale into ledger asset parameters.
    ///
    /// All authorities are set to the zero address, which revokes them
    /// permanently.
    fn into_params(self) -> Result<AssetParams, ConsoleError> {
        let asset_name = self.asset_name.trim().to_string();
        if asset_name.is_empty() {
            return Err(ConsoleError::Validation(
                "asset name is required".to_string(),
            ));
        }
        let unit_name = self.unit_name.trim().to_string();
        if unit_name.is_empty() {
            return Err(ConsoleError::Validation(
                "unit name is required".to_string(),
            ));
        }
        if unit_name.len() > MAX_UNIT_NAME_LEN {
            return Err(ConsoleError::Validation(format!(
                "unit name exceeds {} characters",
                MAX_UNIT_NAME_LEN
            )));
        }
        if self.decimals > MAX_DECIMALS {
            return Err(ConsoleError::Validation(format!(
                "decimals exceeds {}",
                MAX_DECIMALS
            )));
        }
        if self.supply == 0 {
            return Err(ConsoleError::Validation(
                "supply must be positive".to_string(),
            ));
        }
        let total = 10u64
            .checked_pow(self.decimals)
            .and_then(|scale| self.supply.checked_mul(scale))
            .ok_or_else(|| {
                ConsoleError::Validation("supply overflows at this precision".to_string())
            })?;
        Ok(AssetParams {
            asset_name,
            unit_name,
            total,
            decimals: self.decimals,
            default_frozen: false,
            manager: Address::ZERO,
            reserve: Address::ZERO,
            freeze: Address::ZERO,
            clawback: Address::ZERO,
        })
    }
}

/// Outcome of a settled asset creation.
#[derive(Debug, Clone, Serialize)]
pub struct AssetCreated {
    pub txid: TxId,
    pub asset_id: Option<u64>,
    pub confirmed_round: Option<u64>,
}

/// Mints fixed-supply assets.
#[derive(Debug, Clone)]
pub struct AssetCreator {
    client: AlgodClient,
    flat_fee: u64,
    wait_rounds: u64,
}

impl AssetCreator {
    pub fn new(client: AlgodClient, flat_fee: u64, wait_rounds: u64) -> Self {
        Self {
            client,
            flat_fee,
            wait_rounds,
        }
    }

    /// Validate, sign, submit, and await the creation transaction.
    pub async fn create(
        &self,
        session: &Arc<WalletSession>,
        request: AssetCreateRequest,
    ) -> Result<AssetCreated, ConsoleError> {
        let params = request.into_params()?;
        let sender = session.address()?;

        let suggested = self.client.suggested_params().await?;
        let txn = Transaction::asset_create(sender, params, &suggested, self.flat_fee);
        let signed = session.sign(std::slice::from_ref(&txn)).await?;
        let txid = self.client.submit(encode_group(&signed)).await?;
        let info = self.client.wait_for_settlement(&txid, self.wait_rounds).await?;
        tracing::info!(txid = %txid, asset = ?info.asset_index, "Asset created");
        Ok(AssetCreated {
            txid,
            asset_id: info.asset_index,
            confirmed_round: info.confirmed_round,
        })
    }
}
