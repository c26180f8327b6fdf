//! Burn contract console.
//!
//! # Responsibilities
//! - Project the contract's global state and the caller's position
//! - Drive the burn, fund, claim, and opt-in flows end to end
//! - Enforce local validation and the one-action-per-label guard before
//!   any network traffic
//!
//! # Data Flow
//! ```text
//! action request
//!     → validate locally (amounts, connection, busy guard)
//!     → suggested params → build txns → wallet sign
//!     → submit group → await settlement
//!     → refresh snapshot + position (always, even after failure)
//! ```

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::ledger::client::{AlgodClient, PendingInfo};
use crate::ledger::state::{uint_value, StateMap, TealValue};
use crate::ledger::types::{Address, AppId, AssetId, LedgerError, MicroAlgos, TxId};
use crate::txn::{
    abi, encode_group, AppArg, AtomicGroup, GroupError, OnComplete, Transaction,
};
use crate::wallet::{WalletError, WalletSession};

use super::pending::PendingActions;

const BURN_SIG: &str = "burn(uint64)uint64";
const FUND_SIG: &str = "fund()void";
const CLAIM_SIG: &str = "claim()uint64";

#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Request rejected locally before any network traffic.
    #[error("{0}")]
    Validation(String),

    /// Claim attempted with no shares to claim against.
    #[error("no shares to claim")]
    NoShares,

    /// An action with this label is already in flight.
    #[error("{0} already in progress")]
    Busy(String),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Group(#[from] GroupError),
}

/// Projection of the contract's global state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppSnapshot {
    pub initialized: bool,
    pub burn_asset: u64,
    pub admin: Option<Address>,
    pub total_burned: u64,
    pub total_shares: u64,
    pub reward_pool: u64,
}

impl AppSnapshot {
    fn from_state(state: &StateMap) -> Self {
        let admin = match state.get("admin") {
            Some(TealValue::Bytes(bytes)) if bytes.len() == 32 => {
                let mut raw = [0u8; 32];
                raw.copy_from_slice(bytes);
                Some(Address(raw))
            }
            _ => None,
        };
        Self {
            initialized: uint_value(state, "is_initialized") == 1,
            burn_asset: uint_value(state, "burn_asset"),
            admin,
            total_burned: uint_value(state, "total_burned"),
            total_shares: uint_value(state, "total_shares"),
            reward_pool: uint_value(state, "reward_pool"),
        }
    }
}

/// The caller's standing with the contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Position {
    pub opted_in: bool,
    pub shares: u64,
}

/// Combined view returned after every action.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConsoleState {
    pub app: AppSnapshot,
    pub position: Option<Position>,
}

/// Outcome of a settled action, with the refreshed view.
#[derive(Debug, Clone, Serialize)]
pub struct ActionOutcome {
    pub txid: TxId,
    pub confirmed_round: Option<u64>,
    /// ABI return value, when the method has one.
    pub returned: Option<u64>,
    pub state: ConsoleState,
}

/// Outcome of an opt-in. `txid` is `None` when the account was already
/// opted in and nothing was submitted.
#[derive(Debug, Clone, Serialize)]
pub struct OptInOutcome {
    pub txid: Option<TxId>,
    pub state: ConsoleState,
}

/// Drives the burn/fund/claim contract.
#[derive(Debug, Clone)]
pub struct BurnConsole {
    ledger: AlgodClient,
    session: Arc<WalletSession>,
    pending: PendingActions,
    app_id: AppId,
    default_asset: AssetId,
    flat_fee: u64,
    wait_rounds: u64,
}

impl BurnConsole {
    pub fn new(
        ledger: AlgodClient,
        session: Arc<WalletSession>,
        app_id: AppId,
        default_asset: AssetId,
        flat_fee: u64,
        wait_rounds: u64,
    ) -> Self {
        Self {
            ledger,
            session,
            pending: PendingActions::new(),
            app_id,
            default_asset,
            flat_fee,
            wait_rounds,
        }
    }

    pub fn ledger(&self) -> &AlgodClient {
        &self.ledger
    }

    pub fn session(&self) -> &Arc<WalletSession> {
        &self.session
    }

    /// Current global state of the contract.
    pub async fn snapshot(&self) -> Result<AppSnapshot, ConsoleError> {
        let state = self.ledger.application_state(self.app_id).await?;
        Ok(AppSnapshot::from_state(&state))
    }

    /// The given account's position. `None` means not opted in.
    pub async fn position(&self, address: &Address) -> Result<Position, ConsoleError> {
        let local = self.ledger.account_application(address, self.app_id).await?;
        Ok(match local {
            Some(state) => Position {
                opted_in: true,
                shares: uint_value(&state, "shares"),
            },
            None => Position::default(),
        })
    }

    /// Re-fetch the full view: global state plus the connected wallet's
    /// position, when a wallet is connected.
    pub async fn refresh(&self) -> Result<ConsoleState, ConsoleError> {
        let app = self.snapshot().await?;
        let position = match self.session.address() {
            Ok(address) => Some(self.position(&address).await?),
            Err(WalletError::NotConnected) => None,
            Err(e) => return Err(e.into()),
        };
        Ok(ConsoleState { app, position })
    }

    /// Burn tokens: an asset transfer into the escrow grouped with the
    /// `burn` method call. Returns the caller's updated share total.
    pub async fn burn(
        &self,
        amount: &str,
        asset_override: Option<AssetId>,
    ) -> Result<ActionOutcome, ConsoleError> {
        let amount = parse_amount(amount)?;
        let asset = asset_override.unwrap_or(self.default_asset);
        if asset.0 == 0 {
            return Err(ConsoleError::Validation(
                "no burn asset configured".to_string(),
            ));
        }
        let sender = self.session.address()?;
        let _guard = self.guard("burn")?;

        let params = self.ledger.suggested_params().await?;
        let transfer = Transaction::asset_transfer(
            sender,
            self.app_id.escrow_address(),
            amount,
            asset,
            &params,
            self.flat_fee,
        );
        let call = Transaction::app_call(
            sender,
            self.app_id,
            OnComplete::NoOp,
            vec![
                AppArg(abi::selector(BURN_SIG).to_vec()),
                AppArg(abi::encode_uint64(amount)),
            ],
            vec![asset],
            &params,
            self.flat_fee,
        );
        let mut group = AtomicGroup::new();
        group.add(transfer)?;
        group.add(call)?;
        let members = group.seal()?;

        self.submit_and_settle("burn", members).await
    }

    /// Fund the reward pool: a payment into the escrow grouped with the
    /// `fund` method call. The contract itself enforces who may fund.
    pub async fn fund(&self, amount_microalgos: &str) -> Result<ActionOutcome, ConsoleError> {
        let amount = parse_amount(amount_microalgos)?;
        let sender = self.session.address()?;
        let _guard = self.guard("fund")?;

        let params = self.ledger.suggested_params().await?;
        let payment = Transaction::payment(
            sender,
            self.app_id.escrow_address(),
            MicroAlgos(amount),
            &params,
            self.flat_fee,
        );
        let call = Transaction::app_call(
            sender,
            self.app_id,
            OnComplete::NoOp,
            vec![AppArg(abi::selector(FUND_SIG).to_vec())],
            vec![],
            &params,
            self.flat_fee,
        );
        let mut group = AtomicGroup::new();
        group.add(payment)?;
        group.add(call)?;
        let members = group.seal()?;

        self.submit_and_settle("fund", members).await
    }

    /// Claim the reward owed to the caller's shares. Rejected locally
    /// when the ledger reports no shares, so no transaction is built
    /// for a claim that must fail.
    pub async fn claim(&self) -> Result<ActionOutcome, ConsoleError> {
        let sender = self.session.address()?;
        let _guard = self.guard("claim")?;

        let position = self.position(&sender).await?;
        if !position.opted_in || position.shares == 0 {
            return Err(ConsoleError::NoShares);
        }
        let snapshot = self.snapshot().await?;

        let params = self.ledger.suggested_params().await?;
        let call = Transaction::app_call(
            sender,
            self.app_id,
            OnComplete::NoOp,
            vec![AppArg(abi::selector(CLAIM_SIG).to_vec())],
            vec![AssetId(snapshot.burn_asset)],
            &params,
            self.flat_fee,
        );
        let mut group = AtomicGroup::new();
        group.add(call)?;
        let members = group.seal()?;

        self.submit_and_settle("claim", members).await
    }

    /// Opt the caller's account into the contract's local state.
    ///
    /// A no-op when the account is already opted in: the current view is
    /// returned without building a transaction.
    pub async fn opt_in(&self) -> Result<OptInOutcome, ConsoleError> {
        let sender = self.session.address()?;
        let _guard = self.guard("optin")?;

        if self.position(&sender).await?.opted_in {
            return Ok(OptInOutcome {
                txid: None,
                state: self.refresh().await?,
            });
        }

        let params = self.ledger.suggested_params().await?;
        let call = Transaction::app_call(
            sender,
            self.app_id,
            OnComplete::OptIn,
            vec![],
            vec![],
            &params,
            self.flat_fee,
        );
        let mut group = AtomicGroup::new();
        group.add(call)?;
        let members = group.seal()?;

        let outcome = self.submit_and_settle("optin", members).await?;
        Ok(OptInOutcome {
            txid: Some(outcome.txid),
            state: outcome.state,
        })
    }

    fn guard(&self, label: &str) -> Result<super::pending::ActionGuard, ConsoleError> {
        self.pending
            .begin(label)
            .ok_or_else(|| ConsoleError::Busy(label.to_string()))
    }

    /// Sign, submit, await settlement, then refresh. The refresh runs
    /// after every failure too (sign, submit, or settlement), so the
    /// caller's next view is never staler than the attempt.
    async fn submit_and_settle(
        &self,
        action: &str,
        members: Vec<Transaction>,
    ) -> Result<ActionOutcome, ConsoleError> {
        let (txid, info) = match self.sign_submit_settle(action, &members).await {
            Ok(settled) => settled,
            Err(e) => {
                if let Err(refresh_err) = self.refresh().await {
                    tracing::warn!(action, error = %refresh_err, "Refresh after failure also failed");
                }
                return Err(e);
            }
        };
        let state = self.refresh().await?;
        Ok(ActionOutcome {
            txid,
            confirmed_round: info.confirmed_round,
            returned: abi::return_uint64(&info.logs),
            state,
        })
    }

    async fn sign_submit_settle(
        &self,
        action: &str,
        members: &[Transaction],
    ) -> Result<(TxId, PendingInfo), ConsoleError> {
        let signed = self.session.sign(members).await?;
        let txid = self.ledger.submit(encode_group(&signed)).await?;
        tracing::info!(action, txid = %txid, "Action submitted");

        let settled = self.ledger.wait_for_settlement(&txid, self.wait_rounds).await;
        crate::observability::metrics::record_settlement(action, settled.is_ok());
        Ok((txid, settled?))
    }
}

fn parse_amount(input: &str) -> Result<u64, ConsoleError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ConsoleError::Validation("amount is required".to_string()));
    }
    let amount: u64 = input
        .parse()
        .map_err(|_| ConsoleError::Validation(format!("invalid amount '{}'", input)))?;
    if amount == 0 {
        return Err(ConsoleError::Validation(
            "amount must be positive".to_string(),
        ));
    }
    Ok(amount)
}
