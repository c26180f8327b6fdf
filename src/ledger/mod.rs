//! Ledger integration subsystem.
//!
//! # Data Flow
//! ```text
//! AlgodConfig (URL, token, timeouts)
//!     → client.rs (REST adapter with per-request timeouts)
//!     → state.rs (type-tagged key/value decoding)
//!     → typed state maps consumed by the console
//! ```
//!
//! # Design Constraints
//! - The remote ledger is the sole source of truth; decoded state is a
//!   stale projection, re-fetched on demand
//! - A 404 reading account participation means "not opted in"
//! - No automatic retries anywhere

pub mod client;
pub mod state;
pub mod types;

pub use client::{AlgodClient, PendingInfo, SuggestedParams};
pub use state::{decode_state, uint_value, StateMap, TealValue};
pub use types::{Address, AppId, AssetId, LedgerError, LedgerResult, MicroAlgos, Round, TxId};
