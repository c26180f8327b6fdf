//! Token-pair scanner subsystem.
//!
//! # Responsibilities
//! - Relay pair searches to the upstream market-data aggregator
//! - Score each pair with a qualitative risk heuristic
//! - Record trade intents on the ledger via the logger application
//!
//! # Data Flow
//! ```text
//! search query → proxy.rs (upstream fetch, chain filter)
//!     → types.rs (pair records) → risk.rs (per-pair report)
//! trade intent → trade_log.rs (app call, settle)
//! ```

pub mod proxy;
pub mod risk;
pub mod trade_log;
pub mod types;

pub use proxy::{ScannerError, SearchRelay, SearchResults};
pub use risk::{compute_risk, FlagLevel, RiskItem, RiskLevel, RiskReport};
pub use trade_log::{TradeLogError, TradeLogger, TradeReceipt, TradeSide};
pub use types::DexPair;
