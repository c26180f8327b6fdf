//! Contract console subsystem.
//!
//! # Responsibilities
//! - Drive the burn/fund/claim contract flows (app.rs)
//! - Serialize in-flight actions per label (pending.rs)
//! - Mint fixed-supply assets (assets.rs)
//! - Plan grouped token distributions (airdrop.rs)
//!
//! # Design Decisions
//! - Local validation always precedes network traffic
//! - Every settled or failed action is followed by a state refresh
//! - The ledger, not cached state, decides claim eligibility

pub mod airdrop;
pub mod app;
pub mod assets;
pub mod pending;

pub use airdrop::{build_transfers, parse_rows, AirdropPlan, AirdropRow};
pub use app::{
    ActionOutcome, AppSnapshot, BurnConsole, ConsoleError, ConsoleState, OptInOutcome, Position,
};
pub use assets::{AssetCreateRequest, AssetCreated, AssetCreator};
pub use pending::{ActionGuard, PendingActions};
