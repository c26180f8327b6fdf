//! Transaction composition subsystem.
//!
//! # Data Flow
//! ```text
//! SuggestedParams (one fetch per group)
//!     → builder.rs (typed transaction records, flat fee)
//!     → abi.rs (method selectors, uint64 args, return values)
//!     → group.rs (atomic group id, all-or-nothing semantics)
//!     → wallet session (signing) → ledger client (submission)
//! ```

pub mod abi;
pub mod builder;
pub mod group;

pub use builder::{
    encode_group, AppArg, AssetParams, GroupId, OnComplete, SignedTxn, Transaction, TxnBody,
};
pub use group::{AtomicGroup, GroupError, MAX_GROUP_SIZE};
