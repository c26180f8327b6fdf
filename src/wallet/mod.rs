//! Wallet integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment variable (hex seed)
//!     → local.rs (test-key signer, dev networks only)
//!     → session.rs (connect / disconnect lifecycle)
//!     → signer.rs trait consumed by the console
//! ```
//!
//! # Security Constraints
//! - Key material never crosses the `TxnSigner` boundary
//! - Seeds are loaded only from environment variables, never config files
//! - Never log seeds or signatures

pub mod local;
pub mod session;
pub mod signer;

pub use local::LocalSigner;
pub use session::WalletSession;
pub use signer::{TxnSigner, WalletError, WalletResult};
