//! Ledger dapp gateway.
//!
//! HTTP front door for a burn/fund/claim contract, a fixed-supply asset
//! minter, an airdrop planner, and a token-pair scanner backed by an
//! external market-data aggregator.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌───────────────────────────────────────────────┐
//!                 │                   GATEWAY                      │
//!   HTTP request  │  ┌──────┐   ┌─────────┐   ┌─────────────────┐ │
//!   ──────────────┼─▶│ http │──▶│ console │──▶│ txn (build/sign │ │
//!                 │  └──┬───┘   └────┬────┘   │  groups, ABI)   │ │
//!                 │     │            │        └────────┬────────┘ │
//!                 │     │            ▼                 ▼          │
//!                 │     │       ┌────────┐      ┌───────────┐    │      ledger
//!                 │     │       │ wallet │      │  ledger   │────┼──▶   node
//!                 │     │       │session │      │  client   │    │
//!                 │     │       └────────┘      └───────────┘    │
//!                 │     ▼                                        │
//!                 │  ┌─────────┐                                 │     market-data
//!                 │  │ scanner │─────────────────────────────────┼──▶  aggregator
//!                 │  └─────────┘                                 │
//!                 │  config / observability cross-cutting        │
//!                 └───────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod console;
pub mod http;
pub mod ledger;
pub mod scanner;
pub mod txn;
pub mod wallet;

// Cross-cutting concerns
pub mod observability;

pub use config::{load_config, GatewayConfig};
pub use http::{AppState, HttpServer};
