//! HTTP API subsystem.
//!
//! # Data Flow
//! ```text
//! request → server.rs (router, timeout, request id, metrics, trace)
//!     → handlers.rs (parse, dispatch to console/scanner/wallet)
//!     → response.rs (error taxonomy → status + JSON body)
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use response::ApiError;
pub use server::{AppState, HttpServer, ServerError};
