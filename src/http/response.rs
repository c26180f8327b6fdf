//! Error-to-response mapping.
//!
//! Every failure leaves the gateway as JSON `{"error": ...}` with a
//! status that tells the caller what kind of failure it was: their
//! request (4xx), the ledger's verdict (422), a timeout they may retry
//! (504), or something upstream (502). Ledger rejection messages pass
//! through verbatim.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::console::ConsoleError;
use crate::ledger::types::LedgerError;
use crate::scanner::{ScannerError, TradeLogError};
use crate::wallet::WalletError;

/// A failure ready to leave the gateway.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = %self.message, "Request failed");
        } else {
            tracing::debug!(status = %self.status, error = %self.message, "Request refused");
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<WalletError> for ApiError {
    fn from(e: WalletError) -> Self {
        let status = match e {
            WalletError::NotConnected => StatusCode::UNAUTHORIZED,
            WalletError::Rejected => StatusCode::UNPROCESSABLE_ENTITY,
            WalletError::Key(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiError::new(status, e.to_string())
    }
}

impl From<LedgerError> for ApiError {
    fn from(e: LedgerError) -> Self {
        let status = match e {
            LedgerError::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            LedgerError::SettlementTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            LedgerError::Transport(_) | LedgerError::Node { .. } => StatusCode::BAD_GATEWAY,
            LedgerError::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiError::new(status, e.to_string())
    }
}

impl From<ConsoleError> for ApiError {
    fn from(e: ConsoleError) -> Self {
        match e {
            ConsoleError::Validation(_) | ConsoleError::NoShares => {
                ApiError::new(StatusCode::BAD_REQUEST, e.to_string())
            }
            ConsoleError::Busy(_) => ApiError::new(StatusCode::CONFLICT, e.to_string()),
            ConsoleError::Wallet(inner) => inner.into(),
            ConsoleError::Ledger(inner) => inner.into(),
            ConsoleError::Group(_) => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        }
    }
}

impl From<ScannerError> for ApiError {
    fn from(e: ScannerError) -> Self {
        let status = match e {
            ScannerError::MissingQuery => StatusCode::BAD_REQUEST,
            // The upstream status rides in the message.
            ScannerError::Upstream { .. } | ScannerError::Transport(_) => StatusCode::BAD_GATEWAY,
            ScannerError::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiError::new(status, e.to_string())
    }
}

impl From<TradeLogError> for ApiError {
    fn from(e: TradeLogError) -> Self {
        match e {
            TradeLogError::NotConfigured => ApiError::new(StatusCode::BAD_REQUEST, e.to_string()),
            TradeLogError::Wallet(inner) => inner.into(),
            TradeLogError::Ledger(inner) => inner.into(),
        }
    }
}
