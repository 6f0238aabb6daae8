use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ethers::types::U256;
use serde_json::json;
use thiserror::Error;

use crate::types::payroll::InsufficientBalanceReport;

#[derive(Error, Debug)]
pub enum DisburseError {
    #[error("invalid request: {0}")]
    InvalidInput(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("employer {employer} holds {available} of the {requested} base units requested")]
    InsufficientBalance {
        employer: String,
        requested: U256,
        available: U256,
    },
    #[error("{0}")]
    Config(String),
    #[error("ledger error: {0}")]
    Ledger(String),
}

// Clients distinguish outcomes by body shape, not status: an underfunded
// employer is reported with status 200 and everything else as a 500 envelope.
impl From<&DisburseError> for StatusCode {
    fn from(error: &DisburseError) -> Self {
        match error {
            DisburseError::InvalidInput(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DisburseError::Unauthorized => StatusCode::INTERNAL_SERVER_ERROR,
            DisburseError::InsufficientBalance { .. } => StatusCode::OK,
            DisburseError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DisburseError::Ledger(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DisburseError {
    fn into_response(self) -> Response {
        let status = StatusCode::from(&self);
        match self {
            DisburseError::InsufficientBalance {
                employer,
                requested,
                available,
            } => {
                tracing::warn!(
                    %employer,
                    %requested,
                    %available,
                    "insufficient employer balance, no transaction submitted"
                );
                let report = InsufficientBalanceReport {
                    employer,
                    total_balance: requested.to_string(),
                    balance: available.to_string(),
                };
                (status, Json(report)).into_response()
            }
            other => {
                let message = other.to_string();
                if matches!(other, DisburseError::InvalidInput(_)) {
                    tracing::warn!(error = %message, "rejected disbursement request");
                } else {
                    tracing::error!(error = %message, "disbursement request failed");
                }
                (status, Json(json!({ "err": message }))).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_balance_maps_to_ok() {
        let error = DisburseError::InsufficientBalance {
            employer: "0x1111111111111111111111111111111111111111".to_string(),
            requested: U256::from(150_000_000u64),
            available: U256::from(100_000_000u64),
        };
        assert_eq!(StatusCode::from(&error), StatusCode::OK);
    }

    #[test]
    fn other_failures_map_to_internal_error() {
        let errors = [
            DisburseError::InvalidInput("missing employer address".to_string()),
            DisburseError::Config("signing credential is not configured".to_string()),
            DisburseError::Ledger("connection refused".to_string()),
        ];
        for error in errors {
            assert_eq!(StatusCode::from(&error), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
