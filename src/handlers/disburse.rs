use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use tracing::info;

use crate::state::PayrollState;
use crate::types::{DisburseError, DisbursementReceipt, DisbursementRequest};

/// Pays a batch of workers from the employer's pre-funded contract balance in
/// a single transaction. Responds only after the network has confirmed it.
pub async fn disburse(
    State(state): State<PayrollState>,
    Json(request): Json<DisbursementRequest>,
) -> Result<Json<DisbursementReceipt>, DisburseError> {
    request.validate()?;
    let ledger = state.ledger()?;
    let batch = request.normalize()?;

    info!(
        employer = %request.employer,
        recipients = batch.payments.len(),
        total_units = %batch.total_units,
        "processing disbursement request"
    );

    // Hold the employer's lock across check and submission so a concurrent
    // request cannot pass the balance check against the same snapshot.
    let _submission_guard = state.employer_lock(batch.employer).await;

    let available = ledger.available_balance(batch.employer).await?;
    if available < batch.total_units {
        return Err(DisburseError::InsufficientBalance {
            employer: request.employer.clone(),
            requested: batch.total_units,
            available,
        });
    }

    let tx_hash = ledger
        .submit_payroll(batch.employer, &batch.payments, batch.total_units)
        .await?;
    info!(transaction = ?tx_hash, "disbursement confirmed");

    Ok(Json(DisbursementReceipt {
        transaction_hash: tx_hash,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        gas_used: state.gas_limit().to_string(),
    }))
}

/// Pre-flight negotiation always succeeds with no body.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method Not Allowed" })),
    )
}
