use ethers::types::{Address, H256, U256};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use crate::types::error::DisburseError;
use crate::utils::units::to_base_units;

/// One worker payment as submitted by the caller. Amounts arrive in
/// human-readable token units (e.g. `100.50`).
#[derive(Clone, Debug, Deserialize)]
pub struct PaymentLineItem {
    #[serde(default)]
    pub address: String,
    #[serde(deserialize_with = "decimal_from_json_number")]
    pub amount: Decimal,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DisbursementRequest {
    #[serde(default)]
    pub employer: String,
    #[serde(default)]
    pub data: Vec<PaymentLineItem>,
}

/// A validated request with every amount scaled to token base units.
#[derive(Clone, Debug)]
pub struct NormalizedBatch {
    pub employer: Address,
    pub payments: Vec<(Address, U256)>,
    pub total_units: U256,
}

impl DisbursementRequest {
    pub fn validate(&self) -> Result<(), DisburseError> {
        if self.employer.trim().is_empty() {
            return Err(DisburseError::InvalidInput(
                "missing employer address".to_string(),
            ));
        }
        if self.data.is_empty() {
            return Err(DisburseError::InvalidInput(
                "payment data must be a non-empty list".to_string(),
            ));
        }
        for item in &self.data {
            if item.amount <= Decimal::ZERO {
                return Err(DisburseError::InvalidInput(format!(
                    "payment amount must be positive, got {}",
                    item.amount
                )));
            }
        }
        Ok(())
    }

    pub fn normalize(&self) -> Result<NormalizedBatch, DisburseError> {
        let employer = parse_address(&self.employer)?;

        let mut payments = Vec::with_capacity(self.data.len());
        for item in &self.data {
            payments.push((parse_address(&item.address)?, to_base_units(item.amount)?));
        }

        // The on-chain total is the scaled sum of the decimal amounts, not the
        // sum of the per-item base units. The two differ once a line item
        // carries more precision than the token does.
        let mut total = Decimal::ZERO;
        for item in &self.data {
            total = total
                .checked_add(item.amount)
                .ok_or_else(|| DisburseError::InvalidInput("batch total out of range".to_string()))?;
        }

        Ok(NormalizedBatch {
            employer,
            payments,
            total_units: to_base_units(total)?,
        })
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisbursementReceipt {
    pub transaction_hash: H256,
    pub timestamp: String,
    // Carries the configured gas ceiling, not the gas consumed on-chain;
    // existing clients read the field under this name.
    pub gas_used: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct InsufficientBalanceReport {
    pub employer: String,
    #[serde(rename = "totalbalance")]
    pub total_balance: String,
    pub balance: String,
}

fn parse_address(raw: &str) -> Result<Address, DisburseError> {
    Address::from_str(raw.trim())
        .map_err(|_| DisburseError::InvalidInput(format!("malformed account address: {raw}")))
}

// JSON amounts are routed through their decimal-string form so the parsed
// value is exactly what the caller wrote, not a binary-float approximation.
fn decimal_from_json_number<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Number::deserialize(deserializer)?.to_string();
    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .map_err(serde::de::Error::custom)
}
