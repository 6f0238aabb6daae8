use ethers::types::{Address, U256};
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::types::DisburseError;

/// Address the payroll contract is deployed at.
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x9ae4736a4c8d61e06cf5c4ebd0c5f9a04e2f1c55";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_RPC_URL: &str = "https://polygon-rpc.com";
const DEFAULT_CHAIN_ID: u64 = 137;
/// Fixed gas ceiling for one payout transaction, in gas units.
const DEFAULT_GAS_LIMIT: u64 = 3_000_000;
/// Fixed gas price, in gwei.
const DEFAULT_GAS_PRICE_GWEI: u64 = 40;
const DEFAULT_CONFIRM_TIMEOUT_SECS: u64 = 120;

/// Process configuration, read from the environment once at startup. The gas
/// settings are fixed constants, not estimated from network conditions.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub rpc_url: String,
    pub contract_address: Address,
    pub chain_id: u64,
    /// Absent when `PRIVATE_KEY` is unset; the service then rejects every
    /// disbursement request with a configuration failure.
    pub signer_key: Option<String>,
    pub gas_limit: U256,
    pub gas_price: U256,
    pub confirm_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, DisburseError> {
        let bind_addr = var_or("BIND_ADDR", DEFAULT_BIND_ADDR)
            .parse()
            .map_err(|_| bad_var("BIND_ADDR"))?;
        let rpc_url = var_or("RPC_URL", DEFAULT_RPC_URL);
        let contract_address = var_or("PAYROLL_CONTRACT", DEFAULT_CONTRACT_ADDRESS)
            .parse()
            .map_err(|_| bad_var("PAYROLL_CONTRACT"))?;
        let chain_id = var_or("CHAIN_ID", &DEFAULT_CHAIN_ID.to_string())
            .parse()
            .map_err(|_| bad_var("CHAIN_ID"))?;
        let gas_limit = var_or("GAS_LIMIT", &DEFAULT_GAS_LIMIT.to_string())
            .parse::<u64>()
            .map_err(|_| bad_var("GAS_LIMIT"))?;
        let gas_price_gwei = var_or("GAS_PRICE_GWEI", &DEFAULT_GAS_PRICE_GWEI.to_string())
            .parse::<u64>()
            .map_err(|_| bad_var("GAS_PRICE_GWEI"))?;
        let confirm_timeout_secs = var_or(
            "CONFIRM_TIMEOUT_SECS",
            &DEFAULT_CONFIRM_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|_| bad_var("CONFIRM_TIMEOUT_SECS"))?;

        Ok(Self {
            bind_addr,
            rpc_url,
            contract_address,
            chain_id,
            signer_key: env::var("PRIVATE_KEY").ok().filter(|v| !v.is_empty()),
            gas_limit: U256::from(gas_limit),
            gas_price: U256::from(gas_price_gwei) * U256::exp10(9),
            confirm_timeout: Duration::from_secs(confirm_timeout_secs),
        })
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn bad_var(name: &str) -> DisburseError {
    DisburseError::Config(format!("invalid {name} value"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_contract_address_parses() {
        assert!(DEFAULT_CONTRACT_ADDRESS.parse::<Address>().is_ok());
    }

    #[test]
    fn default_gas_price_is_in_wei() {
        assert_eq!(
            U256::from(DEFAULT_GAS_PRICE_GWEI) * U256::exp10(9),
            U256::from(40_000_000_000u64)
        );
    }
}
