use async_trait::async_trait;
use ethers::contract::abigen;
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Provider};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::{Address, H256, U256};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::config::Config;
use crate::ledger::PayrollLedger;
use crate::types::DisburseError;

abigen!(
    PayrollVault,
    r#"[
        function getBalance(address employer) external view returns (uint256)
        function payWorkers(address employer, address[] workers, uint256[] amounts, uint256 total) external
    ]"#
);

type PayrollClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// Ledger client backed by the deployed payroll contract. Constructed once at
/// startup and shared across requests; the provider and signer are safe for
/// concurrent use.
pub struct ContractLedger {
    contract: PayrollVault<PayrollClient>,
    gas_limit: U256,
    gas_price: U256,
    confirm_timeout: Duration,
}

impl ContractLedger {
    pub fn connect(config: &Config, signer_key: &str) -> Result<Self, DisburseError> {
        let provider = Provider::<Http>::try_from(config.rpc_url.as_str()).map_err(|e| {
            DisburseError::Config(format!("invalid RPC endpoint {}: {e}", config.rpc_url))
        })?;
        let wallet = signer_key
            .trim_start_matches("0x")
            .parse::<LocalWallet>()
            .map_err(|_| DisburseError::Config("malformed signing key".to_string()))?
            .with_chain_id(config.chain_id);
        let client = Arc::new(SignerMiddleware::new(provider, wallet));

        Ok(Self {
            contract: PayrollVault::new(config.contract_address, client),
            gas_limit: config.gas_limit,
            gas_price: config.gas_price,
            confirm_timeout: config.confirm_timeout,
        })
    }
}

#[async_trait]
impl PayrollLedger for ContractLedger {
    async fn available_balance(&self, employer: Address) -> Result<U256, DisburseError> {
        self.contract
            .get_balance(employer)
            .call()
            .await
            .map_err(|e| DisburseError::Ledger(e.to_string()))
    }

    async fn submit_payroll(
        &self,
        employer: Address,
        payments: &[(Address, U256)],
        total: U256,
    ) -> Result<H256, DisburseError> {
        let (workers, amounts): (Vec<Address>, Vec<U256>) = payments.iter().copied().unzip();

        // Fixed gas budget and legacy gas price, not estimated from the
        // network.
        let call = self
            .contract
            .pay_workers(employer, workers, amounts, total)
            .legacy()
            .gas(self.gas_limit)
            .gas_price(self.gas_price);

        let pending = call
            .send()
            .await
            .map_err(|e| DisburseError::Ledger(e.to_string()))?;
        let tx_hash = *pending;
        tracing::info!(transaction = ?tx_hash, "payout transaction submitted, awaiting confirmation");

        let receipt = timeout(self.confirm_timeout, pending.confirmations(1))
            .await
            .map_err(|_| {
                DisburseError::Ledger(format!(
                    "transaction {tx_hash:?} unconfirmed after {}s",
                    self.confirm_timeout.as_secs()
                ))
            })?
            .map_err(|e| DisburseError::Ledger(e.to_string()))?;

        match receipt {
            Some(receipt) if receipt.status == Some(1u64.into()) => Ok(receipt.transaction_hash),
            Some(_) => Err(DisburseError::Ledger(format!(
                "transaction {tx_hash:?} reverted"
            ))),
            None => Err(DisburseError::Ledger(format!(
                "transaction {tx_hash:?} was dropped before confirmation"
            ))),
        }
    }
}
