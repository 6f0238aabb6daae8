pub mod contract;

pub use contract::ContractLedger;

use async_trait::async_trait;
use ethers::types::{Address, H256, U256};

use crate::types::DisburseError;

/// On-chain surface of the payroll contract: the read side used for the
/// balance check and the mutating side that pays a whole batch atomically.
#[async_trait]
pub trait PayrollLedger: Send + Sync {
    /// Pre-funded balance the employer can draw on, in token base units.
    /// Read fresh from the contract on every call, never cached.
    async fn available_balance(&self, employer: Address) -> Result<U256, DisburseError>;

    /// Submits one transaction paying every recipient and resolves with its
    /// hash once the network has confirmed it.
    async fn submit_payroll(
        &self,
        employer: Address,
        payments: &[(Address, U256)],
        total: U256,
    ) -> Result<H256, DisburseError>;
}
