use ethers::types::{Address, U256};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::ledger::PayrollLedger;
use crate::types::DisburseError;

/// Shared per-process state handed to every request: the ledger client, the
/// configured gas ceiling reported in receipts, and the per-employer
/// submission locks.
#[derive(Clone)]
pub struct PayrollState {
    ledger: Option<Arc<dyn PayrollLedger>>,
    gas_limit: U256,
    submission_locks: Arc<RwLock<HashMap<Address, Arc<Mutex<()>>>>>,
}

impl PayrollState {
    pub fn new(ledger: Option<Arc<dyn PayrollLedger>>, gas_limit: U256) -> Self {
        Self {
            ledger,
            gas_limit,
            submission_locks: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// The ledger client, or a configuration failure when the process was
    /// started without a signing credential.
    pub fn ledger(&self) -> Result<&Arc<dyn PayrollLedger>, DisburseError> {
        self.ledger
            .as_ref()
            .ok_or_else(|| DisburseError::Config("signing credential is not configured".to_string()))
    }

    pub fn gas_limit(&self) -> U256 {
        self.gas_limit
    }

    /// One submission at a time per employer: two requests racing the same
    /// balance snapshot could otherwise jointly overdraw it.
    pub async fn employer_lock(&self, employer: Address) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.submission_locks.write().await;
            locks
                .entry(employer)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}
