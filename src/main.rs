use axum_payroll::config::Config;
use axum_payroll::ledger::{ContractLedger, PayrollLedger};
use axum_payroll::payroll_router;
use axum_payroll::state::PayrollState;
use miette::{IntoDiagnostic, Result};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("axum_payroll=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env().into_diagnostic()?;

    let ledger = match config.signer_key.as_deref() {
        Some(key) => {
            let ledger = ContractLedger::connect(&config, key).into_diagnostic()?;
            Some(Arc::new(ledger) as Arc<dyn PayrollLedger>)
        }
        None => {
            warn!("PRIVATE_KEY is not set; disbursement requests will be rejected");
            None
        }
    };

    let state = PayrollState::new(ledger, config.gas_limit);
    let app = payroll_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .into_diagnostic()?;
    info!(
        addr = %config.bind_addr,
        contract = ?config.contract_address,
        chain_id = config.chain_id,
        "payroll disbursement service listening"
    );
    axum::serve(listener, app).await.into_diagnostic()?;

    Ok(())
}
