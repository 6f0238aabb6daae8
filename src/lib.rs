pub mod config;
pub mod handlers;
pub mod ledger;
pub mod state;
pub mod types;
pub mod utils;

use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::disburse;
use crate::state::PayrollState;

/// Builds the disbursement router around an already-constructed state. The
/// cross-origin policy is applied uniformly and is currently permissive.
pub fn payroll_router(state: PayrollState) -> Router {
    Router::new()
        .route(
            "/api/disburse",
            post(disburse::disburse)
                .options(disburse::preflight)
                .fallback(disburse::method_not_allowed),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
