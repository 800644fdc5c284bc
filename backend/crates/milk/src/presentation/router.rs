//! Milk Router

use crate::application::config::MilkConfig;
use crate::domain::repository::MilkRepository;
use crate::infra::postgres::PgMilkRepository;
use crate::presentation::handlers::{self, MilkAppState};
use axum::{Router, routing::get};
use std::sync::Arc;

/// Create the ledger router with PostgreSQL repository
pub fn milk_router(repo: PgMilkRepository, config: MilkConfig) -> Router {
    milk_router_generic(repo, config)
}

/// Create a ledger router for any repository implementation
///
/// Routes are relative; the api binary nests them under `/api` behind the
/// access guard.
pub fn milk_router_generic<R>(repo: R, config: MilkConfig) -> Router
where
    R: MilkRepository,
{
    let state = MilkAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/price",
            get(handlers::get_price::<R>).put(handlers::set_price::<R>),
        )
        .route(
            "/entries",
            get(handlers::lookup_entry::<R>).post(handlers::submit_entry::<R>),
        )
        .route("/reports", get(handlers::monthly_report::<R>))
        .route("/reports/export", get(handlers::export_report::<R>))
        .with_state(state)
}
