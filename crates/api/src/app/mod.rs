//! HTTP API application wiring (Axum router + shared state).
//!
//! - `services.rs`: the shared ledger and settlement planner
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request DTOs and their mapping onto engine commands
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router around an existing ledger service.
pub fn build_app(services: Arc<services::LedgerService>) -> Router {
    routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn(middleware::trace_requests))
}
