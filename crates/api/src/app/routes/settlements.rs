use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::app::errors;
use crate::app::services::LedgerService;

pub async fn get_balances(
    Extension(services): Extension<Arc<LedgerService>>,
) -> axum::response::Response {
    match services.balances() {
        Ok(balances) => (StatusCode::OK, Json(json!({ "balances": balances }))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_settlements(
    Extension(services): Extension<Arc<LedgerService>>,
) -> axum::response::Response {
    match services.settlements() {
        Ok(plan) => (StatusCode::OK, Json(json!({ "settlements": plan }))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
