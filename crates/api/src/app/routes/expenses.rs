use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::app::{dto, errors};
use crate::app::services::LedgerService;

pub async fn add_expense(
    Extension(services): Extension<Arc<LedgerService>>,
    body: Result<Json<dto::AddExpenseRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return errors::json_error(rejection.status(), "invalid_request", rejection.body_text());
        }
    };

    let cmd = match body.into_command() {
        Ok(cmd) => cmd,
        Err(e) => return errors::validation_error_to_response(e),
    };

    match services.add_expense(cmd) {
        Ok(expense) => (StatusCode::CREATED, Json(expense)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_expenses(
    Extension(services): Extension<Arc<LedgerService>>,
) -> axum::response::Response {
    match services.expenses() {
        Ok(expenses) => (StatusCode::OK, Json(json!({ "expenses": expenses }))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
