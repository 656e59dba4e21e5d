use axum::{
    routing::{get, post},
    Router,
};

pub mod expenses;
pub mod settlements;
pub mod system;

pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/expenses", get(expenses::list_expenses).post(expenses::add_expense))
        // Legacy path used by form-based clients.
        .route("/addExpense", post(expenses::add_expense))
        .route("/balances", get(settlements::get_balances))
        .route("/settlements", get(settlements::get_settlements))
}
