use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use splitledger_core::ValidationError;

use crate::app::services::ServiceError;

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Validation(e) => validation_error_to_response(e),
        ServiceError::Unavailable => {
            tracing::error!("ledger lock poisoned");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "ledger_unavailable",
                "ledger is unavailable",
            )
        }
    }
}

/// Malformed input is a 400; well-formed input whose amounts don't add up is a 422.
pub fn validation_error_to_response(err: ValidationError) -> axum::response::Response {
    let status = match err {
        ValidationError::SplitDetailsMismatch { .. }
        | ValidationError::SplitSumMismatch { .. }
        | ValidationError::LedgerCapacityExceeded(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ValidationError::InvalidPayer
        | ValidationError::InvalidTotal(_)
        | ValidationError::EmptyParticipants
        | ValidationError::InvalidShareValue { .. }
        | ValidationError::UnknownSplitType(_)
        | ValidationError::MalformedSplitDetail { .. } => StatusCode::BAD_REQUEST,
    };
    json_error(status, err.code(), err.to_string())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
