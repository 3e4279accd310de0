use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use coach_booking::{CheckoutError, FlowError};
use coach_catalog::CatalogError;
use coach_core::validation::ValidationErrors;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    /// Form failed its rules; carries the per-field messages.
    Invalid(ValidationErrors),
    NotFound(String),
    Conflict(String),
    PaymentDeclined(String),
    ServiceUnavailable(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::Invalid(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": "Validation failed", "errors": errors }),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, json!({ "error": msg })),
            AppError::PaymentDeclined(msg) => (StatusCode::PAYMENT_REQUIRED, json!({ "error": msg })),
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!("Service unavailable: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, json!({ "error": msg }))
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "Internal Server Error" }))
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<FlowError> for AppError {
    fn from(err: FlowError) -> Self {
        match err {
            FlowError::NotFound(_) => AppError::NotFound(err.to_string()),
            FlowError::InvalidTransition { .. }
            | FlowError::PaymentInProgress
            | FlowError::AlreadyConfirmed => AppError::Conflict(err.to_string()),
            FlowError::Field(_) => AppError::BadRequest(err.to_string()),
        }
    }
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::PaymentDeclined(msg) => AppError::PaymentDeclined(msg),
            CheckoutError::PaymentUnavailable(msg) | CheckoutError::Scheduling(msg) => {
                AppError::ServiceUnavailable(msg)
            }
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_errors_map_to_status() {
        let cases = [
            (FlowError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (FlowError::PaymentInProgress, StatusCode::CONFLICT),
            (FlowError::AlreadyConfirmed, StatusCode::CONFLICT),
            (
                FlowError::InvalidTransition { from: "booking".into(), to: "confirmation".into() },
                StatusCode::CONFLICT,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn test_checkout_errors_distinguish_decline() {
        let declined = AppError::from(CheckoutError::PaymentDeclined("no".into())).into_response();
        assert_eq!(declined.status(), StatusCode::PAYMENT_REQUIRED);

        let down = AppError::from(CheckoutError::PaymentUnavailable("down".into())).into_response();
        assert_eq!(down.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
