use axum::http::StatusCode;
use modkit::{Problem, ProblemResponse};

use crate::domain::error::DomainError;

/// Build a ProblemResponse with the orders error type URL.
pub fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
    instance: &str,
) -> ProblemResponse {
    Problem::new(status, title, detail)
        .with_type(format!("https://errors.example.com/{code}"))
        .with_code(code)
        .with_instance(instance)
        .into()
}

/// Map domain error to RFC9457 ProblemResponse
pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    match e {
        DomainError::OrderNotFound { id } => from_parts(
            StatusCode::NOT_FOUND,
            "ORDERS_NOT_FOUND",
            "Order not found",
            format!("Order with id {id} was not found"),
            instance,
        ),
        DomainError::Database { .. } => {
            // Details stay in the log.
            tracing::error!(error = ?e, "Database error occurred");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_DB",
                "Internal error",
                "An internal database error occurred",
                instance,
            )
        }
    }
}
