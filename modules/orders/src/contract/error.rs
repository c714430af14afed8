use thiserror::Error;

/// Errors safe to expose to other modules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrdersError {
    #[error("Order not found: {id}")]
    NotFound { id: i32 },

    #[error("Internal error")]
    Internal,
}

impl OrdersError {
    pub fn not_found(id: i32) -> Self {
        Self::NotFound { id }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<crate::domain::error::DomainError> for OrdersError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            OrderNotFound { id } => Self::not_found(id),
            Database { .. } => Self::internal(),
        }
    }
}
