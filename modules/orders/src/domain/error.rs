use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Order not found: {id}")]
    OrderNotFound { id: i32 },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn order_not_found(id: i32) -> Self {
        Self::OrderNotFound { id }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
