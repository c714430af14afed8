use chrono::{DateTime, Utc};

/// Persisted order (no serde; REST shapes live in `api::rest::dto`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: i32,
    /// Client (user) the order belongs to. Not checked against the user table.
    pub client_id: i32,
    pub status: String,
    /// Minor currency units.
    pub total_amount: i64,
    pub notes: Option<String>,
    /// User that placed the order through the API.
    pub created_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product line attached to an order; read-only here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderWithProducts {
    pub order: Order,
    pub products: Vec<Product>,
}

/// Listing row with the client's name resolved from the user directory.
/// `client_name` is `None` when no user matches `client_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderWithClientName {
    pub order: Order,
    pub products: Vec<Product>,
    pub client_name: Option<String>,
}

/// Validated creation input as received from a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    /// Defaults to the acting user when omitted.
    pub client_id: Option<i32>,
    pub status: String,
    pub total_amount: i64,
    pub notes: Option<String>,
}

/// Fully resolved attributes handed to the store for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    pub client_id: i32,
    pub status: String,
    pub total_amount: i64,
    pub notes: Option<String>,
    pub created_by: Option<i32>,
}

/// Partial update; `None` leaves the column untouched.
///
/// `notes` is doubly optional: `Some(None)` clears it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderPatch {
    pub client_id: Option<i32>,
    pub status: Option<String>,
    pub total_amount: Option<i64>,
    pub notes: Option<Option<String>>,
}

impl OrderPatch {
    pub fn is_empty(&self) -> bool {
        self.client_id.is_none()
            && self.status.is_none()
            && self.total_amount.is_none()
            && self.notes.is_none()
    }
}

/// Identity of the caller, supplied by the upstream identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActingUser {
    pub id: i32,
}
