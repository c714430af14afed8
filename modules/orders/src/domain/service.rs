use std::sync::Arc;

use tracing::{info, instrument};

use crate::contract::model::{ActingUser, NewOrder, Order, OrderDraft};
use crate::domain::error::DomainError;
use crate::domain::repository::OrderRepository;

/// Creation rules that depend on who is acting.
#[derive(Clone)]
pub struct OrderService {
    repo: Arc<OrderRepository>,
}

impl OrderService {
    pub fn new(repo: Arc<OrderRepository>) -> Self {
        Self { repo }
    }

    /// Stamp `created_by` with the acting user and default `client_id` to
    /// them when the input leaves it out.
    #[instrument(
        name = "orders.service.create",
        skip(self, new_order),
        fields(acting_user = acting.id)
    )]
    pub async fn create(&self, new_order: NewOrder, acting: ActingUser) -> Result<Order, DomainError> {
        let draft = OrderDraft {
            client_id: new_order.client_id.unwrap_or(acting.id),
            status: new_order.status,
            total_amount: new_order.total_amount,
            notes: new_order.notes,
            created_by: Some(acting.id),
        };

        let order = self.repo.create(draft).await?;
        info!(order_id = order.id, client_id = order.client_id, "Created order");
        Ok(order)
    }
}
