use std::sync::Arc;

use async_trait::async_trait;

use crate::contract::{
    client::OrdersApi,
    error::OrdersError,
    model::{ActingUser, NewOrder, Order, OrderPatch, OrderWithClientName, OrderWithProducts},
};
use crate::domain::{repository::OrderRepository, service::OrderService};

/// Local implementation of the OrdersApi trait that delegates to the domain layer
pub struct OrdersLocalClient {
    repo: Arc<OrderRepository>,
    service: Arc<OrderService>,
}

impl OrdersLocalClient {
    pub fn new(repo: Arc<OrderRepository>, service: Arc<OrderService>) -> Self {
        Self { repo, service }
    }
}

#[async_trait]
impl OrdersApi for OrdersLocalClient {
    async fn list_orders(&self) -> Result<Vec<OrderWithProducts>, OrdersError> {
        self.repo.all().await.map_err(Into::into)
    }

    async fn list_orders_with_client_names(&self) -> Result<Vec<OrderWithClientName>, OrdersError> {
        self.repo.all_orders_with_user_name().await.map_err(Into::into)
    }

    async fn get_order(&self, id: i32) -> Result<OrderWithProducts, OrdersError> {
        self.repo
            .find_or_fail_with_products(id)
            .await
            .map_err(Into::into)
    }

    async fn create_order(&self, new_order: NewOrder, acting: ActingUser) -> Result<Order, OrdersError> {
        self.service
            .create(new_order, acting)
            .await
            .map_err(Into::into)
    }

    async fn update_order(&self, id: i32, patch: OrderPatch) -> Result<bool, OrdersError> {
        self.repo.update(patch, id).await.map_err(Into::into)
    }

    async fn delete_order(&self, id: i32) -> Result<bool, OrdersError> {
        self.repo.destroy(id).await.map_err(Into::into)
    }
}
