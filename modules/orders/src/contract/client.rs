use async_trait::async_trait;

use crate::contract::{
    error::OrdersError,
    model::{ActingUser, NewOrder, Order, OrderPatch, OrderWithClientName, OrderWithProducts},
};

/// In-process API of the orders module for other modules.
#[async_trait]
pub trait OrdersApi: Send + Sync {
    /// All orders with their products.
    async fn list_orders(&self) -> Result<Vec<OrderWithProducts>, OrdersError>;

    /// All orders with products and the client's name.
    async fn list_orders_with_client_names(
        &self,
    ) -> Result<Vec<OrderWithClientName>, OrdersError>;

    async fn get_order(&self, id: i32) -> Result<OrderWithProducts, OrdersError>;

    async fn create_order(
        &self,
        new_order: NewOrder,
        acting: ActingUser,
    ) -> Result<Order, OrdersError>;

    /// `Ok(true)` once the order exists and the patch was applied.
    async fn update_order(&self, id: i32, patch: OrderPatch) -> Result<bool, OrdersError>;

    async fn delete_order(&self, id: i32) -> Result<bool, OrdersError>;
}
