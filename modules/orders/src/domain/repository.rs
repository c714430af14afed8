use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use modkit::Page;
use tracing::{debug, instrument};

use crate::contract::model::{
    Order, OrderDraft, OrderPatch, OrderWithClientName, OrderWithProducts,
};
use crate::domain::error::DomainError;
use crate::domain::ports::{OrdersStore, UsersDirectory};

/// Page selection for [`OrderRepository::paginate`]. 1-based; `0` reads as
/// the first page. The page size is fixed by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: u64,
}

impl Default for PageParams {
    fn default() -> Self {
        Self { page: 1 }
    }
}

/// Query composition over the order store and the user directory.
#[derive(Clone)]
pub struct OrderRepository {
    store: Arc<dyn OrdersStore>,
    users: Arc<dyn UsersDirectory>,
    page_size: u64,
}

impl OrderRepository {
    pub fn new(store: Arc<dyn OrdersStore>, users: Arc<dyn UsersDirectory>, page_size: u64) -> Self {
        Self {
            store,
            users,
            page_size: page_size.max(1),
        }
    }

    #[instrument(name = "orders.repository.all", skip(self))]
    pub async fn all(&self) -> Result<Vec<OrderWithProducts>, DomainError> {
        let orders = self.store.list().await.map_err(database)?;
        debug!(count = orders.len(), "Loaded orders with products");
        Ok(orders)
    }

    /// Every order with its products and the client's name.
    ///
    /// Names come from one directory lookup over the distinct client ids.
    /// A row whose client has no user record gets `client_name = None`.
    #[instrument(name = "orders.repository.all_orders_with_user_name", skip(self))]
    pub async fn all_orders_with_user_name(&self) -> Result<Vec<OrderWithClientName>, DomainError> {
        let orders = self.store.list().await.map_err(database)?;

        let client_ids: BTreeSet<i32> = orders.iter().map(|o| o.order.client_id).collect();
        let names: HashMap<i32, String> =
            self.users.names_by_ids(&client_ids).await.map_err(database)?;
        debug!(
            orders = orders.len(),
            clients = client_ids.len(),
            resolved = names.len(),
            "Resolved client names"
        );

        Ok(orders
            .into_iter()
            .map(|OrderWithProducts { order, products }| {
                let client_name = names.get(&order.client_id).cloned();
                OrderWithClientName {
                    order,
                    products,
                    client_name,
                }
            })
            .collect())
    }

    #[instrument(name = "orders.repository.paginate", skip(self), fields(page = params.page))]
    pub async fn paginate(&self, params: PageParams) -> Result<Page<Order>, DomainError> {
        let page = params.page.max(1);
        self.store
            .page(page, self.page_size)
            .await
            .map_err(database)
    }

    #[instrument(name = "orders.repository.create", skip(self, draft), fields(client_id = draft.client_id))]
    pub async fn create(&self, draft: OrderDraft) -> Result<Order, DomainError> {
        self.store.insert(draft).await.map_err(database)
    }

    /// Fails with `OrderNotFound` when `id` is unknown. An empty patch still
    /// touches `updated_at` and returns `true`.
    #[instrument(name = "orders.repository.update", skip(self, patch), fields(order_id = id))]
    pub async fn update(&self, patch: OrderPatch, id: i32) -> Result<bool, DomainError> {
        self.find_or_fail(id).await?;
        if patch.is_empty() {
            debug!("Empty patch, only updated_at changes");
        }
        let updated = self.store.update(id, patch).await.map_err(database)?;
        if !updated {
            // Deleted between the existence check and the write.
            return Err(DomainError::order_not_found(id));
        }
        Ok(true)
    }

    #[instrument(name = "orders.repository.destroy", skip(self), fields(order_id = id))]
    pub async fn destroy(&self, id: i32) -> Result<bool, DomainError> {
        self.find_or_fail(id).await?;
        let deleted = self.store.delete(id).await.map_err(database)?;
        if !deleted {
            return Err(DomainError::order_not_found(id));
        }
        Ok(true)
    }

    pub async fn find(&self, id: i32) -> Result<Option<Order>, DomainError> {
        self.store.get(id).await.map_err(database)
    }

    #[instrument(name = "orders.repository.find_or_fail", skip(self), fields(order_id = id))]
    pub async fn find_or_fail(&self, id: i32) -> Result<Order, DomainError> {
        self.find(id)
            .await?
            .ok_or_else(|| DomainError::order_not_found(id))
    }

    #[instrument(name = "orders.repository.find_or_fail_with_products", skip(self), fields(order_id = id))]
    pub async fn find_or_fail_with_products(&self, id: i32) -> Result<OrderWithProducts, DomainError> {
        self.store
            .get_with_products(id)
            .await
            .map_err(database)?
            .ok_or_else(|| DomainError::order_not_found(id))
    }
}

fn database(e: anyhow::Error) -> DomainError {
    DomainError::database(format!("{e:#}"))
}
