use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use modkit::Page;

use crate::contract::model::{Order, OrderDraft, OrderPatch, OrderWithProducts};

/// Persistence operations on orders. Object-safe via `async_trait`.
#[async_trait]
pub trait OrdersStore: Send + Sync {
    async fn get(&self, id: i32) -> anyhow::Result<Option<Order>>;

    async fn get_with_products(&self, id: i32) -> anyhow::Result<Option<OrderWithProducts>>;

    /// Every order with its products, ascending by id.
    async fn list(&self) -> anyhow::Result<Vec<OrderWithProducts>>;

    /// One page (1-based) ascending by id, without products.
    async fn page(&self, page: u64, per_page: u64) -> anyhow::Result<Page<Order>>;

    /// Store assigns id and timestamps.
    async fn insert(&self, draft: OrderDraft) -> anyhow::Result<Order>;

    /// Apply only the supplied columns and bump `updated_at`.
    /// Returns false if no row matched.
    async fn update(&self, id: i32, patch: OrderPatch) -> anyhow::Result<bool>;

    /// Returns true if a row was deleted.
    async fn delete(&self, id: i32) -> anyhow::Result<bool>;
}

/// Read-only lookup of user display names.
#[async_trait]
pub trait UsersDirectory: Send + Sync {
    /// Names for the given ids in a single lookup. Unknown ids are absent
    /// from the map.
    async fn names_by_ids(&self, ids: &BTreeSet<i32>) -> anyhow::Result<HashMap<i32, String>>;
}
