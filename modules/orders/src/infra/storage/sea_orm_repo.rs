//! SeaORM-backed implementation of the `OrdersStore` port.
//!
//! Generic over `C: ConnectionTrait`, so it can be built with a
//! `DatabaseConnection` or a transaction.

use std::collections::HashMap;

use anyhow::Context;
use chrono::Utc;
use modkit::{Page, PageInfo};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait,
    NotSet, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::contract::model::{Order, OrderDraft, OrderPatch, OrderWithProducts};
use crate::domain::ports::OrdersStore;
use crate::infra::storage::entity::{order, order_product, product};
use crate::infra::storage::mapper::order_with_products;

pub struct SeaOrmOrdersStore<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmOrdersStore<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> OrdersStore for SeaOrmOrdersStore<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn get(&self, id: i32) -> anyhow::Result<Option<Order>> {
        let found = order::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        Ok(found.map(Into::into))
    }

    async fn get_with_products(&self, id: i32) -> anyhow::Result<Option<OrderWithProducts>> {
        let Some(found) = order::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?
        else {
            return Ok(None);
        };

        let products = found
            .find_related(product::Entity)
            .all(&self.conn)
            .await
            .context("load products failed")?;
        Ok(Some(order_with_products(found, products)))
    }

    async fn list(&self) -> anyhow::Result<Vec<OrderWithProducts>> {
        let orders = order::Entity::find()
            .order_by_asc(order::Column::Id)
            .all(&self.conn)
            .await
            .context("list orders failed")?;

        // Whole pivot joined to products in one statement. An `IN (...)` over
        // order ids would hit SQLite's bound parameter limit on large tables.
        let links = order_product::Entity::find()
            .find_also_related(product::Entity)
            .all(&self.conn)
            .await
            .context("load products failed")?;

        let mut by_order: HashMap<i32, Vec<product::Model>> = HashMap::new();
        for (link, product) in links {
            if let Some(product) = product {
                by_order.entry(link.order_id).or_default().push(product);
            }
        }

        Ok(orders
            .into_iter()
            .map(|o| {
                let products = by_order.remove(&o.id).unwrap_or_default();
                order_with_products(o, products)
            })
            .collect())
    }

    async fn page(&self, page: u64, per_page: u64) -> anyhow::Result<Page<Order>> {
        let paginator = order::Entity::find()
            .order_by_asc(order::Column::Id)
            .paginate(&self.conn, per_page);

        let total = paginator.num_items().await.context("count orders failed")?;
        // SeaORM pages are 0-based and its offset math is unchecked, so pages
        // past the end (overflowing ones included) never reach it.
        let index = page.saturating_sub(1);
        let rows = match index.checked_mul(per_page) {
            Some(offset) if offset < total => paginator
                .fetch_page(index)
                .await
                .context("fetch page failed")?,
            _ => Vec::new(),
        };

        Ok(Page::new(
            rows.into_iter().map(Into::into).collect(),
            PageInfo::new(page, per_page, total),
        ))
    }

    async fn insert(&self, draft: OrderDraft) -> anyhow::Result<Order> {
        let now = Utc::now();
        let m = order::ActiveModel {
            id: NotSet,
            client_id: Set(draft.client_id),
            status: Set(draft.status),
            total_amount: Set(draft.total_amount),
            notes: Set(draft.notes),
            created_by: Set(draft.created_by),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let inserted = m.insert(&self.conn).await.context("insert failed")?;
        Ok(inserted.into())
    }

    async fn update(&self, id: i32, patch: OrderPatch) -> anyhow::Result<bool> {
        // Untouched columns stay NotSet and are left out of the UPDATE.
        let mut m = order::ActiveModel {
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(client_id) = patch.client_id {
            m.client_id = Set(client_id);
        }
        if let Some(status) = patch.status {
            m.status = Set(status);
        }
        if let Some(total_amount) = patch.total_amount {
            m.total_amount = Set(total_amount);
        }
        if let Some(notes) = patch.notes {
            m.notes = Set(notes);
        }

        let res = order::Entity::update_many()
            .set(m)
            .filter(order::Column::Id.eq(id))
            .exec(&self.conn)
            .await
            .context("update failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        let res = order::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("delete failed")?;
        Ok(res.rows_affected > 0)
    }
}
