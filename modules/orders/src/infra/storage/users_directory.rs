use std::collections::{BTreeSet, HashMap};

use anyhow::Context;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use crate::domain::ports::UsersDirectory;
use crate::infra::storage::entity::user;

/// Ids per `IN (...)` statement, below SQLite's limit of 32766 bound
/// parameters.
const MAX_IDS_PER_QUERY: usize = 30_000;

/// Name lookup over the `users` table.
pub struct SeaOrmUsersDirectory<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmUsersDirectory<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> UsersDirectory for SeaOrmUsersDirectory<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn names_by_ids(&self, ids: &BTreeSet<i32>) -> anyhow::Result<HashMap<i32, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let ids: Vec<i32> = ids.iter().copied().collect();
        let mut names = HashMap::with_capacity(ids.len());
        for chunk in ids.chunks(MAX_IDS_PER_QUERY) {
            let users = user::Entity::find()
                .filter(user::Column::Id.is_in(chunk.iter().copied()))
                .all(&self.conn)
                .await
                .context("names_by_ids failed")?;
            names.extend(users.into_iter().map(|u| (u.id, u.name)));
        }
        Ok(names)
    }
}
