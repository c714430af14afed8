#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait, NotSet, Set,
};
use serde_json::Value;
use tower::ServiceExt;

use orders::config::OrdersConfig;
use orders::infra::storage::entity::{order, order_product, product, user};
use orders::Orders;

/// Fresh in-memory SQLite with migrations applied. One pinned connection:
/// each `:memory:` connection is a separate database.
pub async fn create_test_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts)
        .await
        .expect("Failed to connect to test database");
    Orders::migrate(&db).await.expect("Failed to run migrations");
    db
}

pub async fn seed_user(db: &DatabaseConnection, id: i32, name: &str) {
    user::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
    }
    .insert(db)
    .await
    .expect("seed user");
}

pub async fn seed_product(db: &DatabaseConnection, id: i32, name: &str, price: i64) {
    product::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        price: Set(price),
    }
    .insert(db)
    .await
    .expect("seed product");
}

pub async fn attach_product(db: &DatabaseConnection, order_id: i32, product_id: i32, quantity: i32) {
    order_product::ActiveModel {
        order_id: Set(order_id),
        product_id: Set(product_id),
        quantity: Set(quantity),
    }
    .insert(db)
    .await
    .expect("attach product");
}

/// Bulk insert one "new" order per client id, in batches that stay under
/// SQLite's bound parameter limit.
pub async fn seed_orders(db: &DatabaseConnection, client_ids: impl IntoIterator<Item = i32>) {
    let now = Utc::now();
    let rows: Vec<order::ActiveModel> = client_ids
        .into_iter()
        .map(|client_id| order::ActiveModel {
            id: NotSet,
            client_id: Set(client_id),
            status: Set("new".to_string()),
            total_amount: Set(100),
            notes: Set(None),
            created_by: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .collect();
    for batch in rows.chunks(1000) {
        order::Entity::insert_many(batch.to_vec())
            .exec(db)
            .await
            .expect("seed orders");
    }
}

pub fn orders_with_page_size(db: DatabaseConnection, page_size: u64) -> Orders {
    Orders::init(OrdersConfig { page_size }, db)
}

pub fn router(orders: &Orders) -> Router {
    orders.register_rest(Router::new())
}

/// Send a request through the router and decode the JSON body (Null when
/// empty).
pub async fn call(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = router.clone().oneshot(req).await.expect("router call");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json(method: &str, uri: &str, acting_user: Option<i32>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(id) = acting_user {
        builder = builder.header("x-user-id", id.to_string());
    }
    builder.body(Body::from(body.to_string())).unwrap()
}
