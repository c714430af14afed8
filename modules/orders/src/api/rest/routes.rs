use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use crate::api::rest::handlers;
use crate::domain::{repository::OrderRepository, service::OrderService};

/// Mount the orders routes on `router`.
///
/// PUT and PATCH share one handler: both apply a partial update.
pub fn register_routes(
    router: Router,
    repo: Arc<OrderRepository>,
    service: Arc<OrderService>,
) -> Router {
    let orders = Router::new()
        .route("/orders", get(handlers::index).post(handlers::store))
        .route(
            "/orders/with-client-names",
            get(handlers::all_orders_with_user_name),
        )
        .route("/orders/page", get(handlers::paginate))
        .route(
            "/orders/{id}",
            get(handlers::show)
                .put(handlers::update)
                .patch(handlers::update)
                .delete(handlers::destroy),
        )
        .layer(Extension(repo))
        .layer(Extension(service));

    router.merge(orders)
}
