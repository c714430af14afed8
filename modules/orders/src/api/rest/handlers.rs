use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::{StatusCode, Uri},
    response::Json,
    Extension,
};
use modkit::ProblemResponse;
use tracing::{error, info};

use crate::api::rest::dto::{
    CreateOrderReq, OrderDto, OrderPageDto, OrderWithClientNameDto, PageQuery, UpdateOrderReq,
};
use crate::api::rest::error::map_domain_error;
use crate::api::rest::extract::ValidatedJson;
use crate::contract::model::ActingUser;
use crate::domain::repository::{OrderRepository, PageParams};
use crate::domain::service::OrderService;

/// List all orders with their products
#[utoipa::path(
    get,
    path = "/orders",
    tag = "orders",
    responses(
        (status = 200, description = "All orders with products", body = Vec<OrderDto>),
        (status = 500, description = "Internal error", body = modkit::Problem)
    )
)]
pub async fn index(
    Extension(repo): Extension<Arc<OrderRepository>>,
    uri: Uri,
) -> Result<Json<Vec<OrderDto>>, ProblemResponse> {
    info!("Listing orders");

    match repo.all().await {
        Ok(orders) => Ok(Json(orders.into_iter().map(OrderDto::from).collect())),
        Err(e) => {
            error!("Failed to list orders: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// List all orders with products and the client's name
#[utoipa::path(
    get,
    path = "/orders/with-client-names",
    tag = "orders",
    responses(
        (status = 200, description = "Orders with client names", body = Vec<OrderWithClientNameDto>),
        (status = 500, description = "Internal error", body = modkit::Problem)
    )
)]
pub async fn all_orders_with_user_name(
    Extension(repo): Extension<Arc<OrderRepository>>,
    uri: Uri,
) -> Result<Json<Vec<OrderWithClientNameDto>>, ProblemResponse> {
    info!("Listing orders with client names");

    match repo.all_orders_with_user_name().await {
        Ok(rows) => Ok(Json(
            rows.into_iter().map(OrderWithClientNameDto::from).collect(),
        )),
        Err(e) => {
            error!("Failed to list orders with client names: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

#[utoipa::path(
    get,
    path = "/orders/page",
    tag = "orders",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of orders", body = OrderPageDto),
        (status = 500, description = "Internal error", body = modkit::Problem)
    )
)]
pub async fn paginate(
    Extension(repo): Extension<Arc<OrderRepository>>,
    Query(query): Query<PageQuery>,
    uri: Uri,
) -> Result<Json<OrderPageDto>, ProblemResponse> {
    let params = PageParams {
        page: query.page.unwrap_or(1),
    };
    info!(page = params.page, "Paginating orders");

    match repo.paginate(params).await {
        Ok(page) => Ok(Json(OrderPageDto::from(page))),
        Err(e) => {
            error!("Failed to paginate orders: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Create an order on behalf of the acting user
#[utoipa::path(
    post,
    path = "/orders",
    tag = "orders",
    request_body = CreateOrderReq,
    params(("x-user-id" = i32, Header, description = "Acting user id")),
    responses(
        (status = 201, description = "Created", body = OrderDto),
        (status = 401, description = "No acting user", body = modkit::Problem),
        (status = 422, description = "Validation failed", body = modkit::Problem),
        (status = 500, description = "Internal error", body = modkit::Problem)
    )
)]
pub async fn store(
    uri: Uri,
    Extension(svc): Extension<Arc<OrderService>>,
    acting: ActingUser,
    ValidatedJson(req_body): ValidatedJson<CreateOrderReq>,
) -> Result<(StatusCode, Json<OrderDto>), ProblemResponse> {
    info!(acting_user = acting.id, "Creating order: {:?}", req_body);

    match svc.create(req_body.into(), acting).await {
        Ok(order) => Ok((StatusCode::CREATED, Json(OrderDto::from(order)))),
        Err(e) => {
            error!("Failed to create order: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Get one order with its products
#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = "orders",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "The order", body = OrderDto),
        (status = 404, description = "Unknown order", body = modkit::Problem)
    )
)]
pub async fn show(
    Extension(repo): Extension<Arc<OrderRepository>>,
    Path(id): Path<i32>,
    uri: Uri,
) -> Result<Json<OrderDto>, ProblemResponse> {
    info!("Getting order with id: {}", id);

    match repo.find_or_fail_with_products(id).await {
        Ok(order) => Ok(Json(OrderDto::from(order))),
        Err(e) => {
            error!("Failed to get order {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Partially update an order; omitted fields keep their values
#[utoipa::path(
    put,
    path = "/orders/{id}",
    tag = "orders",
    request_body = UpdateOrderReq,
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Updated", body = bool),
        (status = 404, description = "Unknown order", body = modkit::Problem),
        (status = 422, description = "Validation failed", body = modkit::Problem)
    )
)]
pub async fn update(
    uri: Uri,
    Extension(repo): Extension<Arc<OrderRepository>>,
    Path(id): Path<i32>,
    ValidatedJson(req_body): ValidatedJson<UpdateOrderReq>,
) -> Result<Json<bool>, ProblemResponse> {
    info!("Updating order {} with: {:?}", id, req_body);

    match repo.update(req_body.into(), id).await {
        Ok(updated) => Ok(Json(updated)),
        Err(e) => {
            error!("Failed to update order {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

#[utoipa::path(
    delete,
    path = "/orders/{id}",
    tag = "orders",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Deleted", body = bool),
        (status = 404, description = "Unknown order", body = modkit::Problem)
    )
)]
pub async fn destroy(
    Extension(repo): Extension<Arc<OrderRepository>>,
    Path(id): Path<i32>,
    uri: Uri,
) -> Result<Json<bool>, ProblemResponse> {
    info!("Deleting order: {}", id);

    match repo.destroy(id).await {
        Ok(deleted) => Ok(Json(deleted)),
        Err(e) => {
            error!("Failed to delete order {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}
