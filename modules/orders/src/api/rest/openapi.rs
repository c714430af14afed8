use utoipa::OpenApi;

use crate::api::rest::{dto, handlers};

#[derive(OpenApi)]
#[openapi(
    info(title = "Orders API", description = "Order management endpoints"),
    paths(
        handlers::index,
        handlers::all_orders_with_user_name,
        handlers::paginate,
        handlers::store,
        handlers::show,
        handlers::update,
        handlers::destroy,
    ),
    components(schemas(
        dto::OrderDto,
        dto::ProductDto,
        dto::OrderWithClientNameDto,
        dto::OrderPageDto,
        dto::CreateOrderReq,
        dto::UpdateOrderReq,
        modkit::PageInfo,
        modkit::Problem,
        modkit::ValidationError,
    )),
    tags((name = "orders", description = "Order management"))
)]
pub struct OrdersApiDoc;
