use chrono::{DateTime, Utc};
use modkit::{Page, PageInfo};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::contract::model::{
    NewOrder, Order, OrderPatch, OrderWithClientName, OrderWithProducts, Product,
};

/// REST DTO for an order. `products` is present on listing and show
/// responses, absent on create.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderDto {
    pub id: i32,
    pub client_id: i32,
    pub status: String,
    pub total_amount: i64,
    pub notes: Option<String>,
    pub created_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<ProductDto>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    pub id: i32,
    pub name: String,
    pub price: i64,
}

/// Listing row carrying the client's name; `null` when the client has no
/// user record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderWithClientNameDto {
    #[serde(flatten)]
    pub order: OrderDto,
    pub client_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderPageDto {
    pub items: Vec<OrderDto>,
    pub page_info: PageInfo,
}

/// REST DTO for creating an order
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateOrderReq {
    /// Defaults to the acting user.
    #[validate(range(min = 1, message = "must be a positive id"))]
    pub client_id: Option<i32>,
    #[validate(length(min = 1, max = 32, message = "must be 1-32 characters"))]
    pub status: String,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub total_amount: i64,
    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub notes: Option<String>,
}

/// REST DTO for updating an order (partial). Send `"notes": null` to clear
/// the notes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate, Default)]
#[serde(deny_unknown_fields)]
pub struct UpdateOrderReq {
    #[validate(range(min = 1, message = "must be a positive id"))]
    pub client_id: Option<i32>,
    #[validate(length(min = 1, max = 32, message = "must be 1-32 characters"))]
    pub status: Option<String>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub total_amount: Option<i64>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
}

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`).
fn double_option<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number; defaults to 1.
    pub page: Option<u64>,
}

// Conversion implementations between REST DTOs and contract models

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            price: p.price,
        }
    }
}

impl From<Order> for OrderDto {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            client_id: o.client_id,
            status: o.status,
            total_amount: o.total_amount,
            notes: o.notes,
            created_by: o.created_by,
            created_at: o.created_at,
            updated_at: o.updated_at,
            products: None,
        }
    }
}

impl From<OrderWithProducts> for OrderDto {
    fn from(owp: OrderWithProducts) -> Self {
        let mut dto = OrderDto::from(owp.order);
        dto.products = Some(owp.products.into_iter().map(ProductDto::from).collect());
        dto
    }
}

impl From<OrderWithClientName> for OrderWithClientNameDto {
    fn from(row: OrderWithClientName) -> Self {
        Self {
            order: OrderWithProducts {
                order: row.order,
                products: row.products,
            }
            .into(),
            client_name: row.client_name,
        }
    }
}

impl From<Page<Order>> for OrderPageDto {
    fn from(page: Page<Order>) -> Self {
        let page = page.map_items(OrderDto::from);
        Self {
            items: page.items,
            page_info: page.page_info,
        }
    }
}

impl From<CreateOrderReq> for NewOrder {
    fn from(req: CreateOrderReq) -> Self {
        Self {
            client_id: req.client_id,
            status: req.status,
            total_amount: req.total_amount,
            notes: req.notes,
        }
    }
}

impl From<UpdateOrderReq> for OrderPatch {
    fn from(req: UpdateOrderReq) -> Self {
        Self {
            client_id: req.client_id,
            status: req.status,
            total_amount: req.total_amount,
            notes: req.notes,
        }
    }
}
