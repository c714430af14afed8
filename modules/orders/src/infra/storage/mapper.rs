use crate::contract::model::{Order, OrderWithProducts, Product};
use crate::infra::storage::entity::{order, product};

impl From<order::Model> for Order {
    fn from(m: order::Model) -> Self {
        Self {
            id: m.id,
            client_id: m.client_id,
            status: m.status,
            total_amount: m.total_amount,
            notes: m.notes,
            created_by: m.created_by,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<product::Model> for Product {
    fn from(m: product::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            price: m.price,
        }
    }
}

/// Pair an order row with its loaded products, sorted by product id.
pub fn order_with_products(order: order::Model, products: Vec<product::Model>) -> OrderWithProducts {
    let mut products: Vec<Product> = products.into_iter().map(Into::into).collect();
    products.sort_by_key(|p| p.id);
    OrderWithProducts {
        order: order.into(),
        products,
    }
}
