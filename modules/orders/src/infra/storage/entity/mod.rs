pub mod order;
pub mod order_product;
pub mod product;
pub mod user;
