pub mod client;
pub mod error;
pub mod model;

pub use client::OrdersApi;
pub use error::OrdersError;
pub use model::{
    ActingUser, NewOrder, Order, OrderDraft, OrderPatch, OrderWithClientName, OrderWithProducts,
    Product,
};
