pub mod page;
pub mod problem;
