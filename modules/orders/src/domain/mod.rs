pub mod error;
pub mod ports;
pub mod repository;
pub mod service;
