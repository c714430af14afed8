pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod sea_orm_repo;
pub mod users_directory;

pub use sea_orm_repo::SeaOrmOrdersStore;
pub use users_directory::SeaOrmUsersDirectory;
