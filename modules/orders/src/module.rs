use std::sync::Arc;

use runtime::ConfigProvider;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};
use utoipa::OpenApi;

use crate::api::rest::{openapi::OrdersApiDoc, routes};
use crate::config::OrdersConfig;
use crate::contract::client::OrdersApi;
use crate::domain::{repository::OrderRepository, service::OrderService};
use crate::gateways::local::OrdersLocalClient;
use crate::infra::storage::{migrations::Migrator, SeaOrmOrdersStore, SeaOrmUsersDirectory};

/// The orders module: wires SeaORM storage to the domain and exposes REST
/// routes plus an in-process client.
#[derive(Clone)]
pub struct Orders {
    repo: Arc<OrderRepository>,
    service: Arc<OrderService>,
}

impl Orders {
    pub const NAME: &'static str = "orders";

    /// Build from the `modules.orders` config section.
    pub fn from_config(
        provider: &impl ConfigProvider,
        db: DatabaseConnection,
    ) -> anyhow::Result<Self> {
        let cfg: OrdersConfig = provider.module_config(Self::NAME)?;
        Ok(Self::init(cfg, db))
    }

    pub fn init(cfg: OrdersConfig, db: DatabaseConnection) -> Self {
        info!("Initializing orders module");
        debug!("Loaded orders config: page_size={}", cfg.page_size);

        // DatabaseConnection is a cheap cloneable pool handle.
        let store = SeaOrmOrdersStore::new(db.clone());
        let users = SeaOrmUsersDirectory::new(db);
        let repo = Arc::new(OrderRepository::new(
            Arc::new(store),
            Arc::new(users),
            cfg.page_size,
        ));
        let service = Arc::new(OrderService::new(repo.clone()));

        Self { repo, service }
    }

    pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running orders database migrations");
        Migrator::up(db, None).await?;
        info!("Orders database migrations completed successfully");
        Ok(())
    }

    pub fn register_rest(&self, router: axum::Router) -> axum::Router {
        info!("Registering orders REST routes");
        routes::register_routes(router, self.repo.clone(), self.service.clone())
    }

    pub fn openapi() -> utoipa::openapi::OpenApi {
        OrdersApiDoc::openapi()
    }

    pub fn client(&self) -> Arc<dyn OrdersApi> {
        Arc::new(OrdersLocalClient::new(
            self.repo.clone(),
            self.service.clone(),
        ))
    }

    pub fn repository(&self) -> Arc<OrderRepository> {
        self.repo.clone()
    }

    pub fn service(&self) -> Arc<OrderService> {
        self.service.clone()
    }
}
