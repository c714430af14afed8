//! HTTP host for the orders server: wraps module routers with the common
//! middleware stack and serves them until cancelled.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{middleware::from_fn, routing::get, Extension, Router};
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

mod config;
pub mod request_id;
mod web;

pub use config::ApiIngressConfig;

pub struct ApiIngress {
    config: ApiIngressConfig,
}

impl Default for ApiIngress {
    fn default() -> Self {
        Self::new(ApiIngressConfig::default())
    }
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiIngressConfig {
        &self.config
    }

    /// Merge module routes with `/health` (and `/openapi.json` when a
    /// document is given), then apply the middleware stack.
    ///
    /// Layers, outermost first: SetRequestId → PropagateRequestId → Trace →
    /// request id into extensions → Timeout → CORS → BodyLimit.
    pub fn build_router(
        &self,
        modules: Router,
        openapi: Option<utoipa::openapi::OpenApi>,
    ) -> Router {
        let mut router = Router::new()
            .route("/health", get(web::health_check))
            .merge(modules)
            .fallback(web::route_not_found);

        if let Some(doc) = openapi {
            router = router
                .route("/openapi.json", get(web::openapi_json))
                .layer(Extension(Arc::new(doc)));
        }

        // Each `.layer` wraps the previous ones, so innermost goes first.
        router = router.layer(RequestBodyLimitLayer::new(self.config.body_limit_bytes));
        if self.config.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }
        router = router
            .layer(TimeoutLayer::new(Duration::from_secs(
                self.config.request_timeout_secs,
            )))
            .layer(from_fn(request_id::push_req_id_to_extensions))
            .layer(request_id::create_trace_layer())
            .layer(PropagateRequestIdLayer::new(request_id::header()))
            .layer(SetRequestIdLayer::new(
                request_id::header(),
                request_id::MakeReqId,
            ));

        router
    }

    /// Bind `bind_addr` and serve `router` until `cancel` fires, then drain
    /// in-flight requests.
    pub async fn serve(&self, router: Router, cancel: CancellationToken) -> Result<()> {
        let addr: SocketAddr = self
            .config
            .bind_addr
            .parse()
            .with_context(|| format!("invalid bind address '{}'", self.config.bind_addr))?;

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        tracing::info!("HTTP server bound on {}", addr);

        let shutdown = async move {
            cancel.cancelled().await;
            tracing::info!("HTTP server shutting down gracefully");
        };

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .context("HTTP server failed")
    }
}
