//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum Router with the demo handlers
//! - Wire up middleware (timeout, access logging)
//! - Bind server to listener and shut down gracefully

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;

use crate::config::AppConfig;
use crate::error::HttpFailure;
use crate::http::middleware::LoggingLayer;
use crate::observability::Logger;

/// HTTP server for the demo application.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    pub fn new(config: AppConfig, logger: Arc<Logger>) -> Self {
        let router = Self::build_router(&config, logger);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, logger: Arc<Logger>) -> Router {
        let api = Router::new()
            .route("/users/{id}", get(get_user))
            .route("/echo", post(echo))
            .route("/status/{code}", get(status));

        let router = Router::new()
            .route("/health", get(health))
            .nest("/api", api)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.server.request_timeout_secs,
            )));

        if !config.access_log.enabled {
            return router;
        }

        let mut layer = LoggingLayer::new(logger);
        if let Some(component) = &config.access_log.component {
            layer = layer.component(component.clone());
        }
        router.layer(layer)
    }

    /// The configured router, for embedding or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Serve until `shutdown` resolves.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct User {
    id: u64,
    name: String,
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn get_user(Path(id): Path<u64>) -> Result<Json<User>, HttpFailure> {
    if id == 0 || id > 100 {
        return Err(HttpFailure::not_found(format!("user {} not found", id)));
    }
    Ok(Json(User {
        id,
        name: format!("user-{}", id),
    }))
}

async fn echo(body: String) -> String {
    body
}

async fn status(Path(code): Path<u16>) -> Result<impl IntoResponse, HttpFailure> {
    let status = StatusCode::from_u16(code)
        .map_err(|_| HttpFailure::new(StatusCode::BAD_REQUEST, "invalid status code"))?;
    Ok((status, status.to_string()))
}

/// Wait for Ctrl+C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
