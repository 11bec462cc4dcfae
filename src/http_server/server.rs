//! HTTP server
//!
//! Combines the per-entity routers into the full gateway and serves it.

use std::net::SocketAddr;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::store::{CareIntakeRepository, CarePlanRepository, IntakeRepository, TaskRepository};

use super::care_intake_routes::care_intake_routes;
use super::care_plan_routes::care_plan_routes;
use super::config::HttpServerConfig;
use super::intake_routes::intake_routes;
use super::task_routes::task_routes;

/// Build the combined router over one repository per entity.
///
/// Generic over the repositories so tests can drive the same router with
/// in-memory stores.
pub fn build_router<T, P, I, C>(tasks: T, care_plans: P, intake: I, care_intake: C) -> Router
where
    T: TaskRepository + 'static,
    P: CarePlanRepository + 'static,
    I: IntakeRepository + 'static,
    C: CareIntakeRepository + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .merge(task_routes(tasks))
        .merge(care_plan_routes(care_plans))
        .merge(intake_routes(intake))
        .merge(care_intake_routes(care_intake))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

/// HTTP server wrapping a built router
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server from a bind configuration and a built router
    pub fn new(config: HttpServerConfig, router: Router) -> Self {
        Self { config, router }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process is stopped.
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid bind address: {}", e),
            )
        })?;

        tracing::info!(%addr, "carelink gateway listening");
        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await
    }
}
