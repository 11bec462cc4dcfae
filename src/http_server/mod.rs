//! HTTP gateway
//!
//! The invoking gateway for the pure handlers: per-entity axum routers
//! convert HTTP requests into `RequestEvent`s and handler responses back
//! into HTTP responses. Route groups are combined in `server.rs`.

pub mod care_intake_routes;
pub mod care_plan_routes;
pub mod config;
mod gateway;
pub mod intake_routes;
pub mod server;
pub mod task_routes;

pub use config::HttpServerConfig;
pub use server::{build_router, HttpServer};
