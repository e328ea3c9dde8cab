//! # Axum Helpers
//!
//! HTTP plumbing shared by the ShareIt server and gateway.
//!
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//! - **[`http`]**: CORS and security headers
//! - **[`errors`]**: `AppError` and the `ErrorResponse` body every endpoint returns
//! - **[`extractors`]**: `X-Sharer-User-Id`, positive id paths, validated JSON and query
//! - **[`pagination`]**: `from` / `size` paging
//! - **[`validation`]**: custom `validator` rules
//! - **[`audit`]**: audit events on the `audit` tracing target
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use std::time::Duration;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_routes = Router::new();
//!     let router = create_router::<ApiDoc>(api_routes).await?;
//!
//!     create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), async {}).await?;
//!     Ok(())
//! }
//! ```

pub mod audit;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod pagination;
pub mod server;
pub mod validation;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, with_common_layers,
};

pub use http::{cors_layer_from_env, create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{IdPath, SHARER_USER_ID_HEADER, SharerUserId, ValidatedJson, ValidatedQuery};

pub use pagination::{DEFAULT_PAGE_SIZE, GATEWAY_PAGE_SIZE, Page, PageParams};

pub use audit::{AuditEvent, AuditOutcome, extract_ip_from_headers, extract_user_agent};
