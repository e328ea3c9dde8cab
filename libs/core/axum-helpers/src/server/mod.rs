//! Server infrastructure: router assembly, health endpoints, graceful shutdown.
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::app_info;
//!
//! let router = create_router::<ApiDoc>(api_routes)
//!     .await?
//!     .merge(health_router(app_info!()));
//!
//! create_production_app(router, &config, Duration::from_secs(30), cleanup).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{REQUEST_TIMEOUT, create_production_app, create_router, with_common_layers};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
