use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::{cors_layer_from_env, security_headers};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

/// Upper bound for a single request, database round-trips included.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Combines the API routes with Swagger UI and the common layers.
///
/// Routes are mounted at the root (`/users`, `/items`, ...) because that is
/// the path layout ShareIt clients call. The OpenAPI document is served at
/// `/api-docs/openapi.json` and browsable under `/swagger-ui`.
///
/// Health endpoints are merged by the binary with
/// [`health_router`](super::health_router) and its own `/ready` handler.
///
/// # Errors
/// Fails when `CORS_ALLOWED_ORIGIN` is set but invalid.
///
/// # Example
/// ```ignore
/// let api_routes = Router::new().nest("/users", users_router);
/// let router = create_router::<ApiDoc>(api_routes).await?;
/// ```
pub async fn create_router<T>(apis: Router) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    use utoipa_swagger_ui::SwaggerUi;

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(apis);

    with_common_layers(router)
}

/// Fallback plus tracing, timeout, security headers, optional CORS and
/// compression.
///
/// The gateway uses this directly since it publishes no OpenAPI document.
pub fn with_common_layers(router: Router) -> io::Result<Router> {
    let router = router
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(middleware::from_fn(security_headers));

    let router = match cors_layer_from_env()? {
        Some(cors) => router.layer(cors),
        None => router,
    };

    Ok(router.layer(CompressionLayer::new()))
}

/// Serves `router` until SIGINT/SIGTERM, then runs `cleanup` with a deadline.
///
/// In-flight requests are drained by axum before `serve` returns; `cleanup`
/// (closing the database pool, for example) starts as soon as the signal
/// arrives and is abandoned after `shutdown_timeout`.
///
/// ```ignore
/// let db_for_cleanup = db.clone();
/// create_production_app(router, &config, Duration::from_secs(30), async move {
///     let _ = db_for_cleanup.close().await;
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let coordinator = ShutdownCoordinator::default();
    let shutdown_handle = coordinator.clone();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let cleanup_handle = tokio::spawn(async move {
        shutdown_handle.wait_for_signal().await;

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(()) => info!("Cleanup completed successfully"),
            Err(_) => tracing::warn!(
                "Cleanup exceeded timeout of {:?}, forcing shutdown",
                shutdown_timeout
            ),
        }
    });

    let serve_coordinator = coordinator.clone();
    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { serve_coordinator.wait_for_signal().await })
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    // A serve error must still release the cleanup task
    coordinator.shutdown();
    cleanup_handle.await.ok();

    serve_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use tower::ServiceExt;

    #[derive(OpenApi)]
    #[openapi(info(title = "test"))]
    struct TestDoc;

    fn api() -> Router {
        Router::new().route("/users", get(|| async { "[]" }))
    }

    #[tokio::test]
    async fn test_routes_are_mounted_at_root() {
        let router = create_router::<TestDoc>(api()).await.unwrap();

        let response = router
            .oneshot(Request::get("/users").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-frame-options"], "DENY");
    }

    #[tokio::test]
    async fn test_unknown_path_is_json_404() {
        let router = with_common_layers(api()).unwrap();

        let response = router
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let router = create_router::<TestDoc>(api()).await.unwrap();

        let response = router
            .oneshot(
                Request::get("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
