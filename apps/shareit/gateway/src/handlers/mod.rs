//! Gateway routes. Each one validates its input and forwards the call to
//! the ShareIt server at the same path.

use crate::client::ServerClient;
use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::{AppError, HealthCheckFuture, run_health_checks};

pub mod bookings;
pub mod items;
pub mod requests;
pub mod users;

/// What every forwarding handler returns.
pub type Forwarded = Result<Response, AppError>;

pub fn routes(server: ServerClient) -> Router {
    Router::new()
        .nest("/users", users::router())
        .nest("/items", items::router())
        .nest("/bookings", bookings::router())
        .nest("/requests", requests::router())
        .route("/ready", get(ready_handler))
        .with_state(server)
}

/// Ready when the ShareIt server answers its own `/health`.
async fn ready_handler(State(server): State<ServerClient>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> =
        vec![("shareit_server", Box::pin(server.ping()))];

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}
