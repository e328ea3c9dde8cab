use axum::Router;

pub mod bookings;
pub mod health;
pub mod items;
pub mod requests;
pub mod users;

/// All ShareIt routes, mounted at the root.
///
/// Every domain router carries its own state, so the result is stateless.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new()
        .nest("/users", users::router(state))
        .nest("/items", items::router(state))
        .nest("/bookings", bookings::router(state))
        .nest("/requests", requests::router(state))
}

/// `/ready`, backed by a database ping.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
