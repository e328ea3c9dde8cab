//! Shared application state.

/// Cloned into every router that needs it; the connection is a pool handle.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub db: database::postgres::DatabaseConnection,
}
