/// Failures of the connection lifecycle: start-up, migrations and readiness.
///
/// Query errors inside repositories stay plain `DbErr`; domain crates map
/// those themselves.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[cfg(feature = "postgres")]
    #[error("PostgreSQL unreachable after {attempts} attempt(s): {source}")]
    Unreachable {
        attempts: u32,
        #[source]
        source: sea_orm::DbErr,
    },

    #[cfg(feature = "postgres")]
    #[error("Migration failed: {0}")]
    Migration(#[source] sea_orm::DbErr),

    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),
}
