use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Port the backend listens on when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 9090;

#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?;
        let server = ServerConfig::from_env_with_port(DEFAULT_PORT)?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_backend_port() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/shareit")),
                ("PORT", None),
                ("APP_ENV", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.server.port, DEFAULT_PORT);
                assert_eq!(config.app.name, "shareit_server");
                assert!(config.environment.is_development());
            },
        );
    }

    #[test]
    fn test_requires_database_url() {
        temp_env::with_var_unset("DATABASE_URL", || {
            assert!(Config::from_env().is_err());
        });
    }
}
