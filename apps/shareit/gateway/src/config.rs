use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_or_default, env_parse, server::ServerConfig};
use std::time::Duration;

pub use core_config::Environment;

/// Port the gateway listens on when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 8080;

/// Where the ShareIt server lives and how long to wait for it.
///
/// Environment variables:
/// - `SHAREIT_SERVER_URL` (default: `http://localhost:9090`)
/// - `SHAREIT_REQUEST_TIMEOUT_SECS` (default: 30)
#[derive(Clone, Debug)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl FromEnv for UpstreamConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = env_or_default("SHAREIT_SERVER_URL", "http://localhost:9090");
        let timeout_secs: u64 = env_parse("SHAREIT_REQUEST_TIMEOUT_SECS", "30")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub upstream: UpstreamConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            upstream: UpstreamConfig::from_env()?,
            server: ServerConfig::from_env_with_port(DEFAULT_PORT)?,
            environment: Environment::from_env(),
        })
    }
}
