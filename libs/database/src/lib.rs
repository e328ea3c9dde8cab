//! PostgreSQL plumbing shared by the ShareIt binaries and domain crates.
//!
//! # Features
//!
//! - `postgres` (default) - SeaORM connector, migrations runner, health check
//!   and [`BaseRepository`]
//! - `config` - `core_config::FromEnv` for [`postgres::PostgresConfig`]
//!
//! # Example
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//!
//! let db = postgres::connect_from_config_with_retry(PostgresConfig::from_env()?, None).await?;
//! postgres::run_migrations::<migration::Migrator>(&db, "shareit_server").await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "postgres")]
pub mod repository;

pub use common::DatabaseError;

#[cfg(feature = "postgres")]
pub use repository::BaseRepository;
