//! Users Domain
//!
//! Registration and profile management for ShareIt users. Every other domain
//! refers to users by id; email addresses are unique.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /users endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← existence checks, patch semantics
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← trait + PostgreSQL implementation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← User, CreateUser, UpdateUser
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_users::{handlers, PgUserRepository, UserService};
//!
//! let service = UserService::new(PgUserRepository::new(db.clone()));
//! let router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use models::{CreateUser, UpdateUser, User};
pub use postgres::PgUserRepository;
pub use repository::UserRepository;
pub use service::UserService;
