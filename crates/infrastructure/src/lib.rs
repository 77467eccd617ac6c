//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_authorization_repository;
mod in_memory_user_repository;
mod postgres_authorization_repository;
mod postgres_user_repository;

use sqlx::migrate::Migrator;

pub use in_memory_authorization_repository::InMemoryAuthorizationRepository;
pub use in_memory_user_repository::InMemoryUserRepository;
pub use postgres_authorization_repository::PostgresAuthorizationRepository;
pub use postgres_user_repository::PostgresUserRepository;

/// Embedded PostgreSQL schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");
