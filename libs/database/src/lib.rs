//! Connection helpers for the catalog's PostgreSQL store and Redis cache.
//!
//! # Features
//!
//! - `postgres` (default) - PostgreSQL via SeaORM, plus migration running
//! - `redis` (default) - Redis `ConnectionManager`
//! - `config` - `core_config::FromEnv` impls for the config structs
//!
//! # Example
//!
//! ```ignore
//! use database::{postgres, redis};
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(postgres::PostgresConfig::new(url), None).await?;
//! postgres::run_migrations::<Migrator>(&db, "beer_catalog").await?;
//!
//! let cache = redis::connect_with_retry("redis://127.0.0.1:6379", None).await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "redis")]
pub mod redis;

pub use common::{DatabaseError, DatabaseResult, RetryConfig};
