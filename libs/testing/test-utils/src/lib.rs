//! Shared test utilities for domain testing
//!
//! This crate provides reusable test infrastructure for all domain crates:
//! - `TestDatabase`: PostgreSQL container with automatic cleanup (feature: "postgres")
//! - `TestRedis`: Redis container with automatic cleanup (feature: "redis")
//! - `TestDataBuilder`: Deterministic test data generation (always available)
//!
//! # Features
//!
//! - `postgres` (default): Enables PostgreSQL test infrastructure
//! - `redis`: Enables Redis test infrastructure
//! - `all`: Enables all database test infrastructure
//!
//! # Usage
//!
//! ## PostgreSQL Testing
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let beer_name = builder.beer_name("main");
//!     let upc = builder.upc(1);
//! }
//! ```
//!
//! ## Redis Testing
//!
//! Add `features = ["redis"]` to your dev-dependencies:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { workspace = true, features = ["redis"] }
//! ```
//!
//! Then in your tests:
//!
//! ```rust,ignore
//! use test_utils::TestRedis;
//! use redis::AsyncCommands;
//!
//! #[tokio::test]
//! async fn my_redis_test() {
//!     let redis = TestRedis::new().await;
//!     let mut conn = redis.connection();
//!
//!     conn.set::<_, _, ()>("key", "value").await.unwrap();
//!     let value: String = conn.get("key").await.unwrap();
//!     assert_eq!(value, "value");
//! }
//! ```

use uuid::Uuid;

// Conditionally compile database modules based on features
#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "redis")]
mod redis;

// Re-export based on enabled features
#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

#[cfg(feature = "redis")]
pub use redis::TestRedis;

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by using seeded random data.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// This is the recommended way to create a builder for consistent test data.
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_beer");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Deterministic id for fixtures that need a known, unused beer id
    pub fn beer_id(&self) -> Uuid {
        let bytes = self.seed.to_le_bytes();
        let mut uuid_bytes = [0u8; 16];
        uuid_bytes[..8].copy_from_slice(&bytes);
        uuid_bytes[8..16].copy_from_slice(&bytes);
        Uuid::from_bytes(uuid_bytes)
    }

    /// Beer name unique to this builder
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.beer_name("porter"), "test-beer-7-porter");
    /// ```
    pub fn beer_name(&self, suffix: &str) -> String {
        format!("test-beer-{}-{}", self.seed, suffix)
    }

    /// 13-digit UPC, distinct per `index` and per builder
    pub fn upc(&self, index: u32) -> String {
        let base = self.seed % 100_000_000;
        format!("{:08}{:05}", base, index % 100_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::new(42);
        let builder2 = TestDataBuilder::new(42);

        assert_eq!(builder1.beer_id(), builder2.beer_id());
        assert_eq!(builder1.beer_name("ale"), builder2.beer_name("ale"));
        assert_eq!(builder1.upc(3), builder2.upc(3));
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        assert_ne!(builder1.beer_id(), builder2.beer_id());
    }

    #[test]
    fn test_upc_shape() {
        let builder = TestDataBuilder::new(123);
        let upc = builder.upc(9);

        assert_eq!(upc.len(), 13);
        assert!(upc.chars().all(|c| c.is_ascii_digit()));
        assert_ne!(builder.upc(1), builder.upc(2));
    }
}
