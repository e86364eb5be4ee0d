//! Redis test infrastructure
//!
//! Provides a `TestRedis` helper that creates a Redis container for testing.

use redis::Client;
use redis::aio::ConnectionManager;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::redis::Redis;

/// Test Redis wrapper that ensures proper cleanup
///
/// The container is automatically stopped and removed when this struct is dropped.
///
/// # Example
///
/// ```no_run
/// use test_utils::TestRedis;
/// use redis::AsyncCommands;
///
/// # async fn example() {
/// let redis = TestRedis::new().await;
/// let mut conn = redis.connection();
///
/// conn.set::<_, _, ()>("key", "value").await.unwrap();
/// let value: String = conn.get("key").await.unwrap();
/// assert_eq!(value, "value");
/// # }
/// ```
pub struct TestRedis {
    #[allow(dead_code)]
    container: ContainerAsync<Redis>,
    connection: ConnectionManager,
    pub connection_string: String,
}

impl TestRedis {
    /// Create a new test Redis instance (Redis 8 Alpine)
    pub async fn new() -> Self {
        let redis_image = Redis::default().with_tag("8-alpine");

        let container = redis_image
            .start()
            .await
            .expect("Failed to start Redis container");

        let host_port = container
            .get_host_port_ipv4(6379)
            .await
            .expect("Failed to get Redis port");

        let connection_string = format!("redis://127.0.0.1:{}", host_port);

        let client =
            Client::open(connection_string.clone()).expect("Failed to create Redis client");

        let connection = ConnectionManager::new(client)
            .await
            .expect("Failed to connect to Redis");

        tracing::info!(port = host_port, "Test Redis ready (Redis 8-alpine)");

        Self {
            container,
            connection,
            connection_string,
        }
    }

    /// Get a cloned connection manager, the same handle type the cache uses
    pub fn connection(&self) -> ConnectionManager {
        self.connection.clone()
    }

    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }
}

// Container is automatically cleaned up when TestRedis is dropped
impl Drop for TestRedis {
    fn drop(&mut self) {
        tracing::debug!("Cleaning up test Redis container");
    }
}
