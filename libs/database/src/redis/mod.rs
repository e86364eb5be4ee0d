//! Redis connection management for the read-through cache

mod config;
mod connector;

pub use config::RedisConfig;
pub use connector::{connect, connect_with_retry};

pub use redis::aio::ConnectionManager;
pub use redis::{AsyncCommands, RedisResult};
