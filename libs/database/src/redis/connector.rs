use redis::Client;
use redis::aio::ConnectionManager;
use tracing::info;

use crate::common::{DatabaseResult, RetryConfig, retry, retry_with_backoff};

/// Open a `ConnectionManager` and verify it with `PING`.
///
/// The manager reconnects on its own after the initial handshake.
pub async fn connect(url: &str) -> DatabaseResult<ConnectionManager> {
    let client = Client::open(url)?;
    let manager = ConnectionManager::new(client).await?;

    let mut conn = manager.clone();
    let _: String = redis::cmd("PING").query_async(&mut conn).await?;

    info!("Connected to Redis");
    Ok(manager)
}

/// [`connect`] with exponential backoff; `None` uses [`RetryConfig::default`]
pub async fn connect_with_retry(
    url: &str,
    retry_config: Option<RetryConfig>,
) -> DatabaseResult<ConnectionManager> {
    match retry_config {
        Some(retry_config) => retry_with_backoff(|| connect(url), retry_config).await,
        None => retry(|| connect(url)).await,
    }
}
