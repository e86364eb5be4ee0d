use async_trait::async_trait;
use database::redis::{AsyncCommands, ConnectionManager, RedisConfig};
use tracing::instrument;

use crate::cache::{BeerCache, CacheConfig, CacheKey};
use crate::error::BeerResult;
use crate::models::BeerDto;

/// Redis-backed BeerCache
///
/// Entries are JSON strings written with `SET EX`, so they expire after
/// `ttl_secs` without any sweeping on our side.
#[derive(Clone)]
pub struct RedisBeerCache {
    conn: ConnectionManager,
    key_prefix: String,
    ttl_secs: u64,
}

impl RedisBeerCache {
    pub fn new(conn: ConnectionManager, key_prefix: impl Into<String>, ttl_secs: u64) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
            ttl_secs,
        }
    }

    /// Connect (with retry) and apply the prefix and TTL from `config`
    pub async fn from_config(redis: &RedisConfig, config: &CacheConfig) -> BeerResult<Self> {
        let conn = database::redis::connect_with_retry(&redis.url, None).await?;

        Ok(Self::new(conn, config.key_prefix.clone(), config.ttl_secs))
    }

    fn key(&self, key: &CacheKey) -> String {
        key.render(&self.key_prefix)
    }
}

#[async_trait]
impl BeerCache for RedisBeerCache {
    #[instrument(skip(self, key), fields(key = %key))]
    async fn get(&self, key: &CacheKey) -> BeerResult<Option<BeerDto>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(self.key(key)).await?;

        match value {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, key, dto), fields(key = %key))]
    async fn put(&self, key: &CacheKey, dto: &BeerDto) -> BeerResult<()> {
        let mut conn = self.conn.clone();
        let value = serde_json::to_string(dto)?;

        conn.set_ex::<_, _, ()>(self.key(key), value, self.ttl_secs)
            .await?;

        Ok(())
    }

    #[instrument(skip(self, key), fields(key = %key))]
    async fn evict(&self, key: &CacheKey) -> BeerResult<()> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(self.key(key)).await?;
        Ok(())
    }
}
