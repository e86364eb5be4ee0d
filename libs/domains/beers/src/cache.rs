//! Read-through cache for single-beer lookups
//!
//! Two independent namespaces exist: one keyed by beer id, one keyed by UPC.
//! Only bare DTOs are ever stored; absent lookups are never cached.

use async_trait::async_trait;
use core_config::{env_bool, env_or_default, env_parse, ConfigError, FromEnv};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::BeerResult;
use crate::models::BeerDto;

pub const DEFAULT_KEY_PREFIX: &str = "catalog";
pub const DEFAULT_TTL_SECS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Id(Uuid),
    Upc(String),
}

impl CacheKey {
    pub fn namespace(&self) -> &'static str {
        match self {
            CacheKey::Id(_) => "beer",
            CacheKey::Upc(_) => "beer-upc",
        }
    }

    /// Full backend key, e.g. `catalog:beer-upc:0631234200036`
    pub fn render(&self, prefix: &str) -> String {
        format!("{}:{}", prefix, self)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Id(id) => write!(f, "{}:{}", self.namespace(), id),
            CacheKey::Upc(upc) => write!(f, "{}:{}", self.namespace(), upc),
        }
    }
}

/// Key-value store for beer DTOs. A `put` overwrites whatever is there.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BeerCache: Send + Sync {
    async fn get(&self, key: &CacheKey) -> BeerResult<Option<BeerDto>>;

    async fn put(&self, key: &CacheKey, dto: &BeerDto) -> BeerResult<()>;

    /// Evicting a missing key is not an error
    async fn evict(&self, key: &CacheKey) -> BeerResult<()>;
}

/// Check the cache, fall back to `load` on a miss and remember what it found.
pub async fn read_through<F, Fut>(
    cache: &dyn BeerCache,
    key: CacheKey,
    load: F,
) -> BeerResult<Option<BeerDto>>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = BeerResult<Option<BeerDto>>>,
{
    if let Some(hit) = cache.get(&key).await? {
        debug!(%key, "Cache hit");
        return Ok(Some(hit));
    }

    debug!(%key, "Cache miss");
    let loaded = load().await?;

    if let Some(dto) = &loaded {
        cache.put(&key, dto).await?;
    }

    Ok(loaded)
}

/// Cache that stores nothing; every read is a miss
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBeerCache;

#[async_trait]
impl BeerCache for NoopBeerCache {
    async fn get(&self, _key: &CacheKey) -> BeerResult<Option<BeerDto>> {
        Ok(None)
    }

    async fn put(&self, _key: &CacheKey, _dto: &BeerDto) -> BeerResult<()> {
        Ok(())
    }

    async fn evict(&self, _key: &CacheKey) -> BeerResult<()> {
        Ok(())
    }
}

/// Process-local cache without expiry
#[derive(Debug, Clone, Default)]
pub struct InMemoryBeerCache {
    entries: Arc<RwLock<HashMap<CacheKey, BeerDto>>>,
}

impl InMemoryBeerCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contains(&self, key: &CacheKey) -> bool {
        self.entries.read().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl BeerCache for InMemoryBeerCache {
    async fn get(&self, key: &CacheKey) -> BeerResult<Option<BeerDto>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &CacheKey, dto: &BeerDto) -> BeerResult<()> {
        self.entries.write().await.insert(key.clone(), dto.clone());
        Ok(())
    }

    async fn evict(&self, key: &CacheKey) -> BeerResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// Cache settings
///
/// | Variable | Default |
/// |---|---|
/// | `BEER_CACHE_ENABLED` | `true` |
/// | `BEER_CACHE_TTL_SECS` | `300` |
/// | `BEER_CACHE_PREFIX` | `catalog` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    pub enabled: bool,
    pub ttl_secs: u64,
    pub key_prefix: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: DEFAULT_TTL_SECS,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }
}

impl FromEnv for CacheConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let ttl_secs = env_parse("BEER_CACHE_TTL_SECS", DEFAULT_TTL_SECS)?;
        if ttl_secs == 0 {
            return Err(ConfigError::ParseError {
                key: "BEER_CACHE_TTL_SECS".to_string(),
                details: "TTL must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            enabled: env_bool("BEER_CACHE_ENABLED", true)?,
            ttl_secs,
            key_prefix: env_or_default("BEER_CACHE_PREFIX", DEFAULT_KEY_PREFIX),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BeerStyle;

    fn galaxy_cat() -> BeerDto {
        let mut dto = BeerDto::new("Galaxy Cat", BeerStyle::PaleAle, "9122089364369", 1150);
        dto.id = Some(Uuid::now_v7());
        dto
    }

    #[test]
    fn test_key_rendering() {
        let id = Uuid::nil();
        assert_eq!(
            CacheKey::Id(id).render("catalog"),
            "catalog:beer:00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(
            CacheKey::Upc("0631234200036".to_string()).render("catalog"),
            "catalog:beer-upc:0631234200036"
        );
    }

    #[test]
    fn test_namespaces_do_not_collide() {
        let id = Uuid::now_v7();
        let as_id = CacheKey::Id(id).render("p");
        let as_upc = CacheKey::Upc(id.to_string()).render("p");
        assert_ne!(as_id, as_upc);
    }

    #[tokio::test]
    async fn test_read_through_populates_on_miss() {
        let cache = InMemoryBeerCache::new();
        let dto = galaxy_cat();
        let key = CacheKey::Id(dto.id.unwrap());

        let expected = dto.clone();
        let loaded = read_through(&cache, key.clone(), || async move { Ok(Some(expected)) })
            .await
            .unwrap();

        assert_eq!(loaded, Some(dto.clone()));
        assert_eq!(cache.get(&key).await.unwrap(), Some(dto));
    }

    #[tokio::test]
    async fn test_read_through_hit_skips_loader() {
        let cache = InMemoryBeerCache::new();
        let dto = galaxy_cat();
        let key = CacheKey::Upc(dto.upc.clone());
        cache.put(&key, &dto).await.unwrap();

        let mut loader_ran = false;
        let loaded = read_through(&cache, key, || {
            loader_ran = true;
            async { Ok(None) }
        })
        .await
        .unwrap();

        assert_eq!(loaded, Some(dto));
        assert!(!loader_ran);
    }

    #[tokio::test]
    async fn test_read_through_does_not_cache_absent() {
        let cache = InMemoryBeerCache::new();
        let key = CacheKey::Id(Uuid::now_v7());

        let loaded = read_through(&cache, key.clone(), || async { Ok(None) })
            .await
            .unwrap();

        assert!(loaded.is_none());
        assert!(!cache.contains(&key).await);
    }

    #[tokio::test]
    async fn test_put_overwrites_and_evict_is_idempotent() {
        let cache = InMemoryBeerCache::new();
        let mut dto = galaxy_cat();
        let key = CacheKey::Id(dto.id.unwrap());

        cache.put(&key, &dto).await.unwrap();
        dto.price = 999;
        cache.put(&key, &dto).await.unwrap();
        assert_eq!(cache.get(&key).await.unwrap().map(|d| d.price), Some(999));
        assert_eq!(cache.len().await, 1);

        cache.evict(&key).await.unwrap();
        cache.evict(&key).await.unwrap();
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_noop_cache_always_misses() {
        let cache = NoopBeerCache;
        let dto = galaxy_cat();
        let key = CacheKey::Id(dto.id.unwrap());

        cache.put(&key, &dto).await.unwrap();
        assert!(cache.get(&key).await.unwrap().is_none());
    }

    #[test]
    fn test_cache_config_defaults() {
        temp_env::with_vars(
            [
                ("BEER_CACHE_ENABLED", None::<&str>),
                ("BEER_CACHE_TTL_SECS", None),
                ("BEER_CACHE_PREFIX", None),
            ],
            || {
                let config = CacheConfig::from_env().unwrap();
                assert_eq!(config, CacheConfig::default());
            },
        );
    }

    #[test]
    fn test_cache_config_from_env() {
        temp_env::with_vars(
            [
                ("BEER_CACHE_ENABLED", Some("off")),
                ("BEER_CACHE_TTL_SECS", Some("60")),
                ("BEER_CACHE_PREFIX", Some("brewery")),
            ],
            || {
                let config = CacheConfig::from_env().unwrap();
                assert!(!config.enabled);
                assert_eq!(config.ttl_secs, 60);
                assert_eq!(config.key_prefix, "brewery");
            },
        );
    }

    #[test]
    fn test_cache_config_rejects_bad_ttl() {
        temp_env::with_var("BEER_CACHE_TTL_SECS", Some("soon"), || {
            assert!(CacheConfig::from_env().is_err());
        });
        temp_env::with_var("BEER_CACHE_TTL_SECS", Some("0"), || {
            assert!(matches!(
                CacheConfig::from_env(),
                Err(ConfigError::ParseError { .. })
            ));
        });
    }
}
