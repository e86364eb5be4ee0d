//! Configuration for the beer catalog CLI

use core_config::{ConfigError, Environment, FromEnv};
use database::postgres::PostgresConfig;
use database::redis::RedisConfig;
use domain_beers::{CacheConfig, InventoryConfig};

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub database: PostgresConfig,
    pub redis: RedisConfig,
    pub cache: CacheConfig,
    /// `None` when `INVENTORY_SERVICE_HOST` is unset; stock then reads as zero
    pub inventory: Option<InventoryConfig>,
}

impl FromEnv for Config {
    fn from_env() -> Result<Self, ConfigError> {
        let inventory = match InventoryConfig::from_env() {
            Ok(config) => Some(config),
            Err(ConfigError::MissingEnvVar(_)) => None,
            Err(e) => return Err(e),
        };

        Ok(Self {
            environment: Environment::from_env(),
            database: PostgresConfig::from_env()?,
            redis: RedisConfig::from_env()?,
            cache: CacheConfig::from_env()?,
            inventory,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_without_inventory_host() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://localhost/beers")),
                ("INVENTORY_SERVICE_HOST", None),
                ("BEER_CACHE_ENABLED", Some("false")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.database.url, "postgres://localhost/beers");
                assert!(config.inventory.is_none());
                assert!(!config.cache.enabled);
            },
        );
    }

    #[test]
    fn test_config_with_inventory_host() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://localhost/beers")),
                ("INVENTORY_SERVICE_HOST", Some("http://localhost:8082")),
                ("INVENTORY_TIMEOUT_SECS", Some("2")),
            ],
            || {
                let config = Config::from_env().unwrap();
                let inventory = config.inventory.unwrap();
                assert_eq!(inventory.host, "http://localhost:8082");
                assert_eq!(inventory.timeout_secs, 2);
            },
        );
    }

    #[test]
    fn test_config_bad_inventory_timeout_is_an_error() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://localhost/beers")),
                ("INVENTORY_SERVICE_HOST", Some("http://localhost:8082")),
                ("INVENTORY_TIMEOUT_SECS", Some("soon")),
            ],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }

    #[test]
    fn test_config_requires_database_url() {
        temp_env::with_var("DATABASE_URL", None::<&str>, || {
            assert!(matches!(
                Config::from_env(),
                Err(ConfigError::MissingEnvVar(_))
            ));
        });
    }
}
