//! Environment-driven configuration shared by the catalog crates.
//!
//! Every config struct implements [`FromEnv`]; the helpers below keep the
//! variable lookups and parse errors uniform.

pub mod tracing;

use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Application environment, selected with `APP_ENV`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Read `key`, falling back to `default` when unset
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read `key` or fail with [`ConfigError::MissingEnvVar`]
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Read `key` and parse it, falling back to `default` when unset.
///
/// A value that is set but does not parse is an error, not a silent default.
pub fn env_parse<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Read a boolean flag. Accepts `true/false`, `1/0`, `yes/no` and `on/off`.
pub fn env_bool(key: &str, default: bool) -> Result<bool, ConfigError> {
    let Ok(raw) = env::var(key) else {
        return Ok(default);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ConfigError::ParseError {
            key: key.to_string(),
            details: format!("'{}' is not a boolean", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
            assert!(env.is_development());
            assert!(!env.is_production());
        });
    }

    #[test]
    fn test_environment_production_case_insensitive() {
        temp_env::with_var("APP_ENV", Some("PRODUCTION"), || {
            assert_eq!(Environment::from_env(), Environment::Production);
        });

        temp_env::with_var("APP_ENV", Some("staging"), || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_env_or_default() {
        temp_env::with_var("CATALOG_TEST_VAR", Some("set"), || {
            assert_eq!(env_or_default("CATALOG_TEST_VAR", "fallback"), "set");
        });

        temp_env::with_var_unset("CATALOG_TEST_VAR", || {
            assert_eq!(env_or_default("CATALOG_TEST_VAR", "fallback"), "fallback");
        });
    }

    #[test]
    fn test_env_required_missing() {
        temp_env::with_var_unset("CATALOG_REQUIRED", || {
            let err = env_required("CATALOG_REQUIRED").unwrap_err();
            assert!(err.to_string().contains("CATALOG_REQUIRED"));
            assert!(err.to_string().contains("required"));
        });
    }

    #[test]
    fn test_env_parse_uses_default_when_unset() {
        temp_env::with_var_unset("CATALOG_TTL", || {
            assert_eq!(env_parse("CATALOG_TTL", 300u64).unwrap(), 300);
        });
    }

    #[test]
    fn test_env_parse_rejects_garbage() {
        temp_env::with_var("CATALOG_TTL", Some("five minutes"), || {
            let err = env_parse::<u64>("CATALOG_TTL", 300).unwrap_err();
            assert!(matches!(err, ConfigError::ParseError { ref key, .. } if key == "CATALOG_TTL"));
        });

        temp_env::with_var("CATALOG_TTL", Some(" 60 "), || {
            assert_eq!(env_parse("CATALOG_TTL", 300u64).unwrap(), 60);
        });
    }

    #[test]
    fn test_env_bool() {
        temp_env::with_var("CATALOG_FLAG", Some("off"), || {
            assert!(!env_bool("CATALOG_FLAG", true).unwrap());
        });

        temp_env::with_var("CATALOG_FLAG", Some("Yes"), || {
            assert!(env_bool("CATALOG_FLAG", false).unwrap());
        });

        temp_env::with_var("CATALOG_FLAG", Some("maybe"), || {
            assert!(env_bool("CATALOG_FLAG", false).is_err());
        });

        temp_env::with_var_unset("CATALOG_FLAG", || {
            assert!(env_bool("CATALOG_FLAG", true).unwrap());
        });
    }
}
