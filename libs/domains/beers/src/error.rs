use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum BeerError {
    #[error("Beer not found: {0}")]
    NotFound(Uuid),

    #[error("Beer with UPC '{0}' already exists")]
    DuplicateUpc(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Inventory service error: {0}")]
    Inventory(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type BeerResult<T> = Result<T, BeerError>;

impl BeerError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, BeerError::NotFound(_))
    }
}

impl From<sea_orm::DbErr> for BeerError {
    fn from(err: sea_orm::DbErr) -> Self {
        BeerError::Database(err.to_string())
    }
}

impl From<database::DatabaseError> for BeerError {
    fn from(err: database::DatabaseError) -> Self {
        match err {
            database::DatabaseError::Redis(e) => BeerError::Cache(e.to_string()),
            other => BeerError::Database(other.to_string()),
        }
    }
}

impl From<redis::RedisError> for BeerError {
    fn from(err: redis::RedisError) -> Self {
        BeerError::Cache(err.to_string())
    }
}

// Only cache payloads go through serde_json.
impl From<serde_json::Error> for BeerError {
    fn from(err: serde_json::Error) -> Self {
        BeerError::Cache(format!("Malformed cache entry: {}", err))
    }
}

impl From<reqwest::Error> for BeerError {
    fn from(err: reqwest::Error) -> Self {
        BeerError::Inventory(err.to_string())
    }
}
