/// Error returned by the connection helpers
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[cfg(feature = "postgres")]
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sea_orm::DbErr),

    #[cfg(feature = "redis")]
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Migration error for {app}: {details}")]
    MigrationError { app: String, details: String },
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
