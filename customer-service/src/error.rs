//! Startup and wiring errors
//!
//! Request-path failures use [`StoreError`](crate::storage::StoreError) and
//! [`ServiceError`](crate::service::ServiceError). This type covers everything
//! that can stop the process from coming up.

use thiserror::Error;

/// Crate-level error
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or parsed
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// Configuration loaded but failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Database connection or query failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// gRPC transport failure
    #[error("Transport error: {0}")]
    Transport(#[from] tonic::transport::Error),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;
