//! # customer-service
//!
//! Customer and feedback records served over gRPC and stored in PostgreSQL.
//!
//! ## Layers
//!
//! - [`storage`]: composable query options, the store traits and their
//!   PostgreSQL implementation, with storage failures classified into a small
//!   error taxonomy
//! - [`service`]: business rules and store error conversion
//! - [`grpc`]: the `customer.v1.CustomerService` adapter and server plumbing
//!
//! ## Example
//!
//! ```rust,no_run
//! use customer_service::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let pool = create_pool(&config.database).await?;
//!     let store = PgStore::new(pool, config.database.statement_timeout());
//!     let api = CustomerApi::new(CustomerService::new(store));
//!
//!     serve(&config, api).await
//! }
//! ```

pub mod config;
pub mod database;
pub mod domain;
pub mod error;
pub mod grpc;
pub mod observability;
pub mod server;
pub mod service;
pub mod storage;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Config, DatabaseConfig, GrpcConfig, ServiceConfig};
    pub use crate::database::{create_pool, run_migrations};
    pub use crate::domain::{CreateCustomer, CreateFeedback, Customer, CustomerType, Feedback, UpdateCustomer};
    pub use crate::error::{Error, Result};
    pub use crate::grpc::{CustomerApi, CustomerServiceServer, GrpcServer};
    pub use crate::observability::init_tracing;
    pub use crate::server::serve;
    pub use crate::service::{CustomerService, ServiceError};
    pub use crate::storage::{CustomerStore, FeedbackStore, PgStore};
}
