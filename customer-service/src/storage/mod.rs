//! Record stores for customers and feedback
//!
//! Stores execute composed queries and classify every storage failure into a
//! [`StoreError`]. Two implementations share the same contract:
//!
//! - [`PgStore`]: PostgreSQL via `sqlx`
//! - `MemoryStore`: in-process maps, for tests (`test-utils` feature)
//!
//! The traits use RPITIT (Return Position Impl Trait In Traits) so services
//! can stay generic over the store without `async_trait`.

use std::future::Future;

use crate::domain::{CreateCustomer, CreateFeedback, Customer, Feedback, UpdateCustomer};

mod error;
mod options;
mod query;

pub mod postgres;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

pub use error::{EntityKind, StoreError, StoreErrorKind, StoreOperation, StoreResult};
pub use options::{
    compose_count, compose_select, customer_count_query, customer_list_query,
    feedback_count_query, feedback_list_query, CustomerOption, FeedbackOption, QueryOption,
};
pub use postgres::PgStore;
pub use query::{escape_like, Predicate, SelectQuery};

#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryStore;

/// Customer persistence
pub trait CustomerStore: Send + Sync {
    /// Fetch a customer by external key
    ///
    /// Returns [`StoreErrorKind::NotFound`] when no row matches.
    fn get_customer(&self, max_id: &str) -> impl Future<Output = StoreResult<Customer>> + Send;

    /// Fetch a page of customers and the total matching the same filters
    fn list_customers(
        &self,
        options: &[CustomerOption],
    ) -> impl Future<Output = StoreResult<(Vec<Customer>, u64)>> + Send;

    /// Count customers matching the filters; pagination options are ignored
    fn count_customers(
        &self,
        options: &[CustomerOption],
    ) -> impl Future<Output = StoreResult<u64>> + Send;

    /// Insert a customer
    ///
    /// A duplicate key is [`StoreErrorKind::AlreadyExists`].
    fn create_customer(
        &self,
        input: CreateCustomer,
    ) -> impl Future<Output = StoreResult<Customer>> + Send;

    /// Overwrite name, about and type, refreshing `updated_at`
    fn update_customer(
        &self,
        input: UpdateCustomer,
    ) -> impl Future<Output = StoreResult<Customer>> + Send;

    /// Hard-delete a customer and, through the schema, its feedback
    fn delete_customer(&self, max_id: &str) -> impl Future<Output = StoreResult<()>> + Send;
}

/// Feedback persistence
pub trait FeedbackStore: Send + Sync {
    fn get_feedback(&self, id: &str) -> impl Future<Output = StoreResult<Feedback>> + Send;

    /// Fetch a page of feedback and the total matching the same filters
    fn list_feedbacks(
        &self,
        options: &[FeedbackOption],
    ) -> impl Future<Output = StoreResult<(Vec<Feedback>, u64)>> + Send;

    fn count_feedbacks(
        &self,
        options: &[FeedbackOption],
    ) -> impl Future<Output = StoreResult<u64>> + Send;

    /// Insert feedback under a freshly generated id
    ///
    /// A missing customer is [`StoreErrorKind::Invalid`].
    fn create_feedback(
        &self,
        input: CreateFeedback,
    ) -> impl Future<Output = StoreResult<Feedback>> + Send;
}
