//! Domain model shared by every layer

mod customer;
mod feedback;

pub use customer::{CreateCustomer, Customer, CustomerType, UnknownCustomerType, UpdateCustomer};
pub use feedback::{CreateFeedback, Feedback, MAX_RATING, MIN_RATING};
