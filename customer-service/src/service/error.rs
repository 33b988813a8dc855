use thiserror::Error;

use crate::storage::{EntityKind, StoreError, StoreErrorKind};

/// Errors returned by [`CustomerService`](super::CustomerService)
///
/// One variant per entity and taxonomy kind. Store errors convert 1:1, so
/// nothing storage-specific leaks past the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("customer not found")]
    CustomerNotFound,
    #[error("customer already exists")]
    CustomerAlreadyExists,
    #[error("customer invalid")]
    CustomerInvalid,
    #[error("customer internal error")]
    CustomerInternal,

    #[error("feedback not found")]
    FeedbackNotFound,
    #[error("feedback already exists")]
    FeedbackAlreadyExists,
    #[error("feedback invalid")]
    FeedbackInvalid,
    #[error("feedback internal error")]
    FeedbackInternal,
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CustomerNotFound | Self::FeedbackNotFound)
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::CustomerAlreadyExists | Self::FeedbackAlreadyExists)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::CustomerInvalid | Self::FeedbackInvalid)
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, Self::CustomerInternal | Self::FeedbackInternal)
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match (err.entity, err.kind) {
            (EntityKind::Customer, StoreErrorKind::NotFound) => Self::CustomerNotFound,
            (EntityKind::Customer, StoreErrorKind::AlreadyExists) => Self::CustomerAlreadyExists,
            (EntityKind::Customer, StoreErrorKind::Invalid) => Self::CustomerInvalid,
            (EntityKind::Customer, StoreErrorKind::Internal) => Self::CustomerInternal,
            (EntityKind::Feedback, StoreErrorKind::NotFound) => Self::FeedbackNotFound,
            (EntityKind::Feedback, StoreErrorKind::AlreadyExists) => Self::FeedbackAlreadyExists,
            (EntityKind::Feedback, StoreErrorKind::Invalid) => Self::FeedbackInvalid,
            (EntityKind::Feedback, StoreErrorKind::Internal) => Self::FeedbackInternal,
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
