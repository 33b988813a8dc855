//! Store error taxonomy
//!
//! Every failure leaving a store is classified into one of four kinds, scoped
//! to the entity the operation touched. Storage-native errors never cross the
//! store boundary.
//!
//! # Example
//!
//! ```rust
//! use customer_service::storage::{EntityKind, StoreError, StoreErrorKind, StoreOperation};
//!
//! let error = StoreError::not_found(EntityKind::Customer, StoreOperation::Get, "C1");
//! assert_eq!(error.kind, StoreErrorKind::NotFound);
//! assert_eq!(error.to_string(), "customer not found during get [C1]");
//! ```

use std::fmt;

/// Entity an operation was working on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Customer,
    Feedback,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Feedback => write!(f, "feedback"),
        }
    }
}

/// Operation being performed when the error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    /// Fetching a single record by key
    Get,
    /// Fetching a filtered page of records
    List,
    /// Counting records matching filters
    Count,
    Create,
    Update,
    Delete,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::List => write!(f, "list"),
            Self::Count => write!(f, "count"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Category of store error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreErrorKind {
    /// No matching row on get, update or delete
    NotFound,
    /// Unique constraint conflict on insert
    AlreadyExists,
    /// Foreign key violation on insert
    Invalid,
    /// Anything else, including timeouts and connection failures
    Internal,
}

impl fmt::Display for StoreErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::AlreadyExists => write!(f, "already exists"),
            Self::Invalid => write!(f, "invalid"),
            Self::Internal => write!(f, "internal error"),
        }
    }
}

/// Structured store error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub entity: EntityKind,
    pub kind: StoreErrorKind,
    pub operation: StoreOperation,
    /// Key of the record involved, when there is one
    pub entity_id: Option<String>,
}

impl StoreError {
    /// Create a new store error without record context
    pub fn new(entity: EntityKind, operation: StoreOperation, kind: StoreErrorKind) -> Self {
        Self {
            entity,
            kind,
            operation,
            entity_id: None,
        }
    }

    /// Create a "not found" error for the given key
    pub fn not_found(
        entity: EntityKind,
        operation: StoreOperation,
        entity_id: impl Into<String>,
    ) -> Self {
        Self::new(entity, operation, StoreErrorKind::NotFound).with_entity_id(entity_id)
    }

    /// Create an "already exists" error for the given key
    pub fn already_exists(entity: EntityKind, entity_id: impl Into<String>) -> Self {
        Self::new(entity, StoreOperation::Create, StoreErrorKind::AlreadyExists)
            .with_entity_id(entity_id)
    }

    /// Create an "invalid" error (a referenced record does not exist)
    pub fn invalid(entity: EntityKind, operation: StoreOperation) -> Self {
        Self::new(entity, operation, StoreErrorKind::Invalid)
    }

    /// Create an internal error
    pub fn internal(entity: EntityKind, operation: StoreOperation) -> Self {
        Self::new(entity, operation, StoreErrorKind::Internal)
    }

    /// Attach the key of the record involved
    pub fn with_entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == StoreErrorKind::NotFound
    }

    pub fn is_internal(&self) -> bool {
        self.kind == StoreErrorKind::Internal
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} during {}", self.entity, self.kind, self.operation)?;
        if let Some(ref id) = self.entity_id {
            write!(f, " [{}]", id)?;
        }
        Ok(())
    }
}

impl std::error::Error for StoreError {}

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_operation_display() {
        assert_eq!(format!("{}", StoreOperation::Get), "get");
        assert_eq!(format!("{}", StoreOperation::List), "list");
        assert_eq!(format!("{}", StoreOperation::Count), "count");
        assert_eq!(format!("{}", StoreOperation::Create), "create");
        assert_eq!(format!("{}", StoreOperation::Update), "update");
        assert_eq!(format!("{}", StoreOperation::Delete), "delete");
    }

    #[test]
    fn test_store_error_kind_display() {
        assert_eq!(format!("{}", StoreErrorKind::NotFound), "not found");
        assert_eq!(format!("{}", StoreErrorKind::AlreadyExists), "already exists");
        assert_eq!(format!("{}", StoreErrorKind::Invalid), "invalid");
        assert_eq!(format!("{}", StoreErrorKind::Internal), "internal error");
    }

    #[test]
    fn test_not_found_convenience() {
        let error = StoreError::not_found(EntityKind::Feedback, StoreOperation::Get, "f-1");
        assert_eq!(error.entity, EntityKind::Feedback);
        assert_eq!(error.kind, StoreErrorKind::NotFound);
        assert_eq!(error.entity_id.as_deref(), Some("f-1"));
        assert!(error.is_not_found());
        assert!(!error.is_internal());
    }

    #[test]
    fn test_already_exists_is_a_create_failure() {
        let error = StoreError::already_exists(EntityKind::Customer, "C1");
        assert_eq!(error.operation, StoreOperation::Create);
        assert_eq!(error.kind, StoreErrorKind::AlreadyExists);
    }

    #[test]
    fn test_display_without_entity_id() {
        let error = StoreError::internal(EntityKind::Customer, StoreOperation::List);
        assert_eq!(error.to_string(), "customer internal error during list");
    }

    #[test]
    fn test_display_with_entity_id() {
        let error = StoreError::invalid(EntityKind::Feedback, StoreOperation::Create)
            .with_entity_id("f-9");
        assert_eq!(error.to_string(), "feedback invalid during create [f-9]");
    }

    #[test]
    fn test_error_is_error_trait() {
        let error: Box<dyn std::error::Error> =
            Box::new(StoreError::not_found(EntityKind::Customer, StoreOperation::Delete, "C1"));
        assert!(error.to_string().contains("not found"));
    }
}
