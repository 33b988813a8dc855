//! Business rules over the record stores
//!
//! [`CustomerService`] validates input before mutation, delegates to a store,
//! and converts store errors into [`ServiceError`]. Internal failures are
//! logged with the identifiers involved; expected outcomes such as not found
//! or a duplicate key are returned without an error log.

mod customer;
mod error;
mod feedback;

pub use customer::CustomerSearch;
pub use error::{ServiceError, ServiceResult};
pub use feedback::{validate_feedback, FeedbackSearch};

use crate::storage::StoreError;

/// Domain service, generic over the store it delegates to
#[derive(Debug, Clone)]
pub struct CustomerService<S> {
    storage: S,
}

impl<S> CustomerService<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }
}

/// Convert a store error, logging it when it is internal
fn from_store(err: StoreError, context: &str) -> ServiceError {
    if err.is_internal() {
        tracing::error!(
            error = %err,
            entity_id = err.entity_id.as_deref(),
            "Failed to {}",
            context
        );
    }
    ServiceError::from(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{EntityKind, StoreOperation};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn convert_logged(err: StoreError) -> (ServiceError, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_writer(move || writer.clone())
            .finish();

        let converted =
            tracing::subscriber::with_default(subscriber, || from_store(err, "list feedbacks"));
        let line = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        (converted, line)
    }

    #[test]
    fn test_internal_error_without_id_omits_entity_id() {
        let (converted, line) =
            convert_logged(StoreError::internal(EntityKind::Feedback, StoreOperation::List));
        assert_eq!(converted, ServiceError::FeedbackInternal);
        assert!(line.contains("Failed to list feedbacks"));
        assert!(!line.contains("entity_id"));
    }

    #[test]
    fn test_internal_error_with_id_records_entity_id() {
        let err = StoreError::internal(EntityKind::Customer, StoreOperation::Get).with_entity_id("C1");
        let (converted, line) = convert_logged(err);
        assert_eq!(converted, ServiceError::CustomerInternal);
        assert!(line.contains(r#""entity_id":"C1""#));
    }

    #[test]
    fn test_expected_errors_are_not_logged() {
        let err = StoreError::not_found(EntityKind::Customer, StoreOperation::Get, "C1");
        let (converted, line) = convert_logged(err);
        assert_eq!(converted, ServiceError::CustomerNotFound);
        assert!(line.is_empty());
    }
}
