//! Conversions between wire messages and the domain model

use super::pb;
use crate::domain::{Customer, CustomerType, Feedback};
use crate::service::ServiceError;

impl From<pb::CustomerType> for CustomerType {
    fn from(value: pb::CustomerType) -> Self {
        match value {
            pb::CustomerType::Business => Self::Company,
            pb::CustomerType::Individual | pb::CustomerType::Unspecified => Self::Individual,
        }
    }
}

impl From<CustomerType> for pb::CustomerType {
    fn from(value: CustomerType) -> Self {
        match value {
            CustomerType::Individual => Self::Individual,
            CustomerType::Company => Self::Business,
        }
    }
}

impl From<Customer> for pb::Customer {
    fn from(customer: Customer) -> Self {
        Self {
            max_id: customer.max_id,
            name: customer.name,
            about: customer.about,
            r#type: pb::CustomerType::from(customer.customer_type).into(),
            created_at: customer.created_at.timestamp(),
            updated_at: customer.updated_at.timestamp(),
        }
    }
}

impl From<Feedback> for pb::Feedback {
    fn from(feedback: Feedback) -> Self {
        Self {
            id: feedback.id,
            customer_id: feedback.customer_id,
            user_id: feedback.user_id,
            rating: feedback.rating,
            comment: feedback.comment,
            task_id: feedback.task_id,
            created_at: feedback.created_at.timestamp(),
            updated_at: feedback.updated_at.timestamp(),
        }
    }
}

/// Wire enum for a customer message; out-of-range values read as unspecified
pub(crate) fn customer_type(customer: &pb::Customer) -> CustomerType {
    customer.r#type().into()
}

pub(crate) fn error_code(err: &ServiceError) -> pb::ErrorCode {
    if err.is_not_found() {
        pb::ErrorCode::NotFound
    } else if err.is_already_exists() {
        pb::ErrorCode::AlreadyExists
    } else if err.is_invalid() {
        pb::ErrorCode::Validation
    } else if err.is_internal() {
        pb::ErrorCode::Internal
    } else {
        pb::ErrorCode::Unspecified
    }
}

impl From<ServiceError> for pb::Error {
    fn from(err: ServiceError) -> Self {
        Self {
            code: error_code(&err).into(),
            message: err.to_string(),
        }
    }
}

/// Structured validation failure for a malformed request
pub(crate) fn validation_error(message: &str) -> pb::Error {
    pb::Error {
        code: pb::ErrorCode::Validation.into(),
        message: message.to_string(),
    }
}

/// Saturating conversion of a store total to the wire's `int32`
pub(crate) fn to_wire_total(total: u64) -> i32 {
    i32::try_from(total).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_customer_type_from_wire() {
        assert_eq!(CustomerType::from(pb::CustomerType::Individual), CustomerType::Individual);
        assert_eq!(CustomerType::from(pb::CustomerType::Business), CustomerType::Company);
        assert_eq!(CustomerType::from(pb::CustomerType::Unspecified), CustomerType::Individual);
    }

    #[test]
    fn test_unknown_wire_type_reads_as_individual() {
        let message = pb::Customer {
            r#type: 42,
            ..Default::default()
        };
        assert_eq!(customer_type(&message), CustomerType::Individual);
    }

    #[test]
    fn test_customer_to_wire() {
        let created = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let customer = Customer {
            max_id: "C1".to_string(),
            name: "Acme".to_string(),
            about: String::new(),
            customer_type: CustomerType::Company,
            created_at: created,
            updated_at: created,
        };

        let wire = pb::Customer::from(customer);
        assert_eq!(wire.r#type(), pb::CustomerType::Business);
        assert_eq!(wire.created_at, created.timestamp());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(error_code(&ServiceError::CustomerNotFound), pb::ErrorCode::NotFound);
        assert_eq!(error_code(&ServiceError::FeedbackAlreadyExists), pb::ErrorCode::AlreadyExists);
        assert_eq!(error_code(&ServiceError::FeedbackInvalid), pb::ErrorCode::Validation);
        assert_eq!(error_code(&ServiceError::CustomerInternal), pb::ErrorCode::Internal);
    }

    #[test]
    fn test_service_error_to_wire() {
        let wire = pb::Error::from(ServiceError::CustomerNotFound);
        assert_eq!(wire.code(), pb::ErrorCode::NotFound);
        assert_eq!(wire.message, "customer not found");
    }

    #[test]
    fn test_total_saturates() {
        assert_eq!(to_wire_total(3), 3);
        assert_eq!(to_wire_total(u64::MAX), i32::MAX);
    }
}
