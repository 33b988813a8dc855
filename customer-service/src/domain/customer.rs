//! Customer records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of customer
///
/// Stored as lowercase text (`individual`, `company`). New customers default to
/// [`CustomerType::Individual`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerType {
    /// A single person
    #[default]
    Individual,
    /// A business
    Company,
}

impl CustomerType {
    /// Storage representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Company => "company",
        }
    }
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a stored type string is not a known [`CustomerType`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown customer type: {0}")]
pub struct UnknownCustomerType(pub String);

impl FromStr for CustomerType {
    type Err = UnknownCustomerType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "individual" => Ok(Self::Individual),
            "company" => Ok(Self::Company),
            other => Err(UnknownCustomerType(other.to_string())),
        }
    }
}

/// A customer, keyed by its external `max_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// External-system key; unique
    pub max_id: String,
    pub name: String,
    /// Free-text description, empty when not provided
    pub about: String,
    #[serde(rename = "type")]
    pub customer_type: CustomerType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a customer
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreateCustomer {
    pub max_id: String,
    pub name: String,
    pub about: String,
    #[serde(rename = "type")]
    pub customer_type: CustomerType,
}

/// Full overwrite of a customer's mutable fields
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpdateCustomer {
    /// Key of the customer to update; never changed
    pub max_id: String,
    pub name: String,
    pub about: String,
    #[serde(rename = "type")]
    pub customer_type: CustomerType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_type_round_trips_through_storage_text() {
        for ty in [CustomerType::Individual, CustomerType::Company] {
            assert_eq!(ty.as_str().parse::<CustomerType>(), Ok(ty));
        }
    }

    #[test]
    fn test_customer_type_rejects_unknown_text() {
        let err = "business".parse::<CustomerType>().unwrap_err();
        assert_eq!(err, UnknownCustomerType("business".to_string()));
    }

    #[test]
    fn test_customer_type_default_is_individual() {
        assert_eq!(CustomerType::default(), CustomerType::Individual);
        assert_eq!(CreateCustomer::default().customer_type, CustomerType::Individual);
    }

    #[test]
    fn test_customer_type_serializes_lowercase() {
        let json = serde_json::to_string(&CustomerType::Company).unwrap();
        assert_eq!(json, "\"company\"");
    }
}
