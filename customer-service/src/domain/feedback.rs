//! Feedback left on a customer for a task

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest accepted rating
pub const MIN_RATING: i32 = 1;

/// Highest accepted rating
pub const MAX_RATING: i32 = 5;

/// A stored feedback entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Generated by the store on creation; immutable
    pub id: String,
    /// Customer being rated
    pub customer_id: String,
    /// Author of the feedback
    pub user_id: String,
    pub rating: i32,
    pub comment: String,
    /// Unit of work the feedback belongs to
    pub task_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a feedback entry
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreateFeedback {
    pub customer_id: String,
    pub user_id: String,
    pub rating: i32,
    pub comment: String,
    pub task_id: String,
}
