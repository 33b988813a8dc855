//! Optional filters for list and count queries
//!
//! Each option is a value that knows how to mutate a list query and a count
//! query. Options are folded over a base [`SelectQuery`] in caller order, so a
//! service can always pass the full set of options and let empty arguments
//! fall away:
//!
//! - predicate options built from an empty value add nothing
//! - `Limit` applies only when positive (zero or negative means unbounded)
//! - `Offset` applies when non-negative
//! - pagination never touches the count query
//!
//! # Example
//!
//! ```rust
//! use customer_service::storage::{customer_count_query, customer_list_query, CustomerOption};
//!
//! let options = [
//!     CustomerOption::max_id("C1"),
//!     CustomerOption::name_like(""),
//!     CustomerOption::limit(20),
//! ];
//!
//! let list = customer_list_query(&options);
//! let count = customer_count_query(&options);
//! assert_eq!(list.predicates(), count.predicates());
//! assert_eq!(list.limit(), Some(20));
//! assert_eq!(count.limit(), None);
//! ```

use super::query::{Predicate, SelectQuery};
use crate::domain::CustomerType;

const CUSTOMER_TABLE: &str = "customers";
const CUSTOMER_ALIAS: &str = "c";
const CUSTOMER_COLUMNS: &[&str] =
    &["max_id", "name", "about", "type", "created_at", "updated_at"];

const FEEDBACK_TABLE: &str = "feedbacks";
const FEEDBACK_ALIAS: &str = "f";
const FEEDBACK_COLUMNS: &[&str] = &[
    "id",
    "customer_id",
    "user_id",
    "task_id",
    "rating",
    "comment",
    "created_at",
    "updated_at",
];

/// A composable query directive
pub trait QueryOption {
    /// Mutate a row-fetch query
    fn apply_select(&self, query: &mut SelectQuery);

    /// Mutate a count query
    fn apply_count(&self, query: &mut SelectQuery);
}

/// Fold options over a row-fetch query
pub fn compose_select<O: QueryOption>(mut query: SelectQuery, options: &[O]) -> SelectQuery {
    for option in options {
        option.apply_select(&mut query);
    }
    query
}

/// Fold options over a count query
pub fn compose_count<O: QueryOption>(mut query: SelectQuery, options: &[O]) -> SelectQuery {
    for option in options {
        option.apply_count(&mut query);
    }
    query
}

fn apply_limit(query: &mut SelectQuery, limit: i64) {
    if limit > 0 {
        query.set_limit(limit.unsigned_abs());
    }
}

fn apply_offset(query: &mut SelectQuery, offset: i64) {
    if offset >= 0 {
        query.set_offset(offset.unsigned_abs());
    }
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

/// Filters over customers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerOption {
    /// Exact external key
    MaxId(String),
    /// Exact name
    Name(String),
    /// Case-insensitive substring of the name
    NameLike(String),
    /// Exact customer type; `None` filters nothing
    Type(Option<CustomerType>),
    Limit(i64),
    Offset(i64),
}

impl CustomerOption {
    pub fn max_id(max_id: impl Into<String>) -> Self {
        Self::MaxId(max_id.into())
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn name_like(pattern: impl Into<String>) -> Self {
        Self::NameLike(pattern.into())
    }

    pub fn customer_type(customer_type: Option<CustomerType>) -> Self {
        Self::Type(customer_type)
    }

    pub fn limit(limit: i64) -> Self {
        Self::Limit(limit)
    }

    pub fn offset(offset: i64) -> Self {
        Self::Offset(offset)
    }

    /// The predicate this option contributes, if any
    pub fn predicate(&self) -> Option<Predicate> {
        match self {
            Self::MaxId(max_id) => non_empty(max_id).map(|v| Predicate::eq("max_id", v)),
            Self::Name(name) => non_empty(name).map(|v| Predicate::eq("name", v)),
            Self::NameLike(pattern) => {
                non_empty(pattern).map(|v| Predicate::contains_ignore_case("name", v))
            }
            Self::Type(customer_type) => customer_type.map(|t| Predicate::eq("type", t.as_str())),
            Self::Limit(_) | Self::Offset(_) => None,
        }
    }
}

impl QueryOption for CustomerOption {
    fn apply_select(&self, query: &mut SelectQuery) {
        match self {
            Self::Limit(limit) => apply_limit(query, *limit),
            Self::Offset(offset) => apply_offset(query, *offset),
            _ => self.apply_count(query),
        }
    }

    fn apply_count(&self, query: &mut SelectQuery) {
        if let Some(predicate) = self.predicate() {
            query.and_where(predicate);
        }
    }
}

/// Filters over feedback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackOption {
    /// Exact task reference
    TaskId(String),
    /// Exact author reference
    UserId(String),
    /// Exact rated-customer reference
    CustomerId(String),
    Limit(i64),
    Offset(i64),
}

impl FeedbackOption {
    pub fn task_id(task_id: impl Into<String>) -> Self {
        Self::TaskId(task_id.into())
    }

    pub fn user_id(user_id: impl Into<String>) -> Self {
        Self::UserId(user_id.into())
    }

    pub fn customer_id(customer_id: impl Into<String>) -> Self {
        Self::CustomerId(customer_id.into())
    }

    pub fn limit(limit: i64) -> Self {
        Self::Limit(limit)
    }

    pub fn offset(offset: i64) -> Self {
        Self::Offset(offset)
    }

    /// The predicate this option contributes, if any
    pub fn predicate(&self) -> Option<Predicate> {
        match self {
            Self::TaskId(task_id) => non_empty(task_id).map(|v| Predicate::eq("task_id", v)),
            Self::UserId(user_id) => non_empty(user_id).map(|v| Predicate::eq("user_id", v)),
            Self::CustomerId(customer_id) => {
                non_empty(customer_id).map(|v| Predicate::eq("customer_id", v))
            }
            Self::Limit(_) | Self::Offset(_) => None,
        }
    }
}

impl QueryOption for FeedbackOption {
    fn apply_select(&self, query: &mut SelectQuery) {
        match self {
            Self::Limit(limit) => apply_limit(query, *limit),
            Self::Offset(offset) => apply_offset(query, *offset),
            _ => self.apply_count(query),
        }
    }

    fn apply_count(&self, query: &mut SelectQuery) {
        if let Some(predicate) = self.predicate() {
            query.and_where(predicate);
        }
    }
}

/// Newest customers first, ties broken by key
pub fn customer_list_query(options: &[CustomerOption]) -> SelectQuery {
    let base = SelectQuery::select(CUSTOMER_TABLE, CUSTOMER_ALIAS, CUSTOMER_COLUMNS)
        .order_by_desc("created_at")
        .order_by_desc("max_id");
    compose_select(base, options)
}

pub fn customer_count_query(options: &[CustomerOption]) -> SelectQuery {
    compose_count(SelectQuery::count(CUSTOMER_TABLE, CUSTOMER_ALIAS), options)
}

/// Newest feedback first, ties broken by id
pub fn feedback_list_query(options: &[FeedbackOption]) -> SelectQuery {
    let base = SelectQuery::select(FEEDBACK_TABLE, FEEDBACK_ALIAS, FEEDBACK_COLUMNS)
        .order_by_desc("created_at")
        .order_by_desc("id");
    compose_select(base, options)
}

pub fn feedback_count_query(options: &[FeedbackOption]) -> SelectQuery {
    compose_count(SelectQuery::count(FEEDBACK_TABLE, FEEDBACK_ALIAS), options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_customer_options(
        max_id: &str,
        name: &str,
        pattern: &str,
        ty: Option<CustomerType>,
    ) -> Vec<CustomerOption> {
        vec![
            CustomerOption::max_id(max_id),
            CustomerOption::name(name),
            CustomerOption::name_like(pattern),
            CustomerOption::customer_type(ty),
        ]
    }

    #[test]
    fn test_empty_customer_options_are_no_ops() {
        let options = all_customer_options("", "", "", None);
        assert_eq!(customer_list_query(&options), customer_list_query(&[]));
        assert_eq!(customer_count_query(&options), customer_count_query(&[]));
    }

    #[test]
    fn test_empty_feedback_options_are_no_ops() {
        let options = [
            FeedbackOption::task_id(""),
            FeedbackOption::user_id(""),
            FeedbackOption::customer_id(""),
            FeedbackOption::limit(0),
            FeedbackOption::limit(-3),
            FeedbackOption::offset(-1),
        ];
        assert_eq!(feedback_list_query(&options), feedback_list_query(&[]));
        assert_eq!(feedback_count_query(&options), feedback_count_query(&[]));
    }

    #[test]
    fn test_customer_list_sql() {
        let mut options = all_customer_options("C1", "Acme", "cm", Some(CustomerType::Company));
        options.push(CustomerOption::limit(10));
        options.push(CustomerOption::offset(20));

        assert_eq!(
            customer_list_query(&options).to_sql(),
            "SELECT c.max_id, c.name, c.about, c.type, c.created_at, c.updated_at \
             FROM customers c \
             WHERE c.max_id = $1 AND c.name = $2 AND c.name ILIKE $3 AND c.type = $4 \
             ORDER BY c.created_at DESC, c.max_id DESC LIMIT $5 OFFSET $6"
        );
    }

    #[test]
    fn test_count_shares_predicates_and_drops_pagination() {
        let options = vec![
            CustomerOption::name_like("ac"),
            CustomerOption::limit(1),
            CustomerOption::offset(5),
            CustomerOption::customer_type(Some(CustomerType::Individual)),
        ];
        let list = customer_list_query(&options);
        let count = customer_count_query(&options);

        assert_eq!(list.predicates(), count.predicates());
        assert_eq!(count.limit(), None);
        assert_eq!(count.offset(), None);
        assert_eq!(
            count.to_sql(),
            "SELECT COUNT(*) FROM customers c WHERE c.name ILIKE $1 AND c.type = $2"
        );
    }

    #[test]
    fn test_zero_offset_is_applied_but_zero_limit_is_not() {
        let query = feedback_list_query(&[FeedbackOption::limit(0), FeedbackOption::offset(0)]);
        assert_eq!(query.limit(), None);
        assert_eq!(query.offset(), Some(0));
    }

    #[test]
    fn test_options_apply_in_caller_order() {
        let query = feedback_list_query(&[
            FeedbackOption::user_id("U1"),
            FeedbackOption::task_id("T1"),
        ]);
        let columns: Vec<_> = query.predicates().iter().map(Predicate::column).collect();
        assert_eq!(columns, ["user_id", "task_id"]);
    }

    #[test]
    fn test_later_options_only_add_predicates() {
        let query = customer_count_query(&[
            CustomerOption::max_id("C1"),
            CustomerOption::max_id("C2"),
        ]);
        assert_eq!(
            query.predicates(),
            &[Predicate::eq("max_id", "C1"), Predicate::eq("max_id", "C2")]
        );
    }

    #[test]
    fn test_feedback_list_sql() {
        let query = feedback_list_query(&[
            FeedbackOption::task_id("T1"),
            FeedbackOption::user_id(""),
            FeedbackOption::limit(10),
            FeedbackOption::offset(0),
        ]);
        assert_eq!(
            query.to_sql(),
            "SELECT f.id, f.customer_id, f.user_id, f.task_id, f.rating, f.comment, \
             f.created_at, f.updated_at FROM feedbacks f WHERE f.task_id = $1 \
             ORDER BY f.created_at DESC, f.id DESC LIMIT $2 OFFSET $3"
        );
    }

    #[test]
    fn test_feedback_count_uses_same_alias() {
        let query = feedback_count_query(&[FeedbackOption::customer_id("C1")]);
        assert_eq!(
            query.to_sql(),
            "SELECT COUNT(*) FROM feedbacks f WHERE f.customer_id = $1"
        );
    }
}
