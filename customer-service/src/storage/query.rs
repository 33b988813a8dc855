//! Backend-neutral select queries
//!
//! A [`SelectQuery`] is the mutable state that query options fold over. It
//! records the table, projection, predicates, ordering and pagination, and can
//! be rendered into a parameterized PostgreSQL statement or evaluated directly
//! by an in-memory store.
//!
//! # Example
//!
//! ```rust
//! use customer_service::storage::{Predicate, SelectQuery};
//!
//! let mut query = SelectQuery::select("customers", "c", &["max_id", "name"])
//!     .order_by_desc("created_at");
//! query.and_where(Predicate::eq("max_id", "C1"));
//! query.set_limit(10);
//!
//! assert_eq!(
//!     query.to_sql(),
//!     "SELECT c.max_id, c.name FROM customers c WHERE c.max_id = $1 \
//!      ORDER BY c.created_at DESC LIMIT $2"
//! );
//! ```

use sqlx::{Postgres, QueryBuilder};

/// A single WHERE condition on an unqualified column
///
/// Values are always bound as parameters, never spliced into SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `column = value`
    Eq { column: &'static str, value: String },
    /// `column ILIKE '%needle%'`, with LIKE wildcards in the needle escaped
    ContainsIgnoreCase { column: &'static str, needle: String },
}

impl Predicate {
    pub fn eq(column: &'static str, value: impl Into<String>) -> Self {
        Self::Eq {
            column,
            value: value.into(),
        }
    }

    pub fn contains_ignore_case(column: &'static str, needle: impl Into<String>) -> Self {
        Self::ContainsIgnoreCase {
            column,
            needle: needle.into(),
        }
    }

    /// Column this predicate constrains
    pub fn column(&self) -> &'static str {
        match self {
            Self::Eq { column, .. } | Self::ContainsIgnoreCase { column, .. } => column,
        }
    }

    /// Evaluate against a column value outside the database
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::Eq { value: expected, .. } => value == expected,
            Self::ContainsIgnoreCase { needle, .. } => {
                value.to_lowercase().contains(&needle.to_lowercase())
            }
        }
    }

    fn push_sql(&self, alias: &str, builder: &mut QueryBuilder<'static, Postgres>) {
        match self {
            Self::Eq { column, value } => {
                builder.push(format_args!("{}.{} = ", alias, column));
                builder.push_bind(value.clone());
            }
            Self::ContainsIgnoreCase { column, needle } => {
                builder.push(format_args!("{}.{} ILIKE ", alias, column));
                builder.push_bind(format!("%{}%", escape_like(needle)));
            }
        }
    }
}

/// Escape `%`, `_` and `\` so they match literally inside a LIKE pattern
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Projection {
    Columns(&'static [&'static str]),
    Count,
}

/// Query-builder state shared by list and count queries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    table: &'static str,
    alias: &'static str,
    projection: Projection,
    predicates: Vec<Predicate>,
    order_by: Vec<&'static str>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl SelectQuery {
    /// Row-fetch query projecting the given columns
    pub fn select(
        table: &'static str,
        alias: &'static str,
        columns: &'static [&'static str],
    ) -> Self {
        Self::with_projection(table, alias, Projection::Columns(columns))
    }

    /// `COUNT(*)` query over the same table
    pub fn count(table: &'static str, alias: &'static str) -> Self {
        Self::with_projection(table, alias, Projection::Count)
    }

    fn with_projection(table: &'static str, alias: &'static str, projection: Projection) -> Self {
        Self {
            table,
            alias,
            projection,
            predicates: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Append a descending ordering term
    #[must_use]
    pub fn order_by_desc(mut self, column: &'static str) -> Self {
        self.order_by.push(column);
        self
    }

    /// Add a predicate, ANDed with every existing one
    pub fn and_where(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    pub fn set_limit(&mut self, limit: u64) {
        self.limit = Some(limit);
    }

    pub fn set_offset(&mut self, offset: u64) {
        self.offset = Some(offset);
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    pub fn is_count(&self) -> bool {
        self.projection == Projection::Count
    }

    /// Render into a parameterized statement
    pub fn build(&self) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new("SELECT ");

        match self.projection {
            Projection::Columns(columns) => {
                let mut separated = builder.separated(", ");
                for column in columns {
                    separated.push(format_args!("{}.{}", self.alias, column));
                }
            }
            Projection::Count => {
                builder.push("COUNT(*)");
            }
        }

        builder.push(format_args!(" FROM {} {}", self.table, self.alias));

        for (index, predicate) in self.predicates.iter().enumerate() {
            builder.push(if index == 0 { " WHERE " } else { " AND " });
            predicate.push_sql(self.alias, &mut builder);
        }

        if !self.order_by.is_empty() {
            builder.push(" ORDER BY ");
            let mut separated = builder.separated(", ");
            for column in &self.order_by {
                separated.push(format_args!("{}.{} DESC", self.alias, column));
            }
        }

        if let Some(limit) = self.limit {
            builder.push(" LIMIT ");
            builder.push_bind(clamp_i64(limit));
        }

        if let Some(offset) = self.offset {
            builder.push(" OFFSET ");
            builder.push_bind(clamp_i64(offset));
        }

        builder
    }

    /// Rendered SQL text, with `$n` placeholders
    pub fn to_sql(&self) -> String {
        self.build().sql().to_string()
    }
}

fn clamp_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: &[&str] = &["id", "name"];

    #[test]
    fn test_bare_select() {
        let query = SelectQuery::select("things", "t", COLUMNS);
        assert_eq!(query.to_sql(), "SELECT t.id, t.name FROM things t");
    }

    #[test]
    fn test_bare_count() {
        let query = SelectQuery::count("things", "t");
        assert!(query.is_count());
        assert_eq!(query.to_sql(), "SELECT COUNT(*) FROM things t");
    }

    #[test]
    fn test_predicates_are_anded_in_order() {
        let mut query = SelectQuery::select("things", "t", COLUMNS);
        query.and_where(Predicate::eq("id", "1"));
        query.and_where(Predicate::contains_ignore_case("name", "ac"));
        assert_eq!(
            query.to_sql(),
            "SELECT t.id, t.name FROM things t WHERE t.id = $1 AND t.name ILIKE $2"
        );
    }

    #[test]
    fn test_ordering_and_pagination() {
        let mut query = SelectQuery::select("things", "t", COLUMNS)
            .order_by_desc("created_at")
            .order_by_desc("id");
        query.set_limit(5);
        query.set_offset(0);
        assert_eq!(
            query.to_sql(),
            "SELECT t.id, t.name FROM things t \
             ORDER BY t.created_at DESC, t.id DESC LIMIT $1 OFFSET $2"
        );
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }

    #[test]
    fn test_predicate_matching() {
        assert!(Predicate::eq("id", "C1").matches("C1"));
        assert!(!Predicate::eq("id", "C1").matches("c1"));
        assert!(Predicate::contains_ignore_case("name", "CM").matches("Acme"));
        assert!(!Predicate::contains_ignore_case("name", "zz").matches("Acme"));
    }

    #[test]
    fn test_predicate_column() {
        assert_eq!(Predicate::eq("task_id", "T1").column(), "task_id");
        assert_eq!(Predicate::contains_ignore_case("name", "a").column(), "name");
    }
}
