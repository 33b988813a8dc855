//! In-memory record store
//!
//! Evaluates the same composed [`SelectQuery`] values the PostgreSQL store
//! renders, so filter semantics can be exercised without a database. The
//! schema's constraints are mirrored: unique customer keys, the feedback to
//! customer reference, and cascade delete.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    customer_count_query, customer_list_query, feedback_count_query, feedback_list_query,
    CustomerOption, CustomerStore, EntityKind, FeedbackOption, FeedbackStore, SelectQuery,
    StoreError, StoreOperation, StoreResult,
};
use crate::domain::{CreateCustomer, CreateFeedback, Customer, Feedback, UpdateCustomer};

/// A row the query evaluator can filter and order
trait Record: Clone {
    /// Column value as text, `None` for unknown columns
    fn field(&self, column: &str) -> Option<String>;
    fn created_at(&self) -> DateTime<Utc>;
    fn key(&self) -> &str;
}

impl Record for Customer {
    fn field(&self, column: &str) -> Option<String> {
        match column {
            "max_id" => Some(self.max_id.clone()),
            "name" => Some(self.name.clone()),
            "about" => Some(self.about.clone()),
            "type" => Some(self.customer_type.as_str().to_string()),
            _ => None,
        }
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn key(&self) -> &str {
        &self.max_id
    }
}

impl Record for Feedback {
    fn field(&self, column: &str) -> Option<String> {
        match column {
            "id" => Some(self.id.clone()),
            "customer_id" => Some(self.customer_id.clone()),
            "user_id" => Some(self.user_id.clone()),
            "task_id" => Some(self.task_id.clone()),
            "rating" => Some(self.rating.to_string()),
            "comment" => Some(self.comment.clone()),
            _ => None,
        }
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn key(&self) -> &str {
        &self.id
    }
}

fn matches<R: Record>(query: &SelectQuery, record: &R) -> bool {
    query.predicates().iter().all(|predicate| {
        record
            .field(predicate.column())
            .is_some_and(|value| predicate.matches(&value))
    })
}

/// Filter, order newest first, then paginate
fn select<'a, R, I>(query: &SelectQuery, records: I) -> Vec<R>
where
    R: Record + 'a,
    I: Iterator<Item = &'a R>,
{
    let mut rows: Vec<R> = records.filter(|r| matches(query, *r)).cloned().collect();
    rows.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| b.key().cmp(a.key()))
    });

    let offset = usize::try_from(query.offset().unwrap_or(0)).unwrap_or(usize::MAX);
    let limit = query
        .limit()
        .map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));
    rows.into_iter().skip(offset).take(limit).collect()
}

fn count<'a, R, I>(query: &SelectQuery, records: I) -> u64
where
    R: Record + 'a,
    I: Iterator<Item = &'a R>,
{
    records.filter(|r| matches(query, *r)).count() as u64
}

#[derive(Debug, Default)]
struct State {
    customers: BTreeMap<String, Customer>,
    feedbacks: BTreeMap<String, Feedback>,
    last_tick: Option<DateTime<Utc>>,
}

impl State {
    /// Strictly increasing timestamp so creation order is observable
    fn tick(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let next = match self.last_tick {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_tick = Some(next);
        next
    }
}

/// Store holding every record in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CustomerStore for MemoryStore {
    async fn get_customer(&self, max_id: &str) -> StoreResult<Customer> {
        self.state
            .read()
            .await
            .customers
            .get(max_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::Customer, StoreOperation::Get, max_id))
    }

    async fn list_customers(
        &self,
        options: &[CustomerOption],
    ) -> StoreResult<(Vec<Customer>, u64)> {
        let state = self.state.read().await;
        let rows = select(&customer_list_query(options), state.customers.values());
        let total = count(&customer_count_query(options), state.customers.values());
        Ok((rows, total))
    }

    async fn count_customers(&self, options: &[CustomerOption]) -> StoreResult<u64> {
        let state = self.state.read().await;
        Ok(count(&customer_count_query(options), state.customers.values()))
    }

    async fn create_customer(&self, input: CreateCustomer) -> StoreResult<Customer> {
        let mut state = self.state.write().await;
        if state.customers.contains_key(&input.max_id) {
            return Err(StoreError::already_exists(EntityKind::Customer, input.max_id));
        }

        let now = state.tick();
        let customer = Customer {
            max_id: input.max_id,
            name: input.name,
            about: input.about,
            customer_type: input.customer_type,
            created_at: now,
            updated_at: now,
        };
        state
            .customers
            .insert(customer.max_id.clone(), customer.clone());
        Ok(customer)
    }

    async fn update_customer(&self, input: UpdateCustomer) -> StoreResult<Customer> {
        let mut state = self.state.write().await;
        let now = state.tick();
        let customer = state.customers.get_mut(&input.max_id).ok_or_else(|| {
            StoreError::not_found(EntityKind::Customer, StoreOperation::Update, &input.max_id)
        })?;

        customer.name = input.name;
        customer.about = input.about;
        customer.customer_type = input.customer_type;
        customer.updated_at = now;
        Ok(customer.clone())
    }

    async fn delete_customer(&self, max_id: &str) -> StoreResult<()> {
        let mut state = self.state.write().await;
        if state.customers.remove(max_id).is_none() {
            return Err(StoreError::not_found(
                EntityKind::Customer,
                StoreOperation::Delete,
                max_id,
            ));
        }
        state.feedbacks.retain(|_, f| f.customer_id != max_id);
        Ok(())
    }
}

impl FeedbackStore for MemoryStore {
    async fn get_feedback(&self, id: &str) -> StoreResult<Feedback> {
        self.state
            .read()
            .await
            .feedbacks
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::Feedback, StoreOperation::Get, id))
    }

    async fn list_feedbacks(
        &self,
        options: &[FeedbackOption],
    ) -> StoreResult<(Vec<Feedback>, u64)> {
        let state = self.state.read().await;
        let rows = select(&feedback_list_query(options), state.feedbacks.values());
        let total = count(&feedback_count_query(options), state.feedbacks.values());
        Ok((rows, total))
    }

    async fn count_feedbacks(&self, options: &[FeedbackOption]) -> StoreResult<u64> {
        let state = self.state.read().await;
        Ok(count(&feedback_count_query(options), state.feedbacks.values()))
    }

    async fn create_feedback(&self, input: CreateFeedback) -> StoreResult<Feedback> {
        let id = Uuid::new_v4().to_string();
        let mut state = self.state.write().await;
        if !state.customers.contains_key(&input.customer_id) {
            return Err(
                StoreError::invalid(EntityKind::Feedback, StoreOperation::Create).with_entity_id(id),
            );
        }

        let now = state.tick();
        let feedback = Feedback {
            id,
            customer_id: input.customer_id,
            user_id: input.user_id,
            rating: input.rating,
            comment: input.comment,
            task_id: input.task_id,
            created_at: now,
            updated_at: now,
        };
        state.feedbacks.insert(feedback.id.clone(), feedback.clone());
        Ok(feedback)
    }
}
