use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::{to_total, PgStore};
use crate::domain::{CreateFeedback, Feedback};
use crate::storage::{
    feedback_count_query, feedback_list_query, EntityKind, FeedbackOption, FeedbackStore,
    StoreOperation, StoreResult,
};

const SELECT_BY_ID: &str = "SELECT id, customer_id, user_id, task_id, rating, comment, \
                            created_at, updated_at FROM feedbacks WHERE id = $1";

const INSERT: &str = "INSERT INTO feedbacks (id, customer_id, user_id, task_id, rating, comment) \
                      VALUES ($1, $2, $3, $4, $5, $6) \
                      RETURNING id, customer_id, user_id, task_id, rating, comment, \
                      created_at, updated_at";

#[derive(Debug, FromRow)]
struct FeedbackRow {
    id: String,
    customer_id: String,
    user_id: String,
    task_id: String,
    rating: i32,
    comment: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<FeedbackRow> for Feedback {
    fn from(row: FeedbackRow) -> Self {
        Self {
            id: row.id,
            customer_id: row.customer_id,
            user_id: row.user_id,
            rating: row.rating,
            comment: row.comment,
            task_id: row.task_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl FeedbackStore for PgStore {
    async fn get_feedback(&self, id: &str) -> StoreResult<Feedback> {
        let row = self
            .run(
                EntityKind::Feedback,
                StoreOperation::Get,
                Some(id),
                sqlx::query_as::<_, FeedbackRow>(SELECT_BY_ID)
                    .bind(id)
                    .fetch_one(&self.pool),
            )
            .await?;

        Ok(row.into())
    }

    async fn list_feedbacks(
        &self,
        options: &[FeedbackOption],
    ) -> StoreResult<(Vec<Feedback>, u64)> {
        let mut select = feedback_list_query(options).build();
        let rows = self
            .run(
                EntityKind::Feedback,
                StoreOperation::List,
                None,
                select.build_query_as::<FeedbackRow>().fetch_all(&self.pool),
            )
            .await?;

        let total = self.count_feedbacks(options).await?;
        Ok((rows.into_iter().map(Feedback::from).collect(), total))
    }

    async fn count_feedbacks(&self, options: &[FeedbackOption]) -> StoreResult<u64> {
        let mut count = feedback_count_query(options).build();
        let total = self
            .run(
                EntityKind::Feedback,
                StoreOperation::Count,
                None,
                count.build_query_scalar::<i64>().fetch_one(&self.pool),
            )
            .await?;

        Ok(to_total(total))
    }

    async fn create_feedback(&self, input: CreateFeedback) -> StoreResult<Feedback> {
        let id = Uuid::new_v4().to_string();
        let row = self
            .run(
                EntityKind::Feedback,
                StoreOperation::Create,
                Some(&id),
                sqlx::query_as::<_, FeedbackRow>(INSERT)
                    .bind(&id)
                    .bind(&input.customer_id)
                    .bind(&input.user_id)
                    .bind(&input.task_id)
                    .bind(input.rating)
                    .bind(&input.comment)
                    .fetch_one(&self.pool),
            )
            .await?;

        Ok(row.into())
    }
}
