use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::{to_total, PgStore};
use crate::domain::{CreateCustomer, Customer, CustomerType, UpdateCustomer};
use crate::storage::{
    customer_count_query, customer_list_query, CustomerOption, CustomerStore, EntityKind,
    StoreError, StoreOperation, StoreResult,
};

const RETURNING: &str = "RETURNING max_id, name, about, type, created_at, updated_at";

const SELECT_BY_KEY: &str = "SELECT max_id, name, about, type, created_at, updated_at \
                             FROM customers WHERE max_id = $1";

#[derive(Debug, FromRow)]
struct CustomerRow {
    max_id: String,
    name: String,
    about: String,
    #[sqlx(rename = "type")]
    customer_type: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CustomerRow {
    fn into_customer(self, operation: StoreOperation) -> StoreResult<Customer> {
        let customer_type = self.customer_type.parse::<CustomerType>().map_err(|e| {
            tracing::error!(max_id = %self.max_id, error = %e, "Stored customer has unknown type");
            StoreError::internal(EntityKind::Customer, operation).with_entity_id(&self.max_id)
        })?;

        Ok(Customer {
            max_id: self.max_id,
            name: self.name,
            about: self.about,
            customer_type,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn into_customers(rows: Vec<CustomerRow>) -> StoreResult<Vec<Customer>> {
    rows.into_iter()
        .map(|row| row.into_customer(StoreOperation::List))
        .collect()
}

impl CustomerStore for PgStore {
    async fn get_customer(&self, max_id: &str) -> StoreResult<Customer> {
        let row = self
            .run(
                EntityKind::Customer,
                StoreOperation::Get,
                Some(max_id),
                sqlx::query_as::<_, CustomerRow>(SELECT_BY_KEY)
                    .bind(max_id)
                    .fetch_one(&self.pool),
            )
            .await?;

        row.into_customer(StoreOperation::Get)
    }

    async fn list_customers(
        &self,
        options: &[CustomerOption],
    ) -> StoreResult<(Vec<Customer>, u64)> {
        let mut select = customer_list_query(options).build();
        let rows = self
            .run(
                EntityKind::Customer,
                StoreOperation::List,
                None,
                select.build_query_as::<CustomerRow>().fetch_all(&self.pool),
            )
            .await?;

        let total = self.count_customers(options).await?;
        Ok((into_customers(rows)?, total))
    }

    async fn count_customers(&self, options: &[CustomerOption]) -> StoreResult<u64> {
        let mut count = customer_count_query(options).build();
        let total = self
            .run(
                EntityKind::Customer,
                StoreOperation::Count,
                None,
                count.build_query_scalar::<i64>().fetch_one(&self.pool),
            )
            .await?;

        Ok(to_total(total))
    }

    async fn create_customer(&self, input: CreateCustomer) -> StoreResult<Customer> {
        let sql = format!(
            "INSERT INTO customers (max_id, name, about, type) VALUES ($1, $2, $3, $4) {}",
            RETURNING
        );
        let row = self
            .run(
                EntityKind::Customer,
                StoreOperation::Create,
                Some(&input.max_id),
                sqlx::query_as::<_, CustomerRow>(&sql)
                    .bind(&input.max_id)
                    .bind(&input.name)
                    .bind(&input.about)
                    .bind(input.customer_type.as_str())
                    .fetch_one(&self.pool),
            )
            .await?;

        row.into_customer(StoreOperation::Create)
    }

    async fn update_customer(&self, input: UpdateCustomer) -> StoreResult<Customer> {
        let sql = format!(
            "UPDATE customers SET name = $2, about = $3, type = $4, updated_at = NOW() \
             WHERE max_id = $1 {}",
            RETURNING
        );
        let row = self
            .run(
                EntityKind::Customer,
                StoreOperation::Update,
                Some(&input.max_id),
                sqlx::query_as::<_, CustomerRow>(&sql)
                    .bind(&input.max_id)
                    .bind(&input.name)
                    .bind(&input.about)
                    .bind(input.customer_type.as_str())
                    .fetch_one(&self.pool),
            )
            .await?;

        row.into_customer(StoreOperation::Update)
    }

    async fn delete_customer(&self, max_id: &str) -> StoreResult<()> {
        let result = self
            .run(
                EntityKind::Customer,
                StoreOperation::Delete,
                Some(max_id),
                sqlx::query("DELETE FROM customers WHERE max_id = $1")
                    .bind(max_id)
                    .execute(&self.pool),
            )
            .await?;

        match result.rows_affected() {
            1 => Ok(()),
            0 => Err(StoreError::not_found(
                EntityKind::Customer,
                StoreOperation::Delete,
                max_id,
            )),
            affected => {
                tracing::error!(max_id, affected, "Delete removed more than one customer");
                Err(StoreError::internal(EntityKind::Customer, StoreOperation::Delete)
                    .with_entity_id(max_id))
            }
        }
    }
}
