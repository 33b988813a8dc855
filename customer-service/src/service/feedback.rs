use super::{from_store, CustomerService, ServiceError, ServiceResult};
use crate::domain::{CreateFeedback, Feedback, MAX_RATING, MIN_RATING};
use crate::storage::{FeedbackOption, FeedbackStore};

/// Optional feedback filters; empty fields filter nothing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackSearch {
    pub task_id: String,
    pub user_id: String,
    pub customer_id: String,
    /// Page size; zero or negative means unbounded
    pub limit: i64,
    /// Rows to skip; negative is ignored
    pub offset: i64,
}

impl FeedbackSearch {
    pub fn options(&self) -> Vec<FeedbackOption> {
        vec![
            FeedbackOption::task_id(&self.task_id),
            FeedbackOption::user_id(&self.user_id),
            FeedbackOption::customer_id(&self.customer_id),
            FeedbackOption::limit(self.limit),
            FeedbackOption::offset(self.offset),
        ]
    }
}

/// Business rules for new feedback, checked in order
///
/// The rating must be within bounds, the author cannot rate themselves and the
/// entry must belong to a task.
pub fn validate_feedback(input: &CreateFeedback) -> ServiceResult<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&input.rating) {
        return Err(ServiceError::FeedbackInvalid);
    }
    if input.customer_id == input.user_id {
        return Err(ServiceError::FeedbackInvalid);
    }
    if input.task_id.is_empty() {
        return Err(ServiceError::FeedbackInvalid);
    }
    Ok(())
}

impl<S: FeedbackStore> CustomerService<S> {
    /// Page of a task's feedback, optionally narrowed to one author
    pub async fn get_feedbacks(
        &self,
        task_id: &str,
        user_id: &str,
        limit: i64,
        offset: i64,
    ) -> ServiceResult<(Vec<Feedback>, u64)> {
        self.search_feedbacks(&FeedbackSearch {
            task_id: task_id.to_string(),
            user_id: user_id.to_string(),
            limit,
            offset,
            ..Default::default()
        })
        .await
    }

    pub async fn search_feedbacks(
        &self,
        search: &FeedbackSearch,
    ) -> ServiceResult<(Vec<Feedback>, u64)> {
        self.storage
            .list_feedbacks(&search.options())
            .await
            .map_err(|e| from_store(e, "list feedbacks"))
    }

    pub async fn count_feedbacks(&self, options: &[FeedbackOption]) -> ServiceResult<u64> {
        self.storage
            .count_feedbacks(options)
            .await
            .map_err(|e| from_store(e, "count feedbacks"))
    }

    pub async fn get_feedback_by_id(&self, id: &str) -> ServiceResult<Feedback> {
        self.storage
            .get_feedback(id)
            .await
            .map_err(|e| from_store(e, "get feedback by id"))
    }

    pub async fn create_feedback(&self, input: CreateFeedback) -> ServiceResult<Feedback> {
        validate_feedback(&input)?;

        self.storage
            .create_feedback(input)
            .await
            .map_err(|e| from_store(e, "create feedback"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CreateCustomer;
    use crate::storage::MemoryStore;

    fn rating(customer_id: &str, user_id: &str, rating: i32, task_id: &str) -> CreateFeedback {
        CreateFeedback {
            customer_id: customer_id.to_string(),
            user_id: user_id.to_string(),
            rating,
            comment: String::new(),
            task_id: task_id.to_string(),
        }
    }

    async fn service_with_customer() -> CustomerService<MemoryStore> {
        let service = CustomerService::new(MemoryStore::new());
        service
            .create_customer(CreateCustomer {
                max_id: "C1".to_string(),
                name: "Acme".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        service
    }

    #[test]
    fn test_rating_bounds() {
        for bad in [0, 6, -1] {
            assert_eq!(
                validate_feedback(&rating("C1", "U1", bad, "T1")),
                Err(ServiceError::FeedbackInvalid)
            );
        }
        for good in [MIN_RATING, MAX_RATING] {
            assert_eq!(validate_feedback(&rating("C1", "U1", good, "T1")), Ok(()));
        }
    }

    #[test]
    fn test_self_feedback_is_invalid() {
        assert_eq!(
            validate_feedback(&rating("C1", "C1", 5, "T1")),
            Err(ServiceError::FeedbackInvalid)
        );
    }

    #[test]
    fn test_task_is_required() {
        assert_eq!(
            validate_feedback(&rating("C1", "U1", 5, "")),
            Err(ServiceError::FeedbackInvalid)
        );
    }

    #[tokio::test]
    async fn test_invalid_feedback_never_reaches_store() {
        let service = service_with_customer().await;
        let err = service
            .create_feedback(rating("C1", "U1", 0, "T1"))
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::FeedbackInvalid);
        assert_eq!(service.count_feedbacks(&[]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_customer_is_invalid() {
        let service = service_with_customer().await;
        let err = service
            .create_feedback(rating("C9", "U1", 3, "T1"))
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::FeedbackInvalid);
    }

    #[tokio::test]
    async fn test_missing_feedback_is_not_found() {
        let service = service_with_customer().await;
        assert_eq!(
            service.get_feedback_by_id("f-1").await.unwrap_err(),
            ServiceError::FeedbackNotFound
        );
    }

    #[tokio::test]
    async fn test_customer_lifecycle_with_feedback() {
        let service = service_with_customer().await;
        let customer = service.get_customer_by_max_id("C1").await.unwrap();
        assert_eq!(customer.customer_type, crate::domain::CustomerType::Individual);

        let created = service
            .create_feedback(rating("C1", "U1", 5, "T1"))
            .await
            .unwrap();
        assert_eq!(service.get_feedback_by_id(&created.id).await.unwrap(), created);

        let (rows, total) = service.get_feedbacks("T1", "", 0, 0).await.unwrap();
        assert_eq!(rows, vec![created]);
        assert_eq!(total, 1);

        service.delete_customer("C1").await.unwrap();
        assert_eq!(
            service.get_customer_by_max_id("C1").await.unwrap_err(),
            ServiceError::CustomerNotFound
        );
    }

    #[tokio::test]
    async fn test_search_by_customer() {
        let service = service_with_customer().await;
        service
            .create_customer(CreateCustomer {
                max_id: "C2".to_string(),
                name: "Beta".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        service.create_feedback(rating("C1", "U1", 4, "T1")).await.unwrap();
        service.create_feedback(rating("C2", "U1", 2, "T1")).await.unwrap();

        let search = FeedbackSearch {
            task_id: "T1".to_string(),
            customer_id: "C2".to_string(),
            ..Default::default()
        };
        let (rows, total) = service.search_feedbacks(&search).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(rows[0].rating, 2);
    }
}
