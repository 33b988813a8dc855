use super::convert::{to_wire_total, validation_error};
use super::{pb, CustomerApi};
use crate::domain::CreateFeedback;
use crate::service::FeedbackSearch;
use crate::storage::FeedbackStore;

impl<S: FeedbackStore> CustomerApi<S> {
    pub async fn handle_create_feedback(
        &self,
        req: pb::CreateFeedbackRequest,
    ) -> pb::CreateFeedbackResponse {
        let Some(feedback) = req.feedback else {
            return pb::CreateFeedbackResponse {
                error: Some(validation_error("feedback is required")),
                ..Default::default()
            };
        };

        let input = CreateFeedback {
            customer_id: feedback.customer_id,
            user_id: feedback.user_id,
            rating: feedback.rating,
            comment: feedback.comment,
            task_id: feedback.task_id,
        };

        match self.service.create_feedback(input).await {
            Ok(created) => {
                tracing::info!(
                    id = %created.id,
                    customer_id = %created.customer_id,
                    task_id = %created.task_id,
                    "Feedback created"
                );
                pb::CreateFeedbackResponse {
                    feedback: Some(created.into()),
                    error: None,
                }
            }
            Err(e) => pb::CreateFeedbackResponse {
                feedback: None,
                error: Some(e.into()),
            },
        }
    }

    pub async fn handle_get_feedbacks(
        &self,
        req: pb::GetFeedbacksRequest,
    ) -> pb::GetFeedbacksResponse {
        if req.task_id.is_empty() {
            return pb::GetFeedbacksResponse {
                error: Some(validation_error("task id is required")),
                ..Default::default()
            };
        }

        let search = FeedbackSearch {
            task_id: req.task_id,
            user_id: req.user_id,
            customer_id: req.customer_id,
            limit: req.limit.into(),
            offset: req.offset.into(),
        };

        match self.service.search_feedbacks(&search).await {
            Ok((feedbacks, total)) => {
                tracing::info!(
                    task_id = %search.task_id,
                    count = feedbacks.len(),
                    total,
                    "Feedbacks fetched"
                );
                pb::GetFeedbacksResponse {
                    feedbacks: feedbacks.into_iter().map(Into::into).collect(),
                    total: to_wire_total(total),
                    error: None,
                }
            }
            Err(e) => pb::GetFeedbacksResponse {
                error: Some(e.into()),
                ..Default::default()
            },
        }
    }

    pub async fn handle_get_feedback_by_id(
        &self,
        req: pb::GetFeedbackByIdRequest,
    ) -> pb::GetFeedbackByIdResponse {
        if req.id.is_empty() {
            return pb::GetFeedbackByIdResponse {
                error: Some(validation_error("id is required")),
                ..Default::default()
            };
        }

        match self.service.get_feedback_by_id(&req.id).await {
            Ok(feedback) => {
                tracing::info!(id = %feedback.id, "Feedback fetched");
                pb::GetFeedbackByIdResponse {
                    feedback: Some(feedback.into()),
                    error: None,
                }
            }
            Err(e) => pb::GetFeedbackByIdResponse {
                feedback: None,
                error: Some(e.into()),
            },
        }
    }
}
