use tonic::{Request, Response, Status};

use super::pb;
use super::pb::customer_service_server::CustomerService as CustomerServiceTrait;
use crate::service::CustomerService;
use crate::storage::{CustomerStore, FeedbackStore};

/// gRPC adapter over the domain service
///
/// Each RPC delegates to an inherent `handle_*` method that performs request
/// shape validation and maps the service outcome onto the wire response.
#[derive(Debug, Clone)]
pub struct CustomerApi<S> {
    pub(super) service: CustomerService<S>,
}

impl<S> CustomerApi<S> {
    pub fn new(service: CustomerService<S>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &CustomerService<S> {
        &self.service
    }
}

#[tonic::async_trait]
impl<S> CustomerServiceTrait for CustomerApi<S>
where
    S: CustomerStore + FeedbackStore + 'static,
{
    async fn create_customer(
        &self,
        request: Request<pb::CreateCustomerRequest>,
    ) -> Result<Response<pb::CreateCustomerResponse>, Status> {
        Ok(Response::new(
            self.handle_create_customer(request.into_inner()).await,
        ))
    }

    async fn get_customers(
        &self,
        request: Request<pb::GetCustomersRequest>,
    ) -> Result<Response<pb::GetCustomersResponse>, Status> {
        Ok(Response::new(
            self.handle_get_customers(request.into_inner()).await,
        ))
    }

    async fn get_customer_by_max_id(
        &self,
        request: Request<pb::GetCustomerByMaxIdRequest>,
    ) -> Result<Response<pb::GetCustomerByMaxIdResponse>, Status> {
        Ok(Response::new(
            self.handle_get_customer_by_max_id(request.into_inner()).await,
        ))
    }

    async fn update_customer(
        &self,
        request: Request<pb::UpdateCustomerRequest>,
    ) -> Result<Response<pb::UpdateCustomerResponse>, Status> {
        Ok(Response::new(
            self.handle_update_customer(request.into_inner()).await,
        ))
    }

    async fn delete_customer(
        &self,
        request: Request<pb::DeleteCustomerRequest>,
    ) -> Result<Response<pb::DeleteCustomerResponse>, Status> {
        Ok(Response::new(
            self.handle_delete_customer(request.into_inner()).await,
        ))
    }

    async fn create_feedback(
        &self,
        request: Request<pb::CreateFeedbackRequest>,
    ) -> Result<Response<pb::CreateFeedbackResponse>, Status> {
        Ok(Response::new(
            self.handle_create_feedback(request.into_inner()).await,
        ))
    }

    async fn get_feedbacks(
        &self,
        request: Request<pb::GetFeedbacksRequest>,
    ) -> Result<Response<pb::GetFeedbacksResponse>, Status> {
        Ok(Response::new(
            self.handle_get_feedbacks(request.into_inner()).await,
        ))
    }

    async fn get_feedback_by_id(
        &self,
        request: Request<pb::GetFeedbackByIdRequest>,
    ) -> Result<Response<pb::GetFeedbackByIdResponse>, Status> {
        Ok(Response::new(
            self.handle_get_feedback_by_id(request.into_inner()).await,
        ))
    }
}
