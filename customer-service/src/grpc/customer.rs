use super::convert::{customer_type, to_wire_total, validation_error};
use super::{pb, CustomerApi};
use crate::domain::{CreateCustomer, UpdateCustomer};
use crate::storage::CustomerStore;

impl<S: CustomerStore> CustomerApi<S> {
    pub async fn handle_create_customer(
        &self,
        req: pb::CreateCustomerRequest,
    ) -> pb::CreateCustomerResponse {
        let Some(customer) = req.customer else {
            return pb::CreateCustomerResponse {
                error: Some(validation_error("customer is required")),
                ..Default::default()
            };
        };
        if customer.max_id.is_empty() {
            return pb::CreateCustomerResponse {
                error: Some(validation_error("max id is required")),
                ..Default::default()
            };
        }
        if customer.name.is_empty() {
            return pb::CreateCustomerResponse {
                error: Some(validation_error("name is required")),
                ..Default::default()
            };
        }

        let input = CreateCustomer {
            customer_type: customer_type(&customer),
            max_id: customer.max_id,
            name: customer.name,
            about: customer.about,
        };

        match self.service.create_customer(input).await {
            Ok(created) => {
                tracing::info!(max_id = %created.max_id, "Customer created");
                pb::CreateCustomerResponse {
                    customer: Some(created.into()),
                    error: None,
                }
            }
            Err(e) => pb::CreateCustomerResponse {
                customer: None,
                error: Some(e.into()),
            },
        }
    }

    pub async fn handle_get_customers(
        &self,
        req: pb::GetCustomersRequest,
    ) -> pb::GetCustomersResponse {
        if req.max_id.is_empty() {
            return pb::GetCustomersResponse {
                error: Some(validation_error("max id is required")),
                ..Default::default()
            };
        }

        match self
            .service
            .get_customers(&req.max_id, req.limit.into(), req.offset.into())
            .await
        {
            Ok((customers, total)) => {
                tracing::info!(max_id = %req.max_id, count = customers.len(), total, "Customers fetched");
                pb::GetCustomersResponse {
                    customers: customers.into_iter().map(Into::into).collect(),
                    total: to_wire_total(total),
                    error: None,
                }
            }
            Err(e) => pb::GetCustomersResponse {
                error: Some(e.into()),
                ..Default::default()
            },
        }
    }

    pub async fn handle_get_customer_by_max_id(
        &self,
        req: pb::GetCustomerByMaxIdRequest,
    ) -> pb::GetCustomerByMaxIdResponse {
        if req.max_id.is_empty() {
            return pb::GetCustomerByMaxIdResponse {
                error: Some(validation_error("max id is required")),
                ..Default::default()
            };
        }

        match self.service.get_customer_by_max_id(&req.max_id).await {
            Ok(customer) => {
                tracing::info!(max_id = %customer.max_id, "Customer fetched");
                pb::GetCustomerByMaxIdResponse {
                    customer: Some(customer.into()),
                    error: None,
                }
            }
            Err(e) => pb::GetCustomerByMaxIdResponse {
                customer: None,
                error: Some(e.into()),
            },
        }
    }

    pub async fn handle_update_customer(
        &self,
        req: pb::UpdateCustomerRequest,
    ) -> pb::UpdateCustomerResponse {
        let Some(customer) = req.customer else {
            return pb::UpdateCustomerResponse {
                error: Some(validation_error("customer is required")),
                ..Default::default()
            };
        };
        if customer.max_id.is_empty() {
            return pb::UpdateCustomerResponse {
                error: Some(validation_error("max id is required")),
                ..Default::default()
            };
        }

        let input = UpdateCustomer {
            customer_type: customer_type(&customer),
            max_id: customer.max_id,
            name: customer.name,
            about: customer.about,
        };

        match self.service.update_customer(input).await {
            Ok(updated) => {
                tracing::info!(max_id = %updated.max_id, "Customer updated");
                pb::UpdateCustomerResponse {
                    customer: Some(updated.into()),
                    error: None,
                }
            }
            Err(e) => pb::UpdateCustomerResponse {
                customer: None,
                error: Some(e.into()),
            },
        }
    }

    pub async fn handle_delete_customer(
        &self,
        req: pb::DeleteCustomerRequest,
    ) -> pb::DeleteCustomerResponse {
        if req.max_id.is_empty() {
            return pb::DeleteCustomerResponse {
                error: Some(validation_error("max id is required")),
                ..Default::default()
            };
        }

        match self.service.delete_customer(&req.max_id).await {
            Ok(()) => {
                tracing::info!(max_id = %req.max_id, "Customer deleted");
                pb::DeleteCustomerResponse {
                    max_id: req.max_id,
                    error: None,
                }
            }
            Err(e) => pb::DeleteCustomerResponse {
                error: Some(e.into()),
                ..Default::default()
            },
        }
    }
}
