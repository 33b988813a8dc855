use super::{from_store, CustomerService, ServiceResult};
use crate::domain::{CreateCustomer, Customer, CustomerType, UpdateCustomer};
use crate::storage::{CustomerOption, CustomerStore};

/// Optional customer filters; empty fields filter nothing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerSearch {
    pub max_id: String,
    pub name: String,
    /// Case-insensitive substring of the name
    pub name_like: String,
    pub customer_type: Option<CustomerType>,
    /// Page size; zero or negative means unbounded
    pub limit: i64,
    /// Rows to skip; negative is ignored
    pub offset: i64,
}

impl CustomerSearch {
    pub fn options(&self) -> Vec<CustomerOption> {
        vec![
            CustomerOption::max_id(&self.max_id),
            CustomerOption::name(&self.name),
            CustomerOption::name_like(&self.name_like),
            CustomerOption::customer_type(self.customer_type),
            CustomerOption::limit(self.limit),
            CustomerOption::offset(self.offset),
        ]
    }
}

impl<S: CustomerStore> CustomerService<S> {
    pub async fn get_customer_by_max_id(&self, max_id: &str) -> ServiceResult<Customer> {
        self.storage
            .get_customer(max_id)
            .await
            .map_err(|e| from_store(e, "get customer by max id"))
    }

    /// Page of customers filtered by key, with the unpaginated total
    pub async fn get_customers(
        &self,
        max_id: &str,
        limit: i64,
        offset: i64,
    ) -> ServiceResult<(Vec<Customer>, u64)> {
        self.search_customers(&CustomerSearch {
            max_id: max_id.to_string(),
            limit,
            offset,
            ..Default::default()
        })
        .await
    }

    pub async fn search_customers(
        &self,
        search: &CustomerSearch,
    ) -> ServiceResult<(Vec<Customer>, u64)> {
        self.storage
            .list_customers(&search.options())
            .await
            .map_err(|e| from_store(e, "list customers"))
    }

    pub async fn count_customers(&self, options: &[CustomerOption]) -> ServiceResult<u64> {
        self.storage
            .count_customers(options)
            .await
            .map_err(|e| from_store(e, "count customers"))
    }

    pub async fn create_customer(&self, input: CreateCustomer) -> ServiceResult<Customer> {
        self.storage
            .create_customer(input)
            .await
            .map_err(|e| from_store(e, "create customer"))
    }

    pub async fn update_customer(&self, input: UpdateCustomer) -> ServiceResult<Customer> {
        self.storage
            .update_customer(input)
            .await
            .map_err(|e| from_store(e, "update customer"))
    }

    pub async fn delete_customer(&self, max_id: &str) -> ServiceResult<()> {
        self.storage
            .delete_customer(max_id)
            .await
            .map_err(|e| from_store(e, "delete customer"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::ServiceError;
    use crate::storage::MemoryStore;

    fn service() -> CustomerService<MemoryStore> {
        CustomerService::new(MemoryStore::new())
    }

    fn acme() -> CreateCustomer {
        CreateCustomer {
            max_id: "C1".to_string(),
            name: "Acme".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_defaults_to_individual() {
        let service = service();
        let created = service.create_customer(acme()).await.unwrap();
        assert_eq!(created.customer_type, CustomerType::Individual);
        assert_eq!(created.about, "");
    }

    #[tokio::test]
    async fn test_duplicate_is_already_exists() {
        let service = service();
        service.create_customer(acme()).await.unwrap();
        let err = service.create_customer(acme()).await.unwrap_err();
        assert_eq!(err, ServiceError::CustomerAlreadyExists);
    }

    #[tokio::test]
    async fn test_missing_customer_errors() {
        let service = service();
        assert_eq!(
            service.get_customer_by_max_id("C1").await.unwrap_err(),
            ServiceError::CustomerNotFound
        );
        assert_eq!(
            service.delete_customer("C1").await.unwrap_err(),
            ServiceError::CustomerNotFound
        );
        assert_eq!(
            service
                .update_customer(UpdateCustomer {
                    max_id: "C1".to_string(),
                    ..Default::default()
                })
                .await
                .unwrap_err(),
            ServiceError::CustomerNotFound
        );
    }

    #[tokio::test]
    async fn test_get_customers_by_key() {
        let service = service();
        service.create_customer(acme()).await.unwrap();
        service
            .create_customer(CreateCustomer {
                max_id: "C2".to_string(),
                name: "Beta".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let (rows, total) = service.get_customers("C2", 0, 0).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(rows[0].name, "Beta");

        let (rows, total) = service.get_customers("", 1, -1).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(total, 2);
    }

    #[tokio::test]
    async fn test_search_by_type_and_name() {
        let service = service();
        service.create_customer(acme()).await.unwrap();
        service
            .create_customer(CreateCustomer {
                max_id: "C2".to_string(),
                name: "Acme Holdings".to_string(),
                about: String::new(),
                customer_type: CustomerType::Company,
            })
            .await
            .unwrap();

        let search = CustomerSearch {
            name_like: "ACME".to_string(),
            customer_type: Some(CustomerType::Company),
            ..Default::default()
        };
        let (rows, total) = service.search_customers(&search).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(rows[0].max_id, "C2");

        let total = service
            .count_customers(&[CustomerOption::name_like("acme")])
            .await
            .unwrap();
        assert_eq!(total, 2);
    }

    #[test]
    fn test_empty_search_composes_to_no_filters() {
        let options = CustomerSearch::default().options();
        assert!(options.iter().all(|o| o.predicate().is_none()));
    }
}
