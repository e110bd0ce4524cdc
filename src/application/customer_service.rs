use std::sync::Arc;

use crate::domain::customer::{Customer, CustomerId, Email};
use crate::domain::repository::UnitOfWorkFactory;
use super::dto::RegisterCustomer;
use super::errors::ApplicationError;

pub struct CustomerService {
    store: Arc<dyn UnitOfWorkFactory>,
}

impl CustomerService {
    pub fn new(store: Arc<dyn UnitOfWorkFactory>) -> Self {
        Self { store }
    }

    /// The email is validated before any storage is touched
    pub async fn register(&self, input: RegisterCustomer) -> Result<CustomerId, ApplicationError> {
        let email = Email::new(input.email)?;
        let customer = Customer::new(CustomerId::generate(), input.name, email);

        let mut uow = self.store.begin().await?;
        uow.customers().save(&customer).await?;
        uow.commit().await?;

        tracing::info!(customer_id = %customer.id(), "Customer registered");
        Ok(customer.id())
    }

    pub async fn get_customer(&self, id: CustomerId) -> Result<Option<Customer>, ApplicationError> {
        let mut uow = self.store.begin().await?;
        let customer = uow.customers().find_by_id(id).await?;
        uow.rollback().await?;
        Ok(customer)
    }
}
