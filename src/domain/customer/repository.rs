use async_trait::async_trait;

use crate::domain::repository::RepositoryResult;
use super::aggregate::Customer;
use super::value_objects::CustomerId;

#[async_trait]
pub trait CustomerRepository: Send {
    async fn save(&mut self, customer: &Customer) -> RepositoryResult<()>;

    async fn find_by_id(&mut self, id: CustomerId) -> RepositoryResult<Option<Customer>>;
}
