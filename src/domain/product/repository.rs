use async_trait::async_trait;

use crate::domain::repository::RepositoryResult;
use super::aggregate::Product;
use super::value_objects::ProductId;

#[async_trait]
pub trait ProductRepository: Send {
    async fn save(&mut self, product: &Product) -> RepositoryResult<()>;

    async fn find_by_id(&mut self, id: ProductId) -> RepositoryResult<Option<Product>>;
}
