use async_trait::async_trait;

use crate::domain::repository::RepositoryResult;
use super::aggregate::Order;
use super::value_objects::OrderId;

#[async_trait]
pub trait OrderRepository: Send {
    /// Upsert the whole aggregate, header and items together
    async fn save(&mut self, order: &Order) -> RepositoryResult<()>;

    async fn find_by_id(&mut self, id: OrderId) -> RepositoryResult<Option<Order>>;
}
