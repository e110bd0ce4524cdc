use std::sync::Arc;

use crate::domain::order::OrderId;
use crate::domain::repository::UnitOfWorkFactory;
use super::dto::OrderResponse;
use super::errors::ApplicationError;

/// Read side for orders. A missing order is `Ok(None)`, not an error.
pub struct OrderService {
    store: Arc<dyn UnitOfWorkFactory>,
}

impl OrderService {
    pub fn new(store: Arc<dyn UnitOfWorkFactory>) -> Self {
        Self { store }
    }

    pub async fn get_order(&self, id: OrderId) -> Result<Option<OrderResponse>, ApplicationError> {
        let mut uow = self.store.begin().await?;
        let order = uow.orders().find_by_id(id).await?;
        uow.rollback().await?;

        if order.is_none() {
            tracing::debug!(order_id = %id, "Order not found");
        }

        Ok(order.as_ref().map(OrderResponse::from))
    }
}
