use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::customer::CustomerId;
use crate::domain::order::{Order, OrderId, OrderItem, OrderStatus};
use crate::domain::product::ProductId;
use crate::domain::repository::{RepositoryError, RepositoryResult};

// ============================================================================
// Storage Records
// ============================================================================
//
// Flat row shapes for the orders / order_items tables. Both adapters store
// these and turn them back into aggregates through Order::rehydrate, so the
// in-memory store exercises the same mapping the database does.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub status: String,
    pub items: Vec<OrderItemRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemRecord {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: Decimal,
}

impl From<&Order> for OrderRecord {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id().as_uuid(),
            customer_id: order.customer_id().as_uuid(),
            status: order.status().as_str().to_string(),
            items: order
                .items()
                .iter()
                .map(|item| OrderItemRecord {
                    id: item.id(),
                    product_id: item.product_id().as_uuid(),
                    quantity: item.quantity(),
                    price: item.unit_price(),
                })
                .collect(),
        }
    }
}

impl OrderRecord {
    pub fn into_order(self) -> RepositoryResult<Order> {
        let status: OrderStatus = self
            .status
            .parse()
            .map_err(|e| RepositoryError::CorruptRecord(format!("order {}: {}", self.id, e)))?;

        let items = self
            .items
            .into_iter()
            .map(|item| {
                OrderItem::new(item.id, ProductId::from_uuid(item.product_id), item.quantity, item.price)
                    .map_err(|e| RepositoryError::CorruptRecord(format!("order item {}: {}", item.id, e)))
            })
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok(Order::rehydrate(
            OrderId::from_uuid(self.id),
            CustomerId::from_uuid(self.customer_id),
            status,
            items,
        ))
    }
}
