use crate::domain::customer::CustomerId;
use super::value_objects::{OrderId, OrderItem, OrderStatus};

// ============================================================================
// Order Aggregate
// ============================================================================
//
// Invariants:
// - id and customer_id never change after construction
// - items keep insertion order; they are only ever appended
// - a new order is Pending, and nothing here changes the status
// - every item has a positive quantity (enforced by OrderItem::new)
//
// Deliberately NOT checked here:
// - that customer_id refers to an existing customer (the creation workflow
//   does that before building the order)
// - duplicate products, empty orders, or a maximum item count
// - that all items were priced in the same currency
//
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    id: OrderId,
    customer_id: CustomerId,
    items: Vec<OrderItem>,
    status: OrderStatus,
}

impl Order {
    /// Start a new, empty, pending order
    pub fn new(id: OrderId, customer_id: CustomerId) -> Self {
        Self {
            id,
            customer_id,
            items: Vec::new(),
            status: OrderStatus::Pending,
        }
    }

    /// Rebuild an order exactly as it was stored.
    ///
    /// Only persistence adapters call this; application code goes through
    /// [`Order::new`] and [`Order::add_item`].
    pub(crate) fn rehydrate(
        id: OrderId,
        customer_id: CustomerId,
        status: OrderStatus,
        items: Vec<OrderItem>,
    ) -> Self {
        Self {
            id,
            customer_id,
            items,
            status,
        }
    }

    pub fn add_item(&mut self, item: OrderItem) {
        self.items.push(item);
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }
}
