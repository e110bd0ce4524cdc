use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::event::DomainEvent;
use super::value_objects::OrderId;

// ============================================================================
// Order Events
// ============================================================================

/// Order Created - carries only the id; consumers load the order if they need it
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderCreatedEvent {
    pub order_id: OrderId,
    pub occurred_on: DateTime<Utc>,
}

impl OrderCreatedEvent {
    pub fn new(order_id: OrderId) -> Self {
        Self {
            order_id,
            occurred_on: Utc::now(),
        }
    }
}

impl DomainEvent for OrderCreatedEvent {
    fn event_type(&self) -> &'static str {
        "OrderCreated"
    }

    fn aggregate_id(&self) -> Uuid {
        self.order_id.as_uuid()
    }

    fn occurred_on(&self) -> DateTime<Utc> {
        self.occurred_on
    }
}
