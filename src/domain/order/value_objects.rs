use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::product::ProductId;
use super::errors::OrderError;

// ============================================================================
// Order Value Objects
// ============================================================================

entity_id!(
    /// Order identity
    OrderId
);

/// Order lifecycle status.
///
/// Orders are only ever created as `Pending`. The remaining stages are
/// reserved names for storage compatibility; nothing transitions into them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "CONFIRMED" => Ok(OrderStatus::Confirmed),
            "SHIPPED" => Ok(OrderStatus::Shipped),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            other => Err(OrderError::UnknownStatus(other.to_string())),
        }
    }
}

/// A line item.
///
/// `unit_price` is the product's price amount at the moment the order was
/// placed, not a reference to the product's current price.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderItem {
    id: Uuid,
    product_id: ProductId,
    quantity: i32,
    unit_price: Decimal,
}

impl OrderItem {
    pub fn new(
        id: Uuid,
        product_id: ProductId,
        quantity: i32,
        unit_price: Decimal,
    ) -> Result<Self, OrderError> {
        if quantity <= 0 {
            return Err(OrderError::InvalidQuantity(quantity));
        }

        Ok(Self {
            id,
            product_id,
            quantity,
            unit_price,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_item_creation() {
        let id = Uuid::new_v4();
        let product_id = ProductId::generate();

        let item = OrderItem::new(id, product_id, 5, dec!(12.40)).unwrap();

        assert_eq!(item.id(), id);
        assert_eq!(item.product_id(), product_id);
        assert_eq!(item.quantity(), 5);
        assert_eq!(item.unit_price(), dec!(12.40));
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let err = OrderItem::new(Uuid::new_v4(), ProductId::generate(), 0, dec!(1)).unwrap_err();
        assert!(matches!(err, OrderError::InvalidQuantity(0)));
    }

    #[test]
    fn test_negative_quantity_is_rejected() {
        let err = OrderItem::new(Uuid::new_v4(), ProductId::generate(), -3, dec!(1)).unwrap_err();
        assert!(matches!(err, OrderError::InvalidQuantity(-3)));
    }

    #[test]
    fn test_order_status_names() {
        assert_eq!(OrderStatus::Pending.as_str(), "PENDING");
        assert_eq!(OrderStatus::Cancelled.to_string(), "CANCELLED");
        assert_eq!(serde_json::to_string(&OrderStatus::Pending).unwrap(), "\"PENDING\"");
    }

    #[test]
    fn test_order_status_parses_its_own_names() {
        let statuses = [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ];

        for status in statuses {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_status_name() {
        let err = "pending".parse::<OrderStatus>().unwrap_err();
        assert!(matches!(err, OrderError::UnknownStatus(ref s) if s == "pending"));
    }
}
