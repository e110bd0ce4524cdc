use serde::{Deserialize, Serialize};

use super::value_objects::{Money, ProductId};

// ============================================================================
// Product Aggregate
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Money,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, price: Money) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current catalog price. Orders copy the amount at creation time.
    pub fn price(&self) -> &Money {
        &self.price
    }

    pub fn change_price(&mut self, price: Money) {
        self.price = price;
    }
}
