use serde::{Deserialize, Serialize};

use super::value_objects::{CustomerId, Email};

// ============================================================================
// Customer Aggregate
// ============================================================================
//
// Registration data only. The order workflow reads customers to prove they
// exist and never modifies them.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    email: Email,
}

impl Customer {
    pub fn new(id: CustomerId, name: impl Into<String>, email: Email) -> Self {
        Self {
            id,
            name: name.into(),
            email,
        }
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }
}
