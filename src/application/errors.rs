use crate::domain::customer::{CustomerError, CustomerId};
use crate::domain::order::OrderError;
use crate::domain::product::ProductId;
use crate::domain::repository::RepositoryError;

// ============================================================================
// Application Errors
// ============================================================================
//
// Three families:
// - not found:   a referenced customer/product does not exist
// - validation:  a value object or line item rejected its input
// - persistence: the store failed; passed through untouched
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error(transparent)]
    Customer(#[from] CustomerError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Persistence(#[from] RepositoryError),

    #[error("Failed to encode event: {0}")]
    EventEncoding(#[from] serde_json::Error),
}

impl ApplicationError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ApplicationError::CustomerNotFound(_) | ApplicationError::ProductNotFound(_)
        )
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApplicationError::Customer(_) | ApplicationError::Order(_))
    }

    /// Short label used for failure metrics
    pub fn reason(&self) -> &'static str {
        match self {
            ApplicationError::CustomerNotFound(_) => "customer_not_found",
            ApplicationError::ProductNotFound(_) => "product_not_found",
            ApplicationError::Customer(_) | ApplicationError::Order(_) => "validation",
            ApplicationError::Persistence(_) => "persistence",
            ApplicationError::EventEncoding(_) => "event_encoding",
        }
    }
}
