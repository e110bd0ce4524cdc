// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderError {
    #[error("Invalid item quantity: {0}")]
    InvalidQuantity(i32),

    #[error("Unknown order status: {0}")]
    UnknownStatus(String),
}
