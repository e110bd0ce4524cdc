// ============================================================================
// Order Domain - Business Logic for Order Aggregate
// ============================================================================
//
// This module contains ALL Order-specific code:
// - Value objects (OrderId, OrderItem, OrderStatus)
// - Events (OrderCreatedEvent)
// - Errors (OrderError enum)
// - Aggregate (Order)
// - Repository contract (OrderRepository)
//
// The creation workflow that drives it lives in crate::application.
//
// ============================================================================

pub mod value_objects;
pub mod events;
pub mod errors;
pub mod aggregate;
pub mod repository;

// Re-export for convenience
pub use value_objects::*;
pub use events::*;
pub use errors::*;
pub use aggregate::*;
pub use repository::*;
