// ============================================================================
// Customer Domain
// ============================================================================
//
// - Value objects (CustomerId, Email)
// - Errors (CustomerError)
// - Aggregate (Customer)
// - Repository contract (CustomerRepository)
//
// ============================================================================

pub mod value_objects;
pub mod errors;
pub mod aggregate;
pub mod repository;

// Re-export for convenience
pub use value_objects::*;
pub use errors::*;
pub use aggregate::*;
pub use repository::*;
