// ============================================================================
// Product Domain
// ============================================================================
//
// - Value objects (ProductId, Money)
// - Aggregate (Product)
// - Repository contract (ProductRepository)
//
// ============================================================================

pub mod value_objects;
pub mod aggregate;
pub mod repository;

pub use value_objects::*;
pub use aggregate::*;
pub use repository::*;
