// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Each aggregate has its own subdirectory with:
// - Value objects
// - Errors
// - Aggregate implementation
// - Repository contract
//
// Shared pieces live next to them:
// - id         - typed identifiers
// - event      - DomainEvent trait and EventEnvelope
// - repository - RepositoryError and the unit-of-work contract
//
// Nothing in here knows about SQL, HTTP or channels.
//
// ============================================================================

#[macro_use]
mod id;

pub mod event;
pub mod repository;

pub mod customer;
pub mod product;
pub mod order;

pub use event::{DomainEvent, EventEnvelope, EventPublisher};
pub use repository::{RepositoryError, RepositoryResult, UnitOfWork, UnitOfWorkFactory};
