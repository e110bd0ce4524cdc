use async_trait::async_trait;

use super::customer::CustomerRepository;
use super::order::OrderRepository;
use super::product::ProductRepository;

// ============================================================================
// Persistence Boundary
// ============================================================================
//
// Repositories are only reachable through a UnitOfWork. Everything written
// through one unit becomes visible on commit, all at once. Dropping a unit
// without committing discards its writes.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Stored record is invalid: {0}")]
    CorruptRecord(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// One atomic unit of work spanning the customer, product and order stores
#[async_trait]
pub trait UnitOfWork: Send {
    fn customers(&mut self) -> &mut dyn CustomerRepository;

    fn products(&mut self) -> &mut dyn ProductRepository;

    fn orders(&mut self) -> &mut dyn OrderRepository;

    /// Make every staged write durable and visible together
    async fn commit(self: Box<Self>) -> RepositoryResult<()>;

    /// Discard every staged write
    async fn rollback(self: Box<Self>) -> RepositoryResult<()>;
}

#[async_trait]
pub trait UnitOfWorkFactory: Send + Sync {
    async fn begin(&self) -> RepositoryResult<Box<dyn UnitOfWork>>;
}
