// ============================================================================
// Infrastructure - adapters behind the domain contracts
// ============================================================================
//
// - records   - flat storage shapes shared by both stores
// - memory    - in-memory unit of work (default store, tests)
// - postgres  - sqlx/PostgreSQL unit of work
// - publisher - tokio broadcast event fan-out
//
// ============================================================================

pub mod records;
pub mod memory;
pub mod postgres;
pub mod publisher;

pub use memory::InMemoryStore;
pub use postgres::PgStore;
pub use publisher::{spawn_event_logger, BroadcastEventPublisher};
