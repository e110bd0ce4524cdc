// ============================================================================
// Application Layer - use cases over the domain contracts
// ============================================================================

pub mod dto;
pub mod errors;
pub mod create_order;
pub mod order_service;
pub mod customer_service;
pub mod product_service;

pub use dto::*;
pub use errors::ApplicationError;
pub use create_order::CreateOrderUseCase;
pub use order_service::OrderService;
pub use customer_service::CustomerService;
pub use product_service::ProductService;
