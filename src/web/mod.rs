mod errors;
mod handlers;

use std::sync::Arc;

use actix_web::web;

use crate::application::{CreateOrderUseCase, CustomerService, OrderService, ProductService};
use crate::domain::event::EventPublisher;
use crate::domain::repository::UnitOfWorkFactory;
use crate::metrics::{self, Metrics};

pub use errors::ErrorResponse;
pub use handlers::IdResponse;

// ============================================================================
// HTTP API
// ============================================================================
//
//   POST /customers        GET /customers/{id}
//   POST /products         GET /products/{id}
//   POST /orders           GET /orders/{id}
//   GET  /metrics          GET /health
//
// Each create-order request gets a fresh unit of work from the store.
// Application errors map to 404 (not found), 400 (validation) or 500.
//
// ============================================================================

pub struct AppState {
    pub store: Arc<dyn UnitOfWorkFactory>,
    pub create_order: CreateOrderUseCase,
    pub orders: OrderService,
    pub customers: CustomerService,
    pub products: ProductService,
}

impl AppState {
    pub fn new(
        store: Arc<dyn UnitOfWorkFactory>,
        publisher: Arc<dyn EventPublisher>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            create_order: CreateOrderUseCase::new(publisher, metrics),
            orders: OrderService::new(store.clone()),
            customers: CustomerService::new(store.clone()),
            products: ProductService::new(store.clone()),
            store,
        }
    }
}

/// Register every route. Expects `web::Data<AppState>` and
/// `web::Data<Arc<Metrics>>` in app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/customers")
            .route("", web::post().to(handlers::register_customer))
            .route("/{id}", web::get().to(handlers::get_customer)),
    )
    .service(
        web::scope("/products")
            .route("", web::post().to(handlers::register_product))
            .route("/{id}", web::get().to(handlers::get_product)),
    )
    .service(
        web::scope("/orders")
            .route("", web::post().to(handlers::create_order))
            .route("/{id}", web::get().to(handlers::get_order)),
    )
    .configure(metrics::configure);
}
