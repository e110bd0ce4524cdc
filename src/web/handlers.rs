use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::{
    ApplicationError, CreateOrderRequest, CustomerResponse, ProductResponse, RegisterCustomer,
    RegisterProduct,
};
use crate::domain::customer::CustomerId;
use crate::domain::order::OrderId;
use crate::domain::product::ProductId;
use super::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct IdResponse {
    pub id: Uuid,
}

type HandlerResult = Result<HttpResponse, ApplicationError>;

fn not_found(kind: &str, id: Uuid) -> HttpResponse {
    HttpResponse::NotFound().json(super::ErrorResponse {
        error: format!("{} not found: {}", kind, id),
    })
}

// ============================================================================
// Customers
// ============================================================================

pub async fn register_customer(
    state: web::Data<AppState>,
    body: web::Json<RegisterCustomer>,
) -> HandlerResult {
    let id = state.customers.register(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(IdResponse { id: id.as_uuid() }))
}

pub async fn get_customer(state: web::Data<AppState>, path: web::Path<Uuid>) -> HandlerResult {
    let id = path.into_inner();
    Ok(match state.customers.get_customer(CustomerId::from_uuid(id)).await? {
        Some(customer) => HttpResponse::Ok().json(CustomerResponse::from(&customer)),
        None => not_found("Customer", id),
    })
}

// ============================================================================
// Products
// ============================================================================

pub async fn register_product(
    state: web::Data<AppState>,
    body: web::Json<RegisterProduct>,
) -> HandlerResult {
    let id = state.products.register(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(IdResponse { id: id.as_uuid() }))
}

pub async fn get_product(state: web::Data<AppState>, path: web::Path<Uuid>) -> HandlerResult {
    let id = path.into_inner();
    Ok(match state.products.get_product(ProductId::from_uuid(id)).await? {
        Some(product) => HttpResponse::Ok().json(ProductResponse::from(&product)),
        None => not_found("Product", id),
    })
}

// ============================================================================
// Orders
// ============================================================================

pub async fn create_order(
    state: web::Data<AppState>,
    body: web::Json<CreateOrderRequest>,
) -> HandlerResult {
    let uow = state.store.begin().await?;
    let id = state.create_order.execute(uow, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(IdResponse { id: id.as_uuid() }))
}

pub async fn get_order(state: web::Data<AppState>, path: web::Path<Uuid>) -> HandlerResult {
    let id = path.into_inner();
    Ok(match state.orders.get_order(OrderId::from_uuid(id)).await? {
        Some(order) => HttpResponse::Ok().json(order),
        None => not_found("Order", id),
    })
}
