// Shared fixtures for unit tests

use std::sync::Mutex;

use rust_decimal::Decimal;

use crate::domain::customer::{Customer, CustomerId, Email};
use crate::domain::event::{EventEnvelope, EventPublisher};
use crate::domain::product::{Money, Product, ProductId};
use crate::domain::repository::UnitOfWorkFactory;
use crate::infrastructure::InMemoryStore;

/// Publisher that keeps every event it is given
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<EventEnvelope>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<EventEnvelope> {
        self.events.lock().unwrap().clone()
    }
}

impl EventPublisher for RecordingPublisher {
    fn publish(&self, event: EventEnvelope) {
        self.events.lock().unwrap().push(event);
    }
}

pub async fn seed_customer(store: &InMemoryStore) -> CustomerId {
    let customer = Customer::new(
        CustomerId::generate(),
        "Test Customer",
        Email::new("customer@example.com").unwrap(),
    );

    let mut uow = store.begin().await.unwrap();
    uow.customers().save(&customer).await.unwrap();
    uow.commit().await.unwrap();

    customer.id()
}

pub async fn seed_product(store: &InMemoryStore, price: Decimal, currency: &str) -> ProductId {
    let product = Product::new(ProductId::generate(), "Test Product", Money::new(price, currency));

    let mut uow = store.begin().await.unwrap();
    uow.products().save(&product).await.unwrap();
    uow.commit().await.unwrap();

    product.id()
}

pub async fn reprice(store: &InMemoryStore, id: ProductId, price: Decimal) {
    let mut uow = store.begin().await.unwrap();
    let mut product = uow.products().find_by_id(id).await.unwrap().unwrap();
    let currency = product.price().currency().to_string();
    product.change_price(Money::new(price, currency));
    uow.products().save(&product).await.unwrap();
    uow.commit().await.unwrap();
}
