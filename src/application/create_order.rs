use std::sync::Arc;

use uuid::Uuid;

use crate::domain::customer::CustomerId;
use crate::domain::event::{EventEnvelope, EventPublisher};
use crate::domain::order::{Order, OrderCreatedEvent, OrderId, OrderItem};
use crate::domain::product::ProductId;
use crate::domain::repository::UnitOfWork;
use crate::metrics::Metrics;
use super::dto::{CreateOrderRequest, OrderItemRequest};
use super::errors::ApplicationError;

// ============================================================================
// Create Order Workflow
// ============================================================================
//
// customer check → new Order → per item: product check, price capture,
// append → save → commit → publish OrderCreated
//
// The unit of work is passed in by the caller and consumed here: it is
// committed on success and rolled back on any failure, so a failed request
// leaves nothing behind. The event goes out only after the commit succeeded.
//
// ============================================================================

pub struct CreateOrderUseCase {
    publisher: Arc<dyn EventPublisher>,
    metrics: Arc<Metrics>,
}

impl CreateOrderUseCase {
    pub fn new(publisher: Arc<dyn EventPublisher>, metrics: Arc<Metrics>) -> Self {
        Self { publisher, metrics }
    }

    pub async fn execute(
        &self,
        uow: Box<dyn UnitOfWork>,
        request: CreateOrderRequest,
    ) -> Result<OrderId, ApplicationError> {
        let timer = self.metrics.order_creation_duration.start_timer();
        let result = self.create(uow, request).await;
        timer.observe_duration();

        match &result {
            Ok(_) => self.metrics.orders_created.inc(),
            Err(e) => {
                self.metrics
                    .order_creation_failures
                    .with_label_values(&[e.reason()])
                    .inc();
            }
        }

        result
    }

    async fn create(
        &self,
        mut uow: Box<dyn UnitOfWork>,
        request: CreateOrderRequest,
    ) -> Result<OrderId, ApplicationError> {
        let customer_id = CustomerId::from_uuid(request.customer_id);

        tracing::info!(
            customer_id = %customer_id,
            item_count = request.items.len(),
            "Creating new order"
        );

        let (order, event) = match assemble_and_save(uow.as_mut(), customer_id, &request.items).await {
            Ok(staged) => staged,
            Err(e) => {
                tracing::warn!(customer_id = %customer_id, error = %e, "Order rejected");
                if let Err(rollback_error) = uow.rollback().await {
                    tracing::warn!(error = %rollback_error, "Rollback after rejected order failed");
                }
                return Err(e);
            }
        };

        uow.commit().await.map_err(|e| {
            tracing::error!(order_id = %order.id(), error = %e, "Failed to commit order");
            ApplicationError::from(e)
        })?;

        tracing::info!(
            order_id = %order.id(),
            customer_id = %customer_id,
            item_count = order.items().len(),
            "✅ Order committed"
        );

        // Post-commit notification; nothing past this point can undo the order
        let event_type = event.event_type.clone();
        self.publisher.publish(event);
        self.metrics
            .events_published
            .with_label_values(&[event_type.as_str()])
            .inc();

        Ok(order.id())
    }
}

/// Validate references, build the order with captured prices, and stage it
/// in `uow`. Nothing is visible to anyone else until the caller commits.
async fn assemble_and_save(
    uow: &mut dyn UnitOfWork,
    customer_id: CustomerId,
    items: &[OrderItemRequest],
) -> Result<(Order, EventEnvelope), ApplicationError> {
    if uow.customers().find_by_id(customer_id).await?.is_none() {
        return Err(ApplicationError::CustomerNotFound(customer_id));
    }

    let mut order = Order::new(OrderId::generate(), customer_id);

    for requested in items {
        let product_id = ProductId::from_uuid(requested.product_id);
        let product = uow
            .products()
            .find_by_id(product_id)
            .await?
            .ok_or(ApplicationError::ProductNotFound(product_id))?;

        let item = OrderItem::new(
            Uuid::new_v4(),
            product_id,
            requested.quantity,
            product.price().amount(),
        )?;

        tracing::debug!(
            order_id = %order.id(),
            product_id = %product_id,
            quantity = requested.quantity,
            unit_price = %product.price(),
            "Captured line item price"
        );

        order.add_item(item);
    }

    // Encode before saving so an encoding failure cannot follow a commit
    let event = EventEnvelope::wrap(&OrderCreatedEvent::new(order.id()))?;

    uow.orders().save(&order).await?;

    Ok((order, event))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::OrderItemRequest;
    use crate::application::order_service::OrderService;
    use crate::domain::repository::{RepositoryError, UnitOfWorkFactory};
    use crate::infrastructure::{BroadcastEventPublisher, InMemoryStore};
    use crate::test_support::{reprice, seed_customer, seed_product, RecordingPublisher};
    use rust_decimal_macros::dec;

    struct Fixture {
        store: InMemoryStore,
        publisher: Arc<RecordingPublisher>,
        metrics: Arc<Metrics>,
        use_case: CreateOrderUseCase,
    }

    impl Fixture {
        fn new() -> Self {
            let store = InMemoryStore::new();
            let publisher = Arc::new(RecordingPublisher::default());
            let metrics = Arc::new(Metrics::new().unwrap());
            let use_case = CreateOrderUseCase::new(publisher.clone(), metrics.clone());
            Self { store, publisher, metrics, use_case }
        }

        async fn create(&self, request: CreateOrderRequest) -> Result<OrderId, ApplicationError> {
            let uow = self.store.begin().await.unwrap();
            self.use_case.execute(uow, request).await
        }

        fn orders(&self) -> OrderService {
            OrderService::new(Arc::new(self.store.clone()))
        }
    }

    fn request(customer_id: CustomerId, items: &[(ProductId, i32)]) -> CreateOrderRequest {
        CreateOrderRequest {
            customer_id: customer_id.as_uuid(),
            items: items
                .iter()
                .map(|(product_id, quantity)| OrderItemRequest {
                    product_id: product_id.as_uuid(),
                    quantity: *quantity,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_create_order_captures_prices_in_request_order() {
        let fx = Fixture::new();
        let c1 = seed_customer(&fx.store).await;
        let p1 = seed_product(&fx.store, dec!(9.99), "USD").await;
        let p2 = seed_product(&fx.store, dec!(3.50), "USD").await;

        let order_id = fx.create(request(c1, &[(p1, 2), (p2, 1)])).await.unwrap();

        let response = fx.orders().get_order(order_id).await.unwrap().unwrap();
        assert_eq!(response.id, order_id.as_uuid());
        assert_eq!(response.customer_id, c1.as_uuid());
        assert_eq!(response.status, "PENDING");

        let items: Vec<_> = response
            .items
            .iter()
            .map(|i| (i.product_id, i.quantity, i.price))
            .collect();
        assert_eq!(
            items,
            vec![(p1.as_uuid(), 2, dec!(9.99)), (p2.as_uuid(), 1, dec!(3.50))]
        );
    }

    #[tokio::test]
    async fn test_captured_price_survives_later_price_change() {
        let fx = Fixture::new();
        let customer = seed_customer(&fx.store).await;
        let product = seed_product(&fx.store, dec!(20.00), "USD").await;

        let order_id = fx.create(request(customer, &[(product, 3)])).await.unwrap();
        reprice(&fx.store, product, dec!(25.00)).await;

        let response = fx.orders().get_order(order_id).await.unwrap().unwrap();
        assert_eq!(response.items[0].price, dec!(20.00));
    }

    #[tokio::test]
    async fn test_unknown_customer_persists_nothing() {
        let fx = Fixture::new();
        let product = seed_product(&fx.store, dec!(1.00), "USD").await;
        let stranger = CustomerId::generate();

        let err = fx.create(request(stranger, &[(product, 1)])).await.unwrap_err();

        assert!(matches!(err, ApplicationError::CustomerNotFound(id) if id == stranger));
        assert_eq!(fx.store.order_count().await, 0);
        assert!(fx.publisher.events().is_empty());
    }

    #[tokio::test]
    async fn test_one_unknown_product_rejects_the_whole_order() {
        let fx = Fixture::new();
        let customer = seed_customer(&fx.store).await;
        let known_a = seed_product(&fx.store, dec!(4.00), "USD").await;
        let known_b = seed_product(&fx.store, dec!(6.00), "USD").await;
        let missing = ProductId::generate();

        let err = fx
            .create(request(customer, &[(known_a, 1), (missing, 2), (known_b, 1)]))
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::ProductNotFound(id) if id == missing));
        assert_eq!(fx.store.order_count().await, 0);
        assert!(fx.publisher.events().is_empty());
    }

    #[tokio::test]
    async fn test_non_positive_quantity_rejects_the_whole_order() {
        let fx = Fixture::new();
        let customer = seed_customer(&fx.store).await;
        let product = seed_product(&fx.store, dec!(2.00), "USD").await;

        let err = fx
            .create(request(customer, &[(product, 1), (product, 0)]))
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(fx.store.order_count().await, 0);
        assert!(fx.publisher.events().is_empty());
    }

    #[tokio::test]
    async fn test_commit_failure_publishes_nothing() {
        let fx = Fixture::new();
        let customer = seed_customer(&fx.store).await;
        let product = seed_product(&fx.store, dec!(2.00), "USD").await;
        fx.store.simulate_commit_failure(true);

        let err = fx.create(request(customer, &[(product, 1)])).await.unwrap_err();

        assert!(matches!(err, ApplicationError::Persistence(RepositoryError::Unavailable(_))));
        assert_eq!(fx.store.order_count().await, 0);
        assert!(fx.publisher.events().is_empty());
    }

    #[tokio::test]
    async fn test_order_created_event_carries_the_new_id() {
        let fx = Fixture::new();
        let customer = seed_customer(&fx.store).await;
        let product = seed_product(&fx.store, dec!(2.00), "USD").await;

        let order_id = fx.create(request(customer, &[(product, 1)])).await.unwrap();

        let events = fx.publisher.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, "OrderCreated");
        let event: OrderCreatedEvent = events[0].decode().unwrap();
        assert_eq!(event.order_id, order_id);
    }

    #[tokio::test]
    async fn test_empty_item_list_is_accepted() {
        let fx = Fixture::new();
        let customer = seed_customer(&fx.store).await;

        let order_id = fx.create(request(customer, &[])).await.unwrap();

        let response = fx.orders().get_order(order_id).await.unwrap().unwrap();
        assert!(response.items.is_empty());
        assert_eq!(response.status, "PENDING");
    }

    #[tokio::test]
    async fn test_order_is_kept_when_nobody_listens_for_events() {
        let store = InMemoryStore::new();
        let metrics = Arc::new(Metrics::new().unwrap());
        let publisher = Arc::new(BroadcastEventPublisher::new(1));
        let use_case = CreateOrderUseCase::new(publisher, metrics);
        let customer = seed_customer(&store).await;

        let uow = store.begin().await.unwrap();
        let order_id = use_case.execute(uow, request(customer, &[])).await.unwrap();

        let found = OrderService::new(Arc::new(store.clone())).get_order(order_id).await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_metrics_record_outcomes() {
        let fx = Fixture::new();
        let customer = seed_customer(&fx.store).await;

        fx.create(request(customer, &[])).await.unwrap();
        fx.create(request(CustomerId::generate(), &[])).await.unwrap_err();
        fx.create(request(customer, &[(ProductId::generate(), 1)])).await.unwrap_err();

        assert_eq!(fx.metrics.orders_created.get(), 1);
        let failures = &fx.metrics.order_creation_failures;
        assert_eq!(failures.with_label_values(&["customer_not_found"]).get(), 1);
        assert_eq!(failures.with_label_values(&["product_not_found"]).get(), 1);
        assert_eq!(
            fx.metrics.events_published.with_label_values(&["OrderCreated"]).get(),
            1
        );
    }
}
