use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::domain::event::{EventEnvelope, EventPublisher};
use crate::metrics::Metrics;

// ============================================================================
// In-Process Event Fan-Out
// ============================================================================
//
// One BroadcastEventPublisher is created at startup and shared by everything
// that publishes. Each subscriber gets its own receiver; a slow subscriber
// only ever loses its own backlog, and publishing never blocks or fails.
//
// ============================================================================

#[derive(Clone)]
pub struct BroadcastEventPublisher {
    sender: broadcast::Sender<EventEnvelope>,
}

impl BroadcastEventPublisher {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }
}

impl EventPublisher for BroadcastEventPublisher {
    fn publish(&self, event: EventEnvelope) {
        let event_type = event.event_type.clone();
        let aggregate_id = event.aggregate_id;

        match self.sender.send(event) {
            Ok(subscribers) => {
                tracing::debug!(
                    event_type = %event_type,
                    aggregate_id = %aggregate_id,
                    subscribers = subscribers,
                    "Published event"
                );
            }
            Err(_) => {
                tracing::debug!(
                    event_type = %event_type,
                    aggregate_id = %aggregate_id,
                    "Published event with no active subscribers"
                );
            }
        }
    }
}

/// Subscriber that logs every event and counts deliveries.
/// Ends when the publisher side is dropped.
pub fn spawn_event_logger(
    mut receiver: broadcast::Receiver<EventEnvelope>,
    metrics: Arc<Metrics>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tracing::info!("Event logger subscribed");

        loop {
            match receiver.recv().await {
                Ok(event) => {
                    metrics
                        .events_delivered
                        .with_label_values(&[event.event_type.as_str()])
                        .inc();

                    tracing::info!(
                        event_id = %event.event_id,
                        event_type = %event.event_type,
                        aggregate_id = %event.aggregate_id,
                        occurred_on = %event.occurred_on,
                        "📨 Domain event received"
                    );
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped = skipped, "Event logger lagged behind, events skipped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event channel closed, event logger stopping");
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{OrderCreatedEvent, OrderId};

    fn envelope() -> EventEnvelope {
        EventEnvelope::wrap(&OrderCreatedEvent::new(OrderId::generate())).unwrap()
    }

    #[tokio::test]
    async fn test_every_subscriber_receives_the_event() {
        let publisher = BroadcastEventPublisher::new(16);
        let mut first = publisher.subscribe();
        let mut second = publisher.subscribe();
        let event = envelope();

        publisher.publish(event.clone());

        assert_eq!(first.recv().await.unwrap(), event);
        assert_eq!(second.recv().await.unwrap(), event);
    }

    #[test]
    fn test_publish_without_subscribers_is_harmless() {
        let publisher = BroadcastEventPublisher::new(4);
        publisher.publish(envelope());
    }

    #[tokio::test]
    async fn test_dropped_subscriber_does_not_affect_others() {
        let publisher = BroadcastEventPublisher::new(4);
        let gone = publisher.subscribe();
        let mut alive = publisher.subscribe();
        drop(gone);

        let event = envelope();
        publisher.publish(event.clone());

        assert_eq!(alive.recv().await.unwrap(), event);
    }

    #[tokio::test]
    async fn test_event_logger_counts_deliveries_and_stops_on_close() {
        let metrics = Arc::new(Metrics::new().unwrap());
        let publisher = BroadcastEventPublisher::new(4);
        let handle = spawn_event_logger(publisher.subscribe(), metrics.clone());

        publisher.publish(envelope());
        publisher.publish(envelope());
        drop(publisher);

        handle.await.unwrap();
        assert_eq!(
            metrics.events_delivered.with_label_values(&["OrderCreated"]).get(),
            2
        );
    }
}
