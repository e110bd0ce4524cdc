use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Domain Events
// ============================================================================
//
// Events are post-commit notifications. They are wrapped in an envelope with
// a JSON payload so the delivery side does not need to know every concrete
// event type.
//
// ============================================================================

/// Base trait for all domain events
pub trait DomainEvent: Serialize + DeserializeOwned + Clone + Send + Sync {
    fn event_type(&self) -> &'static str;
    fn aggregate_id(&self) -> Uuid;
    fn occurred_on(&self) -> DateTime<Utc>;
}

/// Event metadata plus serialized payload, as handed to an [`EventPublisher`]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EventEnvelope {
    pub event_id: Uuid,
    pub event_type: String,
    pub aggregate_id: Uuid,
    pub occurred_on: DateTime<Utc>,
    pub payload: serde_json::Value,
}

impl EventEnvelope {
    pub fn wrap<E: DomainEvent>(event: &E) -> Result<Self, serde_json::Error> {
        Ok(Self {
            event_id: Uuid::new_v4(),
            event_type: event.event_type().to_string(),
            aggregate_id: event.aggregate_id(),
            occurred_on: event.occurred_on(),
            payload: serde_json::to_value(event)?,
        })
    }

    /// Deserialize the payload back into a concrete event
    pub fn decode<E: DomainEvent>(&self) -> Result<E, serde_json::Error> {
        serde_json::from_value(self.payload.clone())
    }
}

/// Notification boundary.
///
/// `publish` is a hand-off: it returns nothing, so whatever happens to the
/// event after this call (no subscribers, a slow subscriber, a failing one)
/// cannot reach back into the caller's already committed work.
pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: EventEnvelope);
}
