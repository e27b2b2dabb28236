//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>` in the application state.
//! Publishing is fire-and-forget: a bus without subscribers drops events.

use arquimetal_core::proposal::{ProposalAwarded, EVENT_PROPOSAL_AWARDED};
use arquimetal_core::types::{DbId, Timestamp};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Event name published after a project row is inserted.
pub const EVENT_PROJECT_CREATED: &str = "project.created";

// ---------------------------------------------------------------------------
// DomainEvent
// ---------------------------------------------------------------------------

/// Something that happened to a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Dot-separated event name, e.g. `"proposal.awarded"`.
    pub event_type: String,

    /// Kind of the record the event is about (`"proposal"`, `"project"`).
    pub source_entity_type: Option<String>,

    pub source_entity_id: Option<DbId>,

    /// `sub` claim of the caller that caused the event, if known.
    pub actor: Option<String>,

    pub payload: serde_json::Value,

    pub timestamp: Timestamp,
}

impl DomainEvent {
    /// Create a new event with only the required `event_type`.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            source_entity_type: None,
            source_entity_id: None,
            actor: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Attach a source entity to the event.
    pub fn with_source(mut self, entity_type: impl Into<String>, entity_id: DbId) -> Self {
        self.source_entity_type = Some(entity_type.into());
        self.source_entity_id = Some(entity_id);
        self
    }

    /// Attach the acting caller to the event.
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Set the JSON payload for the event.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// `proposal.awarded`, carrying the full award as payload.
    pub fn proposal_awarded(award: &ProposalAwarded) -> Self {
        let payload = serde_json::to_value(award).unwrap_or_default();
        Self::new(EVENT_PROPOSAL_AWARDED)
            .with_source("proposal", award.proposal_id)
            .with_payload(payload)
    }

    /// `project.created`, optionally naming the proposal it came from.
    pub fn project_created(
        project_id: DbId,
        project_number: i64,
        proposal_id: Option<DbId>,
    ) -> Self {
        Self::new(EVENT_PROJECT_CREATED)
            .with_source("project", project_id)
            .with_payload(serde_json::json!({
                "project_number": project_number.to_string(),
                "proposal_id": proposal_id,
            }))
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out event bus.
pub struct EventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest unread events are dropped and slow
    /// receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: DomainEvent) {
        // A send error only means there are no receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use arquimetal_core::amount::Amount;

    use super::*;

    fn award() -> ProposalAwarded {
        ProposalAwarded {
            proposal_id: 5,
            client_id: 2,
            contact_id: None,
            name: "Galpón".into(),
            proposal_number: None,
            amount: Some(Amount::parse("123456789012345678").unwrap()),
            awarded_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(DomainEvent::proposal_awarded(&award()).with_actor("7"));

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.event_type, "proposal.awarded");
        assert_eq!(received.source_entity_type.as_deref(), Some("proposal"));
        assert_eq!(received.source_entity_id, Some(5));
        assert_eq!(received.actor.as_deref(), Some("7"));
        // Amounts stay exact inside the payload.
        assert_eq!(received.payload["amount"], "123456789012345678");
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(DomainEvent::project_created(9, 42, Some(5)));

        let e1 = rx1.recv().await.expect("subscriber 1 should receive");
        let e2 = rx2.recv().await.expect("subscriber 2 should receive");
        assert_eq!(e1.event_type, EVENT_PROJECT_CREATED);
        assert_eq!(e2.payload["project_number"], "42");
        assert_eq!(e2.payload["proposal_id"], 5);
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        bus.publish(DomainEvent::new("orphan.event"));
    }

    #[test]
    fn bare_event_has_empty_optional_fields() {
        let event = DomainEvent::new("bare.event");
        assert!(event.source_entity_type.is_none());
        assert!(event.source_entity_id.is_none());
        assert!(event.actor.is_none());
        assert!(event.payload.is_object());
    }
}
