//! Background subscriber that records every domain event in the log.
//!
//! Runs until the [`EventBus`](crate::bus::EventBus) sender is dropped.

use tokio::sync::broadcast;

use crate::bus::DomainEvent;

/// Writes each received event as a structured `info` line.
pub struct EventLogger;

impl EventLogger {
    /// Run the logging loop. Returns the number of events logged.
    pub async fn run(mut receiver: broadcast::Receiver<DomainEvent>) -> u64 {
        let mut logged = 0;
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    tracing::info!(
                        event_type = %event.event_type,
                        entity_type = event.source_entity_type.as_deref().unwrap_or("-"),
                        entity_id = event.source_entity_id,
                        actor = event.actor.as_deref().unwrap_or("-"),
                        payload = %event.payload,
                        "Domain event"
                    );
                    logged += 1;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Event logger lagged, some events were not logged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, event logger shutting down");
                    break;
                }
            }
        }
        logged
    }
}
