//! In-process domain events for the Arquimetal backend.
//!
//! - [`EventBus`]: publish/subscribe hub backed by `tokio::sync::broadcast`.
//! - [`DomainEvent`]: the event envelope.
//! - [`EventLogger`]: background subscriber that writes every event to the log.

pub mod bus;
pub mod logger;

pub use bus::{DomainEvent, EventBus, EVENT_PROJECT_CREATED};
pub use logger::EventLogger;
