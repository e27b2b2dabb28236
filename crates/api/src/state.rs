use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: arquimetal_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// In-process bus for domain events (`proposal.awarded`, `project.created`).
    pub event_bus: Arc<arquimetal_events::EventBus>,
}
