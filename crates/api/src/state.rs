use std::sync::Arc;

use porto_core::store::PortfolioStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Portfolio document store (Postgres in production, in-memory in tests).
    pub store: Arc<dyn PortfolioStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
