use std::sync::Arc;

use dayjob_core::marketplace::Marketplace;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the marketplace holds its store behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The domain components over the configured store.
    pub marketplace: Marketplace,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
}
