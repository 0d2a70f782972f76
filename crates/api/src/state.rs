use std::sync::Arc;

use complio_supabase::AuthBackend;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: complio_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Hosted auth backend, constructed once at startup and injected here.
    pub auth: Arc<dyn AuthBackend>,
}
