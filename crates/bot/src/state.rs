use std::sync::Arc;

use funnel_engine::Engine;

use crate::config::BotConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: funnel_db::DbPool,
    /// Server configuration.
    pub config: Arc<BotConfig>,
    /// The conversational engine (sessions, flow tables, collaborators).
    pub engine: Arc<Engine>,
}
