//! User event entity model.

use serde::Serialize;
use sqlx::FromRow;

use funnel_core::types::{DbId, Timestamp};

/// A row from the `user_events` audit table.
///
/// Append-only from the bot's perspective; read by external analytics, not
/// by the conversational core.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserEvent {
    pub id: DbId,
    pub user_id: DbId,
    pub quiz_id: Option<DbId>,
    pub event_code: String,
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
}
