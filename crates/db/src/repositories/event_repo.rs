//! Repository for the append-only `user_events` table.

use sqlx::PgPool;

use funnel_core::types::DbId;

use crate::models::event::UserEvent;

/// Column list for `user_events` queries.
const EVENT_COLUMNS: &str = "id, user_id, quiz_id, event_code, payload, created_at";

/// Write-side access to the user event audit log.
pub struct EventRepo;

impl EventRepo {
    /// Append an event row, returning the generated ID.
    pub async fn insert(
        pool: &PgPool,
        user_id: DbId,
        quiz_id: Option<DbId>,
        event_code: &str,
        payload: &serde_json::Value,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO user_events (user_id, quiz_id, event_code, payload) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(user_id)
        .bind(quiz_id)
        .bind(event_code)
        .bind(payload)
        .fetch_one(pool)
        .await
    }

    /// List recent events for one user, newest first (debugging/analytics).
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<UserEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {EVENT_COLUMNS} FROM user_events WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT $2"
        );
        sqlx::query_as::<_, UserEvent>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
