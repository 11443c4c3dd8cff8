//! Quiz catalog entity model.

use serde::Serialize;
use sqlx::FromRow;

use funnel_core::types::DbId;

/// A row from the `quizzes` lookup table. Seeded lazily on first reference.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quiz {
    pub id: DbId,
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub is_active: bool,
}
