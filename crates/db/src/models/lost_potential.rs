//! Lost-potential result entity model and insert DTO.

use serde::Serialize;
use sqlx::FromRow;

use funnel_core::types::{DbId, Timestamp};

/// A row from the `lost_potential_results` table (non-professional variant).
///
/// Derived columns follow the same purity rule as cost results: computed by
/// `funnel_core::scoring::lost_potential` at insert time only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LostPotentialResult {
    pub id: DbId,
    pub user_id: DbId,
    pub quiz_id: DbId,
    pub is_professional_snapshot: bool,
    pub months_interested: i64,
    pub frequency_coef: i64,
    pub sabotage_count: i64,
    /// Comma-separated option codes of the chosen items, `None` if empty.
    pub sabotage_codes: Option<String>,
    pub days_interested: i64,
    pub thoughts_count: i64,
    pub sabotage_forms_total: i64,
    pub created_at: Timestamp,
}

/// DTO for inserting a new lost-potential result.
#[derive(Debug, Clone)]
pub struct NewLostPotentialResult {
    pub user_id: DbId,
    pub quiz_id: DbId,
    pub months_interested: i64,
    pub frequency_coef: i64,
    pub sabotage_count: i64,
    pub sabotage_codes: Option<String>,
    pub days_interested: i64,
    pub thoughts_count: i64,
    pub sabotage_forms_total: i64,
}
