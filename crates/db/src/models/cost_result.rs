//! Cost-of-inaction result entity model and insert DTO.

use serde::Serialize;
use sqlx::FromRow;

use funnel_core::types::{DbId, Timestamp};

/// A row from the `cost_results` table.
///
/// The `lost_*` columns are pure functions of the three raw answers,
/// computed by `funnel_core::scoring::cost_of_inaction` at insert time and
/// never edited independently.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CostResult {
    pub id: DbId,
    pub user_id: DbId,
    pub quiz_id: DbId,
    pub is_professional_snapshot: bool,
    pub scenario: Option<String>,
    pub expected_income: i64,
    pub current_income: i64,
    pub months_delay: i64,
    pub lost_per_month: i64,
    pub lost_total: i64,
    pub lost_three_years: i64,
    pub created_at: Timestamp,
}

/// DTO for inserting a new cost result.
#[derive(Debug, Clone)]
pub struct NewCostResult {
    pub user_id: DbId,
    pub quiz_id: DbId,
    pub is_professional_snapshot: bool,
    pub scenario: Option<String>,
    pub expected_income: i64,
    pub current_income: i64,
    pub months_delay: i64,
    pub lost_per_month: i64,
    pub lost_total: i64,
    pub lost_three_years: i64,
}
