//! Repository for the `cost_results` table.

use sqlx::PgPool;

use crate::models::cost_result::{CostResult, NewCostResult};

/// Column list for `cost_results` queries.
const COST_COLUMNS: &str = "id, user_id, quiz_id, is_professional_snapshot, scenario, \
     expected_income, current_income, months_delay, lost_per_month, lost_total, \
     lost_three_years, created_at";

/// Provides insert/read operations for cost-of-inaction results.
pub struct CostResultRepo;

impl CostResultRepo {
    /// Insert a finalized cost calculation.
    pub async fn insert(pool: &PgPool, new: &NewCostResult) -> Result<CostResult, sqlx::Error> {
        let query = format!(
            "INSERT INTO cost_results \
                (user_id, quiz_id, is_professional_snapshot, scenario, expected_income, \
                 current_income, months_delay, lost_per_month, lost_total, lost_three_years) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COST_COLUMNS}"
        );
        sqlx::query_as::<_, CostResult>(&query)
            .bind(new.user_id)
            .bind(new.quiz_id)
            .bind(new.is_professional_snapshot)
            .bind(new.scenario.as_deref())
            .bind(new.expected_income)
            .bind(new.current_income)
            .bind(new.months_delay)
            .bind(new.lost_per_month)
            .bind(new.lost_total)
            .bind(new.lost_three_years)
            .fetch_one(pool)
            .await
    }

    /// List a user's cost results, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: i64,
    ) -> Result<Vec<CostResult>, sqlx::Error> {
        let query = format!(
            "SELECT {COST_COLUMNS} FROM cost_results WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, CostResult>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
