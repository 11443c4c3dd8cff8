//! Repository for the `lost_potential_results` table.

use sqlx::PgPool;

use crate::models::lost_potential::{LostPotentialResult, NewLostPotentialResult};

/// Column list for `lost_potential_results` queries.
const LOST_COLUMNS: &str = "id, user_id, quiz_id, is_professional_snapshot, \
     months_interested, frequency_coef, sabotage_count, sabotage_codes, \
     days_interested, thoughts_count, sabotage_forms_total, created_at";

/// Provides insert/read operations for lost-potential results.
pub struct LostPotentialRepo;

impl LostPotentialRepo {
    /// Insert a finalized lost-potential calculation.
    pub async fn insert(
        pool: &PgPool,
        new: &NewLostPotentialResult,
    ) -> Result<LostPotentialResult, sqlx::Error> {
        let query = format!(
            "INSERT INTO lost_potential_results \
                (user_id, quiz_id, months_interested, frequency_coef, sabotage_count, \
                 sabotage_codes, days_interested, thoughts_count, sabotage_forms_total) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {LOST_COLUMNS}"
        );
        sqlx::query_as::<_, LostPotentialResult>(&query)
            .bind(new.user_id)
            .bind(new.quiz_id)
            .bind(new.months_interested)
            .bind(new.frequency_coef)
            .bind(new.sabotage_count)
            .bind(new.sabotage_codes.as_deref())
            .bind(new.days_interested)
            .bind(new.thoughts_count)
            .bind(new.sabotage_forms_total)
            .fetch_one(pool)
            .await
    }

    /// List a user's lost-potential results, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: i64,
    ) -> Result<Vec<LostPotentialResult>, sqlx::Error> {
        let query = format!(
            "SELECT {LOST_COLUMNS} FROM lost_potential_results WHERE user_id = $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, LostPotentialResult>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
