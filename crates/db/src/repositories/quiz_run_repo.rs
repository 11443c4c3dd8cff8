//! Repository for the `quiz_runs` table.

use sqlx::PgPool;

use funnel_core::scenario::Scenario;
use funnel_core::types::DbId;

use crate::models::quiz_run::QuizRun;

/// Column list for `quiz_runs` queries.
const RUN_COLUMNS: &str = "id, user_id, quiz_id, impostor_score, eternal_student_score, \
     seeker_score, dominant_scenario, started_at, finished_at, is_completed";

/// Provides operations for persona-quiz scoring attempts.
pub struct QuizRunRepo;

impl QuizRunRepo {
    /// Create a fresh run with zeroed counters.
    pub async fn create(pool: &PgPool, user_id: DbId, quiz_id: DbId) -> Result<QuizRun, sqlx::Error> {
        let query = format!(
            "INSERT INTO quiz_runs (user_id, quiz_id) VALUES ($1, $2) RETURNING {RUN_COLUMNS}"
        );
        sqlx::query_as::<_, QuizRun>(&query)
            .bind(user_id)
            .bind(quiz_id)
            .fetch_one(pool)
            .await
    }

    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<QuizRun>, sqlx::Error> {
        let query = format!("SELECT {RUN_COLUMNS} FROM quiz_runs WHERE id = $1");
        sqlx::query_as::<_, QuizRun>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Increment one scenario counter by exactly 1.
    ///
    /// Finalized runs are never mutated; the `is_completed` guard makes a
    /// late answer after finalization a no-op at the row level.
    pub async fn increment_score(
        pool: &PgPool,
        id: DbId,
        scenario: Scenario,
    ) -> Result<Option<QuizRun>, sqlx::Error> {
        let column = match scenario {
            Scenario::Impostor => "impostor_score",
            Scenario::EternalStudent => "eternal_student_score",
            Scenario::Seeker => "seeker_score",
        };
        let query = format!(
            "UPDATE quiz_runs SET {column} = {column} + 1 \
             WHERE id = $1 AND is_completed = FALSE \
             RETURNING {RUN_COLUMNS}"
        );
        sqlx::query_as::<_, QuizRun>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Finalize a run: set the dominant scenario, completion flag and
    /// finish timestamp in a single conditional write.
    ///
    /// Returns `None` when the run is already completed (or missing), so a
    /// duplicate "show results" tap cannot re-finalize or double-count.
    pub async fn finalize(
        pool: &PgPool,
        id: DbId,
        dominant: Scenario,
    ) -> Result<Option<QuizRun>, sqlx::Error> {
        let query = format!(
            "UPDATE quiz_runs SET dominant_scenario = $2, is_completed = TRUE, \
             finished_at = now() \
             WHERE id = $1 AND is_completed = FALSE \
             RETURNING {RUN_COLUMNS}"
        );
        sqlx::query_as::<_, QuizRun>(&query)
            .bind(id)
            .bind(dominant.as_str())
            .fetch_optional(pool)
            .await
    }
}
