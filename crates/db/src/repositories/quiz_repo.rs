//! Repository for the `quizzes` catalog table.

use sqlx::PgPool;

use crate::models::quiz::Quiz;

/// Column list for `quizzes` queries.
const QUIZ_COLUMNS: &str = "id, code, title, description, is_active";

/// Provides lazy-seeded access to the quiz catalog.
pub struct QuizRepo;

impl QuizRepo {
    /// Find a quiz by its unique code.
    pub async fn get_by_code(pool: &PgPool, code: &str) -> Result<Option<Quiz>, sqlx::Error> {
        let query = format!("SELECT {QUIZ_COLUMNS} FROM quizzes WHERE code = $1");
        sqlx::query_as::<_, Quiz>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a catalog entry by code, seeding it on first reference.
    ///
    /// The title is only written on insert; catalog rows are read-mostly.
    pub async fn get_or_create(
        pool: &PgPool,
        code: &str,
        title: &str,
    ) -> Result<Quiz, sqlx::Error> {
        let query = format!(
            "INSERT INTO quizzes (code, title) VALUES ($1, $2) \
             ON CONFLICT (code) DO UPDATE SET code = EXCLUDED.code \
             RETURNING {QUIZ_COLUMNS}"
        );
        sqlx::query_as::<_, Quiz>(&query)
            .bind(code)
            .bind(title)
            .fetch_one(pool)
            .await
    }
}
