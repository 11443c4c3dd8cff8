use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    funnel_db::health_check(&pool).await.unwrap();

    let tables = [
        "users",
        "quizzes",
        "quiz_runs",
        "cost_results",
        "lost_potential_results",
        "user_events",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should exist and start empty");
    }
}

/// Quiz catalog entries are seeded lazily and deduplicated by code.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_quiz_catalog_lazy_seed(pool: PgPool) {
    let first = funnel_db::repositories::QuizRepo::get_or_create(
        &pool,
        funnel_core::catalog::PERSONA_QUIZ_CODE,
        "Dominant scenario quiz",
    )
    .await
    .unwrap();

    let second = funnel_db::repositories::QuizRepo::get_or_create(
        &pool,
        funnel_core::catalog::PERSONA_QUIZ_CODE,
        "A different title that must not overwrite",
    )
    .await
    .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.title, "Dominant scenario quiz");
}
