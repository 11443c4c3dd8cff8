//! Integration tests for the persona-quiz run lifecycle.

use sqlx::PgPool;

use funnel_core::catalog::PERSONA_QUIZ_CODE;
use funnel_core::scenario::Scenario;
use funnel_db::repositories::{QuizRepo, QuizRunRepo, UserRepo};

async fn seed_run(pool: &PgPool) -> funnel_db::models::quiz_run::QuizRun {
    let user = UserRepo::get_or_create(pool, 555_001, Some("tester")).await.unwrap();
    let quiz = QuizRepo::get_or_create(pool, PERSONA_QUIZ_CODE, "Quiz").await.unwrap();
    QuizRunRepo::create(pool, user.id, quiz.id).await.unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn counters_start_at_zero_and_increment(pool: PgPool) {
    let run = seed_run(&pool).await;
    assert_eq!(run.impostor_score, 0);
    assert_eq!(run.eternal_student_score, 0);
    assert_eq!(run.seeker_score, 0);

    QuizRunRepo::increment_score(&pool, run.id, Scenario::Impostor).await.unwrap();
    QuizRunRepo::increment_score(&pool, run.id, Scenario::Impostor).await.unwrap();
    let updated = QuizRunRepo::increment_score(&pool, run.id, Scenario::Seeker)
        .await
        .unwrap()
        .expect("open run accepts answers");

    assert_eq!(updated.impostor_score, 2);
    assert_eq!(updated.eternal_student_score, 0);
    assert_eq!(updated.seeker_score, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn finalize_sets_result_fields_together(pool: PgPool) {
    let run = seed_run(&pool).await;
    QuizRunRepo::increment_score(&pool, run.id, Scenario::Seeker).await.unwrap();

    let finalized = QuizRunRepo::finalize(&pool, run.id, Scenario::Seeker)
        .await
        .unwrap()
        .expect("first finalize succeeds");

    assert!(finalized.is_completed);
    assert!(finalized.finished_at.is_some());
    assert_eq!(finalized.scenario(), Some(Scenario::Seeker));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn double_finalize_is_rejected(pool: PgPool) {
    let run = seed_run(&pool).await;

    let first = QuizRunRepo::finalize(&pool, run.id, Scenario::Impostor).await.unwrap();
    assert!(first.is_some());

    // Second tap of "show results": no row matches the conditional update.
    let second = QuizRunRepo::finalize(&pool, run.id, Scenario::Seeker).await.unwrap();
    assert!(second.is_none());

    let stored = QuizRunRepo::get(&pool, run.id).await.unwrap().unwrap();
    assert_eq!(stored.scenario(), Some(Scenario::Impostor));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn finalized_run_ignores_late_answers(pool: PgPool) {
    let run = seed_run(&pool).await;
    QuizRunRepo::finalize(&pool, run.id, Scenario::Impostor).await.unwrap();

    let late = QuizRunRepo::increment_score(&pool, run.id, Scenario::Seeker).await.unwrap();
    assert!(late.is_none());

    let stored = QuizRunRepo::get(&pool, run.id).await.unwrap().unwrap();
    assert_eq!(stored.seeker_score, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn dominant_mirrors_onto_user_profile(pool: PgPool) {
    let user = UserRepo::get_or_create(&pool, 555_002, None).await.unwrap();
    assert_eq!(user.scenario(), None);

    UserRepo::set_dominant_scenario(&pool, user.id, Scenario::EternalStudent)
        .await
        .unwrap();

    let stored = UserRepo::get_by_external_id(&pool, 555_002).await.unwrap().unwrap();
    assert_eq!(stored.scenario(), Some(Scenario::EternalStudent));
}
