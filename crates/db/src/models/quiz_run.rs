//! Persona quiz run entity model.

use serde::Serialize;
use sqlx::FromRow;

use funnel_core::scenario::Scenario;
use funnel_core::scoring::ScoreCard;
use funnel_core::types::{DbId, Timestamp};

/// A row from the `quiz_runs` table: one scoring attempt by one user.
///
/// Invariant: `dominant_scenario`, `finished_at` and `is_completed` are set
/// together, exactly once, by `QuizRunRepo::finalize`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuizRun {
    pub id: DbId,
    pub user_id: DbId,
    pub quiz_id: DbId,
    pub impostor_score: i32,
    pub eternal_student_score: i32,
    pub seeker_score: i32,
    pub dominant_scenario: Option<String>,
    pub started_at: Timestamp,
    pub finished_at: Option<Timestamp>,
    pub is_completed: bool,
}

impl QuizRun {
    /// Rebuild the in-memory score card from the persisted counters.
    pub fn score_card(&self) -> ScoreCard {
        ScoreCard::from_counts(
            self.impostor_score.max(0) as u32,
            self.eternal_student_score.max(0) as u32,
            self.seeker_score.max(0) as u32,
        )
    }

    /// Typed dominant scenario, `None` until finalized.
    pub fn scenario(&self) -> Option<Scenario> {
        self.dominant_scenario.as_deref().and_then(Scenario::from_code)
    }
}
