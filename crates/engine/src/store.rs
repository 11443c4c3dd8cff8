//! Storage collaborator.
//!
//! The engine needs a handful of record operations, all partitioned by user
//! identity: profile upsert/update, run lifecycle, result inserts, and
//! append-only event logging. [`PgStore`] maps them onto the `funnel-db`
//! repositories; tests substitute an in-memory implementation.

use funnel_core::scenario::Scenario;
use funnel_core::types::{DbId, ExternalId};
use funnel_db::models::cost_result::NewCostResult;
use funnel_db::models::lost_potential::NewLostPotentialResult;
use funnel_db::models::quiz_run::QuizRun;
use funnel_db::models::user::User;
use funnel_db::repositories::{
    CostResultRepo, EventRepo, LostPotentialRepo, QuizRepo, QuizRunRepo, UserRepo,
};
use funnel_db::DbPool;

/// Storage failure. Infrastructure-level; not recoverable within a turn.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Record operations the dispatcher needs from the storage collaborator.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    async fn get_user(&self, external_id: ExternalId) -> Result<Option<User>, StoreError>;

    /// Fetch by external identity, creating the profile on first contact.
    async fn upsert_user(
        &self,
        external_id: ExternalId,
        display_name: Option<&str>,
    ) -> Result<User, StoreError>;

    async fn set_display_name(&self, user_id: DbId, name: &str) -> Result<(), StoreError>;

    async fn set_phone(&self, user_id: DbId, phone: &str) -> Result<(), StoreError>;

    async fn set_professional(&self, user_id: DbId, is_professional: bool)
        -> Result<(), StoreError>;

    async fn set_dominant_scenario(
        &self,
        user_id: DbId,
        scenario: Scenario,
    ) -> Result<(), StoreError>;

    /// Catalog entry ID for a quiz code, seeded lazily.
    async fn quiz_id(&self, code: &str, title: &str) -> Result<DbId, StoreError>;

    /// Create a fresh persona-quiz run with zeroed counters.
    async fn create_run(&self, user_id: DbId, quiz_id: DbId) -> Result<QuizRun, StoreError>;

    async fn get_run(&self, run_id: DbId) -> Result<Option<QuizRun>, StoreError>;

    /// Increment one scenario counter; `None` when the run is missing or
    /// already finalized.
    async fn record_answer(
        &self,
        run_id: DbId,
        scenario: Scenario,
    ) -> Result<Option<QuizRun>, StoreError>;

    /// Conditionally finalize a run; `None` when already finalized.
    async fn finalize_run(
        &self,
        run_id: DbId,
        dominant: Scenario,
    ) -> Result<Option<QuizRun>, StoreError>;

    async fn save_cost_result(&self, new: NewCostResult) -> Result<(), StoreError>;

    async fn save_lost_potential(&self, new: NewLostPotentialResult) -> Result<(), StoreError>;

    /// Append an audit event; write-only from the engine's perspective.
    async fn append_event(
        &self,
        user_id: DbId,
        quiz_id: Option<DbId>,
        event_code: &str,
        payload: serde_json::Value,
    ) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// Postgres implementation
// ---------------------------------------------------------------------------

/// [`Store`] over the PostgreSQL repositories.
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl Store for PgStore {
    async fn get_user(&self, external_id: ExternalId) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::get_by_external_id(&self.pool, external_id).await?)
    }

    async fn upsert_user(
        &self,
        external_id: ExternalId,
        display_name: Option<&str>,
    ) -> Result<User, StoreError> {
        Ok(UserRepo::get_or_create(&self.pool, external_id, display_name).await?)
    }

    async fn set_display_name(&self, user_id: DbId, name: &str) -> Result<(), StoreError> {
        Ok(UserRepo::set_display_name(&self.pool, user_id, name).await?)
    }

    async fn set_phone(&self, user_id: DbId, phone: &str) -> Result<(), StoreError> {
        Ok(UserRepo::set_phone(&self.pool, user_id, phone).await?)
    }

    async fn set_professional(
        &self,
        user_id: DbId,
        is_professional: bool,
    ) -> Result<(), StoreError> {
        Ok(UserRepo::set_professional(&self.pool, user_id, is_professional).await?)
    }

    async fn set_dominant_scenario(
        &self,
        user_id: DbId,
        scenario: Scenario,
    ) -> Result<(), StoreError> {
        Ok(UserRepo::set_dominant_scenario(&self.pool, user_id, scenario).await?)
    }

    async fn quiz_id(&self, code: &str, title: &str) -> Result<DbId, StoreError> {
        Ok(QuizRepo::get_or_create(&self.pool, code, title).await?.id)
    }

    async fn create_run(&self, user_id: DbId, quiz_id: DbId) -> Result<QuizRun, StoreError> {
        Ok(QuizRunRepo::create(&self.pool, user_id, quiz_id).await?)
    }

    async fn get_run(&self, run_id: DbId) -> Result<Option<QuizRun>, StoreError> {
        Ok(QuizRunRepo::get(&self.pool, run_id).await?)
    }

    async fn record_answer(
        &self,
        run_id: DbId,
        scenario: Scenario,
    ) -> Result<Option<QuizRun>, StoreError> {
        Ok(QuizRunRepo::increment_score(&self.pool, run_id, scenario).await?)
    }

    async fn finalize_run(
        &self,
        run_id: DbId,
        dominant: Scenario,
    ) -> Result<Option<QuizRun>, StoreError> {
        Ok(QuizRunRepo::finalize(&self.pool, run_id, dominant).await?)
    }

    async fn save_cost_result(&self, new: NewCostResult) -> Result<(), StoreError> {
        CostResultRepo::insert(&self.pool, &new).await?;
        Ok(())
    }

    async fn save_lost_potential(&self, new: NewLostPotentialResult) -> Result<(), StoreError> {
        LostPotentialRepo::insert(&self.pool, &new).await?;
        Ok(())
    }

    async fn append_event(
        &self,
        user_id: DbId,
        quiz_id: Option<DbId>,
        event_code: &str,
        payload: serde_json::Value,
    ) -> Result<(), StoreError> {
        EventRepo::insert(&self.pool, user_id, quiz_id, event_code, &payload).await?;
        Ok(())
    }
}
