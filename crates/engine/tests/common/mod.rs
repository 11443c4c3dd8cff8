//! In-memory test doubles for the engine's collaborator seams.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use funnel_core::scenario::Scenario;
use funnel_core::types::{DbId, ExternalId};
use funnel_db::models::cost_result::NewCostResult;
use funnel_db::models::lost_potential::NewLostPotentialResult;
use funnel_db::models::quiz_run::QuizRun;
use funnel_db::models::user::User;
use funnel_engine::store::{Store, StoreError};
use funnel_engine::transport::{Prompt, Transport, TransportError};
use funnel_engine::{Engine, InboundAction};
use funnel_notify::{IntakeNotification, Notifier};

// ---------------------------------------------------------------------------
// MemStore
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MemInner {
    next_id: DbId,
    users: Vec<User>,
    quizzes: Vec<(DbId, String)>,
    runs: Vec<QuizRun>,
    cost_results: Vec<NewCostResult>,
    lost_results: Vec<NewLostPotentialResult>,
    events: Vec<(DbId, Option<DbId>, String)>,
}

impl MemInner {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

/// [`Store`] over plain vectors, with the same conditional-update
/// semantics as the SQL repositories.
#[derive(Default)]
pub struct MemStore {
    inner: Mutex<MemInner>,
}

impl MemStore {
    pub async fn user(&self, external_id: ExternalId) -> Option<User> {
        let inner = self.inner.lock().await;
        inner.users.iter().find(|u| u.external_id == external_id).cloned()
    }

    pub async fn run(&self, run_id: DbId) -> Option<QuizRun> {
        let inner = self.inner.lock().await;
        inner.runs.iter().find(|r| r.id == run_id).cloned()
    }

    pub async fn runs(&self) -> Vec<QuizRun> {
        self.inner.lock().await.runs.clone()
    }

    pub async fn cost_results(&self) -> Vec<NewCostResult> {
        self.inner.lock().await.cost_results.clone()
    }

    pub async fn lost_results(&self) -> Vec<NewLostPotentialResult> {
        self.inner.lock().await.lost_results.clone()
    }

    pub async fn event_codes(&self) -> Vec<String> {
        let inner = self.inner.lock().await;
        inner.events.iter().map(|(_, _, code)| code.clone()).collect()
    }
}

#[async_trait::async_trait]
impl Store for MemStore {
    async fn get_user(&self, external_id: ExternalId) -> Result<Option<User>, StoreError> {
        Ok(self.user(external_id).await)
    }

    async fn upsert_user(
        &self,
        external_id: ExternalId,
        display_name: Option<&str>,
    ) -> Result<User, StoreError> {
        let mut inner = self.inner.lock().await;
        if let Some(user) = inner.users.iter().find(|u| u.external_id == external_id) {
            return Ok(user.clone());
        }
        let id = inner.next_id();
        let user = User {
            id,
            external_id,
            display_name: display_name.map(str::to_string),
            phone: None,
            is_professional: false,
            is_non_professional: false,
            dominant_scenario: None,
            started_at: Utc::now(),
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn set_display_name(&self, user_id: DbId, name: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        if let Some(user) = inner.users.iter_mut().find(|u| u.id == user_id) {
            user.display_name = Some(name.to_string());
        }
        Ok(())
    }

    async fn set_phone(&self, user_id: DbId, phone: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        if let Some(user) = inner.users.iter_mut().find(|u| u.id == user_id) {
            user.phone = Some(phone.to_string());
        }
        Ok(())
    }

    async fn set_professional(
        &self,
        user_id: DbId,
        is_professional: bool,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        if let Some(user) = inner.users.iter_mut().find(|u| u.id == user_id) {
            user.is_professional = is_professional;
            user.is_non_professional = !is_professional;
        }
        Ok(())
    }

    async fn set_dominant_scenario(
        &self,
        user_id: DbId,
        scenario: Scenario,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        if let Some(user) = inner.users.iter_mut().find(|u| u.id == user_id) {
            user.dominant_scenario = Some(scenario.as_str().to_string());
        }
        Ok(())
    }

    async fn quiz_id(&self, code: &str, _title: &str) -> Result<DbId, StoreError> {
        let mut inner = self.inner.lock().await;
        if let Some((id, _)) = inner.quizzes.iter().find(|(_, c)| c == code) {
            return Ok(*id);
        }
        let id = inner.next_id();
        inner.quizzes.push((id, code.to_string()));
        Ok(id)
    }

    async fn create_run(&self, user_id: DbId, quiz_id: DbId) -> Result<QuizRun, StoreError> {
        let mut inner = self.inner.lock().await;
        let id = inner.next_id();
        let run = QuizRun {
            id,
            user_id,
            quiz_id,
            impostor_score: 0,
            eternal_student_score: 0,
            seeker_score: 0,
            dominant_scenario: None,
            started_at: Utc::now(),
            finished_at: None,
            is_completed: false,
        };
        inner.runs.push(run.clone());
        Ok(run)
    }

    async fn get_run(&self, run_id: DbId) -> Result<Option<QuizRun>, StoreError> {
        Ok(self.run(run_id).await)
    }

    async fn record_answer(
        &self,
        run_id: DbId,
        scenario: Scenario,
    ) -> Result<Option<QuizRun>, StoreError> {
        let mut inner = self.inner.lock().await;
        let Some(run) = inner
            .runs
            .iter_mut()
            .find(|r| r.id == run_id && !r.is_completed)
        else {
            return Ok(None);
        };
        match scenario {
            Scenario::Impostor => run.impostor_score += 1,
            Scenario::EternalStudent => run.eternal_student_score += 1,
            Scenario::Seeker => run.seeker_score += 1,
        }
        Ok(Some(run.clone()))
    }

    async fn finalize_run(
        &self,
        run_id: DbId,
        dominant: Scenario,
    ) -> Result<Option<QuizRun>, StoreError> {
        let mut inner = self.inner.lock().await;
        let Some(run) = inner
            .runs
            .iter_mut()
            .find(|r| r.id == run_id && !r.is_completed)
        else {
            return Ok(None);
        };
        run.dominant_scenario = Some(dominant.as_str().to_string());
        run.finished_at = Some(Utc::now());
        run.is_completed = true;
        Ok(Some(run.clone()))
    }

    async fn save_cost_result(&self, new: NewCostResult) -> Result<(), StoreError> {
        self.inner.lock().await.cost_results.push(new);
        Ok(())
    }

    async fn save_lost_potential(&self, new: NewLostPotentialResult) -> Result<(), StoreError> {
        self.inner.lock().await.lost_results.push(new);
        Ok(())
    }

    async fn append_event(
        &self,
        user_id: DbId,
        quiz_id: Option<DbId>,
        event_code: &str,
        _payload: serde_json::Value,
    ) -> Result<(), StoreError> {
        self.inner
            .lock()
            .await
            .events
            .push((user_id, quiz_id, event_code.to_string()));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// BufferTransport
// ---------------------------------------------------------------------------

/// [`Transport`] that collects everything the engine renders.
#[derive(Default)]
pub struct BufferTransport {
    pub prompts: Mutex<Vec<Prompt>>,
    pub acks: Mutex<Vec<Option<String>>>,
    pub files: Mutex<Vec<String>>,
}

impl BufferTransport {
    /// Rendered prompt texts, in order, draining the buffer.
    pub async fn drain_texts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .await
            .drain(..)
            .map(|p| p.text)
            .collect()
    }

    pub async fn last_prompt(&self) -> Prompt {
        self.prompts.lock().await.last().cloned().expect("no prompt rendered")
    }

    pub async fn last_ack(&self) -> Option<String> {
        self.acks.lock().await.last().cloned().expect("no ack recorded")
    }
}

#[async_trait::async_trait]
impl Transport for BufferTransport {
    async fn render(&self, _user: ExternalId, prompt: Prompt) -> Result<(), TransportError> {
        self.prompts.lock().await.push(prompt);
        Ok(())
    }

    async fn ack(&self, _user: ExternalId, text: Option<&str>) -> Result<(), TransportError> {
        self.acks.lock().await.push(text.map(str::to_string));
        Ok(())
    }

    async fn send_file(&self, _user: ExternalId, file_name: &str) -> Result<(), TransportError> {
        self.files.lock().await.push(file_name.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// RecordingNotifier
// ---------------------------------------------------------------------------

/// [`Notifier`] that records payloads instead of delivering them.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<IntakeNotification>>,
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    async fn notify_intake(&self, notification: IntakeNotification) {
        self.sent.lock().await.push(notification);
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

pub struct Harness {
    pub engine: Engine,
    pub store: Arc<MemStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub transport: BufferTransport,
}

pub fn harness() -> Harness {
    let store = Arc::new(MemStore::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let engine = Engine::new(store.clone(), notifier.clone(), 3600)
        .expect("static flow tables are valid");
    Harness {
        engine,
        store,
        notifier,
        transport: BufferTransport::default(),
    }
}

impl Harness {
    pub async fn start(&self, user_id: ExternalId) {
        self.engine
            .handle(
                &self.transport,
                InboundAction::Start { user_id, username: Some("tester".into()) },
            )
            .await
            .expect("start");
    }

    pub async fn select(&self, user_id: ExternalId, code: &str) {
        self.engine
            .handle(
                &self.transport,
                InboundAction::Selection { user_id, code: code.to_string() },
            )
            .await
            .expect("selection");
    }

    pub async fn text(&self, user_id: ExternalId, text: &str) {
        self.engine
            .handle(
                &self.transport,
                InboundAction::FreeText { user_id, text: text.to_string() },
            )
            .await
            .expect("free text");
    }

    /// Run the whole intake: name, phone, goal.
    pub async fn complete_intake(&self, user_id: ExternalId, goal_code: &str) {
        use funnel_engine::content::codes;

        self.select(user_id, codes::LEARN_SCENARIO).await;
        self.text(user_id, "Anna").await;
        self.select(user_id, codes::NAME_CONFIRM_OK).await;
        self.text(user_id, "+7 900 000-00-00").await;
        self.select(user_id, codes::PHONE_CONFIRM_OK).await;
        self.select(user_id, goal_code).await;
    }
}
