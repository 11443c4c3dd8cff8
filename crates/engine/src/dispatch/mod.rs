//! The dispatcher: one inbound user action in, zero or more rendered
//! prompts out, with exactly one acknowledgment per selection.
//!
//! An incoming selection is valid only if it matches both the option
//! namespace of the user's current step and the current state itself.
//! Anything else acknowledges receipt and changes nothing. Each turn is a
//! short bounded sequence (session read, at most one scoring update,
//! session write) processed sequentially per user.

mod cta;
mod intake;
mod quiz;

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;

use funnel_core::catalog;
use funnel_core::error::CoreError;
use funnel_core::flow::FlowDef;
use funnel_core::types::ExternalId;
use funnel_notify::Notifier;

use crate::content::{self, codes};
use crate::error::EngineError;
use crate::session::{FlowKind, IntakeState, SessionState, SessionStore};
use crate::store::Store;
use crate::transport::Transport;

/// Audit event codes written to the `user_events` log.
pub mod event_codes {
    pub const BOT_START: &str = "bot_start";
    pub const NAME_CONFIRMED: &str = "name_confirmed";
    pub const PHONE_CONFIRMED: &str = "phone_confirmed";
    pub const GOAL_SELECTED: &str = "goal_selected";
    pub const QUIZ_STARTED: &str = "quiz_started";
    pub const QUIZ_COMPLETED: &str = "quiz_completed";
    pub const COST_CALCULATED: &str = "cost_calculated";
    pub const LOST_POTENTIAL_CALCULATED: &str = "lost_potential_calculated";
    pub const BOOKING_REQUESTED: &str = "booking_requested";
}

/// One inbound user action from the transport.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InboundAction {
    /// First contact / explicit restart (`/start`).
    Start {
        user_id: ExternalId,
        username: Option<String>,
    },
    /// An inline-button tap, identified by its callback code.
    Selection { user_id: ExternalId, code: String },
    /// A free-text reply (only meaningful during intake).
    FreeText { user_id: ExternalId, text: String },
}

/// The conversational engine: session store plus the three flow tables,
/// wired to the storage and notification collaborators.
///
/// The transport is passed per call so adapters can scope it to a request.
pub struct Engine {
    pub(crate) store: Arc<dyn Store>,
    pub(crate) notifier: Arc<dyn Notifier>,
    sessions: SessionStore,
    persona: FlowDef,
    cost: FlowDef,
    lost: FlowDef,
}

impl Engine {
    /// Build an engine; fails only if a static flow table is malformed.
    pub fn new(
        store: Arc<dyn Store>,
        notifier: Arc<dyn Notifier>,
        session_ttl_secs: i64,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            store,
            notifier,
            sessions: SessionStore::new(session_ttl_secs),
            persona: catalog::persona_quiz()?,
            cost: catalog::cost_quiz()?,
            lost: catalog::lost_potential_quiz()?,
        })
    }

    /// Session store handle (the binary's GC task sweeps it periodically).
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub(crate) fn flow(&self, kind: FlowKind) -> &FlowDef {
        match kind {
            FlowKind::Persona => &self.persona,
            FlowKind::Cost => &self.cost,
            FlowKind::LostPotential => &self.lost,
        }
    }

    /// Process one inbound action for one user.
    pub async fn handle(
        &self,
        transport: &dyn Transport,
        action: InboundAction,
    ) -> Result<(), EngineError> {
        match action {
            InboundAction::Start { user_id, username } => {
                self.handle_start(transport, user_id, username.as_deref()).await
            }
            InboundAction::FreeText { user_id, text } => {
                self.handle_free_text(transport, user_id, text.trim()).await
            }
            InboundAction::Selection { user_id, code } => {
                let ack_text = self.handle_selection(transport, user_id, &code).await?;
                transport.ack(user_id, ack_text.as_deref()).await?;
                Ok(())
            }
        }
    }

    /// `/start`: upsert the profile, log the contact, show the greeting.
    async fn handle_start(
        &self,
        transport: &dyn Transport,
        user_id: ExternalId,
        username: Option<&str>,
    ) -> Result<(), EngineError> {
        let user = self.store.upsert_user(user_id, username).await?;
        self.store
            .append_event(user.id, None, event_codes::BOT_START, json!({}))
            .await?;
        self.sessions.clear(user_id).await;
        transport.render(user_id, content::greeting()).await?;
        tracing::info!(user = user_id, "Bot started");
        Ok(())
    }

    /// Free text is only meaningful while intake waits for name or phone.
    async fn handle_free_text(
        &self,
        transport: &dyn Transport,
        user_id: ExternalId,
        text: &str,
    ) -> Result<(), EngineError> {
        match self.sessions.get(user_id).await {
            Some(SessionState::Intake(IntakeState::WaitingName)) => {
                self.name_received(transport, user_id, text).await
            }
            Some(SessionState::Intake(IntakeState::WaitingPhone)) => {
                self.phone_received(transport, user_id, text).await
            }
            // Mid-flow chatter: ignore, the keyboard is still on screen.
            Some(_) => Ok(()),
            None => {
                transport.render(user_id, content::restart_hint()).await?;
                Ok(())
            }
        }
    }

    /// Route one button tap. Returns the optional ack status text.
    ///
    /// Stateless funnel buttons dispatch on their code alone; everything
    /// else (intake confirmations, goal choice, quiz options) is scoped to
    /// the current session state and falls through to a no-op when the
    /// state does not expect it.
    async fn handle_selection(
        &self,
        transport: &dyn Transport,
        user_id: ExternalId,
        code: &str,
    ) -> Result<Option<String>, EngineError> {
        match code {
            codes::LEARN_SCENARIO => self.begin_intake(transport, user_id).await,
            codes::DISCOVER_SCENARIO => self.complete_intake(transport, user_id).await,
            codes::START_QUIZ => self.start_persona_quiz(transport, user_id).await,
            codes::SHOW_QUIZ_RESULTS => self.show_persona_results(transport, user_id).await,
            codes::LEARN_SCENARIO_COST => self.route_cost_branch(transport, user_id).await,
            codes::CALC_SCENARIO_COST => self.start_cost_quiz(transport, user_id).await,
            codes::CALC_LOST_POTENTIAL => self.start_lost_quiz(transport, user_id).await,
            codes::NO_MORE_SCENARIO => self.offer_video(transport, user_id).await,
            codes::GET_VIDEO => {
                transport.render(user_id, content::video_delivered()).await?;
                Ok(None)
            }
            codes::LEARN_MORE_PROGRAM => self.show_program(transport, user_id).await,
            codes::BOOK_CALL => self.book_call(transport, user_id).await,
            codes::GO_TO_CHANNEL => self.go_to_channel(transport, user_id).await,
            _ => self.handle_scoped_selection(transport, user_id, code).await,
        }
    }

    /// State-scoped codes: intake sub-machine and quiz step options.
    async fn handle_scoped_selection(
        &self,
        transport: &dyn Transport,
        user_id: ExternalId,
        code: &str,
    ) -> Result<Option<String>, EngineError> {
        match self.sessions.get(user_id).await {
            Some(SessionState::Intake(IntakeState::ConfirmingName { name })) => match code {
                codes::NAME_CONFIRM_OK => self.name_confirmed(transport, user_id, &name).await,
                codes::NAME_CONFIRM_WRONG => self.name_rejected(transport, user_id).await,
                _ => Ok(None),
            },
            Some(SessionState::Intake(IntakeState::ConfirmingPhone { phone })) => match code {
                codes::PHONE_CONFIRM_OK => self.phone_confirmed(transport, user_id, &phone).await,
                codes::PHONE_CONFIRM_WRONG => self.phone_rejected(transport, user_id).await,
                _ => Ok(None),
            },
            Some(SessionState::Intake(IntakeState::WaitingGoal)) => match code {
                codes::GOAL_CAREER | codes::GOAL_SKILLS | codes::GOAL_PERSONAL => {
                    self.goal_selected(transport, user_id, code).await
                }
                _ => Ok(None),
            },
            Some(SessionState::Quiz(session)) => {
                self.quiz_answer(transport, user_id, session, code).await
            }
            // Wrong state or no session at all: acknowledge and move on.
            Some(SessionState::Intake(_)) | None => Ok(None),
        }
    }
}
