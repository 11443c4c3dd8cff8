//! Intake sub-machine: name and phone collection with confirm/reject
//! loops, the goal question that sets the professional flag, and the
//! completion step that fires the automation webhook.

use serde_json::json;

use funnel_core::types::ExternalId;
use funnel_notify::IntakeNotification;

use crate::content::{self, codes};
use crate::dispatch::{event_codes, Engine};
use crate::error::EngineError;
use crate::session::{IntakeState, SessionState};
use crate::transport::Transport;

impl Engine {
    /// "Find out my scenario": enter the intake flow.
    pub(crate) async fn begin_intake(
        &self,
        transport: &dyn Transport,
        user_id: ExternalId,
    ) -> Result<Option<String>, EngineError> {
        self.sessions()
            .put(user_id, SessionState::Intake(IntakeState::WaitingName))
            .await;
        transport.render(user_id, content::ask_name()).await?;
        Ok(None)
    }

    /// Free-text name arrived: hold it in the session pending confirmation.
    pub(crate) async fn name_received(
        &self,
        transport: &dyn Transport,
        user_id: ExternalId,
        text: &str,
    ) -> Result<(), EngineError> {
        transport.render(user_id, content::confirm_name(text)).await?;
        self.sessions()
            .put(
                user_id,
                SessionState::Intake(IntakeState::ConfirmingName { name: text.to_string() }),
            )
            .await;
        Ok(())
    }

    pub(crate) async fn name_confirmed(
        &self,
        transport: &dyn Transport,
        user_id: ExternalId,
        name: &str,
    ) -> Result<Option<String>, EngineError> {
        let Some(user) = self.store.get_user(user_id).await? else {
            transport.render(user_id, content::profile_missing()).await?;
            self.sessions().clear(user_id).await;
            return Ok(None);
        };

        self.store.set_display_name(user.id, name).await?;
        self.store
            .append_event(user.id, None, event_codes::NAME_CONFIRMED, json!({ "name": name }))
            .await?;

        transport.render(user_id, content::name_saved(name)).await?;
        transport.render(user_id, content::ask_phone()).await?;
        self.sessions()
            .put(user_id, SessionState::Intake(IntakeState::WaitingPhone))
            .await;
        Ok(None)
    }

    pub(crate) async fn name_rejected(
        &self,
        transport: &dyn Transport,
        user_id: ExternalId,
    ) -> Result<Option<String>, EngineError> {
        transport.render(user_id, content::ask_name_again()).await?;
        self.sessions()
            .put(user_id, SessionState::Intake(IntakeState::WaitingName))
            .await;
        Ok(None)
    }

    pub(crate) async fn phone_received(
        &self,
        transport: &dyn Transport,
        user_id: ExternalId,
        text: &str,
    ) -> Result<(), EngineError> {
        transport.render(user_id, content::confirm_phone(text)).await?;
        self.sessions()
            .put(
                user_id,
                SessionState::Intake(IntakeState::ConfirmingPhone { phone: text.to_string() }),
            )
            .await;
        Ok(())
    }

    pub(crate) async fn phone_confirmed(
        &self,
        transport: &dyn Transport,
        user_id: ExternalId,
        phone: &str,
    ) -> Result<Option<String>, EngineError> {
        let Some(user) = self.store.get_user(user_id).await? else {
            transport.render(user_id, content::profile_missing()).await?;
            self.sessions().clear(user_id).await;
            return Ok(None);
        };

        self.store.set_phone(user.id, phone).await?;
        self.store
            .append_event(user.id, None, event_codes::PHONE_CONFIRMED, json!({ "phone": phone }))
            .await?;

        transport.render(user_id, content::phone_saved()).await?;
        transport.render(user_id, content::goal_prompt()).await?;
        self.sessions()
            .put(user_id, SessionState::Intake(IntakeState::WaitingGoal))
            .await;
        Ok(None)
    }

    pub(crate) async fn phone_rejected(
        &self,
        transport: &dyn Transport,
        user_id: ExternalId,
    ) -> Result<Option<String>, EngineError> {
        transport.render(user_id, content::ask_phone_again()).await?;
        self.sessions()
            .put(user_id, SessionState::Intake(IntakeState::WaitingPhone))
            .await;
        Ok(None)
    }

    /// Goal answer: career/skills mark a professional, personal growth a
    /// non-professional. Ends the intake session.
    pub(crate) async fn goal_selected(
        &self,
        transport: &dyn Transport,
        user_id: ExternalId,
        goal_code: &str,
    ) -> Result<Option<String>, EngineError> {
        let Some(user) = self.store.get_user(user_id).await? else {
            transport.render(user_id, content::profile_missing()).await?;
            self.sessions().clear(user_id).await;
            return Ok(None);
        };

        let is_professional = goal_code != codes::GOAL_PERSONAL;
        self.store.set_professional(user.id, is_professional).await?;
        self.store
            .append_event(
                user.id,
                None,
                event_codes::GOAL_SELECTED,
                json!({ "goal": goal_code, "is_professional": is_professional }),
            )
            .await?;
        tracing::info!(user = user_id, goal = goal_code, "Intake goal selected");

        let display_name = user.display_name.as_deref().unwrap_or("friend");
        transport.render(user_id, content::goal_saved(display_name)).await?;
        self.sessions().clear(user_id).await;
        Ok(None)
    }

    /// "Discover my scenario": intake is complete; notify the automation
    /// endpoint (best effort) and hand over to the persona quiz.
    pub(crate) async fn complete_intake(
        &self,
        transport: &dyn Transport,
        user_id: ExternalId,
    ) -> Result<Option<String>, EngineError> {
        if let Some(user) = self.store.get_user(user_id).await? {
            if let (Some(name), Some(phone)) = (&user.display_name, &user.phone) {
                self.notifier
                    .notify_intake(IntakeNotification {
                        name: name.clone(),
                        phone: phone.clone(),
                        persona_kind: user.professional().as_str().to_string(),
                        external_handle: user.external_id.to_string(),
                    })
                    .await;
            }
        }

        transport.render(user_id, content::pre_quiz()).await?;
        Ok(None)
    }
}
