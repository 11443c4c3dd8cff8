//! Post-quiz call-to-action chain: the exit video, the call booking, and
//! the channel handoff with the checklist file.

use serde_json::json;

use funnel_core::routing::Professional;
use funnel_core::types::ExternalId;

use crate::content;
use crate::dispatch::{event_codes, Engine};
use crate::error::EngineError;
use crate::transport::Transport;

impl Engine {
    /// "Enough about scenarios": pivot to the video offer.
    pub(crate) async fn offer_video(
        &self,
        transport: &dyn Transport,
        user_id: ExternalId,
    ) -> Result<Option<String>, EngineError> {
        let scenario = self
            .store
            .get_user(user_id)
            .await?
            .and_then(|user| user.scenario());
        transport.render(user_id, content::video_offer(scenario)).await?;
        Ok(None)
    }

    /// "Tell me more": the pitch text depends on the professional flag.
    pub(crate) async fn show_program(
        &self,
        transport: &dyn Transport,
        user_id: ExternalId,
    ) -> Result<Option<String>, EngineError> {
        let professional = self
            .store
            .get_user(user_id)
            .await?
            .map(|user| user.professional())
            .unwrap_or(Professional::Unknown);
        transport
            .render(user_id, content::program_pitch(professional))
            .await?;
        Ok(None)
    }

    /// "Book a call": log intent and show the booking details.
    pub(crate) async fn book_call(
        &self,
        transport: &dyn Transport,
        user_id: ExternalId,
    ) -> Result<Option<String>, EngineError> {
        if let Some(user) = self.store.get_user(user_id).await? {
            self.store
                .append_event(user.id, None, event_codes::BOOKING_REQUESTED, json!({}))
                .await?;
            tracing::info!(user = user_id, "Booking requested");
        }
        transport.render(user_id, content::booking_info()).await?;
        Ok(None)
    }

    /// Final step: channel invitation plus the checklist file.
    pub(crate) async fn go_to_channel(
        &self,
        transport: &dyn Transport,
        user_id: ExternalId,
    ) -> Result<Option<String>, EngineError> {
        transport.render(user_id, content::channel_info()).await?;
        transport.send_file(user_id, content::CHECKLIST_FILE_NAME).await?;
        Ok(None)
    }
}
