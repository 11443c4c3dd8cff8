//! Request-scoped transport adapter.
//!
//! Over HTTP the conversation is pull-based: the client posts one action and
//! receives everything the engine rendered for it in the response body. A
//! [`ReplyBuffer`] is created per request, handed to the engine as its
//! transport, and drained into the response once dispatch returns.

use std::sync::Mutex;

use serde::Serialize;

use funnel_core::types::ExternalId;
use funnel_engine::transport::{Prompt, Transport, TransportError};

/// Everything the engine produced for one dispatched action.
#[derive(Debug, Serialize)]
pub struct DispatchReply {
    /// Rendered prompts, in order.
    pub replies: Vec<Prompt>,
    /// Whether the action was acknowledged (selections always are).
    pub acked: bool,
    /// Optional ack status text (e.g. a multi-select count).
    pub ack_text: Option<String>,
    /// File attachments to deliver, by name.
    pub files: Vec<String>,
}

/// [`Transport`] that buffers output for the duration of one request.
#[derive(Default)]
pub struct ReplyBuffer {
    replies: Mutex<Vec<Prompt>>,
    ack: Mutex<Option<Option<String>>>,
    files: Mutex<Vec<String>>,
}

impl ReplyBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the buffer into the response payload.
    pub fn into_reply(self) -> DispatchReply {
        let ack = self.ack.into_inner().unwrap_or_default();
        DispatchReply {
            replies: self.replies.into_inner().unwrap_or_default(),
            acked: ack.is_some(),
            ack_text: ack.flatten(),
            files: self.files.into_inner().unwrap_or_default(),
        }
    }
}

#[async_trait::async_trait]
impl Transport for ReplyBuffer {
    async fn render(&self, _user: ExternalId, prompt: Prompt) -> Result<(), TransportError> {
        self.replies
            .lock()
            .map_err(|e| TransportError(e.to_string()))?
            .push(prompt);
        Ok(())
    }

    async fn ack(&self, _user: ExternalId, text: Option<&str>) -> Result<(), TransportError> {
        *self.ack.lock().map_err(|e| TransportError(e.to_string()))? =
            Some(text.map(str::to_string));
        Ok(())
    }

    async fn send_file(&self, _user: ExternalId, file_name: &str) -> Result<(), TransportError> {
        self.files
            .lock()
            .map_err(|e| TransportError(e.to_string()))?
            .push(file_name.to_string());
        Ok(())
    }
}
