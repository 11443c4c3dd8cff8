//! Message transport collaborator.
//!
//! The engine only needs "render prompt P with choice-set C", "acknowledge
//! receipt" and "send this named file". Everything transport-specific
//! (chat API calls, button wire format, asset storage) lives behind this
//! trait; the bot binary provides an HTTP adapter, tests a buffering fake.

use funnel_core::types::ExternalId;

/// Transport failure. Opaque to the engine; it aborts the current turn only.
#[derive(Debug, thiserror::Error)]
#[error("transport error: {0}")]
pub struct TransportError(pub String);

/// One inline button.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Choice {
    pub code: String,
    pub label: String,
}

impl Choice {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self { code: code.into(), label: label.into() }
    }
}

/// A message to render: text plus an optional choice set.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Prompt {
    pub text: String,
    pub choices: Vec<Choice>,
}

impl Prompt {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into(), choices: Vec::new() }
    }

    pub fn with_choices(text: impl Into<String>, choices: Vec<Choice>) -> Self {
        Self { text: text.into(), choices }
    }
}

/// Outbound side of the conversation.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Show a prompt (and its buttons) to the user.
    async fn render(&self, user: ExternalId, prompt: Prompt) -> Result<(), TransportError>;

    /// Acknowledge receipt of an action so the interface never appears
    /// hung, optionally with a short status text (e.g. a selection count).
    /// Acknowledging carries no state change.
    async fn ack(&self, user: ExternalId, text: Option<&str>) -> Result<(), TransportError>;

    /// Deliver a named file attachment; the transport owns asset storage.
    async fn send_file(&self, user: ExternalId, file_name: &str) -> Result<(), TransportError>;
}
