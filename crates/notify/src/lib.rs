//! Outbound intake notification to the external automation endpoint.
//!
//! One webhook call per completed intake (name + phone + persona kind).
//! Delivery is best-effort telemetry: the conversational flow never waits
//! on it and never rolls back because of it. [`WebhookNotifier`] spawns a
//! detached task that retries with exponential backoff and logs terminal
//! failures.

use std::time::Duration;

use serde::Serialize;

/// Retry delays in seconds (exponential backoff: 1s, 2s, 4s).
const RETRY_DELAYS_SECS: [u64; 3] = [1, 2, 4];

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// Payload for one completed intake.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IntakeNotification {
    /// Confirmed display name.
    pub name: String,
    /// Confirmed phone number.
    pub phone: String,
    /// `"professional"` / `"non_professional"` / `"unknown"`.
    pub persona_kind: String,
    /// Stable external chat identity.
    pub external_handle: String,
}

// ---------------------------------------------------------------------------
// Notifier seam
// ---------------------------------------------------------------------------

/// Collaborator interface the engine uses to announce a completed intake.
///
/// Implementations must return promptly; any slow I/O belongs in a spawned
/// task. Failure is the implementation's problem (log it), never the
/// caller's.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify_intake(&self, notification: IntakeNotification);
}

/// No-op notifier for deployments without an automation endpoint.
pub struct NullNotifier;

#[async_trait::async_trait]
impl Notifier for NullNotifier {
    async fn notify_intake(&self, notification: IntakeNotification) {
        tracing::debug!(name = %notification.name, "Intake notification dropped (no endpoint configured)");
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for webhook delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Webhook returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// WebhookNotifier
// ---------------------------------------------------------------------------

/// Delivers intake notifications to an external automation webhook.
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    /// Create a notifier for the given webhook URL.
    pub fn new(url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, url: url.into() })
    }

    /// Deliver a notification with retry, awaiting the final outcome.
    ///
    /// Retries up to 3 times with exponential backoff before giving up.
    /// Returns `Ok(())` on the first successful attempt.
    pub async fn deliver(&self, notification: &IntakeNotification) -> Result<(), WebhookError> {
        let mut last_err: Option<WebhookError> = None;

        for (attempt, delay_secs) in RETRY_DELAYS_SECS.iter().enumerate() {
            match self.try_send(notification).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        url = %self.url,
                        error = %e,
                        "Intake webhook attempt failed, retrying"
                    );
                    last_err = Some(e);
                    tokio::time::sleep(Duration::from_secs(*delay_secs)).await;
                }
            }
        }

        // Final attempt after the last backoff.
        match self.try_send(notification).await {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::error!(url = %self.url, error = %e, "Intake webhook failed after all retries");
                Err(last_err.unwrap_or(e))
            }
        }
    }

    /// Execute a single POST request and check the response status.
    async fn try_send(&self, notification: &IntakeNotification) -> Result<(), WebhookError> {
        let response = self.client.post(&self.url).json(notification).send().await?;
        if !response.status().is_success() {
            return Err(WebhookError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl Notifier for WebhookNotifier {
    /// Fire-and-forget: spawn the delivery (with its retries) and return.
    async fn notify_intake(&self, notification: IntakeNotification) {
        let client = self.client.clone();
        let url = self.url.clone();
        tokio::spawn(async move {
            let notifier = WebhookNotifier { client, url };
            if let Err(e) = notifier.deliver(&notification).await {
                tracing::error!(error = %e, "Intake notification lost");
            }
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_does_not_panic() {
        let _notifier = WebhookNotifier::new("http://localhost:1/webhook").unwrap();
    }

    #[test]
    fn notification_serializes_expected_fields() {
        let n = IntakeNotification {
            name: "Ann".into(),
            phone: "+100".into(),
            persona_kind: "professional".into(),
            external_handle: "42".into(),
        };
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["name"], "Ann");
        assert_eq!(json["phone"], "+100");
        assert_eq!(json["persona_kind"], "professional");
        assert_eq!(json["external_handle"], "42");
    }
}
