//! Webhook delivery of chat messages

use std::sync::Arc;

use async_trait::async_trait;

use crate::format::ChatMessage;
use crate::io::HttpClient;

/// Status the Slack incoming-webhook API answers on success
pub const WEBHOOK_SUCCESS_STATUS: u16 = 200;

/// Trait for delivering a chat message
#[async_trait]
pub trait Publisher: Send + Sync + std::fmt::Debug {
    /// Deliver the message once, without retrying
    async fn publish(&self, message: &ChatMessage) -> crate::Result<()>;
}

/// Posts messages to a Slack incoming webhook
pub struct WebhookPublisher {
    webhook_url: String,
    http: Arc<dyn HttpClient>,
}

// The webhook URL embeds its credential, so it stays out of debug output
impl std::fmt::Debug for WebhookPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookPublisher").finish_non_exhaustive()
    }
}

impl WebhookPublisher {
    pub fn new(webhook_url: impl Into<String>, http: Arc<dyn HttpClient>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            http,
        }
    }
}

#[async_trait]
impl Publisher for WebhookPublisher {
    async fn publish(&self, message: &ChatMessage) -> crate::Result<()> {
        let body = serde_json::to_string(message)?;

        tracing::debug!(
            "Posting chat message with {} attachment(s)",
            message.attachments.len()
        );

        let response = self.http.post_json(&self.webhook_url, body).await?;

        if response.status != WEBHOOK_SUCCESS_STATUS {
            return Err(crate::RelayError::DeliveryRejected {
                status: response.status,
                body: response.body,
            });
        }

        tracing::debug!("Webhook accepted chat message");
        Ok(())
    }
}
