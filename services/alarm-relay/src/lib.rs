//! Alarm Relay - CloudWatch alarm notifications for Slack
//!
//! Decodes a CloudWatch alarm carried in an SNS event, formats it as a Slack
//! message, and posts it to an incoming webhook.

pub mod config;
pub mod error;
pub mod event;
pub mod format;
pub mod io;
pub mod publisher;
pub mod relay;

pub use config::{load_config, Config};
pub use error::{RelayError, Result};
pub use relay::{Outcome, Relay};

use std::sync::Arc;

use crate::io::ReqwestHttpClient;
use crate::publisher::WebhookPublisher;

/// Build a relay that posts to the configured webhook
///
/// Fails with a configuration error when no webhook URL is set, before any
/// network activity.
pub fn build_relay(config: &Config) -> Result<Relay> {
    let webhook_url = config.validated_webhook_url()?;
    let http: Arc<dyn io::HttpClient> = Arc::new(ReqwestHttpClient::new(config.timeout)?);
    let publisher = Arc::new(WebhookPublisher::new(webhook_url, http));
    Ok(Relay::new(config.format_options(), publisher))
}

/// Relay a single raw SNS event with the given configuration
pub async fn run(config: &Config, raw: &[u8]) -> Result<Outcome> {
    let relay = build_relay(config)?;
    relay.handle(raw).await
}

/// Decode and format without delivering, returning the JSON body
pub fn preview(config: &Config, raw: &[u8]) -> Result<String> {
    let alarm = event::decode_event(raw)?;
    let message = format::format_alarm(&alarm, &config.format_options());
    Ok(serde_json::to_string_pretty(&message)?)
}
