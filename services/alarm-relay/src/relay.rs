//! One invocation: decode, format, publish

use std::sync::Arc;

use crate::error::RelayError;
use crate::event::decode_event;
use crate::format::{format_alarm, FormatOptions};
use crate::publisher::Publisher;

/// Result of a completed invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Delivered,
    /// The webhook answered with a non-success status
    Rejected { status: u16 },
}

/// Relays a single SNS alarm event to a publisher
#[derive(Debug)]
pub struct Relay {
    options: FormatOptions,
    publisher: Arc<dyn Publisher>,
}

impl Relay {
    pub fn new(options: FormatOptions, publisher: Arc<dyn Publisher>) -> Self {
        Self { options, publisher }
    }

    /// Handle one raw SNS event
    ///
    /// Decode failures return before anything is published. A rejected
    /// delivery is logged and reported as [`Outcome::Rejected`]; network
    /// failures propagate as errors. Nothing is retried.
    pub async fn handle(&self, raw: &[u8]) -> crate::Result<Outcome> {
        let alarm = decode_event(raw)?;
        tracing::info!(
            "New alarm: {} - Reason: {}",
            alarm.alarm_name,
            alarm.reason
        );
        tracing::debug!(
            "{} -> {} at {}",
            alarm.old_state,
            alarm.new_state,
            alarm.state_change_time.as_deref().unwrap_or("unknown time")
        );

        let message = format_alarm(&alarm, &self.options);

        match self.publisher.publish(&message).await {
            Ok(()) => {
                tracing::info!("Notification has been sent");
                Ok(Outcome::Delivered)
            }
            Err(RelayError::DeliveryRejected { status, body }) => {
                tracing::error!(
                    "Webhook rejected notification for {}: status {} body {:?}",
                    alarm.alarm_name,
                    status,
                    body
                );
                Ok(Outcome::Rejected { status })
            }
            Err(e) => Err(e),
        }
    }
}
