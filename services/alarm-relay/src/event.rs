//! Inbound event decoding
//!
//! An SNS event carries the CloudWatch alarm as a JSON document encoded in a
//! string field, so decoding happens in two stages: the envelope first, then
//! the embedded alarm. Each stage reports its own error variant.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::RelayError;

/// SNS event envelope as delivered to the relay
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnsEvent {
    #[serde(default)]
    pub records: Vec<SnsRecord>,
}

/// A single record in the envelope
#[derive(Debug, Clone, Deserialize)]
pub struct SnsRecord {
    #[serde(rename = "Sns")]
    pub sns: Option<SnsNotification>,
}

/// The SNS notification wrapped by a record
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnsNotification {
    #[serde(rename = "Type")]
    pub kind: Option<String>,
    pub message_id: Option<String>,
    pub timestamp: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl SnsEvent {
    /// The embedded message string of the first record
    pub fn first_message(&self) -> crate::Result<&str> {
        let record = self
            .records
            .first()
            .ok_or_else(|| RelayError::Envelope("event contains no records".to_string()))?;
        let sns = record
            .sns
            .as_ref()
            .ok_or_else(|| RelayError::Envelope("record has no Sns notification".to_string()))?;
        sns.message
            .as_deref()
            .ok_or_else(|| RelayError::Envelope("notification has no Message".to_string()))
    }
}

/// A metric dimension attached to the alarm's trigger
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Dimension {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Value")]
    pub value: String,
}

impl Dimension {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Decoded CloudWatch alarm state change
///
/// Only `alarm_name` is required on the wire. Every other field decodes to an
/// empty value when it is missing or null.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawAlarm")]
pub struct AlarmEvent {
    pub alarm_name: String,
    pub alarm_description: String,
    pub new_state: String,
    pub old_state: String,
    pub reason: String,
    pub region: String,
    pub dimensions: Vec<Dimension>,
    pub state_change_time: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawAlarm {
    alarm_name: String,
    #[serde(default)]
    alarm_description: Option<String>,
    #[serde(default)]
    new_state_value: Option<String>,
    #[serde(default)]
    old_state_value: Option<String>,
    #[serde(default)]
    new_state_reason: Option<String>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    state_change_time: Option<String>,
    #[serde(default)]
    dimensions: Option<Vec<Dimension>>,
    #[serde(default)]
    trigger: Option<RawTrigger>,
}

#[derive(Deserialize)]
struct RawTrigger {
    #[serde(rename = "Dimensions", default)]
    dimensions: Option<Vec<Dimension>>,
}

impl From<RawAlarm> for AlarmEvent {
    fn from(raw: RawAlarm) -> Self {
        // Top-level dimensions take precedence over the trigger's
        let dimensions = raw
            .dimensions
            .or_else(|| raw.trigger.and_then(|t| t.dimensions))
            .unwrap_or_default();

        Self {
            alarm_name: raw.alarm_name,
            alarm_description: raw.alarm_description.unwrap_or_default(),
            new_state: raw.new_state_value.unwrap_or_default(),
            old_state: raw.old_state_value.unwrap_or_default(),
            reason: raw.new_state_reason.unwrap_or_default(),
            region: raw.region.unwrap_or_default(),
            dimensions,
            state_change_time: raw.state_change_time,
        }
    }
}

/// Read a raw event from `path`, or from stdin when no path is given
pub fn read_event(path: Option<&Path>) -> crate::Result<Vec<u8>> {
    match path {
        Some(path) => {
            tracing::debug!("Reading event from {:?}", path);
            Ok(std::fs::read(path)?)
        }
        None => {
            let mut raw = Vec::new();
            std::io::stdin().read_to_end(&mut raw)?;
            Ok(raw)
        }
    }
}

/// Parse the envelope and return the first record's embedded message
pub fn decode_envelope(raw: &[u8]) -> crate::Result<String> {
    let event: SnsEvent =
        serde_json::from_slice(raw).map_err(|e| RelayError::Envelope(e.to_string()))?;
    tracing::debug!("Decoded envelope with {} record(s)", event.records.len());

    if let Some(sns) = event.records.first().and_then(|r| r.sns.as_ref()) {
        tracing::debug!(
            "SNS {} message {} published at {} with subject {:?}",
            sns.kind.as_deref().unwrap_or("?"),
            sns.message_id.as_deref().unwrap_or("?"),
            sns.timestamp.as_deref().unwrap_or("?"),
            sns.subject.as_deref().unwrap_or("")
        );
    }
    event.first_message().map(str::to_string)
}

/// Parse the embedded message into an alarm
pub fn decode_alarm(message: &str) -> crate::Result<AlarmEvent> {
    serde_json::from_str(message).map_err(|e| RelayError::Alarm(e.to_string()))
}

/// Run both decode stages over a raw event
pub fn decode_event(raw: &[u8]) -> crate::Result<AlarmEvent> {
    let message = decode_envelope(raw)?;
    decode_alarm(&message)
}
