//! Slack message formatting for alarm state changes

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::event::AlarmEvent;

pub const DEFAULT_CONSOLE_URL: &str = "https://console.aws.amazon.com/cloudwatch/home";

/// Attachment colour for each known alarm state
pub const STATE_COLORS: [(&str, &str); 3] = [
    ("ALARM", "danger"),
    ("INSUFFICIENT_DATA", "warning"),
    ("OK", "good"),
];

/// Characters escaped in a URL path segment. Unreserved characters and the
/// sub-delimiters `$&+:=@` pass through; `/`, `;`, `,` and `?` do not.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b':')
    .remove(b'=')
    .remove(b'@');

/// Slack incoming-webhook message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub pretext: String,
    pub title: String,
    pub title_link: String,
    pub text: String,
    pub color: String,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub title: String,
    pub value: String,
    pub short: bool,
}

impl Field {
    fn short(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            short: true,
        }
    }
}

/// Presentation settings taken from configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    pub console_url: String,
    pub text: Option<String>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            console_url: DEFAULT_CONSOLE_URL.to_string(),
            text: None,
        }
    }
}

/// Colour for a state, empty for states not in the table
pub fn state_color(state: &str) -> &'static str {
    STATE_COLORS
        .iter()
        .find(|(known, _)| *known == state)
        .map(|(_, color)| *color)
        .unwrap_or("")
}

/// Percent-escape a value for use as a single URL path segment
pub fn escape_path_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Console link scoped to the named alarm
pub fn console_link(console_url: &str, alarm_name: &str) -> String {
    format!("{}#s={}", console_url, escape_path_segment(alarm_name))
}

/// Build the chat message for an alarm state change
pub fn format_alarm(alarm: &AlarmEvent, options: &FormatOptions) -> ChatMessage {
    let mut fields = Vec::with_capacity(alarm.dimensions.len() + 2);
    fields.push(Field::short("Region", &alarm.region));
    fields.push(Field::short("Previous State", &alarm.old_state));
    fields.extend(
        alarm
            .dimensions
            .iter()
            .map(|d| Field::short(&d.name, &d.value)),
    );

    let attachment = Attachment {
        pretext: format!("`{}`", alarm.alarm_description),
        title: format!("{}: {}", alarm.new_state, alarm.alarm_name),
        title_link: console_link(&options.console_url, &alarm.alarm_name),
        text: alarm.reason.clone(),
        color: state_color(&alarm.new_state).to_string(),
        fields,
    };

    ChatMessage {
        text: options.text.clone(),
        attachments: vec![attachment],
    }
}
