//! BDD test world for alarm relay

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use alarm_relay::format::ChatMessage;
use alarm_relay::io::{HttpClient, HttpResponse};
use alarm_relay::{Config, Outcome, RelayError};
use cucumber::World;

pub const TEST_WEBHOOK_URL: &str = "https://hooks.slack.com/services/T000/B000/XXXX";

/// HTTP double that records every POST and answers with a fixed status,
/// or fails at the network level when `status` is `None`
#[derive(Debug, Default)]
pub struct RecordingHttpClient {
    pub status: Option<u16>,
    pub requests: Mutex<Vec<(String, String)>>,
}

impl RecordingHttpClient {
    pub fn answering(status: u16) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(_, body)| serde_json::from_str(body).expect("posted body is not a chat message"))
            .collect()
    }
}

#[async_trait::async_trait]
impl HttpClient for RecordingHttpClient {
    async fn post_json(&self, url: &str, body: String) -> alarm_relay::Result<HttpResponse> {
        self.requests.lock().unwrap().push((url.to_string(), body));
        match self.status {
            Some(status) => Ok(HttpResponse {
                status,
                body: if status == 200 { "ok" } else { "error" }.to_string(),
            }),
            None => Err(RelayError::Http("connection refused".to_string())),
        }
    }
}

#[derive(Debug, Default, World)]
pub struct RelayWorld {
    // Relay testing
    pub http: Option<Arc<RecordingHttpClient>>,
    pub outcome: Option<alarm_relay::Result<Outcome>>,

    // Configuration testing
    pub config: Option<Config>,
    pub env: HashMap<String, String>,
    pub build_result: Option<alarm_relay::Result<()>>,
}

impl RelayWorld {
    pub fn last_message(&self) -> ChatMessage {
        let http = self.http.as_ref().expect("webhook not set");
        http.messages().pop().expect("no message was posted")
    }
}
