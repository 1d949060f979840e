//! Assistant chat over a Langflow flow-run endpoint.
//!
//! One request per user message. The backend keys conversation memory on
//! `session_id`, so [`AssistantChat`] keeps the id from the first reply and
//! sends it back on every later message.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::LangflowConfig;

/// Raw body kept in [`LangflowError::NonJson`].
const RAW_BODY_LIMIT: usize = 400;

#[derive(Debug, Error)]
pub enum LangflowError {
    #[error("Langflow request timed out")]
    Timeout,

    #[error("Error calling Langflow: {0}")]
    Transport(String),

    #[error("Non-JSON response from Langflow (HTTP {status}): {raw}")]
    NonJson { status: u16, raw: String },

    #[error("Langflow error (HTTP {status}): {details}")]
    Upstream { status: u16, details: Value },

    #[error("Could not extract ChatOutput message. Check Langflow wiring.")]
    MissingMessage,

    #[error("message is empty")]
    EmptyMessage,

    #[error("Missing LANGFLOW_API_KEY in environment")]
    MissingApiKey,

    #[error("Langflow URL is not configured (set LANGFLOW_URL)")]
    MissingUrl,
}

impl From<reqwest::Error> for LangflowError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// One reply from the flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowReply {
    pub session_id: String,
    pub message: String,
}

#[derive(Serialize)]
struct FlowRunRequest<'a> {
    input_type: &'static str,
    output_type: &'static str,
    input_value: &'a str,
    session_id: &'a str,
}

/// Anything that can run the chat flow for one message.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FlowRunner: Send + Sync {
    async fn run(&self, message: String, session_id: Option<String>) -> Result<FlowReply, LangflowError>;
}

pub struct LangflowClient {
    url: String,
    api_key: String,
    client: reqwest::Client,
}

impl LangflowClient {
    pub fn new(url: &str, api_key: &str, timeout: Duration) -> Result<Self, LangflowError> {
        if api_key.trim().is_empty() {
            return Err(LangflowError::MissingApiKey);
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LangflowError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            url: url.to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }

    pub fn from_config(config: &LangflowConfig) -> Result<Self, LangflowError> {
        let url = config
            .url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or(LangflowError::MissingUrl)?;
        let api_key = config.api_key.as_deref().unwrap_or_default();
        Self::new(url, api_key, Duration::from_secs(config.timeout_secs))
    }
}

#[async_trait]
impl FlowRunner for LangflowClient {
    async fn run(&self, message: String, session_id: Option<String>) -> Result<FlowReply, LangflowError> {
        let session_id = session_id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let payload = FlowRunRequest {
            input_type: "chat",
            output_type: "chat",
            input_value: &message,
            session_id: &session_id,
        };
        let response = self
            .client
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(status = status.as_u16(), bytes = text.len(), "langflow returned");
        parse_flow_response(status, &text, session_id)
    }
}

/// Interpret a flow-run reply. `session_id` is the id that was sent; the
/// backend's own id wins when present.
pub fn parse_flow_response(
    status: StatusCode,
    body: &str,
    session_id: String,
) -> Result<FlowReply, LangflowError> {
    let json: Value = serde_json::from_str(body).map_err(|_| LangflowError::NonJson {
        status: status.as_u16(),
        raw: body.chars().take(RAW_BODY_LIMIT).collect(),
    })?;

    if !status.is_success() {
        return Err(LangflowError::Upstream {
            status: status.as_u16(),
            details: json,
        });
    }

    let message = extract_flow_message(&json)
        .filter(|m| !m.is_empty())
        .ok_or(LangflowError::MissingMessage)?;
    let session_id = json
        .get("session_id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or(session_id);

    Ok(FlowReply {
        session_id,
        message: message.to_string(),
    })
}

/// Pull the single chat answer out of a flow-run document.
pub fn extract_flow_message(json: &Value) -> Option<&str> {
    let first = json.pointer("/outputs/0")?;
    let root = first.pointer("/outputs/0").unwrap_or(first);

    root.pointer("/artifacts/message")
        .and_then(Value::as_str)
        .or_else(|| root.pointer("/results/message/0/message").and_then(Value::as_str))
        .or_else(|| root.pointer("/outputs/message/message").and_then(Value::as_str))
}

/// Who wrote a chat entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatEntry {
    pub speaker: Speaker,
    pub text: String,
}

/// Ordered assistant conversation bound to one backend session.
pub struct AssistantChat {
    runner: Box<dyn FlowRunner>,
    entries: Vec<ChatEntry>,
    session_id: Option<String>,
    error: Option<String>,
}

impl AssistantChat {
    pub fn new(runner: Box<dyn FlowRunner>) -> Self {
        Self {
            runner,
            entries: Vec::new(),
            session_id: None,
            error: None,
        }
    }

    /// Send one message and return the assistant's reply.
    ///
    /// The user entry is recorded even when the call fails.
    pub async fn send(&mut self, message: &str) -> Result<&str, LangflowError> {
        self.error = None;
        let message = message.trim();
        if message.is_empty() {
            return Err(LangflowError::EmptyMessage);
        }
        self.entries.push(ChatEntry {
            speaker: Speaker::User,
            text: message.to_string(),
        });

        match self.runner.run(message.to_string(), self.session_id.clone()).await {
            Ok(reply) => {
                self.session_id = Some(reply.session_id);
                self.entries.push(ChatEntry {
                    speaker: Speaker::Assistant,
                    text: reply.message,
                });
                Ok(self.entries.last().map_or("", |e| e.text.as_str()))
            }
            Err(err) => {
                warn!(error = %err, "assistant chat failed");
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
