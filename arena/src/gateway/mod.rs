//! Chat completion gateway — the remote endpoint every debate turn goes through.
//!
//! The orchestrator only sees [`ChatGateway`]: an ordered list of role-tagged
//! messages plus an output-token bound goes in, one generated text comes out.
//! Transport, model selection and authentication live in the implementations:
//!
//! | Implementation   | Endpoint                                      |
//! |------------------|-----------------------------------------------|
//! | [`OpenAiGateway`] | `POST {base_url}/chat/completions` (direct)  |
//! | [`ProxyGateway`]  | `POST {url}` serverless forwarding function   |

pub mod openai;
pub mod proxy;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{GatewayConfig, GatewayKind};

pub use openai::OpenAiGateway;
pub use proxy::ProxyGateway;

/// Errors surfaced by a gateway call.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request could not complete (DNS, connect, timeout, body read).
    #[error("request failed: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success status.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// Success status, but the expected text field was absent.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The gateway could not be built from configuration.
    #[error("gateway misconfigured: {0}")]
    Configuration(String),
}

impl GatewayError {
    /// HTTP status attached to an upstream failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Role tag on a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// One role-tagged unit of text sent to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// A single completion request: ordered messages and an output bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(messages: Vec<ChatMessage>, max_tokens: u32) -> Self {
        Self {
            messages,
            max_tokens,
        }
    }

    /// Number of messages with the given role.
    pub fn count_role(&self, role: MessageRole) -> usize {
        self.messages.iter().filter(|m| m.role == role).count()
    }
}

/// A remote chat-completion endpoint.
///
/// Implementations perform exactly one best-effort request per call; there is
/// no retry at this layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Short name used in log fields.
    fn name(&self) -> &'static str;

    /// Send the messages and return the generated text.
    async fn complete(&self, request: CompletionRequest) -> Result<String, GatewayError>;
}

pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, GatewayError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| GatewayError::Configuration(format!("failed to create HTTP client: {e}")))
}

/// Build the gateway selected by configuration.
pub fn from_config(config: &GatewayConfig) -> Result<Box<dyn ChatGateway>, GatewayError> {
    let timeout = Duration::from_secs(config.timeout_secs);
    match config.kind {
        GatewayKind::OpenAi => {
            let api_key = config
                .api_key
                .clone()
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| {
                    GatewayError::Configuration("OPENAI_API_KEY is not set".to_string())
                })?;
            Ok(Box::new(OpenAiGateway::new(
                &config.base_url,
                &api_key,
                &config.model,
                timeout,
            )?))
        }
        GatewayKind::Proxy => Ok(Box::new(ProxyGateway::new(&config.base_url, timeout)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_serializes_lowercase() {
        let msg = ChatMessage::assistant("hi");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["content"], "hi");
    }

    #[test]
    fn test_count_role() {
        let req = CompletionRequest::new(
            vec![
                ChatMessage::system("s"),
                ChatMessage::user("u1"),
                ChatMessage::assistant("a"),
                ChatMessage::user("u2"),
            ],
            100,
        );
        assert_eq!(req.count_role(MessageRole::User), 2);
        assert_eq!(req.count_role(MessageRole::System), 1);
    }

    #[test]
    fn test_upstream_error_displays_message_verbatim() {
        let err = GatewayError::Upstream {
            status: 429,
            message: "Rate limit reached for requests".to_string(),
        };
        assert_eq!(err.to_string(), "Rate limit reached for requests");
        assert_eq!(err.status(), Some(429));
        assert_eq!(GatewayError::Transport("x".into()).status(), None);
    }

    #[test]
    fn test_openai_without_key_is_configuration_error() {
        let config = GatewayConfig {
            kind: GatewayKind::OpenAi,
            api_key: None,
            ..GatewayConfig::default()
        };
        match from_config(&config) {
            Err(GatewayError::Configuration(msg)) => assert!(msg.contains("OPENAI_API_KEY")),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected configuration error"),
        }
    }

    #[test]
    fn test_proxy_needs_no_key() {
        let config = GatewayConfig {
            kind: GatewayKind::Proxy,
            base_url: "http://localhost:8888/.netlify/functions/llm-experiment".to_string(),
            api_key: None,
            ..GatewayConfig::default()
        };
        let gateway = from_config(&config).unwrap();
        assert_eq!(gateway.name(), "proxy");
    }
}
