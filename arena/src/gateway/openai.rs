//! Direct chat-completions client (OpenAI-compatible API).

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::debug;

use super::{http_client, ChatGateway, ChatMessage, CompletionRequest, GatewayError};

/// Gateway that talks to `{base_url}/chat/completions` with a bearer key.
pub struct OpenAiGateway {
    endpoint: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_completion_tokens: u32,
}

impl OpenAiGateway {
    pub fn new(
        base_url: &str,
        api_key: &str,
        model: &str,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        Ok(Self {
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
            model: model.to_string(),
            client: http_client(timeout)?,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatGateway for OpenAiGateway {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, GatewayError> {
        let start = Instant::now();
        let body = ChatCompletionBody {
            model: &self.model,
            messages: &request.messages,
            max_completion_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        debug!(
            model = %self.model,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "chat completion returned"
        );
        parse_chat_completion(status, &text)
    }
}

/// Interpret a chat-completions response body.
///
/// On success the text lives at `choices[0].message.content`. On failure the
/// API's own `error.message` is preferred over the bare status.
pub fn parse_chat_completion(status: StatusCode, body: &str) -> Result<String, GatewayError> {
    let json: serde_json::Value = serde_json::from_str(body).unwrap_or_default();

    if !status.is_success() {
        let message = json["error"]["message"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        return Err(GatewayError::Upstream {
            status: status.as_u16(),
            message,
        });
    }

    json["choices"][0]["message"]["content"]
        .as_str()
        .map(|content| content.trim().to_string())
        .ok_or_else(|| {
            GatewayError::MalformedResponse("missing choices[0].message.content".to_string())
        })
}
