//! Client for the serverless forwarding function.
//!
//! The function accepts `{messages, maxTokens}` and answers `{content}` on
//! success. On failure it answers with a plain-text body that is shown to the
//! user as-is.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{http_client, ChatGateway, ChatMessage, CompletionRequest, GatewayError};

pub struct ProxyGateway {
    url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProxyRequest<'a> {
    messages: &'a [ChatMessage],
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ProxyReply {
    content: Option<String>,
}

impl ProxyGateway {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        Ok(Self {
            url: url.to_string(),
            client: http_client(timeout)?,
        })
    }
}

#[async_trait]
impl ChatGateway for ProxyGateway {
    fn name(&self) -> &'static str {
        "proxy"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, GatewayError> {
        let body = ProxyRequest {
            messages: &request.messages,
            max_tokens: request.max_tokens,
        };
        let response = self.client.post(&self.url).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(url = %self.url, status = status.as_u16(), "proxy returned");
        parse_proxy_response(status, &text)
    }
}

/// Interpret the forwarding function's reply.
pub fn parse_proxy_response(status: StatusCode, body: &str) -> Result<String, GatewayError> {
    if !status.is_success() {
        let message = match body.trim() {
            "" => format!("HTTP {}", status.as_u16()),
            text => text.to_string(),
        };
        return Err(GatewayError::Upstream {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str::<ProxyReply>(body)
        .ok()
        .and_then(|reply| reply.content)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| GatewayError::MalformedResponse("missing `content` field".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case_token_field() {
        let messages = vec![ChatMessage::user("Topic: tea")];
        let body = ProxyRequest {
            messages: &messages,
            max_tokens: 320,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["maxTokens"], 320);
        assert!(json.get("max_tokens").is_none());
    }

    #[test]
    fn test_success_reads_content() {
        let text = parse_proxy_response(StatusCode::OK, r#"{"content":"Tea is superior."}"#)
            .unwrap();
        assert_eq!(text, "Tea is superior.");
    }

    #[test]
    fn test_plain_text_error_is_verbatim() {
        let err =
            parse_proxy_response(StatusCode::INTERNAL_SERVER_ERROR, "Server misconfigured")
                .unwrap_err();
        assert_eq!(err.to_string(), "Server misconfigured");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_empty_error_body_uses_status() {
        let err = parse_proxy_response(StatusCode::METHOD_NOT_ALLOWED, "").unwrap_err();
        assert_eq!(err.to_string(), "HTTP 405");
    }

    #[test]
    fn test_missing_content_is_malformed() {
        let err = parse_proxy_response(StatusCode::OK, r#"{"text":"x"}"#).unwrap_err();
        assert!(matches!(err, GatewayError::MalformedResponse(_)));
    }
}
