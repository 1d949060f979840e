//! Runtime configuration for the arena.
//!
//! ## Precedence (highest to lowest)
//!
//! 1. Environment variables (`ARENA_*`, `OPENAI_API_KEY`, `LANGFLOW_*`)
//! 2. Values from the TOML file passed to [`ArenaConfig::load`]
//! 3. Built-in defaults
//!
//! ```toml
//! [gateway]
//! kind = "proxy"
//! base_url = "https://example.netlify.app/.netlify/functions/llm-experiment"
//!
//! [debate]
//! max_rounds = 5
//! history_window = 2
//!
//! [langflow]
//! url = "https://flows.example.app/api/v1/run/<flow-id>"
//! ```

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::debate::DebateConfig;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4.1-nano";
const DEFAULT_GATEWAY_TIMEOUT_SECS: u64 = 60;
const DEFAULT_LANGFLOW_TIMEOUT_SECS: u64 = 20;

const ENV_GATEWAY_KIND: &str = "ARENA_GATEWAY_KIND";
const ENV_GATEWAY_URL: &str = "ARENA_GATEWAY_URL";
const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
const ENV_MODEL: &str = "ARENA_MODEL";
const ENV_MAX_ROUNDS: &str = "ARENA_MAX_ROUNDS";
const ENV_HISTORY_WINDOW: &str = "ARENA_HISTORY_WINDOW";
const ENV_LANGFLOW_URL: &str = "LANGFLOW_URL";
const ENV_LANGFLOW_API_KEY: &str = "LANGFLOW_API_KEY";

/// Which chat-completion transport to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayKind {
    /// Call the chat-completions API directly.
    #[serde(rename = "openai")]
    OpenAi,
    /// Call the serverless forwarding function.
    Proxy,
}

impl std::str::FromStr for GatewayKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "proxy" => Ok(Self::Proxy),
            other => bail!("unknown gateway kind '{other}' (expected 'openai' or 'proxy')"),
        }
    }
}

impl std::fmt::Display for GatewayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenAi => write!(f, "openai"),
            Self::Proxy => write!(f, "proxy"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub kind: GatewayKind,
    /// API base URL for `openai`, full function URL for `proxy`.
    pub base_url: String,
    /// Only used by `openai`. Never written back out.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            kind: GatewayKind::OpenAi,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_GATEWAY_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LangflowConfig {
    /// Flow run endpoint (`.../api/v1/run/<flow-id>`).
    pub url: Option<String>,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for LangflowConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            timeout_secs: DEFAULT_LANGFLOW_TIMEOUT_SECS,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub gateway: GatewayConfig,
    pub debate: DebateConfig,
    pub langflow: LangflowConfig,
}

impl ArenaConfig {
    /// Load from an optional TOML file, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Apply overrides from a key lookup (the process environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(kind) = lookup(ENV_GATEWAY_KIND) {
            self.gateway.kind = kind.parse()?;
        }
        if let Some(url) = lookup(ENV_GATEWAY_URL) {
            self.gateway.base_url = url;
        }
        if let Some(key) = lookup(ENV_OPENAI_API_KEY) {
            self.gateway.api_key = Some(key);
        }
        if let Some(model) = lookup(ENV_MODEL) {
            self.gateway.model = model;
        }
        if let Some(rounds) = lookup(ENV_MAX_ROUNDS) {
            self.debate.max_rounds = rounds
                .trim()
                .parse()
                .with_context(|| format!("{ENV_MAX_ROUNDS} must be a positive integer"))?;
        }
        if let Some(window) = lookup(ENV_HISTORY_WINDOW) {
            self.debate.history_window = window
                .trim()
                .parse()
                .with_context(|| format!("{ENV_HISTORY_WINDOW} must be a positive integer"))?;
        }
        if let Some(url) = lookup(ENV_LANGFLOW_URL) {
            self.langflow.url = Some(url);
        }
        if let Some(key) = lookup(ENV_LANGFLOW_API_KEY) {
            self.langflow.api_key = Some(key);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.debate.max_rounds == 0 {
            bail!("debate.max_rounds must be at least 1");
        }
        if self.debate.history_window == 0 {
            bail!("debate.history_window must be at least 1");
        }
        if self.gateway.timeout_secs == 0 || self.langflow.timeout_secs == 0 {
            bail!("timeouts must be at least one second");
        }
        if self.gateway.kind == GatewayKind::Proxy && self.gateway.base_url == DEFAULT_OPENAI_BASE_URL
        {
            bail!("proxy gateway needs {ENV_GATEWAY_URL} (or gateway.base_url) set to the function URL");
        }
        Ok(())
    }
}
