//! Debate orchestrator — drives the proponent → opponent → judge call chain.
//!
//! Owns the transcript and verdict for one debate session. Every operation
//! is a short sequential chain of gateway calls; a round is committed only
//! after both of its calls succeed, and a failed call never rolls back
//! anything committed earlier.
//!
//! Usage:
//! 1. `start(topic, profile)` — opening round (two calls)
//! 2. `continue_round()` — another round, up to `max_rounds`
//! 3. `request_verdict()` — one judge call over the whole transcript
//! 4. `reset()` — back to a blank session
//!
//! All operations take `&mut self`, so two of them can never be in flight on
//! the same session at once.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::gateway::{ChatGateway, ChatMessage, CompletionRequest, GatewayError};

use super::profiles::{self, StyleProfile};
use super::prompts;
use super::state::{DebatePhase, Round, Transcript};

/// Hard ceiling on rounds per debate.
pub const MAX_ROUNDS: usize = 5;
/// Prior rounds replayed into each follow-up call.
pub const HISTORY_WINDOW: usize = 2;

const PROPONENT_MAX_TOKENS: u32 = 260;
const OPPONENT_MAX_TOKENS: u32 = 320;
const JUDGE_MAX_TOKENS: u32 = 420;

/// Configuration for the debate orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebateConfig {
    /// Maximum rounds in one transcript.
    pub max_rounds: usize,
    /// Sliding window of prior rounds sent with follow-up calls.
    pub history_window: usize,
    pub proponent_max_tokens: u32,
    pub opponent_max_tokens: u32,
    pub judge_max_tokens: u32,
}

impl Default for DebateConfig {
    fn default() -> Self {
        Self {
            max_rounds: MAX_ROUNDS,
            history_window: HISTORY_WINDOW,
            proponent_max_tokens: PROPONENT_MAX_TOKENS,
            opponent_max_tokens: OPPONENT_MAX_TOKENS,
            judge_max_tokens: JUDGE_MAX_TOKENS,
        }
    }
}

/// Error from a debate operation.
#[derive(Debug, Error)]
pub enum DebateError {
    /// Topic was empty after trimming. Rejected before any call.
    #[error("Please enter a topic.")]
    EmptyTopic,
    /// The operation needs at least one round.
    #[error("no debate in progress")]
    NotStarted,
    /// The transcript is already at its cap.
    #[error("maximum of {max} rounds reached")]
    RoundLimitReached { max: usize },
    #[error("unknown style profile '{0}'")]
    UnknownProfile(String),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Single-writer session state for one debate.
pub struct DebateOrchestrator {
    gateway: Box<dyn ChatGateway>,
    config: DebateConfig,
    profile: &'static StyleProfile,
    topic: String,
    transcript: Transcript,
    verdict: Option<String>,
    error: Option<String>,
}

impl DebateOrchestrator {
    /// Create a new orchestrator with default config.
    pub fn new(gateway: Box<dyn ChatGateway>) -> Self {
        Self::with_config(gateway, DebateConfig::default())
    }

    pub fn with_config(gateway: Box<dyn ChatGateway>, config: DebateConfig) -> Self {
        let transcript = Transcript::new(config.max_rounds);
        Self {
            gateway,
            config,
            profile: profiles::default_profile(),
            topic: String::new(),
            transcript,
            verdict: None,
            error: None,
        }
    }

    /// Begin a new debate. Clears the previous transcript and verdict, then
    /// plays the opening round.
    ///
    /// Returns the transcript length (always 1 on success).
    pub async fn start(&mut self, topic: &str, profile_id: &str) -> Result<usize, DebateError> {
        self.error = None;
        self.transcript.clear();
        self.verdict = None;

        let result = self.begin(topic, profile_id).await;
        self.record(result)
    }

    async fn begin(&mut self, topic: &str, profile_id: &str) -> Result<usize, DebateError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(DebateError::EmptyTopic);
        }
        self.profile = profiles::profile(profile_id)
            .ok_or_else(|| DebateError::UnknownProfile(profile_id.to_string()))?;
        self.topic = topic.to_string();

        info!(profile = self.profile.id, gateway = self.gateway.name(), "debate started");
        let round = self.play_round().await?;
        self.commit(round)
    }

    /// Play one more round on the current topic.
    ///
    /// Rejected without any call when no debate is running or the transcript
    /// is at its cap.
    pub async fn continue_round(&mut self) -> Result<usize, DebateError> {
        self.error = None;
        let result = if self.transcript.is_empty() || self.topic.is_empty() {
            Err(DebateError::NotStarted)
        } else if self.transcript.is_full() {
            Err(DebateError::RoundLimitReached {
                max: self.transcript.max_rounds(),
            })
        } else {
            match self.play_round().await {
                Ok(round) => self.commit(round),
                Err(e) => Err(e),
            }
        };
        self.record(result)
    }

    /// Ask the judge for a verdict over the entire transcript.
    ///
    /// Overwrites any earlier verdict on success; keeps it on failure.
    pub async fn request_verdict(&mut self) -> Result<(), DebateError> {
        self.error = None;
        let result = if self.transcript.is_empty() {
            Err(DebateError::NotStarted)
        } else {
            let messages = prompts::judge_messages(&self.topic, self.transcript.rounds());
            match self.call(messages, self.config.judge_max_tokens).await {
                Ok(text) => {
                    info!(
                        rounds = self.transcript.len(),
                        chars = text.len(),
                        "verdict stored"
                    );
                    self.verdict = Some(text);
                    Ok(())
                }
                Err(e) => Err(e),
            }
        };
        self.record(result)
    }

    /// Clear topic, transcript, verdict and error.
    pub fn reset(&mut self) {
        self.topic.clear();
        self.transcript.clear();
        self.verdict = None;
        self.error = None;
        debug!("debate reset");
    }

    /// Proponent call, then the opponent call conditioned on its output.
    ///
    /// Nothing is mutated; the caller commits the returned round.
    async fn play_round(&self) -> Result<Round, DebateError> {
        let window = self.transcript.window(self.config.history_window);
        let latest_opponent = self.transcript.last().map(|r| r.opponent.as_str());

        let messages =
            prompts::proponent_messages(self.profile, &self.topic, window, latest_opponent);
        let proponent = self
            .call(messages, self.config.proponent_max_tokens)
            .await?;

        let messages = prompts::opponent_messages(self.profile, &self.topic, window, &proponent);
        let opponent = self.call(messages, self.config.opponent_max_tokens).await?;

        Ok(Round::new(proponent, opponent))
    }

    async fn call(&self, messages: Vec<ChatMessage>, max_tokens: u32) -> Result<String, DebateError> {
        debug!(
            gateway = self.gateway.name(),
            messages = messages.len(),
            max_tokens,
            "gateway call"
        );
        let text = self
            .gateway
            .complete(CompletionRequest::new(messages, max_tokens))
            .await?;
        Ok(text)
    }

    fn commit(&mut self, round: Round) -> Result<usize, DebateError> {
        let len = self
            .transcript
            .push(round)
            .map_err(|full| DebateError::RoundLimitReached {
                max: full.max_rounds,
            })?;
        info!(round = len, max_rounds = self.transcript.max_rounds(), "round appended");
        Ok(len)
    }

    /// Convert a failure into the session error message.
    fn record<T>(&mut self, result: Result<T, DebateError>) -> Result<T, DebateError> {
        if let Err(e) = &result {
            warn!(error = %e, phase = %self.transcript.phase(), "debate operation failed");
            self.error = Some(e.to_string());
        }
        result
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn profile(&self) -> &'static StyleProfile {
        self.profile
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn verdict(&self) -> Option<&str> {
        self.verdict.as_deref()
    }

    /// Most recent error message, cleared by the next operation.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn phase(&self) -> DebatePhase {
        self.transcript.phase()
    }

    pub fn can_continue(&self) -> bool {
        self.transcript.phase() == DebatePhase::Open
    }

    pub fn config(&self) -> &DebateConfig {
        &self.config
    }
}
