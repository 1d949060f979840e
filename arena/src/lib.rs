//! Debate Arena Library
//!
//! This library provides:
//! - Turn-based debates between two LLM personas over a chat-completion gateway
//! - A judge verdict over the full transcript
//! - Formatting of generated statements and verdicts into renderable structure
//! - An optional assistant chat backed by a Langflow flow
//!
//! # Modules
//!
//! ## Debate
//! - [`debate::DebateOrchestrator`]: start / continue_round / request_verdict / reset
//! - [`debate::PROFILES`]: baseline, philosophical, showman
//!
//! ## Gateways
//! - [`gateway::OpenAiGateway`]: direct chat-completions calls
//! - [`gateway::ProxyGateway`]: serverless forwarding function
//!
//! ## Formatting
//! - [`format::format_statement`]: statement → paragraph/bullet blocks
//! - [`format::parse_verdict`]: judge text → Summary / Strengths / Weaknesses / Winner / Score
//!
//! # Usage
//!
//! ```bash
//! # Three rounds in the showman style, then a verdict
//! debate-cli debate --topic "Remote work beats the office" --style showman --rounds 3 --judge
//!
//! # Re-render a saved verdict
//! debate-cli verdict --file verdict.txt
//! ```

pub mod config;
pub mod debate;
pub mod format;
pub mod gateway;
pub mod langflow;

pub use config::ArenaConfig;
pub use debate::{DebateError, DebateOrchestrator, DebateRole, Round};
pub use gateway::{ChatGateway, GatewayError};
