//! Debate Orchestration — Proponent/Opponent Rounds and a Judge Verdict
//!
//! # Debate Flow
//!
//! ```text
//! start(topic, profile)
//!   │  proponent call ──► opponent call ──► Round 1 committed
//!   ▼
//! continue_round()            (repeat while rounds < max_rounds)
//!   │  proponent call (window + latest rebuttal)
//!   │  opponent call (window + new statement) ──► Round N committed
//!   ▼
//! request_verdict()           (whole transcript, any time after Round 1)
//!   │  judge call ──► Verdict stored (overwrites the previous one)
//!   ▼
//! reset() ── clears topic, transcript, verdict, error
//! ```

pub mod orchestrator;
pub mod profiles;
pub mod prompts;
pub mod state;

pub use orchestrator::{DebateConfig, DebateError, DebateOrchestrator, HISTORY_WINDOW, MAX_ROUNDS};
pub use profiles::{profile, StyleProfile, PROFILES};
pub use state::{DebatePhase, DebateRole, Round, Transcript};
