//! Debate state — roles, rounds, and the bounded transcript.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Side of the debate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebateRole {
    /// Argues for the topic (proponent).
    Debator,
    /// Argues against the topic (opponent).
    Refuter,
}

impl DebateRole {
    /// Display name, also used verbatim in the verdict grammar.
    pub fn label(self) -> &'static str {
        match self {
            Self::Debator => "Debator",
            Self::Refuter => "Refuter",
        }
    }

    /// Inline markup tag name (`<DEB>…</DEB>` / `<REF>…</REF>`).
    pub fn tag(self) -> &'static str {
        match self {
            Self::Debator => "DEB",
            Self::Refuter => "REF",
        }
    }

    pub fn stance(self) -> &'static str {
        match self {
            Self::Debator => "PRO",
            Self::Refuter => "CON",
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Self::Debator => Self::Refuter,
            Self::Refuter => Self::Debator,
        }
    }

    /// Case-insensitive lookup by display name or tag.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        [Self::Debator, Self::Refuter]
            .into_iter()
            .find(|role| name.eq_ignore_ascii_case(role.label()) || name.eq_ignore_ascii_case(role.tag()))
    }
}

impl std::fmt::Display for DebateRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One proponent statement and the opponent's rebuttal to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub proponent: String,
    pub opponent: String,
    pub created_at: DateTime<Utc>,
}

impl Round {
    pub fn new(proponent: impl Into<String>, opponent: impl Into<String>) -> Self {
        Self {
            proponent: proponent.into(),
            opponent: opponent.into(),
            created_at: Utc::now(),
        }
    }

    pub fn statement(&self, role: DebateRole) -> &str {
        match role {
            DebateRole::Debator => &self.proponent,
            DebateRole::Refuter => &self.opponent,
        }
    }
}

/// Status of a transcript, derived from its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebatePhase {
    /// No rounds yet.
    Idle,
    /// At least one round and room for more.
    Open,
    /// The round cap is reached; only a verdict can follow.
    Capped,
}

impl std::fmt::Display for DebatePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Open => write!(f, "open"),
            Self::Capped => write!(f, "capped"),
        }
    }
}

/// Returned when pushing onto a full transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscriptFull {
    pub max_rounds: usize,
}

impl std::fmt::Display for TranscriptFull {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "transcript already holds {} rounds", self.max_rounds)
    }
}

impl std::error::Error for TranscriptFull {}

/// Ordered rounds for one debate, never longer than `max_rounds`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    rounds: Vec<Round>,
    max_rounds: usize,
}

impl Transcript {
    pub fn new(max_rounds: usize) -> Self {
        Self {
            rounds: Vec::with_capacity(max_rounds),
            max_rounds,
        }
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    pub fn is_full(&self) -> bool {
        self.rounds.len() >= self.max_rounds
    }

    pub fn last(&self) -> Option<&Round> {
        self.rounds.last()
    }

    pub fn phase(&self) -> DebatePhase {
        if self.rounds.is_empty() {
            DebatePhase::Idle
        } else if self.is_full() {
            DebatePhase::Capped
        } else {
            DebatePhase::Open
        }
    }

    /// Append a completed round. Returns the new length.
    pub fn push(&mut self, round: Round) -> Result<usize, TranscriptFull> {
        if self.is_full() {
            return Err(TranscriptFull {
                max_rounds: self.max_rounds,
            });
        }
        self.rounds.push(round);
        Ok(self.rounds.len())
    }

    /// The most recent `size` rounds, oldest first.
    pub fn window(&self, size: usize) -> &[Round] {
        let start = self.rounds.len().saturating_sub(size);
        &self.rounds[start..]
    }

    pub fn clear(&mut self) {
        self.rounds.clear();
    }

    /// Compact status line.
    pub fn status_line(&self) -> String {
        format!(
            "[{}] rounds {}/{}",
            self.phase(),
            self.rounds.len(),
            self.max_rounds
        )
    }
}
