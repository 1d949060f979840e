//! Message construction for proponent, opponent and judge calls.
//!
//! Builders take the already-windowed slice of prior rounds; choosing the
//! window is the orchestrator's job. Judge messages take the full transcript.

use crate::gateway::ChatMessage;

use super::profiles::StyleProfile;
use super::state::{DebateRole, Round};

/// Prompt version. Bump on any instruction text change.
pub const PROMPT_VERSION: &str = "1.2.0";

/// System instruction that fixes the verdict grammar.
pub const JUDGE_SYSTEM: &str = "\
You are an impartial debate judge. Judge only on the transcript. \
Criteria: Clarity, Evidence/Specificity, Responsiveness, Novelty.
Formatting rules (MANDATORY):
- Use EXACT headings: Summary / Strengths / Weaknesses / Winner: / Score:
- No standalone bullet markers, no decorative dots, no empty bullets.
- When you mention the Debator inline in ANY section, wrap text in <DEB>…</DEB>; for Refuter, <REF>…</REF>.
- Strengths/Weaknesses should start with `Debator —` or `Refuter —` when referring to a side.
- In Summary, also use <DEB>Debator</DEB> and <REF>Refuter</REF> tags for color coding.
- Keep it concise and scannable.";

const OPENING_INSTRUCTION: &str =
    "Start the debate FOR the topic. Provide 4–6 sentences. Avoid generic platitudes.";

fn framing(role: DebateRole, topic: &str) -> String {
    let noun = match role {
        DebateRole::Debator => "point",
        DebateRole::Refuter => "counterpoint",
    };
    format!(
        "Topic: {topic}\nYou are {stance}. Quote 3–12 words from the {other} once, then rebut that quote directly.\n\
Add at least ONE NEW {noun} not previously stated.",
        stance = role.stance(),
        other = role.opponent().label(),
    )
}

/// Shared prefix: persona, framing, then the windowed exchange from `role`'s
/// point of view (own statements as `assistant`, the other side as `user`).
fn base_messages(
    profile: &StyleProfile,
    role: DebateRole,
    topic: &str,
    window: &[Round],
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(3 + window.len() * 2);
    messages.push(ChatMessage::system(profile.instructions(role)));
    messages.push(ChatMessage::user(framing(role, topic)));
    for round in window {
        messages.push(ChatMessage::assistant(round.statement(role)));
        messages.push(ChatMessage::user(round.statement(role.opponent())));
    }
    messages
}

/// Messages for the proponent's next statement.
///
/// `latest_opponent` is `None` for the opening statement of a debate.
pub fn proponent_messages(
    profile: &StyleProfile,
    topic: &str,
    window: &[Round],
    latest_opponent: Option<&str>,
) -> Vec<ChatMessage> {
    let mut messages = base_messages(profile, DebateRole::Debator, topic, window);
    let closing = match latest_opponent {
        Some(rebuttal) => format!(
            "Reply specifically to the Refuter’s latest message:\n{rebuttal}\n\n\
Rules: Do NOT restate your earlier points unless acknowledging them as already addressed. \
Introduce at least ONE NEW supporting argument."
        ),
        None => OPENING_INSTRUCTION.to_string(),
    };
    messages.push(ChatMessage::user(closing));
    messages
}

/// Messages for the opponent's rebuttal to `latest_proponent`.
pub fn opponent_messages(
    profile: &StyleProfile,
    topic: &str,
    window: &[Round],
    latest_proponent: &str,
) -> Vec<ChatMessage> {
    let mut messages = base_messages(profile, DebateRole::Refuter, topic, window);
    messages.push(ChatMessage::user(format!(
        "The Debator just said:\n{latest_proponent}\n\n\
Rebut point-by-point. Do NOT repeat earlier counters unless briefly referenced as already addressed. \
Introduce at least ONE NEW counterpoint."
    )));
    messages
}

/// Full transcript as plain text, one block per round.
pub fn render_transcript(rounds: &[Round]) -> String {
    rounds
        .iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                "Round {}\nDEBATOR:\n{}\n\nREFUTER:\n{}",
                i + 1,
                r.proponent,
                r.opponent
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

/// Messages for the judge call over the entire transcript.
pub fn judge_messages(topic: &str, rounds: &[Round]) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(JUDGE_SYSTEM),
        ChatMessage::user(format!(
            "Topic: {topic}\n\nTranscript:\n{}\n\n\
Provide the verdict using the exact headings and hyphen bullets.",
            render_transcript(rounds)
        )),
    ]
}
