//! Style profiles — the closed set of persona framings for both sides.

use serde::Serialize;

use super::state::DebateRole;

/// Named instruction set injected as the system message for each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StyleProfile {
    pub id: &'static str,
    pub label: &'static str,
    pub proponent: &'static str,
    pub opponent: &'static str,
}

impl StyleProfile {
    pub fn instructions(&self, role: DebateRole) -> &'static str {
        match role {
            DebateRole::Debator => self.proponent,
            DebateRole::Refuter => self.opponent,
        }
    }
}

pub const DEFAULT_PROFILE: &str = "baseline";

pub const PROFILES: &[StyleProfile] = &[
    StyleProfile {
        id: "baseline",
        label: "Baseline",
        proponent: "You are the DEBATOR (PRO). Argue FOR the topic exactly as written. \
Be persuasive and clear. 4–6 sentences. Add at least ONE NEW point each turn. \
Do NOT repeat previously stated claims unless you briefly acknowledge them as already addressed.",
        opponent: "You are the REFUTER (CON). Argue AGAINST the topic exactly as written. \
Be calm, logical, and precise. 5–8 sentences. Directly rebut the Debator’s points. \
Add at least ONE NEW counterpoint each turn. Avoid repeating earlier material.",
    },
    StyleProfile {
        id: "philosophical",
        label: "Philosophical",
        proponent: "You are the DEBATOR (PRO). Use philosophy/ethics/abstract reasoning. \
4–6 sentences. Include at least ONE NEW idea per turn; avoid repetition except brief acknowledgements.",
        opponent: "You are the REFUTER (CON). Use rationalist or existential critique. \
5–8 sentences. Rebut point-by-point. Include at least ONE NEW angle per turn; avoid repetition.",
    },
    StyleProfile {
        id: "showman",
        label: "Showman",
        proponent: "You are the DEBATOR (PRO). Grand stage, witty, energetic. 4–6 sentences. \
Add a new compelling angle each turn; no repetitive beats. One punchy closer.",
        opponent: "You are the REFUTER (CON). Sharp-tongued, humorous, cutting logic. \
5–8 sentences. Rebut point-by-point, introduce something NEW each turn; don’t rehash.",
    },
];

/// Look up a profile by identifier (case-insensitive).
pub fn profile(id: &str) -> Option<&'static StyleProfile> {
    let id = id.trim();
    PROFILES.iter().find(|p| p.id.eq_ignore_ascii_case(id))
}

pub fn default_profile() -> &'static StyleProfile {
    &PROFILES[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(profile("baseline").unwrap().label, "Baseline");
        assert_eq!(profile(" Showman ").unwrap().id, "showman");
        assert!(profile("sarcastic").is_none());
    }

    #[test]
    fn test_default_is_baseline() {
        assert_eq!(default_profile().id, DEFAULT_PROFILE);
    }

    #[test]
    fn test_ids_unique_and_instructions_match_sides() {
        for (i, p) in PROFILES.iter().enumerate() {
            assert!(PROFILES[i + 1..].iter().all(|q| q.id != p.id));
            assert!(p.instructions(DebateRole::Debator).contains("DEBATOR (PRO)"));
            assert!(p.instructions(DebateRole::Refuter).contains("REFUTER (CON)"));
        }
    }
}
