//! Inline span rendering for verdict items.
//!
//! An item may open with a role label (`Debator — …`), carry explicit
//! `<DEB>…</DEB>` / `<REF>…</REF>` tags, or mention a side by bare name.
//! All three end up as role-attributed spans; everything else is plain.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::debate::DebateRole;

/// Leading role label. Dash forms: em, en, or a spaced hyphen. A colon is
/// accepted as well.
static LABEL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(debator|refuter)(?:\s*[—–:]|\s+-)\s*").expect("static regex")
});

/// Paired tags. `(?s)` so a tag may wrap a line break.
static ROLE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<DEB>(.*?)</DEB>|<REF>(.*?)</REF>").expect("static regex")
});

static BARE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(debator|refuter)\b").expect("static regex"));

/// A run of text, optionally attributed to one side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<DebateRole>,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            role: None,
        }
    }

    pub fn role(role: DebateRole, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            role: Some(role),
        }
    }
}

/// One rendered paragraph or bullet item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InlineText {
    /// Leading role label, kept with its dash (`"Debator — "`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Span>,
    pub spans: Vec<Span>,
}

impl InlineText {
    /// Text with markup removed.
    pub fn plain_text(&self) -> String {
        self.label
            .iter()
            .chain(&self.spans)
            .map(|s| s.text.as_str())
            .collect()
    }

    /// Every side attributed anywhere in the item, label first.
    pub fn roles(&self) -> impl Iterator<Item = DebateRole> + '_ {
        self.label.iter().chain(&self.spans).filter_map(|s| s.role)
    }

    pub fn label_role(&self) -> Option<DebateRole> {
        self.label.as_ref().and_then(|l| l.role)
    }
}

/// Whether `item` opens with a role label.
pub fn has_role_label(item: &str) -> bool {
    LABEL_PREFIX.is_match(item)
}

pub fn render_inline(item: &str) -> InlineText {
    let (label, body) = match LABEL_PREFIX.captures(item) {
        Some(caps) => {
            let whole = caps.get(0).map_or("", |m| m.as_str());
            let role = caps.get(1).and_then(|m| DebateRole::from_name(m.as_str()));
            let label = role.map(|r| Span::role(r, whole));
            (label, &item[whole.len()..])
        }
        None => (None, item),
    };

    let mut spans = Vec::new();
    let mut cursor = 0;
    for caps in ROLE_TAG.captures_iter(body) {
        let Some(whole) = caps.get(0) else { continue };
        push_untagged(&mut spans, &body[cursor..whole.start()]);
        let (role, inner) = match (caps.get(1), caps.get(2)) {
            (Some(deb), _) => (DebateRole::Debator, deb.as_str()),
            (None, Some(rf)) => (DebateRole::Refuter, rf.as_str()),
            (None, None) => continue,
        };
        if !inner.is_empty() {
            spans.push(Span::role(role, inner));
        }
        cursor = whole.end();
    }
    push_untagged(&mut spans, &body[cursor..]);

    InlineText { label, spans }
}

/// Split untagged text around bare role names.
fn push_untagged(spans: &mut Vec<Span>, text: &str) {
    let mut cursor = 0;
    for m in BARE_NAME.find_iter(text) {
        if m.start() > cursor {
            spans.push(Span::plain(&text[cursor..m.start()]));
        }
        if let Some(role) = DebateRole::from_name(m.as_str()) {
            spans.push(Span::role(role, m.as_str()));
        }
        cursor = m.end();
    }
    if cursor < text.len() {
        spans.push(Span::plain(&text[cursor..]));
    }
}
