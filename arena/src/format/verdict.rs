//! Verdict parser — turns loosely structured judge output into sections.
//!
//! The judge is asked for a fixed heading grammar but drifts: decorated
//! headings (`## Summary`, `**Winner:**`), inline remainders
//! (`Winner: Debator`), stray bullet glyphs, text before any heading.
//! Parsing never fails; the worst case is a single implicit Summary.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::debate::DebateRole;

use super::inline::{has_role_label, render_inline, InlineText};
use super::transcript::{strip_bullet, DEFAULT_BULLET_MARKERS};

static EXCESS_BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("static regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Summary,
    Strengths,
    Weaknesses,
    Winner,
    Score,
    /// A caller-configured extra heading.
    Other,
}

impl SectionKind {
    const RECOGNIZED: [SectionKind; 5] = [
        Self::Summary,
        Self::Strengths,
        Self::Weaknesses,
        Self::Winner,
        Self::Score,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Summary => "Summary",
            Self::Strengths => "Strengths",
            Self::Weaknesses => "Weaknesses",
            Self::Winner => "Winner",
            Self::Score => "Score",
            Self::Other => "Other",
        }
    }

    /// Sections whose labelled items render as bullets.
    pub fn lists_by_side(self) -> bool {
        matches!(self, Self::Strengths | Self::Weaknesses)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerdictSection {
    pub kind: SectionKind,
    pub title: String,
    pub paragraphs: Vec<InlineText>,
    pub bullets: Vec<InlineText>,
}

impl VerdictSection {
    fn new(kind: SectionKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            paragraphs: Vec::new(),
            bullets: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty() && self.bullets.is_empty()
    }

    /// All items in render order (paragraphs, then bullets).
    pub fn items(&self) -> impl Iterator<Item = &InlineText> {
        self.paragraphs.iter().chain(&self.bullets)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedVerdict {
    pub sections: Vec<VerdictSection>,
}

impl ParsedVerdict {
    pub fn section(&self, kind: SectionKind) -> Option<&VerdictSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn titles(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.title.as_str()).collect()
    }

    /// First side named in the Winner section, if any.
    pub fn winner(&self) -> Option<DebateRole> {
        self.section(SectionKind::Winner)?
            .items()
            .flat_map(InlineText::roles)
            .next()
    }

    /// Score line text, markup removed.
    pub fn score(&self) -> Option<String> {
        self.section(SectionKind::Score)?
            .items()
            .next()
            .map(InlineText::plain_text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerdictOptions {
    pub bullet_markers: Vec<char>,
    /// Additional heading names, matched case-insensitively and mapped to
    /// [`SectionKind::Other`] with the configured spelling as title.
    pub extra_headings: Vec<String>,
}

impl Default for VerdictOptions {
    fn default() -> Self {
        Self {
            bullet_markers: DEFAULT_BULLET_MARKERS.to_vec(),
            extra_headings: Vec::new(),
        }
    }
}

pub fn parse_verdict(text: &str) -> ParsedVerdict {
    parse_verdict_with(text, &VerdictOptions::default())
}

pub fn parse_verdict_with(text: &str, options: &VerdictOptions) -> ParsedVerdict {
    let sections = segment(&normalize(text), options)
        .into_iter()
        .map(|(mut section, items)| {
            for item in items {
                let rendered = render_inline(&item);
                if section.kind.lists_by_side() && has_role_label(&item) {
                    section.bullets.push(rendered);
                } else {
                    section.paragraphs.push(rendered);
                }
            }
            section
        })
        .collect();
    ParsedVerdict { sections }
}

/// Drop lines holding only a `•`, unify line endings, and collapse runs of
/// blank lines.
pub fn normalize(text: &str) -> String {
    let kept = text
        .replace("\r\n", "\n")
        .lines()
        .filter(|line| line.trim() != "•")
        .collect::<Vec<_>>()
        .join("\n");
    EXCESS_BLANK_LINES
        .replace_all(&kept, "\n\n")
        .trim()
        .to_string()
}

/// Group non-empty lines under their headings. Text before the first
/// heading opens an implicit Summary.
fn segment(text: &str, options: &VerdictOptions) -> Vec<(VerdictSection, Vec<String>)> {
    let mut out: Vec<(VerdictSection, Vec<String>)> = Vec::new();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some((section, remainder)) = match_heading(line, options) {
            out.push((section, remainder.into_iter().collect()));
            continue;
        }
        // Stray glyph runs (`-`, `* *`, `---`) carry no text.
        if line
            .chars()
            .all(|c| c.is_whitespace() || options.bullet_markers.contains(&c))
        {
            continue;
        }
        let item = strip_item_marker(line, &options.bullet_markers).trim();
        if item.is_empty() {
            continue;
        }
        if out.is_empty() {
            out.push((VerdictSection::new(SectionKind::Summary, "Summary"), Vec::new()));
        }
        if let Some((_, items)) = out.last_mut() {
            items.push(item.to_string());
        }
    }
    out
}

/// Drop one leading bullet marker from a verdict item.
///
/// A marker glued to the text (`•Debator — …`) is stripped when it is `•` or
/// when a role label follows; `-5` and `*emphasis*` stay as written.
fn strip_item_marker<'a>(line: &'a str, markers: &[char]) -> &'a str {
    if let Some(rest) = strip_bullet(line, markers) {
        return rest;
    }
    let Some(first) = line.chars().next().filter(|c| markers.contains(c)) else {
        return line;
    };
    let rest = &line[first.len_utf8()..];
    if first == '•' || has_role_label(rest) {
        rest
    } else {
        line
    }
}

/// Recognize a heading line, returning the section and any inline remainder.
fn match_heading(line: &str, options: &VerdictOptions) -> Option<(VerdictSection, Option<String>)> {
    let core = line.trim_start_matches('#').trim().trim_matches('*').trim();

    for kind in SectionKind::RECOGNIZED {
        let numeric_tail = kind == SectionKind::Score;
        if let Some(rest) = heading_remainder(core, kind.title(), numeric_tail) {
            return Some((VerdictSection::new(kind, kind.title()), rest));
        }
    }
    options.extra_headings.iter().find_map(|name| {
        heading_remainder(core, name, false)
            .map(|rest| (VerdictSection::new(SectionKind::Other, name.as_str()), rest))
    })
}

/// `Some(None)` for a bare heading (`Summary`, `Summary:`), `Some(Some(r))`
/// for `Name: r` or `Name - r`, `None` when `core` is ordinary text.
///
/// With `numeric_tail`, `Name 8-6` also counts, remainder `8-6`.
fn heading_remainder(core: &str, name: &str, numeric_tail: bool) -> Option<Option<String>> {
    let head = core.get(..name.len())?;
    if !head.eq_ignore_ascii_case(name) {
        return None;
    }
    let rest = &core[name.len()..];
    if rest.starts_with(|c: char| c.is_alphanumeric()) {
        return None;
    }
    let rest = rest.trim_start_matches('*');
    let spaced = rest.starts_with(char::is_whitespace);
    let rest = rest.trim_start();

    if let Some(after) = rest.strip_prefix(':') {
        let after = after.trim_start_matches('*').trim();
        return Some((!after.is_empty()).then(|| after.to_string()));
    }
    if rest.is_empty() {
        return Some(None);
    }
    if !spaced {
        return None;
    }
    if let Some(after) = rest.strip_prefix(['-', '–', '—']) {
        if after.starts_with(char::is_whitespace) {
            let after = after.trim();
            return Some((!after.is_empty()).then(|| after.to_string()));
        }
    }
    if numeric_tail && rest.starts_with(|c: char| c.is_ascii_digit()) {
        return Some(Some(rest.to_string()));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(items: &[InlineText]) -> Vec<String> {
        items.iter().map(InlineText::plain_text).collect()
    }

    #[test]
    fn test_heading_forms() {
        let opts = VerdictOptions::default();
        for line in ["Summary", "Summary:", "## Summary", "**Summary**", "**Summary:**", "SUMMARY"] {
            let (section, rest) = match_heading(line, &opts).expect(line);
            assert_eq!(section.kind, SectionKind::Summary, "{line}");
            assert_eq!(rest, None, "{line}");
        }
    }

    #[test]
    fn test_heading_with_inline_remainder() {
        let opts = VerdictOptions::default();
        let (section, rest) = match_heading("Winner: Debator", &opts).unwrap();
        assert_eq!(section.kind, SectionKind::Winner);
        assert_eq!(rest.as_deref(), Some("Debator"));

        let (_, rest) = match_heading("**Score:** 8-6", &opts).unwrap();
        assert_eq!(rest.as_deref(), Some("8-6"));
    }

    #[test]
    fn test_heading_with_dash_or_numeric_remainder() {
        let opts = VerdictOptions::default();
        let (section, rest) = match_heading("Winner - Debator", &opts).unwrap();
        assert_eq!(section.kind, SectionKind::Winner);
        assert_eq!(rest.as_deref(), Some("Debator"));

        let (_, rest) = match_heading("Winner — Refuter", &opts).unwrap();
        assert_eq!(rest.as_deref(), Some("Refuter"));

        let (section, rest) = match_heading("Score 8-6", &opts).unwrap();
        assert_eq!(section.kind, SectionKind::Score);
        assert_eq!(rest.as_deref(), Some("8-6"));

        // Numbers only complete a Score heading.
        assert!(match_heading("Summary 2 rounds in", &opts).is_none());
        assert!(match_heading("Winner-take-all framing", &opts).is_none());
    }

    #[test]
    fn test_glued_marker_stripped_before_label() {
        let markers = DEFAULT_BULLET_MARKERS;
        assert_eq!(strip_item_marker("•Debator — clear", markers), "Debator — clear");
        assert_eq!(strip_item_marker("-Refuter — sharp", markers), "Refuter — sharp");
        assert_eq!(strip_item_marker("•loose point", markers), "loose point");
        assert_eq!(strip_item_marker("- spaced", markers), "spaced");
        assert_eq!(strip_item_marker("-5 on rebuttals", markers), "-5 on rebuttals");
        assert_eq!(strip_item_marker("*emphasis* here", markers), "*emphasis* here");
    }

    #[test]
    fn test_prose_starting_with_keyword_is_not_heading() {
        let opts = VerdictOptions::default();
        assert!(match_heading("Summary of the debate follows", &opts).is_none());
        assert!(match_heading("Summarystyle", &opts).is_none());
        assert!(match_heading("Scores were close", &opts).is_none());
    }

    #[test]
    fn test_normalize_drops_lone_bullets_and_blank_runs() {
        let text = "Summary\r\n•\r\n\r\n\r\n\r\nText\n  •  \nMore";
        assert_eq!(normalize(text), "Summary\n\nText\nMore");
    }

    #[test]
    fn test_text_before_heading_opens_summary() {
        let out = parse_verdict("Overall a close call.\nWinner: Refuter");
        assert_eq!(out.titles(), vec!["Summary", "Winner"]);
        assert_eq!(plain(&out.sections[0].paragraphs), vec!["Overall a close call."]);
        assert_eq!(out.winner(), Some(DebateRole::Refuter));
    }

    #[test]
    fn test_strengths_split_labels_into_bullets() {
        let out = parse_verdict(
            "Strengths\n- Debator — concrete numbers\n- General civility on both sides\n- Refuter – sharp rebuttals",
        );
        let s = out.section(SectionKind::Strengths).unwrap();
        assert_eq!(s.bullets.len(), 2);
        assert_eq!(s.bullets[0].label_role(), Some(DebateRole::Debator));
        assert_eq!(s.bullets[1].label_role(), Some(DebateRole::Refuter));
        assert_eq!(plain(&s.paragraphs), vec!["General civility on both sides"]);
    }

    #[test]
    fn test_labels_outside_strengths_stay_paragraphs() {
        let out = parse_verdict("Summary\nDebator — opened well");
        let s = &out.sections[0];
        assert!(s.bullets.is_empty());
        assert_eq!(s.paragraphs[0].label_role(), Some(DebateRole::Debator));
    }

    #[test]
    fn test_empty_heading_kept() {
        let out = parse_verdict("Summary\nWeaknesses\nWinner: Debator");
        assert_eq!(out.titles(), vec!["Summary", "Weaknesses", "Winner"]);
        assert!(out.sections[1].is_empty());
    }

    #[test]
    fn test_extra_heading_maps_to_other() {
        let opts = VerdictOptions {
            extra_headings: vec!["Verdict Notes".to_string()],
            ..VerdictOptions::default()
        };
        let out = parse_verdict_with("verdict notes: judged live", &opts);
        assert_eq!(out.sections[0].kind, SectionKind::Other);
        assert_eq!(out.sections[0].title, "Verdict Notes");
        assert_eq!(plain(&out.sections[0].paragraphs), vec!["judged live"]);
    }

    #[test]
    fn test_score_accessor() {
        let out = parse_verdict("Score:\n<DEB>Debator</DEB> 8 / <REF>Refuter</REF> 7");
        assert_eq!(out.score().as_deref(), Some("Debator 8 / Refuter 7"));
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(parse_verdict("").sections.is_empty());
        assert!(parse_verdict(" \n•\n\n").sections.is_empty());
    }
}
