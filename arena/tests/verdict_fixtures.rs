//! Golden verdict fixtures — judge outputs in the shapes models actually
//! produce, from well-behaved to badly drifted.

use arena::debate::DebateRole;
use arena::format::{parse_verdict, InlineText, ParsedVerdict, SectionKind, Span};

fn plain(items: &[InlineText]) -> Vec<String> {
    items.iter().map(InlineText::plain_text).collect()
}

fn kinds(v: &ParsedVerdict) -> Vec<SectionKind> {
    v.sections.iter().map(|s| s.kind).collect()
}

// ── Well-formed ────────────────────────────────────────────────────

const WELL_FORMED: &str = "\
Summary
<DEB>Debator</DEB> leaned on cost data while <REF>Refuter</REF> attacked grid assumptions.

Strengths
- Debator — concrete fuel-cost figures
- Refuter — exposed coal-heavy grids

Weaknesses
- Debator — ignored battery sourcing
- Refuter — no alternative offered

Winner: Debator
Score: Debator 8 / Refuter 7";

#[test]
fn fixture_well_formed_verdict() {
    let v = parse_verdict(WELL_FORMED);

    assert_eq!(
        kinds(&v),
        vec![
            SectionKind::Summary,
            SectionKind::Strengths,
            SectionKind::Weaknesses,
            SectionKind::Winner,
            SectionKind::Score,
        ]
    );

    let summary = v.section(SectionKind::Summary).unwrap();
    assert_eq!(summary.paragraphs.len(), 1);
    assert_eq!(
        summary.paragraphs[0].spans[0],
        Span::role(DebateRole::Debator, "Debator")
    );

    let strengths = v.section(SectionKind::Strengths).unwrap();
    assert!(strengths.paragraphs.is_empty());
    assert_eq!(
        strengths.bullets.iter().map(|b| b.label_role()).collect::<Vec<_>>(),
        vec![Some(DebateRole::Debator), Some(DebateRole::Refuter)]
    );

    assert_eq!(v.winner(), Some(DebateRole::Debator));
    assert_eq!(v.score().as_deref(), Some("Debator 8 / Refuter 7"));
}

// ── Minimal shape with a lone bullet glyph ─────────────────────────

#[test]
fn fixture_summary_lone_bullet_winner() {
    let v = parse_verdict("Summary\n<DEB>Debator</DEB> argued well.\n•\nWinner: Debator");

    assert_eq!(v.titles(), vec!["Summary", "Winner"]);
    let summary = &v.sections[0];
    assert_eq!(
        summary.paragraphs[0].spans,
        vec![
            Span::role(DebateRole::Debator, "Debator"),
            Span::plain(" argued well."),
        ]
    );
    assert_eq!(plain(&v.sections[1].paragraphs), vec!["Debator"]);
    assert_eq!(
        v.sections[1].paragraphs[0].spans,
        vec![Span::role(DebateRole::Debator, "Debator")]
    );
}

#[test]
fn fixture_auto_detected_and_tagged_names() {
    let v = parse_verdict("Summary\nThe Debator won. <DEB>Debator</DEB> was clear.\nWinner:\nDebator");

    assert_eq!(v.titles(), vec!["Summary", "Winner"]);
    assert_eq!(
        v.sections[0].paragraphs[0].spans,
        vec![
            Span::plain("The "),
            Span::role(DebateRole::Debator, "Debator"),
            Span::plain(" won. "),
            Span::role(DebateRole::Debator, "Debator"),
            Span::plain(" was clear."),
        ]
    );
    assert_eq!(v.winner(), Some(DebateRole::Debator));
}

// ── Markdown-decorated headings ────────────────────────────────────

const MARKDOWN: &str = "\
## Summary
A spirited exchange.

**Strengths**
* Refuter: relentless on costs
* Both stayed on topic

### Weaknesses:
• Debator – repeated the opening claim

**Winner:** <REF>Refuter</REF>
**Score:** 6–8";

#[test]
fn fixture_markdown_headings() {
    let v = parse_verdict(MARKDOWN);
    assert_eq!(
        v.titles(),
        vec!["Summary", "Strengths", "Weaknesses", "Winner", "Score"]
    );

    let strengths = v.section(SectionKind::Strengths).unwrap();
    assert_eq!(plain(&strengths.bullets), vec!["Refuter: relentless on costs"]);
    assert_eq!(plain(&strengths.paragraphs), vec!["Both stayed on topic"]);

    let weaknesses = v.section(SectionKind::Weaknesses).unwrap();
    assert_eq!(weaknesses.bullets[0].label_role(), Some(DebateRole::Debator));

    assert_eq!(v.winner(), Some(DebateRole::Refuter));
    assert_eq!(v.score().as_deref(), Some("6–8"));
}

// ── Drifted output ─────────────────────────────────────────────────

#[test]
fn fixture_no_headings_at_all() {
    let v = parse_verdict("The Refuter was sharper.\nThe Debator rambled.");
    assert_eq!(kinds(&v), vec![SectionKind::Summary]);
    assert_eq!(
        plain(&v.sections[0].paragraphs),
        vec!["The Refuter was sharper.", "The Debator rambled."]
    );
    assert_eq!(v.winner(), None);
}

#[test]
fn fixture_bullets_only() {
    let v = parse_verdict("- Debator — clear\n- Refuter — vague\n-\n•");
    assert_eq!(kinds(&v), vec![SectionKind::Summary]);
    // Labels outside Strengths/Weaknesses render as paragraphs.
    assert!(v.sections[0].bullets.is_empty());
    assert_eq!(
        plain(&v.sections[0].paragraphs),
        vec!["Debator — clear", "Refuter — vague"]
    );
}

#[test]
fn fixture_glued_bullet_glyphs_under_strengths() {
    let v = parse_verdict("Strengths\n•Debator — clear\n-Refuter — sharp\n*Both* were civil");
    let strengths = v.section(SectionKind::Strengths).unwrap();
    assert_eq!(
        strengths.bullets.iter().map(|b| b.label_role()).collect::<Vec<_>>(),
        vec![Some(DebateRole::Debator), Some(DebateRole::Refuter)]
    );
    assert_eq!(plain(&strengths.bullets), vec!["Debator — clear", "Refuter — sharp"]);
    assert_eq!(plain(&strengths.paragraphs), vec!["*Both* were civil"]);
}

#[test]
fn fixture_dash_and_bare_score_headings() {
    let v = parse_verdict("Summary\nTight debate.\nWinner - Debator\nScore 8-6");
    assert_eq!(v.titles(), vec!["Summary", "Winner", "Score"]);
    assert_eq!(v.winner(), Some(DebateRole::Debator));
    assert_eq!(v.score().as_deref(), Some("8-6"));
}

#[test]
fn fixture_windows_line_endings_and_blank_runs() {
    let v = parse_verdict("Summary\r\n\r\n\r\n\r\nEven.\r\nWinner:\r\nRefuter\r\n");
    assert_eq!(v.titles(), vec!["Summary", "Winner"]);
    assert_eq!(plain(&v.sections[0].paragraphs), vec!["Even."]);
    assert_eq!(v.winner(), Some(DebateRole::Refuter));
}

#[test]
fn fixture_repeated_heading_opens_new_section() {
    let v = parse_verdict("Summary\nFirst take.\nSummary\nSecond take.");
    assert_eq!(v.sections.len(), 2);
    assert_eq!(plain(&v.sections[1].paragraphs), vec!["Second take."]);
}

#[test]
fn fixture_tags_keep_mention_order() {
    let v = parse_verdict("Summary\nBoth sides; <REF>the Refuter</REF> and <DEB>the Debator</DEB> tied.");
    let roles: Vec<_> = v.sections[0].paragraphs[0].roles().collect();
    assert_eq!(roles, vec![DebateRole::Refuter, DebateRole::Debator]);
}

#[test]
fn fixture_empty_input() {
    assert!(parse_verdict("").sections.is_empty());
}
