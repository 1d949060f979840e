//! Terminal rendering for statements and verdicts.
//!
//! Debator is blue, Refuter magenta. With `color` off the output is plain
//! text with the same layout.

use arena::debate::{DebateRole, Round};
use arena::format::{
    format_statement, InlineText, ParsedVerdict, Span, TextBlock, VerdictSection,
};
use crossterm::style::{Color, Stylize};

const BULLET: &str = "•";

pub fn role_color(role: DebateRole) -> Color {
    match role {
        DebateRole::Debator => Color::Blue,
        DebateRole::Refuter => Color::Magenta,
    }
}

fn paint(text: &str, role: Option<DebateRole>, color: bool) -> String {
    match role {
        Some(role) if color => text.with(role_color(role)).bold().to_string(),
        _ => text.to_string(),
    }
}

fn render_span(span: &Span, color: bool) -> String {
    paint(&span.text, span.role, color)
}

pub fn render_inline(item: &InlineText, color: bool) -> String {
    item.label
        .iter()
        .chain(&item.spans)
        .map(|s| render_span(s, color))
        .collect()
}

/// One side's statement: a role header, then sentences and bullet items.
pub fn render_statement(role: DebateRole, text: &str, color: bool) -> String {
    let mut out = paint(role.label(), Some(role), color);
    out.push('\n');
    let formatted = format_statement(text);
    for (i, block) in formatted.blocks.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        match block {
            TextBlock::Paragraphs(sentences) => {
                for s in sentences {
                    out.push_str(&format!("  {s}\n"));
                }
            }
            TextBlock::Bullets(items) => {
                for item in items {
                    out.push_str(&format!("  {BULLET} {item}\n"));
                }
            }
        }
    }
    out
}

pub fn render_round(number: usize, round: &Round, color: bool) -> String {
    let rule = "─".repeat(60);
    let header = if color {
        format!("{} {}", format!("Round {number}").bold(), rule.dark_grey())
    } else {
        format!("Round {number} {rule}")
    };
    format!(
        "{header}\n{}\n{}",
        render_statement(DebateRole::Debator, &round.proponent, color),
        render_statement(DebateRole::Refuter, &round.opponent, color)
    )
}

fn render_section(section: &VerdictSection, color: bool) -> String {
    let mut out = if color {
        format!("{}\n", section.title.as_str().bold().underlined())
    } else {
        format!("{}\n", section.title)
    };
    for p in &section.paragraphs {
        out.push_str(&format!("  {}\n", render_inline(p, color)));
    }
    for b in &section.bullets {
        out.push_str(&format!("  {BULLET} {}\n", render_inline(b, color)));
    }
    out
}

pub fn render_verdict(verdict: &ParsedVerdict, color: bool) -> String {
    verdict
        .sections
        .iter()
        .map(|s| render_section(s, color))
        .collect::<Vec<_>>()
        .join("\n")
}
