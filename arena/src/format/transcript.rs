//! Transcript formatter — re-segments one generated statement into
//! paragraphs and bullet groups without dropping or reordering words.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Blank-line boundary (a newline, optional whitespace, another newline).
static BLOCK_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("static regex"));

/// Bullet glyphs recognized by default.
pub const DEFAULT_BULLET_MARKERS: &[char] = &['-', '*', '•'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    pub bullet_markers: Vec<char>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            bullet_markers: DEFAULT_BULLET_MARKERS.to_vec(),
        }
    }
}

/// One renderable block of a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum TextBlock {
    /// One entry per sentence.
    Paragraphs(Vec<String>),
    /// One entry per list item, markers stripped.
    Bullets(Vec<String>),
}

impl TextBlock {
    pub fn items(&self) -> &[String] {
        match self {
            Self::Paragraphs(items) | Self::Bullets(items) => items,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormattedText {
    pub blocks: Vec<TextBlock>,
}

impl FormattedText {
    /// Every emitted text unit in order.
    pub fn units(&self) -> impl Iterator<Item = &str> {
        self.blocks
            .iter()
            .flat_map(|b| b.items().iter().map(String::as_str))
    }

    /// Whitespace-separated words across all units.
    pub fn words(&self) -> Vec<&str> {
        self.units().flat_map(str::split_whitespace).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Format with the default bullet glyphs.
pub fn format_statement(text: &str) -> FormattedText {
    format_with(text, &FormatOptions::default())
}

pub fn format_with(text: &str, options: &FormatOptions) -> FormattedText {
    let blocks = BLOCK_SEPARATOR
        .split(text)
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(|block| format_block(block, &options.bullet_markers))
        .collect();
    FormattedText { blocks }
}

fn format_block(block: &str, markers: &[char]) -> TextBlock {
    let lines: Vec<&str> = block
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    let bullet_lines = lines
        .iter()
        .filter(|l| strip_bullet(l, markers).is_some())
        .count();

    // Half or more of the lines carry a marker.
    if bullet_lines * 2 >= lines.len() {
        let items = lines
            .iter()
            .map(|&l| strip_bullet(l, markers).unwrap_or(l).trim())
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect();
        return TextBlock::Bullets(items);
    }

    TextBlock::Paragraphs(split_sentences(block))
}

/// Text after a leading bullet marker, if the line starts with one.
///
/// A marker only counts when whitespace follows it, so `-5°C` or `*emphasis*`
/// stay ordinary text.
pub fn strip_bullet<'a>(line: &'a str, markers: &[char]) -> Option<&'a str> {
    let trimmed = line.trim_start();
    let first = trimmed.chars().next()?;
    if !markers.contains(&first) {
        return None;
    }
    let rest = &trimmed[first.len_utf8()..];
    rest.starts_with(char::is_whitespace).then(|| rest.trim_start())
}

/// Split after `.`, `!` or `?` when whitespace follows.
pub fn split_sentences(block: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = block.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let end = i + c.len_utf8();
        let Some(&(_, next)) = chars.peek() else {
            break;
        };
        if !next.is_whitespace() {
            continue;
        }
        sentences.push(&block[start..end]);
        while let Some(&(j, ws)) = chars.peek() {
            if !ws.is_whitespace() {
                start = j;
                break;
            }
            chars.next();
            start = j + ws.len_utf8();
        }
    }
    sentences.push(&block[start.min(block.len())..]);

    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
