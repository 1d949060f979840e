//! Presentation-side text shaping.
//!
//! - [`transcript`]: statement → paragraph and bullet blocks
//! - [`verdict`]: judge output → headed sections
//! - [`inline`]: role labels, `<DEB>`/`<REF>` tags, and bare-name spans
//!
//! All entry points are total: malformed input degrades to plain text.

pub mod inline;
pub mod transcript;
pub mod verdict;

pub use inline::{render_inline, InlineText, Span};
pub use transcript::{format_statement, format_with, FormatOptions, FormattedText, TextBlock};
pub use verdict::{
    parse_verdict, parse_verdict_with, ParsedVerdict, SectionKind, VerdictOptions, VerdictSection,
};
