//! Typed page output and its sentinel-string serialization.
//!
//! The assembler produces [`StructuredText`]: per column, a sequence of
//! [`Segment`]s (word runs, breaks, tables, formulas). Consumers that want
//! a flat string call [`StructuredText::render`], which emits the sentinel
//! vocabulary below. [`parse_columns`] reads that vocabulary back into
//! segments. Both directions use the constants in this module, so the
//! vocabulary is defined in exactly one place.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pipeline::breaks::BreakLevel;
use crate::text::math::mark_formula;

/// Opens an inline formula span.
pub const FORMULA_INLINE_START: &str = "|||FORMULA_INLINE_START|||";
/// Closes an inline formula span.
pub const FORMULA_INLINE_END: &str = "|||FORMULA_INLINE_END|||";
/// Opens a block formula span.
pub const FORMULA_BLOCK_START: &str = "|||FORMULA_BLOCK_START|||";
/// Closes a block formula span.
pub const FORMULA_BLOCK_END: &str = "|||FORMULA_BLOCK_END|||";
/// Opens a fenced table block.
pub const TABLE_FENCE_OPEN: &str = "```table\n";
/// Closes a fenced table block.
pub const TABLE_FENCE_CLOSE: &str = "\n```";
/// Separates independently processed columns.
pub const COLUMN_SEPARATOR: &str = "\n\n---\n\n";

/// One unit of structured page output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    /// A run of words
    Word {
        /// Text of the run
        text: String,
    },
    /// A break between runs
    Break {
        /// Strength of the break
        level: BreakLevel,
    },
    /// Consecutive table rows; cells are tab- or space-separated
    Table {
        /// Rendered rows, top to bottom
        rows: Vec<String>,
    },
    /// A mathematical span
    Formula {
        /// Raw span text
        content: String,
        /// Display (block) rather than inline formula
        is_block: bool,
    },
}

impl Segment {
    /// Word-run segment.
    pub fn word(text: impl Into<String>) -> Self {
        Self::Word { text: text.into() }
    }

    /// Break segment.
    pub fn brk(level: BreakLevel) -> Self {
        Self::Break { level }
    }

    /// Append this segment's sentinel form to `out`.
    pub fn render_into(&self, out: &mut String) {
        match self {
            Self::Word { text } => out.push_str(text),
            Self::Break { level } => out.push_str(level.separator()),
            Self::Table { rows } => {
                out.push_str(TABLE_FENCE_OPEN);
                out.push_str(&rows.join("\n"));
                out.push_str(TABLE_FENCE_CLOSE);
            },
            Self::Formula { content, is_block } => out.push_str(&mark_formula(content, *is_block)),
        }
    }
}

/// The segments of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnText {
    /// Column start x (PDF points)
    pub x: f32,
    /// Segments in reading order
    pub segments: Vec<Segment>,
}

impl ColumnText {
    /// Render this column's segments.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            segment.render_into(&mut out);
        }
        out
    }
}

/// Structured text of one page: columns left to right.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StructuredText {
    /// Columns in left-to-right order
    pub columns: Vec<ColumnText>,
}

impl StructuredText {
    /// Whether the page produced no segments at all.
    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(|c| c.segments.is_empty())
    }

    /// All segments, columns concatenated left to right.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.columns.iter().flat_map(|c| c.segments.iter())
    }

    /// Render to the sentinel string. Empty columns are skipped; the rest are
    /// joined with [`COLUMN_SEPARATOR`].
    pub fn render(&self) -> String {
        self.columns
            .iter()
            .filter(|c| !c.segments.is_empty())
            .map(ColumnText::render)
            .collect::<Vec<_>>()
            .join(COLUMN_SEPARATOR)
    }

    /// Read a rendered page back into typed form.
    ///
    /// Column positions are not part of the rendered vocabulary, so every
    /// parsed column has `x = 0.0`. See [`parse_columns`].
    pub fn parse(text: &str) -> Self {
        let columns = parse_columns(text)
            .into_iter()
            .map(|segments| ColumnText { x: 0.0, segments })
            .collect();
        Self { columns }
    }
}

impl fmt::Display for StructuredText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Parse a rendered page back into segments, one vector per column.
///
/// Word runs come back as maximal runs of plain text, so a space break
/// between two runs merges them into one; the rendered form is unchanged by
/// a parse/render round trip. Unterminated markers are kept as literal text.
///
/// ```
/// use pdf_reflow::pipeline::{parse_columns, BreakLevel, Segment};
///
/// let columns = parse_columns("Title\n\n\nBody text\n\n---\n\nRight");
/// assert_eq!(columns.len(), 2);
/// assert_eq!(columns[0][1], Segment::brk(BreakLevel::Section));
/// assert_eq!(columns[1], vec![Segment::word("Right")]);
/// ```
pub fn parse_columns(text: &str) -> Vec<Vec<Segment>> {
    if text.is_empty() {
        return Vec::new();
    }
    split_columns(text).into_iter().map(parse_column).collect()
}

/// Split on column separators that sit outside table fences.
fn split_columns(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];
        if rest.starts_with(TABLE_FENCE_OPEN) {
            let body = pos + TABLE_FENCE_OPEN.len();
            if let Some(end) = text[body..].find(TABLE_FENCE_CLOSE) {
                pos = body + end + TABLE_FENCE_CLOSE.len();
                continue;
            }
        }
        if rest.starts_with(COLUMN_SEPARATOR) {
            parts.push(&text[start..pos]);
            pos += COLUMN_SEPARATOR.len();
            start = pos;
            continue;
        }
        pos += rest.chars().next().map(char::len_utf8).unwrap_or(1);
    }
    parts.push(&text[start..]);
    parts
}

fn parse_column(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut buffer = String::new();
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];

        if let Some((segment, consumed)) = parse_marker(rest) {
            flush_words(&mut buffer, &mut segments);
            segments.push(segment);
            pos += consumed;
            continue;
        }

        if rest.starts_with('\n') {
            flush_words(&mut buffer, &mut segments);
            let newlines = rest.chars().take_while(|&c| c == '\n').count();
            let level = match newlines {
                1 => BreakLevel::Line,
                2 => BreakLevel::Paragraph,
                _ => BreakLevel::Section,
            };
            segments.push(Segment::brk(level));
            pos += newlines;
            continue;
        }

        let c = rest.chars().next().unwrap_or('\0');
        buffer.push(c);
        pos += c.len_utf8().max(1);
    }

    flush_words(&mut buffer, &mut segments);
    segments
}

/// Try to read a table fence or formula span at the start of `rest`.
fn parse_marker(rest: &str) -> Option<(Segment, usize)> {
    if let Some(body) = rest.strip_prefix(TABLE_FENCE_OPEN) {
        let end = body.find(TABLE_FENCE_CLOSE)?;
        let rows = body[..end].split('\n').map(str::to_string).collect();
        let consumed = TABLE_FENCE_OPEN.len() + end + TABLE_FENCE_CLOSE.len();
        return Some((Segment::Table { rows }, consumed));
    }

    for (open, close, is_block) in [
        (FORMULA_INLINE_START, FORMULA_INLINE_END, false),
        (FORMULA_BLOCK_START, FORMULA_BLOCK_END, true),
    ] {
        if let Some(body) = rest.strip_prefix(open) {
            let end = body.find(close)?;
            let segment = Segment::Formula {
                content: body[..end].to_string(),
                is_block,
            };
            return Some((segment, open.len() + end + close.len()));
        }
    }

    None
}

/// Turn buffered plain text into a word run, keeping boundary spaces as
/// space breaks.
fn flush_words(buffer: &mut String, segments: &mut Vec<Segment>) {
    if buffer.is_empty() {
        return;
    }
    let text = std::mem::take(buffer);
    let trimmed = text.trim_matches(' ');

    if text.starts_with(' ') && !segments.is_empty() {
        segments.push(Segment::brk(BreakLevel::Space));
    }
    if !trimmed.is_empty() {
        segments.push(Segment::word(trimmed));
        if text.ends_with(' ') {
            segments.push(Segment::brk(BreakLevel::Space));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(segments: Vec<Segment>) -> ColumnText {
        ColumnText { x: 0.0, segments }
    }

    #[test]
    fn test_render_breaks() {
        let text = StructuredText {
            columns: vec![column(vec![
                Segment::word("Title"),
                Segment::brk(BreakLevel::Section),
                Segment::word("First"),
                Segment::brk(BreakLevel::Space),
                Segment::word("line"),
                Segment::brk(BreakLevel::Line),
                Segment::word("second"),
                Segment::brk(BreakLevel::Paragraph),
                Segment::word("Next"),
            ])],
        };
        assert_eq!(text.render(), "Title\n\n\nFirst line\nsecond\n\nNext");
    }

    #[test]
    fn test_render_table_and_formula() {
        let text = StructuredText {
            columns: vec![column(vec![
                Segment::Table {
                    rows: vec!["a\tb".to_string(), "c\td".to_string()],
                },
                Segment::brk(BreakLevel::Paragraph),
                Segment::Formula {
                    content: "α + β".to_string(),
                    is_block: false,
                },
            ])],
        };
        assert_eq!(
            text.render(),
            "```table\na\tb\nc\td\n```\n\n|||FORMULA_INLINE_START|||α + β|||FORMULA_INLINE_END|||"
        );
    }

    #[test]
    fn test_render_columns_skip_empty() {
        let text = StructuredText {
            columns: vec![
                column(vec![Segment::word("left")]),
                column(vec![]),
                column(vec![Segment::word("right")]),
            ],
        };
        assert_eq!(text.render(), "left\n\n---\n\nright");
        assert_eq!(format!("{}", text), "left\n\n---\n\nright");
    }

    #[test]
    fn test_empty_structured_text() {
        let text = StructuredText::default();
        assert!(text.is_empty());
        assert_eq!(text.render(), "");
        assert!(parse_columns("").is_empty());
    }

    #[test]
    fn test_parse_break_levels() {
        let columns = parse_columns("a\nb\n\nc\n\n\nd");
        assert_eq!(
            columns[0],
            vec![
                Segment::word("a"),
                Segment::brk(BreakLevel::Line),
                Segment::word("b"),
                Segment::brk(BreakLevel::Paragraph),
                Segment::word("c"),
                Segment::brk(BreakLevel::Section),
                Segment::word("d"),
            ]
        );
    }

    #[test]
    fn test_parse_formula_with_spaces() {
        let columns = parse_columns(
            "where |||FORMULA_INLINE_START|||x ∈ S|||FORMULA_INLINE_END||| holds",
        );
        assert_eq!(
            columns[0],
            vec![
                Segment::word("where"),
                Segment::brk(BreakLevel::Space),
                Segment::Formula {
                    content: "x ∈ S".to_string(),
                    is_block: false,
                },
                Segment::brk(BreakLevel::Space),
                Segment::word("holds"),
            ]
        );
    }

    #[test]
    fn test_parse_table_containing_separator_text() {
        let rendered = "```table\nx\ty\n\n---\n\nz\n```";
        let columns = parse_columns(rendered);
        assert_eq!(columns.len(), 1);
        assert!(matches!(&columns[0][0], Segment::Table { rows } if rows.len() == 5));
    }

    #[test]
    fn test_parse_unterminated_marker_is_text() {
        let columns = parse_columns("|||FORMULA_BLOCK_START|||oops");
        assert_eq!(columns[0], vec![Segment::word("|||FORMULA_BLOCK_START|||oops")]);
    }

    #[test]
    fn test_render_parse_render_is_stable() {
        let text = StructuredText {
            columns: vec![
                column(vec![
                    Segment::word("Intro"),
                    Segment::brk(BreakLevel::Section),
                    Segment::word("some"),
                    Segment::brk(BreakLevel::Space),
                    Segment::Formula {
                        content: "∑ x".to_string(),
                        is_block: true,
                    },
                    Segment::brk(BreakLevel::Paragraph),
                    Segment::Table {
                        rows: vec!["1\t2".to_string()],
                    },
                ]),
                column(vec![Segment::word("right column")]),
            ],
        };
        let rendered = text.render();
        let reparsed = StructuredText {
            columns: parse_columns(&rendered).into_iter().map(column).collect(),
        };
        assert_eq!(reparsed.render(), rendered);
    }

    #[test]
    fn test_segment_json_shape() {
        let json = serde_json::to_string(&Segment::brk(BreakLevel::Paragraph)).unwrap();
        assert_eq!(json, r#"{"type":"break","level":"paragraph"}"#);
        let word: Segment = serde_json::from_str(r#"{"type":"word","text":"hi"}"#).unwrap();
        assert_eq!(word, Segment::word("hi"));
    }
}
