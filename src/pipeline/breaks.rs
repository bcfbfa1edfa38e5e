//! Break-level classification between consecutive lines.
//!
//! The vertical gap between two lines, normalized by the page's median font
//! size, is the main signal. It is refined by heading detection, sentence
//! punctuation and first-line indentation. Rules are evaluated in priority
//! order and the first match wins.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::layout::heading_detector::detect_heading;
use crate::layout::line_grouper::TextLine;
use crate::pipeline::config::BreakConfig;

lazy_static! {
    /// Sentence-final punctuation, optionally followed by a closing quote
    static ref RE_SENTENCE_END: Regex = Regex::new(r#"[.!?]["'”’]?\s*$"#).unwrap();
}

/// Ordinal strength of the discontinuity between two pieces of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakLevel {
    /// Same paragraph; rendered as a single space
    Space = 1,
    /// Line break within a block
    Line = 2,
    /// Paragraph break
    Paragraph = 3,
    /// Section break or heading boundary
    Section = 4,
}

impl BreakLevel {
    /// Numeric level, 1 (space) through 4 (section).
    pub fn level(self) -> u8 {
        self as u8
    }

    /// Break level for a numeric level, if in range.
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Space),
            2 => Some(Self::Line),
            3 => Some(Self::Paragraph),
            4 => Some(Self::Section),
            _ => None,
        }
    }

    /// The literal separator this level renders as.
    pub fn separator(self) -> &'static str {
        match self {
            Self::Space => " ",
            Self::Line => "\n",
            Self::Paragraph => "\n\n",
            Self::Section => "\n\n\n",
        }
    }
}

/// A line together with its rendered text.
#[derive(Debug, Clone, Copy)]
pub struct LineView<'a> {
    /// The line geometry
    pub line: &'a TextLine,
    /// The line's own rendered text
    pub text: &'a str,
}

/// Decide the break between `prev` and `curr`.
///
/// `accumulated` is the text emitted so far for the current run. It differs
/// from `prev.text` when earlier lines were merged by hyphenation.
///
/// Rules, in priority order:
/// 1. Either line is a heading → section
/// 2. Normalized gap > `section_gap` → section
/// 3. Normalized gap > `paragraph_gap` → paragraph
/// 4. Gap > `sentence_gap`, previous text ends a sentence and the current
///    line starts with a capital → paragraph
/// 5. Current line indented by more than `indent_threshold` → paragraph
/// 6. Normalized gap > `line_gap` → line
/// 7. Otherwise → space
pub fn classify_break(
    prev: LineView<'_>,
    curr: LineView<'_>,
    accumulated: &str,
    median_font_size: f32,
    config: &BreakConfig,
) -> BreakLevel {
    let median = median_font_size.max(f32::EPSILON);
    let normalized_gap = (prev.line.y - curr.line.y) / median;

    let level = if let Some(signal) = detect_heading(curr.line, curr.text, median, config)
        .or_else(|| detect_heading(prev.line, prev.text, median, config))
    {
        log::trace!("Heading signal {:?} forces section break", signal);
        BreakLevel::Section
    } else if normalized_gap > config.section_gap {
        BreakLevel::Section
    } else if normalized_gap > config.paragraph_gap {
        BreakLevel::Paragraph
    } else if normalized_gap > config.sentence_gap
        && ends_sentence(accumulated)
        && starts_capitalized(curr.text)
    {
        BreakLevel::Paragraph
    } else if curr.line.start_x() - prev.line.start_x() > config.indent_threshold {
        BreakLevel::Paragraph
    } else if normalized_gap > config.line_gap {
        BreakLevel::Line
    } else {
        BreakLevel::Space
    };

    log::trace!(
        "Break {:?} between y={:.1} and y={:.1} (normalized gap {:.2})",
        level,
        prev.line.y,
        curr.line.y,
        normalized_gap
    );
    level
}

/// Whether text ends with sentence punctuation.
pub fn ends_sentence(text: &str) -> bool {
    RE_SENTENCE_END.is_match(text)
}

fn starts_capitalized(text: &str) -> bool {
    text.trim_start().chars().next().is_some_and(|c| c.is_uppercase())
}

/// Upper median of the lines' average font sizes (`sorted[n / 2]`).
///
/// Returns `None` for an empty slice.
pub fn median_font_size(lines: &[TextLine]) -> Option<f32> {
    if lines.is_empty() {
        return None;
    }
    let mut sizes: Vec<f32> = lines.iter().map(|l| l.avg_font_size).collect();
    sizes.sort_by(f32::total_cmp);
    Some(sizes[sizes.len() / 2])
}
