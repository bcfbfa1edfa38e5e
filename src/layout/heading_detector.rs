//! Heading detection from geometry and text shape alone.
//!
//! Without font names or weights, a heading is recognized by one of three
//! signals: it is set noticeably larger than the page's body text, it ends
//! with a colon, or it is a short ALL-CAPS line.

use crate::layout::line_grouper::TextLine;
use crate::pipeline::config::BreakConfig;

/// The signal that marked a line as a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingSignal {
    /// Font size well above the median, with few items
    LargeFont,
    /// Text ends with ':'
    TrailingColon,
    /// Short line without lowercase letters
    ShortAllCaps,
}

/// Classify a line as a heading.
///
/// # Arguments
///
/// * `line` - The line under test
/// * `text` - The line's rendered text
/// * `median_font_size` - Median line font size of the page
/// * `config` - Heading thresholds
///
/// # Examples
///
/// ```
/// use pdf_reflow::layout::heading_detector::{detect_heading, HeadingSignal};
/// use pdf_reflow::layout::{PositionedItem, TextLine};
/// use pdf_reflow::pipeline::config::BreakConfig;
///
/// let item = PositionedItem {
///     text: "INTRODUCTION".into(),
///     x: 0.0,
///     y: 700.0,
///     width: 80.0,
///     height: 12.0,
///     font_size: 12.0,
/// };
/// let line = TextLine::from_items(vec![item], 700.0);
/// let signal = detect_heading(&line, "INTRODUCTION", 12.0, &BreakConfig::default());
/// assert_eq!(signal, Some(HeadingSignal::ShortAllCaps));
/// ```
pub fn detect_heading(
    line: &TextLine,
    text: &str,
    median_font_size: f32,
    config: &BreakConfig,
) -> Option<HeadingSignal> {
    if line.avg_font_size > median_font_size * config.heading_size_ratio
        && line.items.len() < config.heading_max_items
    {
        return Some(HeadingSignal::LargeFont);
    }

    let trimmed = text.trim();
    if trimmed.ends_with(':') {
        return Some(HeadingSignal::TrailingColon);
    }

    if is_short_all_caps(trimmed, config.heading_caps_max_chars) {
        return Some(HeadingSignal::ShortAllCaps);
    }

    None
}

fn is_short_all_caps(text: &str, max_chars: usize) -> bool {
    if text.chars().count() >= max_chars {
        return false;
    }
    let letters = text.chars().filter(|c| c.is_alphabetic()).count();
    letters >= 2 && !text.chars().any(|c| c.is_lowercase())
}
