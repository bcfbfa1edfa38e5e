//! Gap-aware joining of the runs that make up one line.
//!
//! Many producers emit each word, or even each glyph run, as its own
//! fragment with no explicit space character. A space is therefore inferred
//! from geometry: when the horizontal gap between two runs is wider than a
//! fraction of the font size (roughly the width of a space glyph).

use crate::layout::positioned_item::PositionedItem;
use crate::pipeline::config::SpacingConfig;

/// Join the texts of a left-to-right run of items into one string.
///
/// A single space is inserted between two items only when their gap exceeds
/// `config.space_width_ratio × font_size` of the left item, and neither side
/// already carries whitespace at the junction. The result is trimmed.
///
/// # Examples
///
/// ```
/// use pdf_reflow::layout::PositionedItem;
/// use pdf_reflow::pipeline::config::SpacingConfig;
/// use pdf_reflow::text::build_line_text;
///
/// let run = |text: &str, x: f32, width: f32| PositionedItem {
///     text: text.into(), x, y: 0.0, width, height: 10.0, font_size: 10.0,
/// };
/// let items = vec![run("Hel", 0.0, 15.0), run("lo", 15.5, 10.0), run("world", 30.0, 25.0)];
/// assert_eq!(build_line_text(&items, &SpacingConfig::default()), "Hello world");
/// ```
pub fn build_line_text(items: &[PositionedItem], config: &SpacingConfig) -> String {
    let mut text = String::new();

    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            let prev = &items[idx - 1];
            let gap = prev.bbox().horizontal_gap_to(&item.bbox());
            let has_space = text.ends_with(char::is_whitespace)
                || item.text.starts_with(char::is_whitespace);
            if !has_space && gap > config.space_width_ratio * prev.font_size {
                text.push(' ');
            }
        }
        text.push_str(&item.text);
    }

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, x: f32, width: f32) -> PositionedItem {
        PositionedItem {
            text: text.to_string(),
            x,
            y: 100.0,
            width,
            height: 12.0,
            font_size: 12.0,
        }
    }

    fn build(items: &[PositionedItem]) -> String {
        build_line_text(items, &SpacingConfig::default())
    }

    #[test]
    fn test_adjacent_runs_are_joined() {
        assert_eq!(build(&[run("exam", 0.0, 24.0), run("ple", 24.0, 18.0)]), "example");
    }

    #[test]
    fn test_gap_inserts_space() {
        // 4pt gap > 0.25 * 12 = 3pt
        assert_eq!(build(&[run("two", 0.0, 18.0), run("words", 22.0, 30.0)]), "two words");
    }

    #[test]
    fn test_small_gap_no_space() {
        // Kerning-sized 2pt gap
        assert_eq!(build(&[run("ke", 0.0, 12.0), run("rn", 14.0, 12.0)]), "kern");
    }

    #[test]
    fn test_no_double_space() {
        assert_eq!(build(&[run("end ", 0.0, 24.0), run("start", 40.0, 30.0)]), "end start");
        assert_eq!(build(&[run("end", 0.0, 18.0), run(" start", 40.0, 36.0)]), "end start");
    }

    #[test]
    fn test_trimmed() {
        assert_eq!(build(&[run("  padded  ", 0.0, 60.0)]), "padded");
    }

    #[test]
    fn test_empty() {
        assert_eq!(build(&[]), "");
    }
}
