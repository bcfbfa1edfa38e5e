//! Removal of running headers, footers and page numbers.
//!
//! Only lines inside the top or bottom band of the page's text extent are
//! candidates, and only boilerplate-looking ones are dropped: page-number
//! patterns, or lines that are both short and sparse. Body text that
//! happens to sit near a margin is kept.

use lazy_static::lazy_static;
use regex::Regex;

use crate::layout::line_grouper::TextLine;
use crate::pipeline::config::MarginConfig;

lazy_static! {
    /// "12", "Page 3", "page 3 of 10"
    static ref RE_PAGE_NUMBER: Regex = Regex::new(r"(?i)^(Page\s+)?\d+(\s+of\s+\d+)?$").unwrap();
}

/// Whether `text` is a bare page-number label.
pub fn is_page_number(text: &str) -> bool {
    RE_PAGE_NUMBER.is_match(text.trim())
}

/// Drop header/footer lines. Pages with fewer than `config.min_lines` lines
/// are returned unchanged.
pub fn filter_margin_lines(lines: Vec<TextLine>, config: &MarginConfig) -> Vec<TextLine> {
    if lines.len() < config.min_lines {
        return lines;
    }

    let max_y = lines.iter().map(|l| l.y).fold(f32::NEG_INFINITY, f32::max);
    let min_y = lines.iter().map(|l| l.y).fold(f32::INFINITY, f32::min);
    let band = (max_y - min_y) * config.band_ratio;
    let header_floor = max_y - band;
    let footer_ceiling = min_y + band;

    let before = lines.len();
    let kept: Vec<TextLine> = lines
        .into_iter()
        .filter(|line| {
            let in_band = line.y >= header_floor || line.y <= footer_ceiling;
            !(in_band && is_boilerplate(line, config))
        })
        .collect();

    if kept.len() < before {
        log::debug!("Removed {} header/footer lines", before - kept.len());
    }
    kept
}

fn is_boilerplate(line: &TextLine, config: &MarginConfig) -> bool {
    let text = line.joined_text();
    if is_page_number(&text) {
        return true;
    }
    text.chars().count() < config.short_line_max_chars
        && line.items.len() < config.sparse_line_max_items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::positioned_item::PositionedItem;

    fn line(words: &[&str], y: f32) -> TextLine {
        let items = words
            .iter()
            .enumerate()
            .map(|(i, w)| PositionedItem {
                text: w.to_string(),
                x: i as f32 * 60.0,
                y,
                width: 50.0,
                height: 12.0,
                font_size: 12.0,
            })
            .collect();
        TextLine::from_items(items, y)
    }

    fn body(y: f32) -> TextLine {
        line(&["The", "quick", "brown", "fox", "jumps", "over"], y)
    }

    #[test]
    fn test_page_number_patterns() {
        assert!(is_page_number("12"));
        assert!(is_page_number("Page 3"));
        assert!(is_page_number("page 3 of 10"));
        assert!(is_page_number("  PAGE 7  "));
        assert!(!is_page_number("Chapter 3"));
        assert!(!is_page_number("3 apples"));
    }

    #[test]
    fn test_noop_below_min_lines() {
        let lines = vec![line(&["1"], 800.0), body(500.0), line(&["2"], 100.0)];
        assert_eq!(filter_margin_lines(lines, &MarginConfig::default()).len(), 3);
    }

    #[test]
    fn test_footer_page_number_removed() {
        let lines = vec![
            body(800.0),
            body(700.0),
            body(600.0),
            body(500.0),
            body(400.0),
            line(&["Page", "3", "of", "10"], 100.0),
        ];
        let kept = filter_margin_lines(lines, &MarginConfig::default());
        assert_eq!(kept.len(), 5);
        assert!(kept.iter().all(|l| !l.joined_text().contains("Page")));
    }

    #[test]
    fn test_short_sparse_header_removed() {
        let lines = vec![
            line(&["Journal", "of", "Things"], 800.0),
            body(700.0),
            body(600.0),
            body(500.0),
            body(400.0),
            body(300.0),
        ];
        let kept = filter_margin_lines(lines, &MarginConfig::default());
        assert_eq!(kept.len(), 5);
        assert_eq!(kept[0].y, 700.0);
    }

    #[test]
    fn test_dense_margin_line_kept() {
        let lines = vec![body(800.0), body(700.0), body(600.0), body(500.0), body(100.0)];
        let kept = filter_margin_lines(lines, &MarginConfig::default());
        assert_eq!(kept.len(), 5);
    }

    #[test]
    fn test_short_line_outside_band_kept() {
        let lines = vec![
            body(800.0),
            body(700.0),
            line(&["Short"], 450.0),
            body(300.0),
            body(100.0),
        ];
        let kept = filter_margin_lines(lines, &MarginConfig::default());
        assert_eq!(kept.len(), 5);
    }
}
