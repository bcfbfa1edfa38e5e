//! Column detection from recurring line-start positions.
//!
//! A page is split into columns by looking at where lines *start*. A new
//! column boundary needs two signals: a wide horizontal jump from the
//! previous boundary, and enough lines starting near it that it is not just
//! a one-off indented line or a centered caption.

use crate::layout::line_grouper::TextLine;
use crate::layout::table_detector::classify_table_rows;
use crate::pipeline::config::{ColumnConfig, TableConfig};

/// Line starts closer than this are treated as the same start position.
const START_DEDUP_EPSILON: f32 = 0.5;

/// A column: its start x and its lines in top-to-bottom order.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Representative start x
    pub x: f32,
    /// Member lines, top to bottom
    pub lines: Vec<TextLine>,
}

/// Detect column start x-coordinates, in ascending order.
///
/// Returns an empty vector for an empty page and a single entry when the page
/// carries no multi-column signal.
///
/// # Arguments
///
/// * `lines` - Lines of the page (any order)
/// * `config` - Gap and recurrence thresholds
///
/// # Examples
///
/// ```
/// use pdf_reflow::layout::{detect_columns, TextLine, PositionedItem};
/// use pdf_reflow::pipeline::config::ColumnConfig;
///
/// let line = |x: f32, y: f32| {
///     let item = PositionedItem {
///         text: "text".into(),
///         x,
///         y,
///         width: 150.0,
///         height: 10.0,
///         font_size: 10.0,
///     };
///     TextLine::from_items(vec![item], y)
/// };
/// let lines = vec![line(0.0, 700.0), line(400.0, 695.0), line(0.0, 680.0), line(400.0, 675.0)];
/// assert_eq!(detect_columns(&lines, &ColumnConfig::default()), vec![0.0, 400.0]);
/// ```
pub fn detect_columns(lines: &[TextLine], config: &ColumnConfig) -> Vec<f32> {
    let mut starts: Vec<f32> = lines
        .iter()
        .filter(|l| !l.items.is_empty())
        .map(|l| l.start_x())
        .collect();
    if starts.is_empty() {
        return Vec::new();
    }
    starts.sort_by(f32::total_cmp);
    starts.dedup_by(|a, b| (*a - *b).abs() < START_DEDUP_EPSILON);

    let page_width = lines
        .iter()
        .filter(|l| !l.items.is_empty())
        .map(|l| l.end_x())
        .fold(0.0_f32, f32::max);
    let threshold = config.min_gap.max(page_width * config.gap_width_ratio);
    let min_lines = lines.len() as f32 * config.min_line_fraction;

    let mut columns = vec![starts[0]];
    for &candidate in &starts[1..] {
        let previous = columns[columns.len() - 1];
        if candidate - previous <= threshold {
            continue;
        }

        let recurrences = lines
            .iter()
            .filter(|l| {
                !l.items.is_empty()
                    && (l.start_x() - candidate).abs() <= config.recurrence_tolerance
            })
            .count();
        if recurrences as f32 >= min_lines {
            columns.push(candidate);
        } else {
            log::trace!(
                "Rejected column candidate x={:.1}: {} recurring starts (< {:.1})",
                candidate,
                recurrences,
                min_lines
            );
        }
    }

    log::debug!(
        "Detected {} column(s) at {:?} (page width {:.1}, gap threshold {:.1})",
        columns.len(),
        columns,
        page_width,
        threshold
    );
    columns
}

/// Assign every line to the column whose start x is nearest.
///
/// Ties go to the leftmost column. Line order within each column is kept,
/// so top-to-bottom input stays top-to-bottom. The result has one entry per
/// column start, left to right; columns may be empty.
pub fn assign_columns(lines: Vec<TextLine>, columns: &[f32]) -> Vec<Column> {
    let mut result: Vec<Column> = columns
        .iter()
        .map(|&x| Column {
            x,
            lines: Vec::new(),
        })
        .collect();
    if result.is_empty() {
        return result;
    }

    for line in lines {
        let start = line.start_x();
        let mut best = 0;
        let mut best_distance = f32::INFINITY;
        for (idx, column) in result.iter().enumerate() {
            let distance = (start - column.x).abs();
            if distance < best_distance {
                best = idx;
                best_distance = distance;
            }
        }
        result[best].lines.push(line);
    }

    result
}

/// Split lines that span a column gutter.
///
/// Columns set on a shared baseline group into one line that starts in the
/// leftmost column, which hides every other column start. A line is cut
/// where the horizontal gap between consecutive items exceeds the column
/// gap threshold and the run after the gap starts at a position that
/// recurs on at least two lines (and at least `min_line_fraction` of them).
/// Table rows (see [`classify_table_rows`]) are never cut, nor do they count
/// as recurrences.
///
/// Line order is kept; the pieces of one line come out left to right.
pub fn split_at_gutters(
    lines: Vec<TextLine>,
    columns: &ColumnConfig,
    tables: &TableConfig,
) -> Vec<TextLine> {
    let page_width = lines.iter().map(|l| l.end_x()).fold(0.0_f32, f32::max);
    let threshold = columns.min_gap.max(page_width * columns.gap_width_ratio);
    let table_rows = classify_table_rows(&lines, tables);

    // Every run start of every non-table line: line starts plus starts after a wide gap
    let run_starts: Vec<Vec<f32>> = lines
        .iter()
        .zip(&table_rows)
        .map(|(line, &is_row)| {
            if is_row || line.items.is_empty() {
                return Vec::new();
            }
            let mut starts = vec![line.start_x()];
            starts.extend(
                gutter_cuts(line, threshold)
                    .into_iter()
                    .map(|i| line.items[i].x),
            );
            starts
        })
        .collect();

    let min_lines = (lines.len() as f32 * columns.min_line_fraction).max(2.0);
    let recurs = |x: f32| {
        let count = run_starts
            .iter()
            .filter(|starts| {
                starts
                    .iter()
                    .any(|s| (s - x).abs() <= columns.recurrence_tolerance)
            })
            .count();
        count as f32 >= min_lines
    };

    let mut result = Vec::with_capacity(lines.len());
    let mut splits = 0;
    for (line, is_row) in lines.into_iter().zip(table_rows) {
        if is_row {
            result.push(line);
            continue;
        }
        let cuts: Vec<usize> = gutter_cuts(&line, threshold)
            .into_iter()
            .filter(|&i| recurs(line.items[i].x))
            .collect();
        if cuts.is_empty() {
            result.push(line);
            continue;
        }

        splits += cuts.len();
        let y = line.y;
        let mut items = line.items;
        for &cut in cuts.iter().rev() {
            let tail = items.split_off(cut);
            result.push(TextLine::from_items(tail, y));
        }
        result.push(TextLine::from_items(items, y));
        // Pieces were pushed right to left
        let pieces = cuts.len() + 1;
        let len = result.len();
        result[len - pieces..].reverse();
    }

    if splits > 0 {
        log::debug!(
            "Split {} line(s) at column gutters (gap threshold {:.1})",
            splits,
            threshold
        );
    }
    result
}

/// Indices of items preceded by a gap wider than `threshold`.
fn gutter_cuts(line: &TextLine, threshold: f32) -> Vec<usize> {
    (1..line.items.len())
        .filter(|&i| line.items[i].x - line.items[i - 1].right() > threshold)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::positioned_item::PositionedItem;

    fn mock_line(x: f32, y: f32, width: f32) -> TextLine {
        let item = PositionedItem {
            text: "text".to_string(),
            x,
            y,
            width,
            height: 12.0,
            font_size: 12.0,
        };
        TextLine::from_items(vec![item], y)
    }

    /// One grouped line made of `(x, width)` runs, all on baseline `y`.
    fn mock_merged_line(runs: &[(f32, f32)], y: f32) -> TextLine {
        let items = runs
            .iter()
            .map(|&(x, width)| PositionedItem {
                text: format!("w{}", x),
                x,
                y,
                width,
                height: 10.0,
                font_size: 10.0,
            })
            .collect();
        TextLine::from_items(items, y)
    }

    fn two_column_lines() -> Vec<TextLine> {
        let mut lines = Vec::new();
        for i in 0..10 {
            let y = 700.0 - i as f32 * 14.0;
            lines.push(mock_line(0.0, y, 200.0));
            lines.push(mock_line(400.0, y - 7.0, 200.0));
        }
        lines
    }

    #[test]
    fn test_single_column() {
        let lines: Vec<_> = (0..5)
            .map(|i| mock_line(72.0, 700.0 - i as f32 * 14.0, 400.0))
            .collect();
        assert_eq!(detect_columns(&lines, &ColumnConfig::default()), vec![72.0]);
    }

    #[test]
    fn test_two_columns() {
        let columns = detect_columns(&two_column_lines(), &ColumnConfig::default());
        assert_eq!(columns, vec![0.0, 400.0]);
    }

    #[test]
    fn test_empty_page() {
        assert!(detect_columns(&[], &ColumnConfig::default()).is_empty());
    }

    #[test]
    fn test_indent_is_not_a_column() {
        // Paragraph indents are well below the gap threshold
        let mut lines: Vec<_> = (0..10)
            .map(|i| mock_line(72.0, 700.0 - i as f32 * 14.0, 400.0))
            .collect();
        lines.push(mock_line(90.0, 500.0, 380.0));
        assert_eq!(detect_columns(&lines, &ColumnConfig::default()), vec![72.0]);
    }

    #[test]
    fn test_one_off_offset_rejected_by_frequency_gate() {
        // A single centered caption far to the right: wide gap, but it only
        // starts 1 of 21 lines (< 10%)
        let mut lines: Vec<_> = (0..20)
            .map(|i| mock_line(0.0, 700.0 - i as f32 * 14.0, 500.0))
            .collect();
        lines.push(mock_line(300.0, 400.0, 100.0));
        assert_eq!(detect_columns(&lines, &ColumnConfig::default()), vec![0.0]);
    }

    #[test]
    fn test_threshold_scales_with_page_width() {
        // 100pt jump on a 1000pt wide page is below 15% of the width
        let mut lines = Vec::new();
        for i in 0..6 {
            let y = 700.0 - i as f32 * 14.0;
            lines.push(mock_line(0.0, y, 1000.0));
            lines.push(mock_line(100.0, y - 7.0, 300.0));
        }
        assert_eq!(detect_columns(&lines, &ColumnConfig::default()), vec![0.0]);
    }

    #[test]
    fn test_assign_nearest_column() {
        let columns = vec![0.0, 400.0];
        let lines = vec![
            mock_line(10.0, 700.0, 100.0),
            mock_line(390.0, 690.0, 100.0),
            mock_line(150.0, 680.0, 100.0),
        ];
        let assigned = assign_columns(lines, &columns);
        assert_eq!(assigned.len(), 2);
        assert_eq!(assigned[0].lines.len(), 2);
        assert_eq!(assigned[1].lines.len(), 1);
        assert_eq!(assigned[1].lines[0].start_x(), 390.0);
    }

    #[test]
    fn test_assign_tie_goes_left() {
        let assigned = assign_columns(vec![mock_line(200.0, 700.0, 50.0)], &[0.0, 400.0]);
        assert_eq!(assigned[0].lines.len(), 1);
        assert!(assigned[1].lines.is_empty());
    }

    #[test]
    fn test_assign_preserves_order() {
        let assigned = assign_columns(two_column_lines(), &[0.0, 400.0]);
        for column in &assigned {
            assert_eq!(column.lines.len(), 10);
            assert!(column.lines.windows(2).all(|w| w[0].y > w[1].y));
        }
    }

    #[test]
    fn test_shared_baseline_lines_split_at_gutter() {
        // Both columns on the same baselines: each grouped line holds a left
        // run (0..150, word gaps of 4) and a right run starting at 400
        let lines: Vec<_> = (0..6)
            .map(|i| {
                let y = 700.0 - i as f32 * 14.0;
                mock_merged_line(&[(0.0, 70.0), (74.0, 76.0), (400.0, 70.0), (474.0, 76.0)], y)
            })
            .collect();

        let split = split_at_gutters(lines, &ColumnConfig::default(), &TableConfig::default());
        assert_eq!(split.len(), 12);
        let starts: Vec<f32> = split.iter().map(|l| l.start_x()).collect();
        assert_eq!(&starts[..4], &[0.0, 400.0, 0.0, 400.0]);
        assert!(split.windows(2).all(|w| w[0].y >= w[1].y));
        assert!(split.iter().all(|l| l.items.len() == 2));

        assert_eq!(
            detect_columns(&split, &ColumnConfig::default()),
            vec![0.0, 400.0]
        );
    }

    #[test]
    fn test_one_off_wide_gap_not_split() {
        // Only one line has a run at x=400
        let mut lines: Vec<_> = (0..5)
            .map(|i| mock_merged_line(&[(0.0, 70.0), (74.0, 76.0)], 700.0 - i as f32 * 14.0))
            .collect();
        lines.push(mock_merged_line(&[(0.0, 40.0), (400.0, 20.0)], 600.0));

        let split = split_at_gutters(
            lines.clone(),
            &ColumnConfig::default(),
            &TableConfig::default(),
        );
        assert_eq!(split, lines);
    }

    #[test]
    fn test_table_rows_not_split() {
        // Evenly spaced cells with gaps above the column threshold recur on
        // every row, but table rows stay whole
        let lines: Vec<_> = (0..4)
            .map(|i| {
                let y = 700.0 - i as f32 * 14.0;
                mock_merged_line(&[(0.0, 40.0), (140.0, 40.0), (280.0, 40.0)], y)
            })
            .collect();

        let split = split_at_gutters(
            lines.clone(),
            &ColumnConfig::default(),
            &TableConfig::default(),
        );
        assert_eq!(split, lines);
    }
}
