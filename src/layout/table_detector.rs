//! Table row detection from regular inter-item spacing.
//!
//! A line whose items are separated by several wide, evenly sized gaps reads
//! as a row of a table rather than as prose. Consecutive rows are later
//! emitted as one fenced table block.

use crate::layout::line_grouper::TextLine;
use crate::pipeline::config::TableConfig;

/// Horizontal gaps between consecutive items of a line.
fn item_gaps(line: &TextLine) -> Vec<f32> {
    line.items
        .windows(2)
        .map(|pair| pair[0].bbox().horizontal_gap_to(&pair[1].bbox()))
        .collect()
}

/// Whether a line looks like a table row.
///
/// Requires at least two items and at least two gaps wider than
/// `config.min_column_gap`, whose (population) variance is below
/// `config.max_variance_ratio` times their mean.
pub fn is_table_row(line: &TextLine, config: &TableConfig) -> bool {
    if line.items.len() < 2 {
        return false;
    }

    let wide: Vec<f32> = item_gaps(line)
        .into_iter()
        .filter(|&g| g > config.min_column_gap)
        .collect();
    if wide.len() < 2 {
        return false;
    }

    let n = wide.len() as f32;
    let mean = wide.iter().sum::<f32>() / n;
    let variance = wide.iter().map(|g| (g - mean).powi(2)).sum::<f32>() / n;

    variance < mean * config.max_variance_ratio
}

/// A weaker tabular signal used only for rows next to a table row.
fn is_ambiguous_row(line: &TextLine, config: &TableConfig) -> bool {
    line.items.len() >= 2
        && item_gaps(line)
            .iter()
            .any(|&g| g > config.min_column_gap)
}

/// Classify each line as table row or not.
///
/// Lines are first classified independently. A line that fails the strict
/// test but sits directly above or below a strict row is recruited when it
/// shows at least one column gap, so an irregular row (a missing cell, a
/// merged cell, a sparse last row) stays inside its table.
pub fn classify_table_rows(lines: &[TextLine], config: &TableConfig) -> Vec<bool> {
    let strict: Vec<bool> = lines.iter().map(|l| is_table_row(l, config)).collect();
    let mut flags = strict.clone();

    for i in 0..lines.len() {
        if strict[i] {
            continue;
        }
        let above = i > 0 && strict[i - 1];
        let below = i + 1 < lines.len() && strict[i + 1];
        if (above || below) && is_ambiguous_row(&lines[i], config) {
            flags[i] = true;
        }
    }

    let rows = flags.iter().filter(|&&f| f).count();
    if rows > 0 {
        log::debug!("Classified {} of {} lines as table rows", rows, lines.len());
    }
    flags
}

/// Render one table row: cells separated by `\t` where the gap exceeds
/// `config.tab_gap`, otherwise by a single space.
pub fn format_table_row(line: &TextLine, config: &TableConfig) -> String {
    let mut row = String::new();
    for (idx, item) in line.items.iter().enumerate() {
        if idx > 0 {
            let gap = line.items[idx - 1].bbox().horizontal_gap_to(&item.bbox());
            row.push(if gap > config.tab_gap { '\t' } else { ' ' });
        }
        row.push_str(item.text.trim());
    }
    row
}
