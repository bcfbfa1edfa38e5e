//! Y-clustering of positioned items into text lines.

use std::cmp::Ordering;

use crate::geometry::Rect;
use crate::layout::positioned_item::PositionedItem;
use crate::pipeline::config::LineGroupingConfig;

/// A horizontal line of text.
///
/// Items are ordered left to right. Every member lies within the grouping
/// tolerance of `y`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    /// Items in left-to-right order
    pub items: Vec<PositionedItem>,
    /// Representative baseline (the anchor item's y)
    pub y: f32,
    /// Mean font size of the members
    pub avg_font_size: f32,
}

impl TextLine {
    /// Close a line from its members: sort them by x and compute the mean size.
    pub fn from_items(mut items: Vec<PositionedItem>, y: f32) -> Self {
        items.sort_by(compare_left_to_right);
        let avg_font_size = if items.is_empty() {
            0.0
        } else {
            items.iter().map(|i| i.font_size).sum::<f32>() / items.len() as f32
        };
        Self {
            items,
            y,
            avg_font_size,
        }
    }

    /// X of the first (leftmost) item.
    pub fn start_x(&self) -> f32 {
        self.items.first().map(|i| i.x).unwrap_or(0.0)
    }

    /// Right edge of the last item.
    pub fn end_x(&self) -> f32 {
        self.items.last().map(|i| i.right()).unwrap_or(0.0)
    }

    /// Bounding box over all members.
    pub fn bbox(&self) -> Rect {
        let mut iter = self.items.iter().map(|i| i.bbox());
        match iter.next() {
            Some(first) => iter.fold(first, |acc, r| acc.union(&r)),
            None => Rect::new(0.0, self.y, 0.0, 0.0),
        }
    }

    /// Item texts concatenated with single spaces.
    ///
    /// This is the coarse form used for classification (page-number
    /// patterns, heading tests). Output text goes through
    /// [`crate::text::build_line_text`] instead.
    pub fn joined_text(&self) -> String {
        self.items
            .iter()
            .map(|i| i.text.trim())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Group items into lines, top to bottom.
///
/// Items are sorted by y descending (then x, then the remaining fields, so
/// the result does not depend on input order). An item joins the open line when
/// `|y - line_y| <= max(min_y_tolerance, font_size * y_tolerance_ratio)`;
/// otherwise the open line is closed and a new one starts at that item.
pub fn group_lines(mut items: Vec<PositionedItem>, config: &LineGroupingConfig) -> Vec<TextLine> {
    items.sort_by(compare_top_to_bottom);

    let mut lines = Vec::new();
    let mut current: Vec<PositionedItem> = Vec::new();
    let mut line_y = 0.0;

    for item in items {
        if current.is_empty() {
            line_y = item.y;
            current.push(item);
            continue;
        }

        if (item.y - line_y).abs() <= config.tolerance_for(item.font_size) {
            current.push(item);
        } else {
            let members = std::mem::take(&mut current);
            lines.push(TextLine::from_items(members, line_y));
            line_y = item.y;
            current.push(item);
        }
    }

    if !current.is_empty() {
        lines.push(TextLine::from_items(current, line_y));
    }

    log::debug!("Grouped items into {} lines", lines.len());
    lines
}

fn compare_top_to_bottom(a: &PositionedItem, b: &PositionedItem) -> Ordering {
    b.y.total_cmp(&a.y)
        .then_with(|| a.x.total_cmp(&b.x))
        .then_with(|| compare_remaining(a, b))
}

fn compare_left_to_right(a: &PositionedItem, b: &PositionedItem) -> Ordering {
    a.x.total_cmp(&b.x)
        .then_with(|| b.y.total_cmp(&a.y))
        .then_with(|| compare_remaining(a, b))
}

/// Tie-break on every other field so equal positions still sort identically
/// whatever the input order.
fn compare_remaining(a: &PositionedItem, b: &PositionedItem) -> Ordering {
    a.text
        .cmp(&b.text)
        .then_with(|| a.width.total_cmp(&b.width))
        .then_with(|| a.font_size.total_cmp(&b.font_size))
        .then_with(|| a.height.total_cmp(&b.height))
}
