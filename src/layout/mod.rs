//! Layout analysis over positioned text fragments.
//!
//! Stages, in pipeline order:
//! - Fragment normalization (transform → position + font size)
//! - Y-clustering into lines
//! - Header/footer band filtering
//! - Column detection and line-to-column assignment
//! - Table row and heading classification

pub mod column_detector;
pub mod heading_detector;
pub mod line_grouper;
pub mod margin_filter;
pub mod positioned_item;
pub mod table_detector;

// Re-export main types
pub use column_detector::{Column, assign_columns, detect_columns, split_at_gutters};
pub use heading_detector::{HeadingSignal, detect_heading};
pub use line_grouper::{TextLine, group_lines};
pub use margin_filter::{filter_margin_lines, is_page_number};
pub use positioned_item::{Fragment, PositionedItem, build_items};
pub use table_detector::{classify_table_rows, format_table_row, is_table_row};
