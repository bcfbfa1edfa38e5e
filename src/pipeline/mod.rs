//! Page reflow pipeline.
//!
//! ```text
//! Fragment[] (content-stream runs, any order)
//!     ↓
//! [build_items]          transform → position + font size
//!     ↓
//! [group_lines]          Y-clustered, X-sorted lines
//!     ↓
//! [filter_margin_lines]  header/footer removal
//!     ↓
//! [detect_columns] / [assign_columns]
//!     ↓
//! per column: tables, formulas, hyphenation, break levels
//!     ↓
//! StructuredText (typed segments) → render() → sentinel string
//! ```
//!
//! [build_items]: crate::layout::build_items
//! [group_lines]: crate::layout::group_lines
//! [filter_margin_lines]: crate::layout::filter_margin_lines
//! [detect_columns]: crate::layout::detect_columns
//! [assign_columns]: crate::layout::assign_columns
//!
//! Every stage is a pure function of its input and the configuration.
//! Pages are independent, so callers parallelize across pages.

pub mod assembler;
pub mod breaks;
pub mod config;
pub mod segment;

// Re-export main types
pub use assembler::{StructuredTextAssembler, extract_structured_text};
pub use breaks::{BreakLevel, LineView, classify_break, median_font_size};
pub use config::{
    BreakConfig, ColumnConfig, FormulaConfig, LineGroupingConfig, MarginConfig, ReflowConfig,
    SpacingConfig, TableConfig,
};
pub use segment::{
    COLUMN_SEPARATOR, ColumnText, FORMULA_BLOCK_END, FORMULA_BLOCK_START, FORMULA_INLINE_END,
    FORMULA_INLINE_START, Segment, StructuredText, TABLE_FENCE_CLOSE, TABLE_FENCE_OPEN,
    parse_columns,
};
