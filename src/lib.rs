//! # PDF Reflow
//!
//! Layout reconstruction for PDF pages from geometry alone.
//!
//! Input is a page's unordered list of positioned text fragments, as a
//! content-stream parser emits them: a text payload plus the text matrix
//! `[a b c d e f]`. No font names, weights or structure tree are needed.
//! Output is the page's text in reading order with explicit break levels,
//! multi-column separation, fenced tables and marked formulas.
//!
//! ## Pipeline
//!
//! - **Fragment normalization**: font size from the transform, non-finite geometry dropped
//! - **Line grouping**: Y clustering with a font-size-relative tolerance
//! - **Header/footer filtering**: page numbers and sparse margin lines
//! - **Column detection**: recurring line starts separated by wide gaps
//! - **Region classification**: evenly spaced table rows, math-bearing lines
//! - **Break classification**: space / line / paragraph / section from gaps,
//!   headings, punctuation and indentation, with hyphenation rejoining
//!
//! ## Quick Start
//!
//! ```
//! use pdf_reflow::{Fragment, StructuredTextAssembler};
//!
//! let fragments = vec![
//!     Fragment::new("ParagraphTwo", 72.0, 664.0, 12.0),
//!     Fragment::new("ParagraphOne", 72.0, 700.0, 12.0),
//! ];
//!
//! let assembler = StructuredTextAssembler::new();
//! assert_eq!(assembler.extract_structured_text(&fragments), "ParagraphOne\n\nParagraphTwo");
//!
//! // Or keep the typed form
//! let structured = assembler.extract_segments(&fragments);
//! assert_eq!(structured.columns.len(), 1);
//! ```
//!
//! ## Output vocabulary
//!
//! | Token | Meaning |
//! |---|---|
//! | `" "` | same paragraph |
//! | `"\n"` | line break |
//! | `"\n\n"` | paragraph break |
//! | `"\n\n\n"` | section break / heading |
//! | ```` ```table\n…\n``` ```` | table rows, tab-separated cells |
//! | `\|\|\|FORMULA_INLINE_START\|\|\|…` | inline math (also `_BLOCK_`) |
//! | `"\n\n---\n\n"` | column separator |

#![warn(missing_docs)]

// Error handling
pub mod error;

// Geometry primitives
pub mod geometry;

// Layout analysis
pub mod layout;

// Text processing
pub mod text;

// Orchestration and output model
pub mod pipeline;

pub use error::{Error, Result};
pub use layout::{Fragment, PositionedItem, TextLine};
pub use pipeline::{
    BreakLevel, ReflowConfig, Segment, StructuredText, StructuredTextAssembler,
    extract_structured_text,
};
