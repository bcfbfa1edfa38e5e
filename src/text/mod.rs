//! Text-level processing: line text reconstruction, hyphenation and math.

pub mod hyphenation;
pub mod line_text;
pub mod math;

pub use hyphenation::HyphenationMerger;
pub use line_text::build_line_text;
pub use math::{contains_math, is_block_formula, mark_formula};
