//! Detection and marking of mathematical text.

use crate::pipeline::config::FormulaConfig;
use crate::pipeline::segment::{
    FORMULA_BLOCK_END, FORMULA_BLOCK_START, FORMULA_INLINE_END, FORMULA_INLINE_START,
};

/// Large operators that always make a formula a display (block) formula.
const LARGE_OPERATORS: [char; 3] = ['∑', '∏', '∫'];

/// Whether a character belongs to a mathematical or Greek code range.
pub fn is_math_char(c: char) -> bool {
    matches!(c,
        '±' | '×' | '÷'
        | '\u{0370}'..='\u{03FF}'   // Greek and Coptic
        | '\u{2070}'..='\u{209F}'   // Superscripts and subscripts
        | '\u{2100}'..='\u{214F}'   // Letterlike symbols
        | '\u{2190}'..='\u{21FF}'   // Arrows
        | '\u{2200}'..='\u{22FF}'   // Mathematical operators
        | '\u{2308}'..='\u{230B}'   // Ceiling and floor
        | '\u{27C0}'..='\u{27EF}'   // Misc mathematical symbols A
        | '\u{2980}'..='\u{29FF}'   // Misc mathematical symbols B
        | '\u{2A00}'..='\u{2AFF}'   // Supplemental mathematical operators
        | '\u{1D400}'..='\u{1D7FF}' // Mathematical alphanumeric symbols
    )
}

/// Whether text contains any mathematical character.
///
/// ```
/// use pdf_reflow::text::contains_math;
///
/// assert!(contains_math("let α ≤ β"));
/// assert!(!contains_math("plain prose"));
/// ```
pub fn contains_math(text: &str) -> bool {
    text.chars().any(is_math_char)
}

/// Whether a math span should be rendered as a block formula.
///
/// Long spans and spans containing a large operator (∑, ∏, ∫) are blocks.
pub fn is_block_formula(text: &str, config: &FormulaConfig) -> bool {
    text.chars().count() > config.block_min_chars || text.contains(&LARGE_OPERATORS[..])
}

/// Wrap text in inline or block formula sentinels.
pub fn mark_formula(text: &str, is_block: bool) -> String {
    let (start, end) = if is_block {
        (FORMULA_BLOCK_START, FORMULA_BLOCK_END)
    } else {
        (FORMULA_INLINE_START, FORMULA_INLINE_END)
    };
    format!("{}{}{}", start, text, end)
}
