//! Property tests for page reflow
//!
//! Pages are generated as grids of lowercase words with body-text leading,
//! so no heading, table, formula or hyphenation rule fires and every line
//! carries enough items to survive header/footer filtering.

use proptest::prelude::*;

use pdf_reflow::pipeline::StructuredText;
use pdf_reflow::{Fragment, extract_structured_text};

const FONT_SIZE: f32 = 12.0;
const LEADING: f32 = 14.0;

/// Lines of 5 to 8 words, 1 to 10 lines.
fn page_words() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec("[a-z]{1,8}", 5..9), 1..11)
}

/// One fragment per word, lines top to bottom starting at y=700.
fn page_fragments(lines: &[Vec<String>]) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    for (i, words) in lines.iter().enumerate() {
        let y = 700.0 - i as f32 * LEADING;
        let mut x = 72.0;
        for word in words {
            let width = word.chars().count() as f32 * FONT_SIZE * 0.5;
            fragments.push(Fragment::new(word.clone(), x, y, FONT_SIZE).with_width(width));
            x += width + FONT_SIZE * 0.4;
        }
    }
    fragments
}

proptest! {
    #[test]
    fn prop_idempotent(lines in page_words()) {
        let fragments = page_fragments(&lines);
        let first = extract_structured_text(&fragments);
        let second = extract_structured_text(&fragments);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_permutation_invariant(
        (ordered, shuffled) in page_words().prop_flat_map(|lines| {
            let fragments = page_fragments(&lines);
            (Just(fragments.clone()), Just(fragments).prop_shuffle())
        })
    ) {
        prop_assert_eq!(
            extract_structured_text(&ordered),
            extract_structured_text(&shuffled)
        );
    }

    #[test]
    fn prop_single_column_keeps_every_word_in_order(lines in page_words()) {
        let output = extract_structured_text(&page_fragments(&lines));
        let expected: Vec<&str> = lines.iter().flatten().map(String::as_str).collect();
        let actual: Vec<&str> = output.split_whitespace().collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_render_parse_render_is_stable(lines in page_words()) {
        let rendered = extract_structured_text(&page_fragments(&lines));
        prop_assert_eq!(StructuredText::parse(&rendered).render(), rendered);
    }
}
