//! Rejoining of words hyphenated across a line break.
//!
//! Typesetters split long words at line ends:
//! - "exam-" (line 1) + "ple is" (line 2) → "example is"
//! - "busi\u{00AD}" (soft hyphen) + "ness" → "business"
//!
//! The merge only happens when the next line continues in lowercase, so
//! "Smith-" + "Jones" or a dash before a new sentence are left alone.

/// Soft hyphen (U+00AD): an optional break point that is never visible
/// when the word is rejoined.
const SOFT_HYPHEN: char = '\u{00AD}';

/// Joins words split by a trailing hyphen across lines.
#[derive(Debug, Clone)]
pub struct HyphenationMerger {
    enabled: bool,
}

impl Default for HyphenationMerger {
    fn default() -> Self {
        Self::new()
    }
}

impl HyphenationMerger {
    /// Create an enabled merger.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Enable or disable merging.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Check if text ends with a continuation hyphen.
    ///
    /// A continuation hyphen is a hard (`-`) or soft (U+00AD) hyphen at the
    /// end of the text, directly preceded by a letter. A lone dash or a
    /// number range ("1990-") does not count.
    pub fn is_continuation_hyphen(text: &str) -> bool {
        let trimmed = text.trim_end();
        let mut chars = trimmed.chars().rev();
        match chars.next() {
            Some('-') | Some(SOFT_HYPHEN) => chars.next().is_some_and(|c| c.is_alphabetic()),
            _ => false,
        }
    }

    /// Whether `next` continues the hyphenated word at the end of `previous`.
    pub fn should_merge(&self, previous: &str, next: &str) -> bool {
        self.enabled
            && Self::is_continuation_hyphen(previous)
            && next.trim_start().chars().next().is_some_and(|c| c.is_lowercase())
    }

    /// Merge `next` into `previous` if it continues a hyphenated word.
    ///
    /// On merge the hyphen is stripped and `next` is appended directly, with
    /// no break of any kind at the junction. Returns whether a merge happened.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_reflow::text::HyphenationMerger;
    ///
    /// let merger = HyphenationMerger::new();
    /// let mut text = String::from("a worked exam-");
    /// assert!(merger.try_merge(&mut text, "ple is shown"));
    /// assert_eq!(text, "a worked example is shown");
    /// ```
    pub fn try_merge(&self, previous: &mut String, next: &str) -> bool {
        if !self.should_merge(previous, next) {
            return false;
        }

        let keep = previous.trim_end().len();
        previous.truncate(keep);
        previous.pop();
        previous.push_str(next.trim_start());
        true
    }
}
