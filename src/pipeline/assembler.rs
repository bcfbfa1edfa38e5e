//! Orchestration of the full page pipeline.

use crate::error::Result;
use crate::layout::column_detector::{assign_columns, detect_columns, split_at_gutters};
use crate::layout::line_grouper::{TextLine, group_lines};
use crate::layout::margin_filter::filter_margin_lines;
use crate::layout::positioned_item::{Fragment, build_items};
use crate::layout::table_detector::{classify_table_rows, format_table_row};
use crate::pipeline::breaks::{BreakLevel, LineView, classify_break, median_font_size};
use crate::pipeline::config::ReflowConfig;
use crate::pipeline::segment::{ColumnText, Segment, StructuredText};
use crate::text::hyphenation::HyphenationMerger;
use crate::text::line_text::build_line_text;
use crate::text::math::{contains_math, is_block_formula};

/// Converts one page's fragments into structured text.
///
/// Stateless across calls: each page is processed from scratch, so one
/// assembler can be shared by reference across threads that each handle
/// different pages.
///
/// # Examples
///
/// ```
/// use pdf_reflow::layout::Fragment;
/// use pdf_reflow::pipeline::StructuredTextAssembler;
///
/// let fragments = vec![
///     Fragment::new("ParagraphOne", 72.0, 700.0, 12.0),
///     Fragment::new("ParagraphTwo", 72.0, 664.0, 12.0),
/// ];
/// let assembler = StructuredTextAssembler::new();
/// assert_eq!(assembler.extract_structured_text(&fragments), "ParagraphOne\n\nParagraphTwo");
/// ```
#[derive(Debug, Clone)]
pub struct StructuredTextAssembler {
    config: ReflowConfig,
    hyphenation: HyphenationMerger,
}

impl Default for StructuredTextAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// What the previous emitted line turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EmittedKind {
    Words,
    InlineFormula,
    BlockFormula,
    Table,
}

impl StructuredTextAssembler {
    /// Create an assembler with default configuration.
    pub fn new() -> Self {
        let config = ReflowConfig::default();
        let hyphenation = HyphenationMerger::new().with_enabled(config.enable_hyphenation);
        Self {
            config,
            hyphenation,
        }
    }

    /// Create an assembler with a custom configuration.
    ///
    /// Fails with [`crate::Error::InvalidConfig`] when a threshold is
    /// non-finite or out of range.
    pub fn with_config(config: ReflowConfig) -> Result<Self> {
        config.validate()?;
        let hyphenation = HyphenationMerger::new().with_enabled(config.enable_hyphenation);
        Ok(Self {
            config,
            hyphenation,
        })
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ReflowConfig {
        &self.config
    }

    /// Extract a page as a sentinel-marked string.
    ///
    /// Returns `""` when no usable fragment remains.
    pub fn extract_structured_text(&self, fragments: &[Fragment]) -> String {
        self.extract_segments(fragments).render()
    }

    /// Extract a page as typed segments.
    ///
    /// 1. Build positioned items
    /// 2. Group into lines and drop header/footer lines
    /// 3. Cut lines that span a column gutter, then detect columns (one
    ///    column when there is no column signal)
    /// 4. Per column, top to bottom: classify tables, formulas and breaks
    pub fn extract_segments(&self, fragments: &[Fragment]) -> StructuredText {
        let items = build_items(fragments, &self.config.spacing);
        if items.is_empty() {
            return StructuredText::default();
        }

        let lines = group_lines(items, &self.config.lines);
        let lines = filter_margin_lines(lines, &self.config.margins);
        let lines = split_at_gutters(lines, &self.config.columns, &self.config.tables);
        let Some(median) = median_font_size(&lines) else {
            return StructuredText::default();
        };

        let column_starts = detect_columns(&lines, &self.config.columns);
        log::debug!(
            "Page: {} lines, median font size {:.2}, {} column(s)",
            lines.len(),
            median,
            column_starts.len()
        );

        let columns = if column_starts.len() <= 1 {
            let x = column_starts.first().copied().unwrap_or(0.0);
            vec![ColumnText {
                x,
                segments: self.build_column(&lines, median),
            }]
        } else {
            assign_columns(lines, &column_starts)
                .into_iter()
                .map(|column| ColumnText {
                    x: column.x,
                    segments: self.build_column(&column.lines, median),
                })
                .collect()
        };

        StructuredText { columns }
    }

    /// Build the segments of one column whose lines are top to bottom.
    fn build_column(&self, lines: &[TextLine], median: f32) -> Vec<Segment> {
        let table_rows = classify_table_rows(lines, &self.config.tables);
        let texts: Vec<String> = lines
            .iter()
            .map(|l| build_line_text(&l.items, &self.config.spacing))
            .collect();

        let mut segments: Vec<Segment> = Vec::new();
        let mut pending_rows: Vec<String> = Vec::new();
        let mut previous: Option<(usize, EmittedKind)> = None;

        for (idx, line) in lines.iter().enumerate() {
            let text = texts[idx].as_str();
            if text.is_empty() {
                continue;
            }

            if table_rows[idx] {
                if pending_rows.is_empty() {
                    if let Some((prev_idx, _)) = previous {
                        let level = self
                            .break_between(lines, &texts, &segments, prev_idx, idx, median)
                            .max(BreakLevel::Paragraph);
                        segments.push(Segment::brk(level));
                    }
                }
                pending_rows.push(format_table_row(line, &self.config.tables));
                previous = Some((idx, EmittedKind::Table));
                continue;
            }

            if !pending_rows.is_empty() {
                segments.push(Segment::Table {
                    rows: std::mem::take(&mut pending_rows),
                });
            }

            let is_math = contains_math(text);
            let is_block = is_math && is_block_formula(text, &self.config.formulas);

            if let Some((prev_idx, prev_kind)) = previous {
                if prev_kind == EmittedKind::Words && !is_math {
                    if let Some(Segment::Word { text: run }) = segments.last_mut() {
                        if self.hyphenation.try_merge(run, text) {
                            log::trace!("Merged hyphenated continuation {:?}", text);
                            previous = Some((idx, EmittedKind::Words));
                            continue;
                        }
                    }
                }

                let mut level = self.break_between(lines, &texts, &segments, prev_idx, idx, median);
                if is_block
                    || matches!(prev_kind, EmittedKind::Table | EmittedKind::BlockFormula)
                {
                    level = level.max(BreakLevel::Paragraph);
                }
                segments.push(Segment::brk(level));
            }

            let kind = if is_math {
                segments.push(Segment::Formula {
                    content: text.to_string(),
                    is_block,
                });
                if is_block {
                    EmittedKind::BlockFormula
                } else {
                    EmittedKind::InlineFormula
                }
            } else {
                segments.push(Segment::word(text));
                EmittedKind::Words
            };
            previous = Some((idx, kind));
        }

        if !pending_rows.is_empty() {
            segments.push(Segment::Table { rows: pending_rows });
        }

        segments
    }

    fn break_between(
        &self,
        lines: &[TextLine],
        texts: &[String],
        segments: &[Segment],
        prev_idx: usize,
        idx: usize,
        median: f32,
    ) -> BreakLevel {
        let accumulated = match segments.last() {
            Some(Segment::Word { text }) => text.as_str(),
            _ => texts[prev_idx].as_str(),
        };
        classify_break(
            LineView {
                line: &lines[prev_idx],
                text: &texts[prev_idx],
            },
            LineView {
                line: &lines[idx],
                text: &texts[idx],
            },
            accumulated,
            median,
            &self.config.breaks,
        )
    }
}

/// Extract a page with the default configuration.
///
/// ```
/// use pdf_reflow::{extract_structured_text, Fragment};
///
/// assert_eq!(extract_structured_text(&[]), "");
/// assert_eq!(extract_structured_text(&[Fragment::new("Hi", 0.0, 0.0, 12.0)]), "Hi");
/// ```
pub fn extract_structured_text(fragments: &[Fragment]) -> String {
    StructuredTextAssembler::new().extract_structured_text(fragments)
}
