//! Unified configuration for the reflow pipeline.
//!
//! Every geometric threshold used by the stages lives here. The defaults are
//! empirically chosen values for Latin-script body text and are meant to be
//! calibrated against labeled page samples.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Line grouping (Y clustering) thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineGroupingConfig {
    /// Minimum Y tolerance in points
    pub min_y_tolerance: f32,
    /// Y tolerance as a fraction of the item font size
    pub y_tolerance_ratio: f32,
}

impl Default for LineGroupingConfig {
    fn default() -> Self {
        Self {
            min_y_tolerance: 2.0,
            y_tolerance_ratio: 0.2,
        }
    }
}

impl LineGroupingConfig {
    /// Y tolerance for an item of the given font size.
    pub fn tolerance_for(&self, font_size: f32) -> f32 {
        self.min_y_tolerance.max(font_size * self.y_tolerance_ratio)
    }
}

/// Header/footer band filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarginConfig {
    /// Filtering is skipped for pages with fewer lines than this
    pub min_lines: usize,
    /// Height of each margin band as a fraction of the text extent
    pub band_ratio: f32,
    /// Lines shorter than this (in chars) count as short
    pub short_line_max_chars: usize,
    /// Lines with fewer items than this count as sparse
    pub sparse_line_max_items: usize,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            min_lines: 5,
            band_ratio: 0.1,
            short_line_max_chars: 50,
            sparse_line_max_items: 5,
        }
    }
}

/// Column boundary detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Absolute minimum gap between column starts (points)
    pub min_gap: f32,
    /// Minimum gap as a fraction of the page text width
    pub gap_width_ratio: f32,
    /// Tolerance when counting recurring line starts (points)
    pub recurrence_tolerance: f32,
    /// Fraction of all lines that must start near a candidate column
    pub min_line_fraction: f32,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            min_gap: 50.0,
            gap_width_ratio: 0.15,
            recurrence_tolerance: 20.0,
            min_line_fraction: 0.1,
        }
    }
}

/// Table row classification and formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Gaps wider than this (points) count as column gaps
    pub min_column_gap: f32,
    /// Maximum gap variance as a fraction of the mean gap
    pub max_variance_ratio: f32,
    /// Gaps wider than this (points) are rendered as a tab
    pub tab_gap: f32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            min_column_gap: 10.0,
            max_variance_ratio: 0.3,
            tab_gap: 15.0,
        }
    }
}

/// Break classification thresholds. Gaps are in units of the median font size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakConfig {
    /// Normalized gap above which a section break is emitted
    pub section_gap: f32,
    /// Normalized gap above which a paragraph break is emitted
    pub paragraph_gap: f32,
    /// Normalized gap required for a sentence-end paragraph break
    pub sentence_gap: f32,
    /// Normalized gap above which a line break is emitted
    pub line_gap: f32,
    /// First-item indent (points) that signals a new paragraph
    pub indent_threshold: f32,
    /// Font size ratio over the median that marks a heading
    pub heading_size_ratio: f32,
    /// Large-font lines with this many items or more are not headings
    pub heading_max_items: usize,
    /// ALL-CAPS lines shorter than this (in chars) are headings
    pub heading_caps_max_chars: usize,
}

impl Default for BreakConfig {
    fn default() -> Self {
        Self {
            section_gap: 3.0,
            paragraph_gap: 2.0,
            sentence_gap: 0.8,
            line_gap: 1.2,
            indent_threshold: 20.0,
            heading_size_ratio: 1.2,
            heading_max_items: 10,
            heading_caps_max_chars: 50,
        }
    }
}

/// Intra-line spacing and item geometry estimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacingConfig {
    /// A space is inserted when the gap exceeds this fraction of the font size
    pub space_width_ratio: f32,
    /// Average glyph width as a fraction of the font size, used when a
    /// fragment carries no explicit width
    pub avg_char_width_ratio: f32,
    /// Font size used when neither the transform nor an explicit height
    /// yields a positive size
    pub fallback_font_size: f32,
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            space_width_ratio: 0.25,
            avg_char_width_ratio: 0.5,
            fallback_font_size: 12.0,
        }
    }
}

/// Formula span marking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormulaConfig {
    /// Math lines longer than this (in chars) are rendered as block formulas
    pub block_min_chars: usize,
}

impl Default for FormulaConfig {
    fn default() -> Self {
        Self {
            block_min_chars: 40,
        }
    }
}

/// Complete reflow configuration.
///
/// Deserializes with `#[serde(default)]`, so a JSON document only needs to
/// name the values it overrides:
///
/// ```
/// use pdf_reflow::pipeline::ReflowConfig;
///
/// let config = ReflowConfig::from_json_str(r#"{ "columns": { "min_gap": 80.0 } }"#).unwrap();
/// assert_eq!(config.columns.min_gap, 80.0);
/// assert_eq!(config.columns.recurrence_tolerance, 20.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReflowConfig {
    /// Line grouping
    pub lines: LineGroupingConfig,
    /// Header/footer filtering
    pub margins: MarginConfig,
    /// Column detection
    pub columns: ColumnConfig,
    /// Table rows
    pub tables: TableConfig,
    /// Break classification
    pub breaks: BreakConfig,
    /// Spacing and geometry estimation
    pub spacing: SpacingConfig,
    /// Formula marking
    pub formulas: FormulaConfig,
    /// Join words split by a trailing hyphen across lines
    pub enable_hyphenation: bool,
}

impl Default for ReflowConfig {
    fn default() -> Self {
        Self {
            lines: LineGroupingConfig::default(),
            margins: MarginConfig::default(),
            columns: ColumnConfig::default(),
            tables: TableConfig::default(),
            breaks: BreakConfig::default(),
            spacing: SpacingConfig::default(),
            formulas: FormulaConfig::default(),
            enable_hyphenation: true,
        }
    }
}

impl ReflowConfig {
    /// Parse and validate a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check that every threshold is finite and within its usable range.
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("lines.min_y_tolerance", self.lines.min_y_tolerance),
            ("lines.y_tolerance_ratio", self.lines.y_tolerance_ratio),
            ("columns.min_gap", self.columns.min_gap),
            ("columns.gap_width_ratio", self.columns.gap_width_ratio),
            ("columns.recurrence_tolerance", self.columns.recurrence_tolerance),
            ("tables.min_column_gap", self.tables.min_column_gap),
            ("tables.max_variance_ratio", self.tables.max_variance_ratio),
            ("tables.tab_gap", self.tables.tab_gap),
            ("breaks.section_gap", self.breaks.section_gap),
            ("breaks.paragraph_gap", self.breaks.paragraph_gap),
            ("breaks.sentence_gap", self.breaks.sentence_gap),
            ("breaks.line_gap", self.breaks.line_gap),
            ("breaks.indent_threshold", self.breaks.indent_threshold),
            ("breaks.heading_size_ratio", self.breaks.heading_size_ratio),
            ("spacing.space_width_ratio", self.spacing.space_width_ratio),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }

        let positive = [
            ("spacing.avg_char_width_ratio", self.spacing.avg_char_width_ratio),
            ("spacing.fallback_font_size", self.spacing.fallback_font_size),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a finite positive number, got {}",
                    name, value
                )));
            }
        }

        let fractions = [
            ("margins.band_ratio", self.margins.band_ratio),
            ("columns.min_line_fraction", self.columns.min_line_fraction),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        if self.breaks.section_gap < self.breaks.paragraph_gap {
            return Err(Error::InvalidConfig(format!(
                "breaks.section_gap ({}) must not be below breaks.paragraph_gap ({})",
                self.breaks.section_gap, self.breaks.paragraph_gap
            )));
        }

        Ok(())
    }
}
