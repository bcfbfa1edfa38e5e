//! Normalization of raw content-stream fragments into positioned items.
//!
//! A [`Fragment`] is what the content-stream parser hands us: a text payload
//! plus the text rendering matrix `[a b c d e f]` in effect when it was shown.
//! A [`PositionedItem`] is the same run with a resolved position and font size,
//! ready for line grouping.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::pipeline::config::SpacingConfig;

/// A raw text run as emitted by the content-stream parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Text payload
    #[serde(alias = "str")]
    pub text: String,
    /// Affine transform `[a, b, c, d, e, f]` in PDF user space
    pub transform: [f32; 6],
    /// Explicit advance width, when the parser knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    /// Explicit glyph height, when the parser knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

impl Fragment {
    /// Create a fragment with a pure translation + uniform scale transform.
    ///
    /// ```
    /// use pdf_reflow::layout::Fragment;
    ///
    /// let frag = Fragment::new("Hello", 72.0, 700.0, 12.0);
    /// assert_eq!(frag.transform, [12.0, 0.0, 0.0, 12.0, 72.0, 700.0]);
    /// ```
    pub fn new(text: impl Into<String>, x: f32, y: f32, font_size: f32) -> Self {
        Self {
            text: text.into(),
            transform: [font_size, 0.0, 0.0, font_size, x, y],
            width: None,
            height: None,
        }
    }

    /// Attach an explicit width.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Attach an explicit height.
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }
}

/// A text run with resolved geometry.
///
/// `x`/`y` are the run origin (baseline start) in PDF space.
/// `font_size` is always positive and every field is finite.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedItem {
    /// Text content
    pub text: String,
    /// Left edge
    pub x: f32,
    /// Baseline y (grows upward)
    pub y: f32,
    /// Advance width
    pub width: f32,
    /// Glyph height
    pub height: f32,
    /// Effective font size
    pub font_size: f32,
}

impl PositionedItem {
    /// Bounding box of the run.
    pub fn bbox(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Right edge of the run.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Build positioned items from raw fragments.
///
/// Whitespace-only fragments and fragments with non-finite geometry are
/// dropped. The font size is the vertical scale of the transform,
/// `sqrt(d² + c²)`, falling back to the explicit height and then to
/// `config.fallback_font_size` when that is not positive.
pub fn build_items(fragments: &[Fragment], config: &SpacingConfig) -> Vec<PositionedItem> {
    let items: Vec<PositionedItem> = fragments
        .iter()
        .filter_map(|frag| build_item(frag, config))
        .collect();

    if items.len() < fragments.len() {
        log::debug!(
            "Dropped {} of {} fragments (whitespace-only or non-finite geometry)",
            fragments.len() - items.len(),
            fragments.len()
        );
    }

    items
}

fn build_item(frag: &Fragment, config: &SpacingConfig) -> Option<PositionedItem> {
    if frag.text.trim().is_empty() {
        return None;
    }
    if frag.transform.iter().any(|v| !v.is_finite()) {
        log::trace!("Skipping fragment {:?}: non-finite transform", frag.text);
        return None;
    }

    let explicit_width = positive(frag.width)?;
    let explicit_height = positive(frag.height)?;

    let [_, _, c, d, e, f] = frag.transform;
    let scale_y = d.abs();
    let skew_x = c;
    let transform_size = (scale_y * scale_y + skew_x * skew_x).sqrt();

    let font_size = if transform_size.is_finite() && transform_size > 0.0 {
        transform_size
    } else {
        explicit_height.unwrap_or(config.fallback_font_size)
    };

    let width = explicit_width.unwrap_or_else(|| {
        frag.text.chars().count() as f32 * font_size * config.avg_char_width_ratio
    });
    let height = explicit_height.unwrap_or(font_size);

    if !width.is_finite() || !height.is_finite() {
        return None;
    }

    Some(PositionedItem {
        text: frag.text.clone(),
        x: e,
        y: f,
        width,
        height,
        font_size,
    })
}

/// Resolve an optional explicit dimension.
///
/// The outer `None` rejects the fragment (non-finite value). `Some(None)`
/// means "not usable, estimate instead" (absent, zero or negative).
fn positive(value: Option<f32>) -> Option<Option<f32>> {
    match value {
        None => Some(None),
        Some(v) if !v.is_finite() => None,
        Some(v) if v > 0.0 => Some(Some(v)),
        Some(_) => Some(None),
    }
}
