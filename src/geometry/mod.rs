//! Geometric primitives in PDF user space.
//!
//! Unlike screen coordinates, PDF user space has its origin at the bottom-left
//! of the page and y grows upward. `Rect::y` is therefore the *bottom* edge.

/// Axis-aligned box of a text run or line, in PDF points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Bottom edge (the baseline for text runs)
    pub y: f32,
    /// Horizontal extent
    pub width: f32,
    /// Vertical extent
    pub height: f32,
}

impl Rect {
    /// Box from its bottom-left corner and extent.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_reflow::geometry::Rect;
    ///
    /// let rect = Rect::new(72.0, 700.0, 100.0, 12.0);
    /// assert_eq!(rect.top(), 712.0);
    /// ```
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Leftmost x.
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Rightmost x, where the next run on the line would begin.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Lowest y.
    pub fn bottom(&self) -> f32 {
        self.y
    }

    /// Highest y.
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Horizontal whitespace between the right edge of `self` and the left
    /// edge of `next`. Negative when the two overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_reflow::geometry::Rect;
    ///
    /// let a = Rect::new(0.0, 0.0, 40.0, 10.0);
    /// let b = Rect::new(55.0, 0.0, 40.0, 10.0);
    /// assert_eq!(a.horizontal_gap_to(&b), 15.0);
    /// ```
    pub fn horizontal_gap_to(&self, next: &Rect) -> f32 {
        next.left() - self.right()
    }

    /// Smallest box covering both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        let left = self.x.min(other.x);
        let bottom = self.y.min(other.y);
        Rect::new(
            left,
            bottom,
            self.right().max(other.right()) - left,
            self.top().max(other.top()) - bottom,
        )
    }
}
