//! Vertical geometry for page layout.
//!
//! The page is a single column, so only the vertical axis matters. Positions are
//! document coordinates in CSS pixels with the origin at the top of the page and
//! Y increasing downward.
//!
//! # Overview
//!
//! - [`Extent`] - A vertical span `[top, top + height)` such as a section or the
//!   visible viewport.

/// A vertical span of the document.
///
/// # Examples
///
/// ```
/// # use shoreline_core::geometry::Extent;
/// let section = Extent::new(100.0, 300.0);
/// let band = Extent::new(250.0, 50.0);
///
/// let overlap = section.intersect(band).unwrap();
/// assert_eq!(overlap.top(), 250.0);
/// assert_eq!(overlap.height(), 50.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Extent {
    top: f32,
    height: f32,
}

impl Extent {
    /// Creates an extent; negative heights are clamped to zero.
    pub fn new(top: f32, height: f32) -> Self {
        Self {
            top,
            height: height.max(0.0),
        }
    }

    /// Returns the top edge
    pub fn top(self) -> f32 {
        self.top
    }

    /// Returns the height
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns the bottom edge (exclusive)
    pub fn bottom(self) -> f32 {
        self.top + self.height
    }

    /// Returns a copy moved so that its top is at `top`
    pub fn with_top(self, top: f32) -> Self {
        Self { top, ..self }
    }

    /// Shrinks (negative values) or grows (positive values) the extent at each
    /// edge by the given amounts. The result never has a negative height.
    pub fn inset(self, top: f32, bottom: f32) -> Self {
        let new_top = self.top - top;
        let new_bottom = self.bottom() + bottom;
        Self::new(new_top, new_bottom - new_top)
    }

    /// Returns the overlapping span, or `None` when the extents do not overlap.
    ///
    /// Extents that merely touch at an edge do not overlap. A zero-height
    /// extent lying inside the other one is reported as an empty overlap,
    /// mirroring how browsers treat zero-area targets as intersecting.
    pub fn intersect(self, other: Extent) -> Option<Extent> {
        let top = self.top.max(other.top);
        let bottom = self.bottom().min(other.bottom());
        if bottom > top {
            return Some(Self::new(top, bottom - top));
        }

        let degenerate = self.height == 0.0 || other.height == 0.0;
        if degenerate && bottom == top && self.contains(top) && other.contains(top) {
            return Some(Self::new(top, 0.0));
        }
        None
    }

    /// Checks whether `y` lies within `[top, bottom]`
    pub fn contains(self, y: f32) -> bool {
        y >= self.top && y <= self.bottom()
    }
}
