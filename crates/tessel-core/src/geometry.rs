#![forbid(unsafe_code)]

//! Geometric primitives in normalized workspace space.
//!
//! The workspace is the unit square `[0,1]×[0,1]` with the origin at the
//! top-left. Rectangles are stored as `x, y, width, height`.

use serde::{Deserialize, Serialize};

use crate::tolerance::{approx_eq, approx_ge, approx_gt, approx_le, approx_lt};

/// Orientation of a line or of a workspace's primary tiling axis.
///
/// The same enum is used for three things:
/// - workspace orientation (`Horizontal` tiles columns side by side first),
/// - the cut line of a split (`Vertical` cut ⇒ left/right halves),
/// - the boundary a resizer sits on (`Horizontal` boundary separates panels
///   stacked top/bottom).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    #[inline]
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Horizontal)
    }

    /// The perpendicular orientation.
    #[inline]
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// A point in unit space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates within tolerance.
    #[inline]
    #[must_use]
    pub fn approx_eq(&self, other: &Point) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y)
    }
}

/// An axis-aligned rectangle in unit space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// The whole workspace.
    pub const UNIT: Rect = Rect::new(0.0, 0.0, 1.0, 1.0);

    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from its four edges.
    #[inline]
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// Left edge (alias for x).
    #[inline]
    pub const fn left(&self) -> f64 {
        self.x
    }

    /// Top edge (alias for y).
    #[inline]
    pub const fn top(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// All four components within tolerance.
    #[must_use]
    pub fn approx_eq(&self, other: &Rect) -> bool {
        approx_eq(self.x, other.x)
            && approx_eq(self.y, other.y)
            && approx_eq(self.width, other.width)
            && approx_eq(self.height, other.height)
    }

    /// True if every edge lies inside the unit square.
    #[must_use]
    pub fn is_within_unit(&self) -> bool {
        approx_ge(self.left(), 0.0)
            && approx_ge(self.top(), 0.0)
            && approx_le(self.right(), 1.0)
            && approx_le(self.bottom(), 1.0)
    }

    /// True if the interiors overlap by more than the tolerance.
    ///
    /// Rectangles that only share an edge do not intersect.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        approx_lt(other.left(), self.right())
            && approx_gt(other.right(), self.left())
            && approx_lt(other.top(), self.bottom())
            && approx_gt(other.bottom(), self.top())
    }

    /// Horizontal extent of `other` lies inside this rectangle's.
    #[must_use]
    pub fn contains_horizontal_extent(&self, other: &Rect) -> bool {
        approx_ge(other.left(), self.left()) && approx_le(other.right(), self.right())
    }

    /// Vertical extent of `other` lies inside this rectangle's.
    #[must_use]
    pub fn contains_vertical_extent(&self, other: &Rect) -> bool {
        approx_ge(other.top(), self.top()) && approx_le(other.bottom(), self.bottom())
    }

    /// Split into two equal halves along `cut`.
    ///
    /// A `Vertical` cut returns `(left, right)`; a `Horizontal` cut returns
    /// `(top, bottom)`.
    #[must_use]
    pub fn split(&self, cut: Orientation) -> (Rect, Rect) {
        match cut {
            Orientation::Vertical => {
                let half = self.width / 2.0;
                (
                    Rect::new(self.x, self.y, half, self.height),
                    Rect::new(self.x + half, self.y, self.width - half, self.height),
                )
            }
            Orientation::Horizontal => {
                let half = self.height / 2.0;
                (
                    Rect::new(self.x, self.y, self.width, half),
                    Rect::new(self.x, self.y + half, self.width, self.height - half),
                )
            }
        }
    }

    /// Center of the edge shared by two adjacent rectangles.
    ///
    /// For a `Horizontal` boundary the rectangles are stacked vertically; the
    /// result sits on the shared `y` at the middle of the horizontal overlap.
    /// For a `Vertical` boundary it sits on the shared `x` at the middle of the
    /// vertical overlap.
    #[must_use]
    pub fn midpoint_between(a: &Rect, b: &Rect, boundary: Orientation) -> Point {
        match boundary {
            Orientation::Horizontal => {
                let y = if approx_eq(b.top(), a.bottom()) {
                    a.bottom()
                } else {
                    a.top()
                };
                let start = a.left().max(b.left());
                let end = a.right().min(b.right());
                Point::new((start + end) / 2.0, y)
            }
            Orientation::Vertical => {
                let x = if approx_eq(b.left(), a.right()) {
                    a.right()
                } else {
                    a.left()
                };
                let start = a.top().max(b.top());
                let end = a.bottom().min(b.bottom());
                Point::new(x, (start + end) / 2.0)
            }
        }
    }
}
