use serde::{Deserialize, Serialize};

/// A position in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - origin`.
    pub fn delta_from(self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

/// The smallest size the overlay may be resized to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinSize {
    pub width: i32,
    pub height: i32,
}

impl Default for MinSize {
    fn default() -> Self {
        Self {
            width: 260,
            height: 1,
        }
    }
}

/// A rectangle in screen coordinates.
///
/// Uses the Win32 `RECT` convention: `right` and `bottom` are exclusive,
/// so `width() == right - left`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Builds a rectangle from an origin and a size.
    pub fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Returns whether the point lies inside the rectangle.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x < self.right && p.y >= self.top && p.y < self.bottom
    }

    /// Returns the rectangle shifted by `delta`, size unchanged.
    pub fn translated(&self, delta: Point) -> Rect {
        Rect::new(
            self.left + delta.x,
            self.top + delta.y,
            self.right + delta.x,
            self.bottom + delta.y,
        )
    }

    /// Grows the right and bottom sides so the rectangle is at least `min`.
    ///
    /// The origin never moves.
    pub fn clamped_to(&self, min: MinSize) -> Rect {
        Rect::new(
            self.left,
            self.top,
            self.right.max(self.left + min.width),
            self.bottom.max(self.top + min.height),
        )
    }
}
