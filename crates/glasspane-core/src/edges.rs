//! Edge and corner hit-testing for the overlay border.
//!
//! Everything here is pure: it classifies a pointer position against a
//! rectangle, picks the matching cursor shape, and computes the rectangle
//! a resize gesture produces.

use std::cmp::Ordering;

use crate::rect::{MinSize, Point, Rect};

/// One side of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    /// The edge on the opposite side of the rectangle.
    pub fn opposite(self) -> Edge {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
        }
    }

    fn is_horizontal_axis(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// A set of at most one left/right edge and one top/bottom edge.
///
/// Opposite edges can never be members at the same time: the set has one
/// slot per axis, and inserting an edge replaces whatever occupied its axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EdgeSet {
    x: Option<Edge>,
    y: Option<Edge>,
}

impl EdgeSet {
    pub const EMPTY: EdgeSet = EdgeSet { x: None, y: None };

    /// Builds a set from a list of edges. Later edges win on the same axis.
    pub fn of(edges: &[Edge]) -> Self {
        edges.iter().fold(Self::EMPTY, |set, &e| set.with(e))
    }

    /// Returns a copy with `edge` inserted.
    pub fn with(mut self, edge: Edge) -> Self {
        if edge.is_horizontal_axis() {
            self.x = Some(edge);
        } else {
            self.y = Some(edge);
        }
        self
    }

    /// The left/right member, if any.
    pub fn horizontal(&self) -> Option<Edge> {
        self.x
    }

    /// The top/bottom member, if any.
    pub fn vertical(&self) -> Option<Edge> {
        self.y
    }

    pub fn contains(&self, edge: Edge) -> bool {
        self.x == Some(edge) || self.y == Some(edge)
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }

    pub fn len(&self) -> usize {
        usize::from(self.x.is_some()) + usize::from(self.y.is_some())
    }

    pub fn iter(&self) -> impl Iterator<Item = Edge> {
        self.x.into_iter().chain(self.y)
    }

    /// Swaps every member for its opposite edge.
    pub fn mirrored(&self) -> Self {
        Self {
            x: self.x.map(Edge::opposite),
            y: self.y.map(Edge::opposite),
        }
    }
}

/// Cursor shapes the overlay shows while hovering its border.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CursorKind {
    #[default]
    Arrow,
    /// West-east arrows, for the left or right edge.
    ResizeHorizontal,
    /// North-south arrows, for the top or bottom edge.
    ResizeVertical,
    /// Top-left and bottom-right corners.
    ResizeNwSe,
    /// Top-right and bottom-left corners.
    ResizeNeSw,
}

/// Classifies `pointer` against the border zones of `rect`.
///
/// A side contributes its edge when the pointer is within `margin` pixels
/// of it, inclusive. On windows thinner than two margins both sides of an
/// axis can qualify; the strictly nearer one wins and an exact tie yields
/// neither.
pub fn hit_test(rect: &Rect, pointer: Point, margin: i32) -> EdgeSet {
    EdgeSet {
        x: nearer_side(
            pointer.x.saturating_sub(rect.left),
            rect.right.saturating_sub(pointer.x),
            margin,
            Edge::Left,
            Edge::Right,
        ),
        y: nearer_side(
            pointer.y.saturating_sub(rect.top),
            rect.bottom.saturating_sub(pointer.y),
            margin,
            Edge::Top,
            Edge::Bottom,
        ),
    }
}

fn nearer_side(to_low: i32, to_high: i32, margin: i32, low: Edge, high: Edge) -> Option<Edge> {
    let (low_dist, high_dist) = (to_low.unsigned_abs(), to_high.unsigned_abs());
    let margin = margin.max(0).unsigned_abs();

    match (low_dist <= margin, high_dist <= margin) {
        (true, true) => match low_dist.cmp(&high_dist) {
            Ordering::Less => Some(low),
            Ordering::Greater => Some(high),
            Ordering::Equal => None,
        },
        (true, false) => Some(low),
        (false, true) => Some(high),
        (false, false) => None,
    }
}

/// Maps an edge set to the cursor shape that advertises it.
pub fn cursor_for(edges: EdgeSet) -> CursorKind {
    use Edge::{Bottom, Left, Right, Top};

    match (edges.x, edges.y) {
        (None, None) => CursorKind::Arrow,
        (Some(_), None) => CursorKind::ResizeHorizontal,
        (None, Some(_)) => CursorKind::ResizeVertical,
        (Some(Left), Some(Top)) | (Some(Right), Some(Bottom)) => CursorKind::ResizeNwSe,
        (Some(_), Some(_)) => CursorKind::ResizeNeSw,
    }
}

/// Moves each active side of `start` by the matching `delta` component.
///
/// Sides are clamped so the result is never narrower than `min.width` or
/// shorter than `min.height`: left is capped at `right - min.width`, right
/// is floored at `left + min.width`, and likewise for top and bottom.
pub fn apply_resize(start: &Rect, edges: EdgeSet, delta: Point, min: MinSize) -> Rect {
    let Rect {
        mut left,
        mut top,
        mut right,
        mut bottom,
    } = *start;

    match edges.x {
        Some(Edge::Left) => {
            left = left
                .saturating_add(delta.x)
                .min(right.saturating_sub(min.width));
        }
        Some(Edge::Right) => {
            right = right
                .saturating_add(delta.x)
                .max(left.saturating_add(min.width));
        }
        _ => {}
    }

    match edges.y {
        Some(Edge::Top) => {
            top = top
                .saturating_add(delta.y)
                .min(bottom.saturating_sub(min.height));
        }
        Some(Edge::Bottom) => {
            bottom = bottom
                .saturating_add(delta.y)
                .max(top.saturating_add(min.height));
        }
        _ => {}
    }

    Rect::new(left, top, right, bottom)
}
