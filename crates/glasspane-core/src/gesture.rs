use crate::edges::EdgeSet;
use crate::rect::{Point, Rect};

/// The in-flight pointer gesture, if any.
///
/// A gesture is created by a primary-button press and cleared by the
/// matching release or by a click-through transition. Geometry is always
/// derived from the start values, never accumulated move by move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    /// Moving the whole window.
    Dragging {
        start_pointer: Point,
        start_rect: Rect,
    },
    /// Resizing from one edge or a corner.
    Resizing {
        start_pointer: Point,
        start_rect: Rect,
        edges: EdgeSet,
    },
}

impl DragState {
    /// Starts a manually tracked gesture: a resize when `edges` is
    /// non-empty, otherwise a drag.
    pub fn begin(start_pointer: Point, start_rect: Rect, edges: EdgeSet) -> Self {
        if edges.is_empty() {
            Self::Dragging {
                start_pointer,
                start_rect,
            }
        } else {
            Self::Resizing {
                start_pointer,
                start_rect,
                edges,
            }
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Clears the gesture, returning whether one was active.
    pub fn reset(&mut self) -> bool {
        let was_active = !self.is_idle();
        *self = Self::Idle;
        was_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::Edge;

    #[test]
    fn begin_picks_drag_or_resize() {
        // Arrange
        let p = Point::new(10, 10);
        let r = Rect::new(0, 0, 300, 300);

        // Act
        let drag = DragState::begin(p, r, EdgeSet::EMPTY);
        let resize = DragState::begin(p, r, EdgeSet::of(&[Edge::Top]));

        // Assert
        assert!(matches!(drag, DragState::Dragging { .. }));
        assert!(matches!(resize, DragState::Resizing { edges, .. } if edges.contains(Edge::Top)));
    }

    #[test]
    fn reset_reports_previous_activity() {
        let mut state = DragState::begin(Point::default(), Rect::default(), EdgeSet::EMPTY);

        assert!(state.reset());
        assert!(state.is_idle());
        assert!(!state.reset());
    }
}
