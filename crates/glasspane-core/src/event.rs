use crate::rect::Point;

/// Mouse buttons the router distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Press(Button),
    Move,
    Release(Button),
}

/// A platform-agnostic pointer event.
///
/// Platform crates translate raw OS input into these before normal
/// dispatch. `position` is always in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
    /// Whether the primary button is down at the time of the event.
    pub primary_held: bool,
}

impl PointerEvent {
    pub fn press(button: Button, x: i32, y: i32) -> Self {
        Self {
            kind: PointerKind::Press(button),
            position: Point::new(x, y),
            primary_held: button == Button::Primary,
        }
    }

    pub fn moved(x: i32, y: i32, primary_held: bool) -> Self {
        Self {
            kind: PointerKind::Move,
            position: Point::new(x, y),
            primary_held,
        }
    }

    pub fn release(button: Button, x: i32, y: i32) -> Self {
        Self {
            kind: PointerKind::Release(button),
            position: Point::new(x, y),
            primary_held: false,
        }
    }
}

/// Whether the router took an event or left it for normal dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Consumed,
    PassThrough,
}

impl Disposition {
    pub fn is_consumed(self) -> bool {
        self == Self::Consumed
    }
}
