use std::path::PathBuf;

use crate::command::Command;
use crate::edges::{CursorKind, EdgeSet};
use crate::menu::MenuEntry;
use crate::rect::{Point, Rect};
use crate::source::Source;

/// A boxed error type for host operations.
///
/// Host failures are platform errors (a stale handle, a rejected style
/// change) that the core logs and reports but never interprets.
pub type HostResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Opaque identity of a top-level surface on the desktop.
///
/// On Windows this is the root `HWND` as a pointer-sized integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub usize);

/// The extended style bits the overlay cares about.
///
/// Hosts preserve every other native bit when writing these back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowStyle {
    /// The window is composited with per-window alpha.
    pub layered: bool,
    /// Pointer input passes through to whatever is beneath the window.
    pub input_transparent: bool,
}

/// Result of asking the host to run a move or resize with its own
/// input loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeOutcome {
    /// The host ran the whole gesture; nothing left to track.
    Completed,
    /// The host supports the hand-off but it did not happen.
    Failed,
    /// No native equivalent exists for this platform or edge set.
    Unsupported,
}

/// Native interactive move/resize.
///
/// Implementations are stateless commands: they either hand the rest of
/// the gesture to the host or report why they could not. They never panic.
pub trait NativeMoveResize {
    fn try_move(&self, surface: SurfaceId) -> NativeOutcome;

    fn try_resize(&self, surface: SurfaceId, edges: EdgeSet) -> NativeOutcome;
}

/// The window attribute surface the overlay needs from the platform.
///
/// Each platform crate (e.g. `glasspane-windows`) provides its own
/// implementation. All calls happen on the UI thread.
pub trait OverlayHost: NativeMoveResize {
    /// Identity of the overlay's own top-level surface.
    fn surface(&self) -> SurfaceId;

    /// Returns the window's bounding rectangle as the platform sees it.
    fn rect(&self) -> HostResult<Rect>;

    /// Moves and sizes the window.
    fn set_rect(&self, rect: &Rect) -> HostResult<()>;

    fn window_style(&self) -> HostResult<WindowStyle>;

    /// Writes the style bits back. Must take effect before returning.
    fn set_window_style(&self, style: WindowStyle) -> HostResult<()>;

    /// Reasserts topmost z-order without moving, sizing, or activating.
    fn bring_to_topmost(&self) -> HostResult<()>;

    fn is_visible(&self) -> bool;

    /// Returns whether a popup surface such as an open menu is active.
    fn popup_active(&self) -> bool;

    /// The top-level surface that is visible at `point`, if any.
    fn root_surface_at(&self, point: Point) -> Option<SurfaceId>;

    fn set_cursor(&self, cursor: CursorKind);

    /// Applies window-level opacity in `[0.0, 1.0]`.
    fn set_opacity(&self, opacity: f64) -> HostResult<()>;

    fn set_title(&self, title: &str);

    /// Shows a modal context menu and returns the chosen command.
    fn show_context_menu(&self, at: Point, entries: &[MenuEntry]) -> Option<Command>;

    /// Shows a modal file picker. `None` means the user cancelled.
    fn pick_file(&self) -> Option<PathBuf>;

    /// Asks the user for URL text. `None` means the user cancelled.
    fn prompt_url(&self) -> Option<String>;

    /// Shows a non-fatal notification to the user.
    fn notify(&self, title: &str, message: &str);

    /// Asks the event loop to exit.
    fn request_quit(&self);
}

/// The document renderer hosted inside the overlay.
///
/// Loading is asynchronous on the renderer's side; `navigate` only starts it.
pub trait ContentHost {
    fn navigate(&mut self, source: &Source);

    fn set_zoom(&mut self, factor: f64);
}
