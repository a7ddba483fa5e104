use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::source::SourceError;

/// A command issued to the overlay by a menu, a hotkey, or a dialog.
///
/// Commands are distinct from pointer events: they arrive out of band and
/// are executed by [`OverlayController::execute`](crate::OverlayController::execute).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Ask the host for a file and load it.
    BrowseFile,
    /// Ask the host for a URL and load it.
    EnterUrl,
    /// Load a file picked in a file dialog.
    OpenFile(PathBuf),
    /// Load text typed into a URL dialog. `https://` is added when the
    /// text has no scheme separator.
    OpenUrl(String),
    /// Set opacity to a fraction in `[0.0, 1.0]`.
    SetOpacity(f64),
    /// Set the content zoom factor.
    SetZoom(f64),
    /// Step to the next higher opacity level.
    OpacityUp,
    /// Step to the next lower opacity level.
    OpacityDown,
    /// Step to the next higher zoom level.
    ZoomIn,
    /// Step to the next lower zoom level.
    ZoomOut,
    /// Flip click-through mode.
    ToggleClickThrough,
    /// Exit the application.
    Quit,
}

/// What the event loop should do after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    /// The command was refused; the previous state is intact.
    Rejected(SourceError),
    Quit,
}
