pub mod click_through;
pub mod command;
pub mod config;
pub mod controller;
pub mod edges;
pub mod event;
pub mod gesture;
pub mod host;
pub mod log;
pub mod menu;
pub mod rect;
pub mod router;
pub mod settings;
pub mod source;

#[cfg(test)]
mod testing;

pub use click_through::ClickThrough;
pub use command::{Command, CommandOutcome};
pub use config::Config;
pub use controller::OverlayController;
pub use edges::{CursorKind, Edge, EdgeSet};
pub use event::{Button, Disposition, PointerEvent, PointerKind};
pub use gesture::DragState;
pub use host::{
    ContentHost, HostResult, NativeMoveResize, NativeOutcome, OverlayHost, SurfaceId, WindowStyle,
};
pub use menu::MenuEntry;
pub use rect::{MinSize, Point, Rect};
pub use router::{PointerRouter, RouterOptions};
pub use settings::OverlaySettings;
pub use source::{Resolver, Source, SourceError};
