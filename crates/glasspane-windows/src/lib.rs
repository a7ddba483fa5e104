#![cfg(windows)]

/// Startup and the UI-thread event loop.
pub mod app;

/// Placeholder document surface.
pub mod content;

/// File and URL prompts.
pub mod dialog;

/// Global hotkey registration.
pub mod hotkey;

/// Key name to virtual key code mapping.
pub mod keys;

/// Win32 rendering of the core menu model.
pub mod menu;

/// System move/size loop hand-off.
pub mod native;

/// Mouse message translation.
pub mod pointer;

/// Message loop with input filters.
pub mod pump;

/// The overlay's top-level window.
pub mod window;

pub use app::run;
pub use window::OverlayWindow;
