pub mod hotkey;
mod loader;

use serde::{Deserialize, Serialize};

use crate::log::LogConfig;
use crate::rect::{MinSize, Rect};
use crate::router::RouterOptions;

pub use hotkey::{Hotkey, HotkeyAction, Modifier};
pub use loader::{ConfigError, config_dir, config_path, load_from, try_load_from};

/// Top-level configuration for Glasspane.
///
/// Loaded from `~/.config/glasspane/config.toml`. Missing sections fall
/// back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window size and initial appearance.
    pub overlay: OverlayConfig,
    /// Pointer gesture tuning.
    pub pointer: RouterOptions,
    pub log: LogConfig,
    /// Global hotkeys. Any entry in the file replaces the whole default set.
    pub hotkey: Vec<Hotkey>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            overlay: OverlayConfig::default(),
            pointer: RouterOptions::default(),
            log: LogConfig::default(),
            hotkey: hotkey::defaults(),
        }
    }
}

/// The `[overlay]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Initial window width in pixels.
    pub width: i32,
    /// Initial window height in pixels.
    pub height: i32,
    pub min_width: i32,
    pub min_height: i32,
    /// Initial opacity in `[0.0, 1.0]`.
    pub opacity: f64,
    /// Initial content zoom factor.
    pub zoom: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        let min = MinSize::default();
        Self {
            width: 800,
            height: 600,
            min_width: min.width,
            min_height: min.height,
            opacity: 1.0,
            zoom: 1.0,
        }
    }
}

impl OverlayConfig {
    pub fn min_size(&self) -> MinSize {
        MinSize {
            width: self.min_width,
            height: self.min_height,
        }
    }

    /// A rectangle of the configured size with its top-left at `(x, y)`.
    pub fn initial_rect(&self, x: i32, y: i32) -> Rect {
        Rect::from_origin_size(x, y, self.width, self.height)
    }
}

const MAX_EXTENT: i32 = 16_384;

impl Config {
    /// Clamps values to ranges the overlay can actually use.
    ///
    /// Sizes are kept positive and at least the minimum, opacity stays in
    /// `[0.0, 1.0]`, zoom in `[0.25, 5.0]`, and the edge margin in `0..=64`.
    pub fn validate(&mut self) {
        let o = &mut self.overlay;
        o.min_width = o.min_width.clamp(1, MAX_EXTENT);
        o.min_height = o.min_height.clamp(1, MAX_EXTENT);
        o.width = o.width.clamp(o.min_width, MAX_EXTENT);
        o.height = o.height.clamp(o.min_height, MAX_EXTENT);
        o.opacity = if o.opacity.is_nan() { 1.0 } else { o.opacity.clamp(0.0, 1.0) };
        o.zoom = if o.zoom.is_finite() { o.zoom.clamp(0.25, 5.0) } else { 1.0 };

        self.pointer.edge_margin = self.pointer.edge_margin.clamp(0, 64);
    }
}

#[cfg(test)]
mod tests;
