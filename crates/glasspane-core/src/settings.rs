/// Opacity levels offered in menus, in percent.
pub const OPACITY_LEVELS: &[u32] = &[100, 90, 80, 70, 60, 50, 40, 30];

/// Zoom levels offered in menus, in percent.
pub const ZOOM_LEVELS: &[u32] = &[50, 75, 90, 100, 110, 125, 150, 175, 200];

/// Live appearance settings of the overlay. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlaySettings {
    /// Window opacity in `[0.0, 1.0]`.
    pub opacity: f64,
    /// Content zoom factor, always positive.
    pub zoom: f64,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            zoom: 1.0,
        }
    }
}

/// Converts a percentage level to a fraction.
pub fn fraction(percent: u32) -> f64 {
    f64::from(percent) / 100.0
}

/// Returns whether `value` corresponds to the `percent` level.
pub fn is_level(value: f64, percent: u32) -> bool {
    (value * 100.0 - f64::from(percent)).abs() < 0.5
}

/// Moves from `current` to the neighbouring level in numeric order.
///
/// Values between levels snap to the next one in the requested direction;
/// the extremes stay put.
pub fn step(levels: &[u32], current: f64, up: bool) -> f64 {
    let mut sorted = levels.to_vec();
    sorted.sort_unstable();
    let current_pct = current * 100.0;

    let next = if up {
        sorted
            .iter()
            .copied()
            .find(|&l| f64::from(l) > current_pct + 0.5)
    } else {
        sorted
            .iter()
            .rev()
            .copied()
            .find(|&l| f64::from(l) < current_pct - 0.5)
    };

    next.map(fraction).unwrap_or(current)
}
