use crate::edges::CursorKind;
use crate::gesture::DragState;
use crate::host::{HostResult, OverlayHost};

/// Keeps the click-through flag and the native input-transparent style
/// bit in lockstep.
///
/// Activating sets both the layered and input-transparent bits.
/// Deactivating clears only input-transparent; layered stays set because
/// opacity depends on it. Both directions reassert topmost placement.
#[derive(Debug, Default)]
pub struct ClickThrough {
    active: bool,
}

impl ClickThrough {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Flips the flag and returns the new state.
    pub fn toggle<H: OverlayHost + ?Sized>(
        &mut self,
        host: &H,
        gesture: &mut DragState,
    ) -> HostResult<bool> {
        self.set_state(host, gesture, !self.active)?;
        Ok(self.active)
    }

    /// Applies `active` to the window.
    ///
    /// Any in-flight gesture is cancelled first, even when the native
    /// update then fails. The flag only changes once the new style has been
    /// written, so it never disagrees with the window.
    pub fn set_state<H: OverlayHost + ?Sized>(
        &mut self,
        host: &H,
        gesture: &mut DragState,
        active: bool,
    ) -> HostResult<()> {
        if gesture.reset() {
            crate::log_debug!("click-through transition cancelled an active gesture");
        }
        host.set_cursor(CursorKind::Arrow);

        let mut style = host.window_style()?;
        if active {
            style.layered = true;
            style.input_transparent = true;
        } else {
            style.input_transparent = false;
        }
        host.set_window_style(style)?;
        self.active = active;

        host.bring_to_topmost()?;
        crate::log_info!("click-through {}", if active { "on" } else { "off" });
        Ok(())
    }
}
