//! Hands move and resize gestures to the system's own modal loop.
//!
//! Sending `WM_NCLBUTTONDOWN` with a caption or border hit-test code makes
//! `DefWindowProc` run the same loop a title-bar drag would. The call
//! returns only once the user releases the button, so a successful
//! hand-off means the whole gesture is over.

use glasspane_core::{Edge, EdgeSet, NativeMoveResize, NativeOutcome, SurfaceId};
use windows::Win32::Foundation::{HWND, LPARAM, POINT, WPARAM};
use windows::Win32::UI::Input::KeyboardAndMouse::ReleaseCapture;
use windows::Win32::UI::WindowsAndMessaging::{
    GWL_STYLE, GetCursorPos, GetWindowLongPtrW, HTBOTTOM, HTBOTTOMLEFT, HTBOTTOMRIGHT, HTCAPTION,
    HTLEFT, HTRIGHT, HTTOP, HTTOPLEFT, HTTOPRIGHT, IsWindow, SendMessageW, WM_NCLBUTTONDOWN,
    WS_THICKFRAME,
};

use crate::window::OverlayWindow;

impl NativeMoveResize for OverlayWindow {
    fn try_move(&self, surface: SurfaceId) -> NativeOutcome {
        run_system_loop(hwnd_of(surface), HTCAPTION)
    }

    fn try_resize(&self, surface: SurfaceId, edges: EdgeSet) -> NativeOutcome {
        let Some(code) = sizing_code(edges) else {
            return NativeOutcome::Unsupported;
        };
        let hwnd = hwnd_of(surface);
        // SAFETY: style query; an invalid handle reads as 0.
        let style = unsafe { GetWindowLongPtrW(hwnd, GWL_STYLE) } as u32;
        if style & WS_THICKFRAME.0 == 0 {
            return NativeOutcome::Unsupported;
        }
        run_system_loop(hwnd, code)
    }
}

fn hwnd_of(surface: SurfaceId) -> HWND {
    HWND(surface.0 as *mut _)
}

/// Maps an edge set to the `WM_NCHITTEST` code of that border.
fn sizing_code(edges: EdgeSet) -> Option<u32> {
    use Edge::{Bottom, Left, Right, Top};

    let code = match (edges.horizontal(), edges.vertical()) {
        (Some(Left), None) => HTLEFT,
        (Some(Right), None) => HTRIGHT,
        (None, Some(Top)) => HTTOP,
        (None, Some(Bottom)) => HTBOTTOM,
        (Some(Left), Some(Top)) => HTTOPLEFT,
        (Some(Right), Some(Top)) => HTTOPRIGHT,
        (Some(Left), Some(Bottom)) => HTBOTTOMLEFT,
        (Some(Right), Some(Bottom)) => HTBOTTOMRIGHT,
        _ => return None,
    };
    Some(code)
}

fn run_system_loop(hwnd: HWND, hit_code: u32) -> NativeOutcome {
    // SAFETY: all calls tolerate a stale handle; IsWindow is checked first
    // so a destroyed window reports Failed instead of silently doing nothing.
    unsafe {
        if !IsWindow(Some(hwnd)).as_bool() {
            return NativeOutcome::Failed;
        }
        let mut pt = POINT::default();
        if GetCursorPos(&mut pt).is_err() {
            return NativeOutcome::Failed;
        }
        // The loop starts only if nothing holds the mouse capture.
        let _ = ReleaseCapture();
        SendMessageW(
            hwnd,
            WM_NCLBUTTONDOWN,
            Some(WPARAM(hit_code as usize)),
            Some(LPARAM(pack_point(pt))),
        );
    }
    NativeOutcome::Completed
}

/// Packs screen coordinates the way `MAKELPARAM` does.
fn pack_point(pt: POINT) -> isize {
    let x = u32::from(pt.x as u16);
    let y = u32::from(pt.y as u16);
    ((y << 16) | x) as isize
}
