//! Translation of queued Win32 mouse messages into core pointer events.

use glasspane_core::{Button, PointerEvent};
use windows::Win32::System::SystemServices::MK_LBUTTON;
use windows::Win32::UI::WindowsAndMessaging::{
    MSG, WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MBUTTONDOWN, WM_MBUTTONUP,
    WM_MOUSEMOVE, WM_RBUTTONDOWN, WM_RBUTTONUP,
};

/// Converts a queued message to a pointer event, or `None` for anything
/// that is not client-area mouse input.
///
/// Positions come from `msg.pt`, which is already in screen coordinates,
/// so the result does not depend on which child window the message
/// targets.
pub fn translate(msg: &MSG) -> Option<PointerEvent> {
    from_parts(msg.message, msg.wParam.0, msg.pt.x, msg.pt.y)
}

fn from_parts(message: u32, wparam: usize, x: i32, y: i32) -> Option<PointerEvent> {
    let event = match message {
        WM_LBUTTONDOWN => PointerEvent::press(Button::Primary, x, y),
        WM_RBUTTONDOWN => PointerEvent::press(Button::Secondary, x, y),
        WM_MBUTTONDOWN => PointerEvent::press(Button::Middle, x, y),
        WM_LBUTTONUP => PointerEvent::release(Button::Primary, x, y),
        WM_RBUTTONUP => PointerEvent::release(Button::Secondary, x, y),
        WM_MBUTTONUP => PointerEvent::release(Button::Middle, x, y),
        WM_MOUSEMOVE => PointerEvent::moved(x, y, wparam & MK_LBUTTON.0 as usize != 0),
        _ => return None,
    };
    Some(event)
}
