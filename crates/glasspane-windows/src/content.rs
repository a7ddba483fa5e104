use std::sync::Once;

use glasspane_core::{ContentHost, HostResult, Source};
use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    BeginPaint, CreateFontIndirectW, CreateSolidBrush, DT_CENTER, DT_NOPREFIX, DT_WORDBREAK,
    DeleteObject, DrawTextW, EndPaint, FW_NORMAL, FillRect, InvalidateRect, LOGFONTW, PAINTSTRUCT,
    SelectObject, SetBkMode, SetTextColor, TRANSPARENT,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, GWLP_USERDATA, GetClientRect, GetWindowLongPtrW,
    GetWindowTextLengthW, GetWindowTextW, RegisterClassW, SetWindowLongPtrW, SetWindowTextW,
    WINDOW_EX_STYLE, WM_ERASEBKGND, WM_PAINT, WNDCLASSW, WS_CHILD, WS_VISIBLE,
};
use windows::core::{HSTRING, PCWSTR, w};

use crate::window::OverlayWindow;

const CLASS_NAME: PCWSTR = w!("GlasspaneContent");
static REGISTER_CLASS: Once = Once::new();

const BASE_FONT_PX: f64 = 18.0;
const BACKGROUND: COLORREF = COLORREF(0x0020_1C1A);
const FOREGROUND: COLORREF = COLORREF(0x00E0_E0E0);

/// Child window standing in for the document renderer.
///
/// It shows which source is loaded and at what zoom. The location lives in
/// the window text and the zoom percentage in `GWLP_USERDATA`, so painting
/// needs no shared state.
pub struct PlaceholderContent {
    hwnd: HWND,
}

impl PlaceholderContent {
    pub fn create(parent: &OverlayWindow) -> HostResult<Self> {
        // SAFETY: registers a class and creates a child of a live window.
        let hwnd = unsafe {
            let instance = GetModuleHandleW(None)?;
            REGISTER_CLASS.call_once(|| {
                let wc = WNDCLASSW {
                    lpfnWndProc: Some(content_proc),
                    hInstance: instance.into(),
                    lpszClassName: CLASS_NAME,
                    ..Default::default()
                };
                RegisterClassW(&wc);
            });

            let mut client = RECT::default();
            GetClientRect(parent.hwnd(), &mut client)?;
            CreateWindowExW(
                WINDOW_EX_STYLE::default(),
                CLASS_NAME,
                PCWSTR::null(),
                WS_CHILD | WS_VISIBLE,
                0,
                0,
                client.right,
                client.bottom,
                Some(parent.hwnd()),
                None,
                Some(instance.into()),
                None,
            )?
        };

        let content = Self { hwnd };
        content.store_zoom_percent(100);
        Ok(content)
    }

    fn store_zoom_percent(&self, percent: isize) {
        // SAFETY: this window's user data is reserved for the zoom value.
        unsafe {
            SetWindowLongPtrW(self.hwnd, GWLP_USERDATA, percent);
            let _ = InvalidateRect(Some(self.hwnd), None, true);
        }
    }
}

impl ContentHost for PlaceholderContent {
    fn navigate(&mut self, source: &Source) {
        let location = source.location();
        glasspane_core::log_info!("navigate {location}");
        // SAFETY: copies the location into this window's text.
        unsafe {
            let _ = SetWindowTextW(self.hwnd, &HSTRING::from(location));
            let _ = InvalidateRect(Some(self.hwnd), None, true);
        }
    }

    fn set_zoom(&mut self, factor: f64) {
        self.store_zoom_percent((factor * 100.0).round() as isize);
    }
}

unsafe extern "system" fn content_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_ERASEBKGND => LRESULT(1),
        WM_PAINT => {
            unsafe { paint(hwnd) };
            LRESULT(0)
        }
        _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

unsafe fn paint(hwnd: HWND) {
    unsafe {
        let mut ps = PAINTSTRUCT::default();
        let hdc = BeginPaint(hwnd, &mut ps);

        let mut area = RECT::default();
        let _ = GetClientRect(hwnd, &mut area);
        let brush = CreateSolidBrush(BACKGROUND);
        FillRect(hdc, &area, brush);
        let _ = DeleteObject(brush.into());

        let percent = GetWindowLongPtrW(hwnd, GWLP_USERDATA).max(1);
        let font = CreateFontIndirectW(&LOGFONTW {
            lfHeight: -((BASE_FONT_PX * percent as f64 / 100.0).round() as i32),
            lfWeight: FW_NORMAL.0 as i32,
            ..Default::default()
        });
        let previous = SelectObject(hdc, font.into());
        SetBkMode(hdc, TRANSPARENT);
        SetTextColor(hdc, FOREGROUND);

        let mut text = placeholder_text(&window_text(hwnd), percent).encode_utf16().collect::<Vec<_>>();
        area.top += area.bottom / 3;
        DrawTextW(hdc, &mut text, &mut area, DT_CENTER | DT_WORDBREAK | DT_NOPREFIX);

        SelectObject(hdc, previous);
        let _ = DeleteObject(font.into());
        let _ = EndPaint(hwnd, &ps);
    }
}

fn window_text(hwnd: HWND) -> String {
    // SAFETY: reads this window's text into a correctly sized buffer.
    unsafe {
        let len = GetWindowTextLengthW(hwnd);
        if len <= 0 {
            return String::new();
        }
        let mut buf = vec![0u16; len as usize + 1];
        let copied = GetWindowTextW(hwnd, &mut buf);
        String::from_utf16_lossy(&buf[..copied.max(0) as usize])
    }
}

fn placeholder_text(location: &str, zoom_percent: isize) -> String {
    if location.is_empty() {
        return "Glasspane\n\nNo source loaded".to_string();
    }
    format!("Glasspane\n\n{location}\n\nzoom {zoom_percent}%")
}
