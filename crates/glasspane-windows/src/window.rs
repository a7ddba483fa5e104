use std::cell::Cell;
use std::path::PathBuf;
use std::sync::Once;

use glasspane_core::menu::MenuEntry;
use glasspane_core::{Command, CursorKind, HostResult, OverlayHost, Point, Rect, SurfaceId, WindowStyle};
use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, POINT, RECT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, GA_ROOT, GUI_INMENUMODE, GUI_POPUPMENUMODE,
    GUITHREADINFO, GW_CHILD, GWL_EXSTYLE, GetAncestor, GetClientRect, GetGUIThreadInfo, GetWindow,
    GetWindowLongPtrW, GetWindowRect, HTCLIENT, HWND_TOPMOST, IDC_ARROW, IDC_SIZENESW,
    IDC_SIZENS, IDC_SIZENWSE, IDC_SIZEWE, IsWindowVisible, LWA_ALPHA, LoadCursorW, MB_ICONWARNING,
    MB_OK, MessageBoxW, MoveWindow, PostQuitMessage, RegisterClassW, SW_SHOWNORMAL,
    SWP_FRAMECHANGED, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER, SetCursor,
    SetLayeredWindowAttributes, SetWindowLongPtrW, SetWindowPos, SetWindowTextW, ShowWindow,
    WINDOW_EX_STYLE, WM_DESTROY, WM_NCCALCSIZE, WM_NCHITTEST, WM_SETCURSOR, WM_SIZE, WNDCLASSW,
    WS_CLIPCHILDREN, WS_EX_LAYERED, WS_EX_TOPMOST, WS_EX_TRANSPARENT, WS_POPUP, WS_THICKFRAME,
    WindowFromPoint,
};
use windows::core::{HSTRING, PCWSTR, w};

use crate::{dialog, menu};

const CLASS_NAME: PCWSTR = w!("GlasspaneOverlay");
static REGISTER_CLASS: Once = Once::new();

thread_local! {
    // Read by the window procedure on WM_SETCURSOR.
    static CURSOR: Cell<CursorKind> = const { Cell::new(CursorKind::Arrow) };
}

/// The overlay's top-level window.
///
/// A borderless popup that keeps `WS_THICKFRAME` so the system sizing loop
/// still works, with the frame hidden by answering `WM_NCCALCSIZE` with an
/// empty non-client area. All pointer handling happens in the pump, so the
/// window reports its whole surface as client area.
pub struct OverlayWindow {
    hwnd: HWND,
    alpha: Cell<u8>,
}

impl OverlayWindow {
    /// Creates the window hidden, topmost, and layered at full opacity.
    pub fn create(rect: &Rect, title: &str) -> HostResult<Self> {
        // SAFETY: standard class registration and window creation on the
        // calling thread, which becomes the UI thread.
        let hwnd = unsafe {
            let instance = GetModuleHandleW(None)?;
            REGISTER_CLASS.call_once(|| {
                let wc = WNDCLASSW {
                    lpfnWndProc: Some(overlay_proc),
                    hInstance: instance.into(),
                    lpszClassName: CLASS_NAME,
                    ..Default::default()
                };
                RegisterClassW(&wc);
            });

            CreateWindowExW(
                WS_EX_TOPMOST | WS_EX_LAYERED,
                CLASS_NAME,
                &HSTRING::from(title),
                WS_POPUP | WS_THICKFRAME | WS_CLIPCHILDREN,
                rect.left,
                rect.top,
                rect.width(),
                rect.height(),
                None,
                None,
                Some(instance.into()),
                None,
            )?
        };

        let window = Self {
            hwnd,
            alpha: Cell::new(u8::MAX),
        };
        // A layered window stays invisible until its attributes are set.
        window.apply_alpha()?;
        glasspane_core::log_debug!("created overlay 0x{:X} at {rect:?}", hwnd.0 as usize);
        Ok(window)
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    pub fn show(&self) {
        // SAFETY: plain show call on a window this struct owns.
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_SHOWNORMAL);
        }
    }

    fn ex_style(&self) -> u32 {
        // SAFETY: reads a style long from a valid window.
        unsafe { GetWindowLongPtrW(self.hwnd, GWL_EXSTYLE) as u32 }
    }

    fn apply_alpha(&self) -> HostResult<()> {
        // SAFETY: the window carries WS_EX_LAYERED whenever this is called.
        unsafe { SetLayeredWindowAttributes(self.hwnd, COLORREF(0), self.alpha.get(), LWA_ALPHA)? };
        Ok(())
    }
}

impl Drop for OverlayWindow {
    fn drop(&mut self) {
        // SAFETY: destroys the window this struct created.
        unsafe {
            let _ = DestroyWindow(self.hwnd);
        }
    }
}

impl OverlayHost for OverlayWindow {
    fn surface(&self) -> SurfaceId {
        SurfaceId(self.hwnd.0 as usize)
    }

    fn rect(&self) -> HostResult<Rect> {
        let mut r = RECT::default();
        // SAFETY: writes into a local RECT.
        unsafe { GetWindowRect(self.hwnd, &mut r)? };
        Ok(Rect::new(r.left, r.top, r.right, r.bottom))
    }

    fn set_rect(&self, rect: &Rect) -> HostResult<()> {
        // SAFETY: moves and sizes a window this struct owns.
        unsafe {
            SetWindowPos(
                self.hwnd,
                None,
                rect.left,
                rect.top,
                rect.width(),
                rect.height(),
                SWP_NOZORDER | SWP_NOACTIVATE,
            )?
        };
        Ok(())
    }

    fn window_style(&self) -> HostResult<WindowStyle> {
        let ex = self.ex_style();
        Ok(WindowStyle {
            layered: ex & WS_EX_LAYERED.0 != 0,
            input_transparent: ex & WS_EX_TRANSPARENT.0 != 0,
        })
    }

    fn set_window_style(&self, style: WindowStyle) -> HostResult<()> {
        let before = self.ex_style();
        let after = with_bit(
            with_bit(before, WS_EX_LAYERED, style.layered),
            WS_EX_TRANSPARENT,
            style.input_transparent,
        );
        if after == before {
            return Ok(());
        }

        // SAFETY: only the two managed bits differ from the current style.
        unsafe { SetWindowLongPtrW(self.hwnd, GWL_EXSTYLE, after as isize) };
        if self.ex_style() != after {
            return Err(format!("extended style 0x{after:08X} was not applied").into());
        }
        if style.layered && before & WS_EX_LAYERED.0 == 0 {
            self.apply_alpha()?;
        }
        Ok(())
    }

    fn bring_to_topmost(&self) -> HostResult<()> {
        // SAFETY: z-order change only; FRAMECHANGED makes style edits stick.
        unsafe {
            SetWindowPos(
                self.hwnd,
                Some(HWND_TOPMOST),
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE | SWP_FRAMECHANGED,
            )?
        };
        Ok(())
    }

    fn is_visible(&self) -> bool {
        // SAFETY: simple query.
        unsafe { IsWindowVisible(self.hwnd).as_bool() }
    }

    fn popup_active(&self) -> bool {
        let mut info = GUITHREADINFO {
            cbSize: size_of::<GUITHREADINFO>() as u32,
            ..Default::default()
        };
        // SAFETY: `info` is a correctly sized local struct.
        if unsafe { GetGUIThreadInfo(GetCurrentThreadId(), &mut info) }.is_err() {
            return false;
        }
        info.flags.0 & (GUI_INMENUMODE.0 | GUI_POPUPMENUMODE.0) != 0
    }

    fn root_surface_at(&self, point: Point) -> Option<SurfaceId> {
        // SAFETY: pure hit-test queries.
        let root = unsafe {
            let hit = WindowFromPoint(POINT {
                x: point.x,
                y: point.y,
            });
            if hit.is_invalid() {
                return None;
            }
            GetAncestor(hit, GA_ROOT)
        };
        (!root.is_invalid()).then(|| SurfaceId(root.0 as usize))
    }

    fn set_cursor(&self, cursor: CursorKind) {
        CURSOR.with(|c| c.set(cursor));
        apply_cursor(cursor);
    }

    fn set_opacity(&self, opacity: f64) -> HostResult<()> {
        self.alpha.set((opacity.clamp(0.0, 1.0) * 255.0).round() as u8);
        if self.ex_style() & WS_EX_LAYERED.0 == 0 {
            let style = WindowStyle {
                layered: true,
                ..self.window_style()?
            };
            return self.set_window_style(style);
        }
        self.apply_alpha()
    }

    fn set_title(&self, title: &str) {
        // SAFETY: copies the string into the window's caption.
        unsafe {
            let _ = SetWindowTextW(self.hwnd, &HSTRING::from(title));
        }
    }

    fn show_context_menu(&self, at: Point, entries: &[MenuEntry]) -> Option<Command> {
        menu::show(self.hwnd, at, entries)
    }

    fn pick_file(&self) -> Option<PathBuf> {
        dialog::open_html_file()
    }

    fn prompt_url(&self) -> Option<String> {
        dialog::url_from_clipboard(self.hwnd)
    }

    fn notify(&self, title: &str, message: &str) {
        // SAFETY: modal message box owned by the overlay.
        unsafe {
            MessageBoxW(
                Some(self.hwnd),
                &HSTRING::from(message),
                &HSTRING::from(title),
                MB_OK | MB_ICONWARNING,
            );
        }
    }

    fn request_quit(&self) {
        // SAFETY: posts WM_QUIT to this thread's queue.
        unsafe { PostQuitMessage(0) };
    }
}

fn with_bit(style: u32, bit: WINDOW_EX_STYLE, on: bool) -> u32 {
    if on { style | bit.0 } else { style & !bit.0 }
}

fn apply_cursor(cursor: CursorKind) {
    let id = match cursor {
        CursorKind::Arrow => IDC_ARROW,
        CursorKind::ResizeHorizontal => IDC_SIZEWE,
        CursorKind::ResizeVertical => IDC_SIZENS,
        CursorKind::ResizeNwSe => IDC_SIZENWSE,
        CursorKind::ResizeNeSw => IDC_SIZENESW,
    };
    // SAFETY: system cursors are shared and never freed.
    unsafe {
        if let Ok(handle) = LoadCursorW(None, id) {
            SetCursor(Some(handle));
        }
    }
}

unsafe extern "system" fn overlay_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        // No non-client area: the frame exists only for the sizing loop.
        WM_NCCALCSIZE if wparam.0 != 0 => LRESULT(0),
        WM_NCHITTEST => LRESULT(HTCLIENT as isize),
        WM_SETCURSOR if (lparam.0 & 0xFFFF) as u32 == HTCLIENT => {
            apply_cursor(CURSOR.with(Cell::get));
            LRESULT(1)
        }
        WM_SIZE => {
            fit_child(hwnd);
            LRESULT(0)
        }
        WM_DESTROY => {
            unsafe { PostQuitMessage(0) };
            LRESULT(0)
        }
        _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

/// Stretches the content child over the whole client area.
fn fit_child(hwnd: HWND) {
    // SAFETY: queries and moves a child of `hwnd`.
    unsafe {
        let Ok(child) = GetWindow(hwnd, GW_CHILD) else {
            return;
        };
        let mut client = RECT::default();
        if GetClientRect(hwnd, &mut client).is_ok() {
            let _ = MoveWindow(child, 0, 0, client.right, client.bottom, true);
        }
    }
}
