//! Modal prompts behind the "Open" entries of the context menu.

use std::path::PathBuf;

use windows::Win32::Foundation::{HGLOBAL, HWND};
use windows::Win32::System::DataExchange::{
    CloseClipboard, GetClipboardData, IsClipboardFormatAvailable, OpenClipboard,
};
use windows::Win32::System::Memory::{GlobalLock, GlobalUnlock};
use windows::Win32::System::Ole::CF_UNICODETEXT;
use windows::Win32::UI::WindowsAndMessaging::{
    IDYES, MB_ICONINFORMATION, MB_ICONQUESTION, MB_OK, MB_YESNO, MessageBoxW,
};
use windows::core::{HSTRING, w};

/// Shows the system "Open" dialog filtered to HTML files.
///
/// The path comes back as the shell produced it, with no lossy string
/// conversion on the way.
pub fn open_html_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open HTML File")
        .add_filter("HTML Files", &["html", "htm"])
        .add_filter("All Files", &["*"])
        .pick_file()
}

/// Offers the URL currently on the clipboard and returns it if the user
/// confirms.
///
/// Only the first non-blank line is offered. An empty clipboard shows a
/// hint and counts as cancel.
pub fn url_from_clipboard(owner: HWND) -> Option<String> {
    let text = clipboard_text(owner).unwrap_or_default();
    let Some(candidate) = url_candidate(&text) else {
        // SAFETY: modal message box owned by the overlay.
        unsafe {
            MessageBoxW(
                Some(owner),
                w!("Copy a URL to the clipboard, then choose Open URL... again."),
                w!("Open URL"),
                MB_OK | MB_ICONINFORMATION,
            );
        }
        return None;
    };

    // SAFETY: modal message box owned by the overlay.
    let answer = unsafe {
        MessageBoxW(
            Some(owner),
            &HSTRING::from(format!("Open {candidate}?")),
            w!("Open URL"),
            MB_YESNO | MB_ICONQUESTION,
        )
    };
    (answer == IDYES).then(|| candidate.to_string())
}

fn clipboard_text(owner: HWND) -> Option<String> {
    let format = u32::from(CF_UNICODETEXT.0);

    // SAFETY: the clipboard is opened and closed here, and the global
    // memory is only read between lock and unlock.
    unsafe {
        IsClipboardFormatAvailable(format).ok()?;
        OpenClipboard(Some(owner)).ok()?;
        let text = GetClipboardData(format).ok().and_then(|handle| {
            let memory = HGLOBAL(handle.0);
            let ptr = GlobalLock(memory) as *const u16;
            if ptr.is_null() {
                return None;
            }
            let len = (0usize..).take_while(|&i| *ptr.add(i) != 0).count();
            let text = String::from_utf16_lossy(std::slice::from_raw_parts(ptr, len));
            let _ = GlobalUnlock(memory);
            Some(text)
        });
        let _ = CloseClipboard();
        text
    }
}

/// The first non-blank line of clipboard text.
fn url_candidate(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|line| !line.is_empty())
}
