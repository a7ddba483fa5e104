use std::cell::RefCell;
use std::rc::Rc;

use glasspane_core::{Config, HostResult, OverlayController, OverlayHost, PointerRouter, Rect, Source};
use windows::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

use crate::content::PlaceholderContent;
use crate::hotkey::HotkeyTable;
use crate::window::OverlayWindow;
use crate::{pointer, pump};

/// Creates the overlay showing `source` and runs it until the user quits.
///
/// Blocks the calling thread, which becomes the UI thread.
pub fn run(config: &Config, source: Source) -> HostResult<()> {
    let rect = centered(config);
    let window = OverlayWindow::create(&rect, "Glasspane")?;
    let content = PlaceholderContent::create(&window)?;

    let mut controller =
        OverlayController::new(window, content, rect, config.overlay.min_size());
    controller.set_opacity(config.overlay.opacity);
    controller.set_zoom(config.overlay.zoom);
    controller.show_source(source);
    controller.host().show();

    let controller = Rc::new(RefCell::new(controller));
    let router = PointerRouter::new(config.pointer);

    let filter_target = Rc::clone(&controller);
    let _filter = pump::install_filter(move |msg| {
        let Some(event) = pointer::translate(msg) else {
            return false;
        };
        // Busy means a command is running a modal loop; let it have the input.
        let Ok(mut ctl) = filter_target.try_borrow_mut() else {
            return false;
        };
        router.route(&mut ctl, &event).is_consumed()
    });

    let hotkeys = HotkeyTable::register(&config.hotkey);
    pump::run(|id| {
        let Some(command) = hotkeys.command_for(id) else {
            return;
        };
        match controller.try_borrow_mut() {
            Ok(mut ctl) => {
                ctl.execute(command);
            }
            Err(_) => glasspane_core::log_debug!("hotkey {id} ignored while busy"),
        }
    });

    glasspane_core::log_info!("message loop ended");
    Ok(())
}

/// The configured size, centred on the primary monitor.
fn centered(config: &Config) -> Rect {
    // SAFETY: plain metric queries.
    let (screen_w, screen_h) =
        unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };
    let o = &config.overlay;
    o.initial_rect(((screen_w - o.width) / 2).max(0), ((screen_h - o.height) / 2).max(0))
}
