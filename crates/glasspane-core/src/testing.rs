//! In-memory host and renderer for unit tests.

use std::cell::RefCell;
use std::path::PathBuf;

use crate::command::Command;
use crate::controller::OverlayController;
use crate::edges::{CursorKind, EdgeSet};
use crate::host::{
    ContentHost, HostResult, NativeMoveResize, NativeOutcome, OverlayHost, SurfaceId, WindowStyle,
};
use crate::menu::MenuEntry;
use crate::rect::{MinSize, Point, Rect};
use crate::source::Source;

pub const OWN_SURFACE: SurfaceId = SurfaceId(1);

/// Records every call the core makes and answers from settable fields.
pub struct FakeHost {
    pub window_rect: RefCell<Rect>,
    pub placed: RefCell<Vec<Rect>>,
    pub style: RefCell<WindowStyle>,
    pub reject_style: RefCell<bool>,
    pub topmost_calls: RefCell<u32>,
    pub visible: RefCell<bool>,
    pub popup: RefCell<bool>,
    pub surface_at: RefCell<Option<SurfaceId>>,
    pub cursor: RefCell<CursorKind>,
    pub opacity: RefCell<Option<f64>>,
    pub title: RefCell<String>,
    pub menu_choice: RefCell<Option<Command>>,
    pub menus_shown: RefCell<Vec<Point>>,
    pub picked_file: RefCell<Option<PathBuf>>,
    pub typed_url: RefCell<Option<String>>,
    pub notifications: RefCell<Vec<(String, String)>>,
    pub quit_requested: RefCell<bool>,
    pub native_outcome: RefCell<NativeOutcome>,
    pub rect_after_native: RefCell<Option<Rect>>,
    pub native_moves: RefCell<Vec<SurfaceId>>,
    pub native_resizes: RefCell<Vec<EdgeSet>>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            window_rect: RefCell::new(Rect::new(100, 100, 900, 700)),
            placed: RefCell::default(),
            style: RefCell::default(),
            reject_style: RefCell::new(false),
            topmost_calls: RefCell::new(0),
            visible: RefCell::new(true),
            popup: RefCell::new(false),
            surface_at: RefCell::new(None),
            cursor: RefCell::default(),
            opacity: RefCell::new(None),
            title: RefCell::default(),
            menu_choice: RefCell::new(None),
            menus_shown: RefCell::default(),
            picked_file: RefCell::new(None),
            typed_url: RefCell::new(None),
            notifications: RefCell::default(),
            quit_requested: RefCell::new(false),
            native_outcome: RefCell::new(NativeOutcome::Unsupported),
            rect_after_native: RefCell::new(None),
            native_moves: RefCell::default(),
            native_resizes: RefCell::default(),
        }
    }
}

impl FakeHost {
    fn finish_native(&self) -> NativeOutcome {
        let outcome = *self.native_outcome.borrow();
        if outcome == NativeOutcome::Completed {
            if let Some(rect) = *self.rect_after_native.borrow() {
                *self.window_rect.borrow_mut() = rect;
            }
        }
        outcome
    }
}

impl NativeMoveResize for FakeHost {
    fn try_move(&self, surface: SurfaceId) -> NativeOutcome {
        self.native_moves.borrow_mut().push(surface);
        self.finish_native()
    }

    fn try_resize(&self, _surface: SurfaceId, edges: EdgeSet) -> NativeOutcome {
        self.native_resizes.borrow_mut().push(edges);
        self.finish_native()
    }
}

impl OverlayHost for FakeHost {
    fn surface(&self) -> SurfaceId {
        OWN_SURFACE
    }

    fn rect(&self) -> HostResult<Rect> {
        Ok(*self.window_rect.borrow())
    }

    fn set_rect(&self, rect: &Rect) -> HostResult<()> {
        *self.window_rect.borrow_mut() = *rect;
        self.placed.borrow_mut().push(*rect);
        Ok(())
    }

    fn window_style(&self) -> HostResult<WindowStyle> {
        Ok(*self.style.borrow())
    }

    fn set_window_style(&self, style: WindowStyle) -> HostResult<()> {
        if *self.reject_style.borrow() {
            return Err("style change rejected".into());
        }
        *self.style.borrow_mut() = style;
        Ok(())
    }

    fn bring_to_topmost(&self) -> HostResult<()> {
        *self.topmost_calls.borrow_mut() += 1;
        Ok(())
    }

    fn is_visible(&self) -> bool {
        *self.visible.borrow()
    }

    fn popup_active(&self) -> bool {
        *self.popup.borrow()
    }

    fn root_surface_at(&self, _point: Point) -> Option<SurfaceId> {
        *self.surface_at.borrow()
    }

    fn set_cursor(&self, cursor: CursorKind) {
        *self.cursor.borrow_mut() = cursor;
    }

    fn set_opacity(&self, opacity: f64) -> HostResult<()> {
        *self.opacity.borrow_mut() = Some(opacity);
        Ok(())
    }

    fn set_title(&self, title: &str) {
        *self.title.borrow_mut() = title.to_string();
    }

    fn show_context_menu(&self, at: Point, _entries: &[MenuEntry]) -> Option<Command> {
        self.menus_shown.borrow_mut().push(at);
        self.menu_choice.borrow_mut().take()
    }

    fn pick_file(&self) -> Option<PathBuf> {
        self.picked_file.borrow_mut().take()
    }

    fn prompt_url(&self) -> Option<String> {
        self.typed_url.borrow_mut().take()
    }

    fn notify(&self, title: &str, message: &str) {
        self.notifications
            .borrow_mut()
            .push((title.to_string(), message.to_string()));
    }

    fn request_quit(&self) {
        *self.quit_requested.borrow_mut() = true;
    }
}

/// Remembers what the controller asked the renderer to do.
#[derive(Debug, Default)]
pub struct FakeContent {
    pub navigations: Vec<String>,
    pub zoom: Option<f64>,
}

impl ContentHost for FakeContent {
    fn navigate(&mut self, source: &Source) {
        self.navigations.push(source.location());
    }

    fn set_zoom(&mut self, factor: f64) {
        self.zoom = Some(factor);
    }
}

/// A controller over a default fake host, placed at (100,100)-(900,700).
pub fn controller() -> OverlayController<FakeHost, FakeContent> {
    controller_with(FakeHost::default())
}

pub fn controller_with(host: FakeHost) -> OverlayController<FakeHost, FakeContent> {
    controller_at(host, Rect::new(100, 100, 900, 700))
}

pub fn controller_at(host: FakeHost, rect: Rect) -> OverlayController<FakeHost, FakeContent> {
    *host.window_rect.borrow_mut() = rect;
    OverlayController::new(host, FakeContent::default(), rect, MinSize::default())
}

/// Creates an empty file under a per-process temp directory and returns
/// its absolute path.
pub fn scratch_page(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("glasspane-core-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, "<html></html>").unwrap();
    path
}
