use std::path::Path;

use crate::click_through::ClickThrough;
use crate::command::{Command, CommandOutcome};
use crate::edges::{CursorKind, EdgeSet};
use crate::gesture::DragState;
use crate::host::{ContentHost, NativeOutcome, OverlayHost, SurfaceId};
use crate::menu;
use crate::rect::{MinSize, Point, Rect};
use crate::settings::{self, OPACITY_LEVELS, OverlaySettings, ZOOM_LEVELS};
use crate::source::{self, Resolver, Source, SourceError};

const TITLE_PREFIX: &str = "Glasspane";

/// Window-lifetime state of the overlay.
///
/// Owned exclusively by [`OverlayController`]; other components read it
/// through accessors and request changes through the controller's methods.
#[derive(Debug, Default)]
pub struct OverlayState {
    rect: Rect,
    settings: OverlaySettings,
    source: Option<Source>,
    title: String,
    click_through: ClickThrough,
    gesture: DragState,
}

/// Owner of the overlay's geometry, appearance, and loaded source.
///
/// Generic over the platform host and the content renderer so the whole
/// engine runs against fakes in tests.
pub struct OverlayController<H, C> {
    host: H,
    content: C,
    min_size: MinSize,
    state: OverlayState,
}

impl<H: OverlayHost, C: ContentHost> OverlayController<H, C> {
    /// Wraps a host window that is already placed at `rect`.
    pub fn new(host: H, content: C, rect: Rect, min_size: MinSize) -> Self {
        Self {
            host,
            content,
            min_size,
            state: OverlayState {
                rect: rect.clamped_to(min_size),
                title: TITLE_PREFIX.to_string(),
                ..Default::default()
            },
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn surface(&self) -> SurfaceId {
        self.host.surface()
    }

    pub fn rect(&self) -> Rect {
        self.state.rect
    }

    pub fn min_size(&self) -> MinSize {
        self.min_size
    }

    pub fn settings(&self) -> OverlaySettings {
        self.state.settings
    }

    pub fn source(&self) -> Option<&Source> {
        self.state.source.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.state.title
    }

    pub fn is_click_through(&self) -> bool {
        self.state.click_through.is_active()
    }

    pub fn gesture(&self) -> DragState {
        self.state.gesture
    }

    // -- Source --

    /// Loads `text` using the process working directory and home directory.
    pub fn load_source(&mut self, text: &str) -> Result<(), SourceError> {
        self.load_source_with(&Resolver::from_env(), text)
    }

    /// Resolves `text` and, only if that succeeds, replaces the current
    /// source with a full reload. On failure nothing changes.
    pub fn load_source_with(&mut self, resolver: &Resolver, text: &str) -> Result<(), SourceError> {
        let source = resolver.resolve(text)?;
        self.show_source(source);
        Ok(())
    }

    /// Loads a filesystem path exactly as the platform handed it over.
    pub fn load_path(&mut self, path: &Path) -> Result<(), SourceError> {
        let source = Resolver::from_env().resolve_path(path)?;
        self.show_source(source);
        Ok(())
    }

    /// Replaces the current source with one that has already been resolved.
    pub fn show_source(&mut self, source: Source) {
        self.content.navigate(&source);
        self.state.title = format!("{TITLE_PREFIX} - {source}");
        self.host.set_title(&self.state.title);
        crate::log_info!("loaded source {source}");
        self.state.source = Some(source);
    }

    // -- Appearance --

    /// Sets window opacity, clamped to `[0.0, 1.0]`.
    pub fn set_opacity(&mut self, opacity: f64) {
        let opacity = if opacity.is_nan() { 1.0 } else { opacity.clamp(0.0, 1.0) };
        if let Err(e) = self.host.set_opacity(opacity) {
            crate::log_warn!("set_opacity({opacity}) failed: {e}");
            return;
        }
        self.state.settings.opacity = opacity;
    }

    /// Sets the content zoom factor. Non-positive or non-finite values are
    /// ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() || zoom <= 0.0 {
            crate::log_warn!("ignoring invalid zoom factor {zoom}");
            return;
        }
        self.content.set_zoom(zoom);
        self.state.settings.zoom = zoom;
    }

    fn step_opacity(&mut self, up: bool) {
        self.set_opacity(settings::step(OPACITY_LEVELS, self.state.settings.opacity, up));
    }

    fn step_zoom(&mut self, up: bool) {
        self.set_zoom(settings::step(ZOOM_LEVELS, self.state.settings.zoom, up));
    }

    // -- Click-through --

    /// Flips click-through mode and returns the new state.
    ///
    /// If the host rejects the style change the flag keeps its old value.
    pub fn toggle_click_through(&mut self) -> bool {
        let target = !self.is_click_through();
        self.set_click_through(target);
        self.is_click_through()
    }

    pub fn set_click_through(&mut self, active: bool) {
        let OverlayState {
            click_through,
            gesture,
            ..
        } = &mut self.state;
        if let Err(e) = click_through.set_state(&self.host, gesture, active) {
            crate::log_error!("click-through update failed: {e}");
        }
    }

    // -- Geometry --

    /// Places the window at `rect`, grown to the minimum size if needed.
    pub fn set_geometry(&mut self, rect: Rect) {
        let rect = rect.clamped_to(self.min_size);
        match self.host.set_rect(&rect) {
            Ok(()) => self.state.rect = rect,
            Err(e) => crate::log_warn!("set_rect {rect:?} failed: {e}"),
        }
    }

    /// Re-reads geometry from the host after it moved the window itself.
    pub fn sync_geometry(&mut self) {
        match self.host.rect() {
            Ok(rect) => self.state.rect = rect,
            Err(e) => crate::log_warn!("could not read window rect: {e}"),
        }
    }

    // -- Gesture bookkeeping for the pointer router --

    pub(crate) fn begin_gesture(&mut self, gesture: DragState) {
        self.state.gesture = gesture;
    }

    pub(crate) fn clear_gesture(&mut self) -> bool {
        self.state.gesture.reset()
    }

    pub(crate) fn try_native(&self, edges: EdgeSet) -> NativeOutcome {
        let surface = self.host.surface();
        if edges.is_empty() {
            self.host.try_move(surface)
        } else {
            self.host.try_resize(surface, edges)
        }
    }

    pub(crate) fn show_cursor(&self, cursor: CursorKind) {
        self.host.set_cursor(cursor);
    }

    /// Shows the context menu at `at` and runs whatever the user picks.
    pub fn open_context_menu(&mut self, at: Point) -> CommandOutcome {
        let entries = menu::context_menu(&self.state.settings, self.is_click_through());
        match self.host.show_context_menu(at, &entries) {
            Some(command) => self.execute(command),
            None => CommandOutcome::Continue,
        }
    }

    // -- Commands --

    /// Executes a command from a menu, hotkey, or dialog.
    ///
    /// Rejected sources are reported to the user through the host and leave
    /// the current source loaded.
    pub fn execute(&mut self, command: Command) -> CommandOutcome {
        crate::log_debug!("execute {command:?}");
        let loaded = match command {
            Command::BrowseFile => match self.host.pick_file() {
                Some(path) => return self.execute(Command::OpenFile(path)),
                None => Ok(()),
            },
            Command::EnterUrl => match self.host.prompt_url() {
                Some(text) => return self.execute(Command::OpenUrl(text)),
                None => Ok(()),
            },
            Command::OpenFile(path) => self.load_path(&path),
            Command::OpenUrl(text) => match source::normalize_url_input(&text) {
                Some(url) => self.load_source(&url),
                None => Ok(()),
            },
            Command::SetOpacity(value) => {
                self.set_opacity(value);
                Ok(())
            }
            Command::SetZoom(value) => {
                self.set_zoom(value);
                Ok(())
            }
            Command::OpacityUp => {
                self.step_opacity(true);
                Ok(())
            }
            Command::OpacityDown => {
                self.step_opacity(false);
                Ok(())
            }
            Command::ZoomIn => {
                self.step_zoom(true);
                Ok(())
            }
            Command::ZoomOut => {
                self.step_zoom(false);
                Ok(())
            }
            Command::ToggleClickThrough => {
                self.toggle_click_through();
                Ok(())
            }
            Command::Quit => {
                self.host.request_quit();
                return CommandOutcome::Quit;
            }
        };

        match loaded {
            Ok(()) => CommandOutcome::Continue,
            Err(e) => {
                crate::log_warn!("load failed: {e}");
                self.host.notify("Load Failed", &e.to_string());
                CommandOutcome::Rejected(e)
            }
        }
    }
}
