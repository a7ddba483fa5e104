//! Menu model shared by the context menu and any tray collaborator.
//!
//! The core describes menus as data; platform crates render them.

use crate::command::Command;
use crate::settings::{self, OPACITY_LEVELS, OverlaySettings, ZOOM_LEVELS};

/// One option in an exclusive-choice group.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub label: String,
    pub checked: bool,
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenuEntry {
    Item {
        label: String,
        command: Command,
    },
    /// A checkable item.
    Toggle {
        label: String,
        checked: bool,
        command: Command,
    },
    /// A submenu whose options behave like radio buttons.
    Choices {
        label: String,
        options: Vec<Choice>,
    },
    Separator,
}

/// Builds a radio-style submenu from a table of percentage levels.
///
/// The option matching `current` is checked; each option carries the
/// command `make` produces for its fraction.
pub fn exclusive_choice(
    label: &str,
    levels: &[u32],
    current: f64,
    make: impl Fn(f64) -> Command,
) -> MenuEntry {
    let options = levels
        .iter()
        .map(|&pct| Choice {
            label: format!("{pct}%"),
            checked: settings::is_level(current, pct),
            command: make(settings::fraction(pct)),
        })
        .collect();

    MenuEntry::Choices {
        label: label.to_string(),
        options,
    }
}

/// The overlay's right-click menu.
pub fn context_menu(settings: &OverlaySettings, click_through: bool) -> Vec<MenuEntry> {
    vec![
        MenuEntry::Item {
            label: "Open HTML File...".into(),
            command: Command::BrowseFile,
        },
        MenuEntry::Item {
            label: "Open URL...".into(),
            command: Command::EnterUrl,
        },
        MenuEntry::Separator,
        exclusive_choice("Opacity", OPACITY_LEVELS, settings.opacity, Command::SetOpacity),
        exclusive_choice("Scale", ZOOM_LEVELS, settings.zoom, Command::SetZoom),
        MenuEntry::Toggle {
            label: "Click-Through".into(),
            checked: click_through,
            command: Command::ToggleClickThrough,
        },
        MenuEntry::Separator,
        MenuEntry::Item {
            label: "Exit".into(),
            command: Command::Quit,
        },
    ]
}
