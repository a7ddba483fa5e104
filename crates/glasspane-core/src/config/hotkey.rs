use serde::{Deserialize, Serialize};

use crate::command::Command;

/// A global key combination bound to an overlay command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotkey {
    /// What the combination does.
    pub action: HotkeyAction,
    /// Key name (e.g. "T", "F8", "Up", "Minus").
    pub key: String,
    /// Modifier keys (e.g. ["ctrl", "alt"]).
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Alt,
    Shift,
    Ctrl,
    Win,
}

/// Commands that make sense without a pointer or a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HotkeyAction {
    ToggleClickThrough,
    OpacityUp,
    OpacityDown,
    ZoomIn,
    ZoomOut,
    Quit,
}

impl HotkeyAction {
    pub fn command(self) -> Command {
        match self {
            Self::ToggleClickThrough => Command::ToggleClickThrough,
            Self::OpacityUp => Command::OpacityUp,
            Self::OpacityDown => Command::OpacityDown,
            Self::ZoomIn => Command::ZoomIn,
            Self::ZoomOut => Command::ZoomOut,
            Self::Quit => Command::Quit,
        }
    }
}

/// Built-in bindings, used when the config has no `[[hotkey]]` entries.
///
/// Ctrl+Alt+T is the only way back out of click-through mode, since the
/// window no longer receives pointer input while it is on.
pub fn defaults() -> Vec<Hotkey> {
    use Modifier::{Alt, Ctrl};

    vec![
        bind(HotkeyAction::ToggleClickThrough, "T", &[Ctrl, Alt]),
        bind(HotkeyAction::Quit, "Q", &[Ctrl, Alt]),
        bind(HotkeyAction::OpacityUp, "Up", &[Ctrl, Alt]),
        bind(HotkeyAction::OpacityDown, "Down", &[Ctrl, Alt]),
        bind(HotkeyAction::ZoomIn, "Plus", &[Ctrl, Alt]),
        bind(HotkeyAction::ZoomOut, "Minus", &[Ctrl, Alt]),
    ]
}

fn bind(action: HotkeyAction, key: &str, modifiers: &[Modifier]) -> Hotkey {
    Hotkey {
        action,
        key: key.into(),
        modifiers: modifiers.to_vec(),
    }
}
