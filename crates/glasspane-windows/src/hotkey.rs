use glasspane_core::Command;
use glasspane_core::config::{Hotkey, HotkeyAction, Modifier};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    HOT_KEY_MODIFIERS, MOD_ALT, MOD_CONTROL, MOD_NOREPEAT, MOD_SHIFT, MOD_WIN, RegisterHotKey,
    UnregisterHotKey,
};

use crate::keys;

struct Registration {
    id: i32,
    action: HotkeyAction,
}

/// Global hotkeys registered on the UI thread's message queue.
///
/// `WM_HOTKEY` arrives through the pump, which hands the id to
/// [`HotkeyTable::command_for`]. Registrations are released on drop.
#[derive(Default)]
pub struct HotkeyTable {
    registered: Vec<Registration>,
}

impl HotkeyTable {
    /// Registers every binding it can. Unknown key names and combinations
    /// already taken by another program are logged and skipped.
    pub fn register(bindings: &[Hotkey]) -> Self {
        let mut table = Self::default();
        for (i, binding) in bindings.iter().enumerate() {
            let id = i as i32 + 1;

            let Some(vk) = keys::vk_from_name(&binding.key) else {
                glasspane_core::log_warn!("unknown hotkey key name {:?}", binding.key);
                continue;
            };
            let modifiers = binding
                .modifiers
                .iter()
                .fold(MOD_NOREPEAT, |acc, m| acc | modifier_flag(*m));

            // SAFETY: registers on the calling thread's queue with an id
            // unique within this table.
            if unsafe { RegisterHotKey(None, id, modifiers, vk) }.is_err() {
                glasspane_core::log_warn!(
                    "hotkey {:?}+{} is unavailable",
                    binding.modifiers,
                    binding.key
                );
                continue;
            }
            table.registered.push(Registration {
                id,
                action: binding.action,
            });
        }
        glasspane_core::log_info!("registered {} hotkeys", table.registered.len());
        table
    }

    /// Maps a `WM_HOTKEY` id back to its command.
    pub fn command_for(&self, id: i32) -> Option<Command> {
        self.registered
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.action.command())
    }
}

impl Drop for HotkeyTable {
    fn drop(&mut self) {
        for r in &self.registered {
            // SAFETY: releases a registration made by this table.
            unsafe {
                let _ = UnregisterHotKey(None, r.id);
            }
        }
    }
}

fn modifier_flag(modifier: Modifier) -> HOT_KEY_MODIFIERS {
    match modifier {
        Modifier::Alt => MOD_ALT,
        Modifier::Shift => MOD_SHIFT,
        Modifier::Ctrl => MOD_CONTROL,
        Modifier::Win => MOD_WIN,
    }
}
