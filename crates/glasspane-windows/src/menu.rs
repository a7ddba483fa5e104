use glasspane_core::menu::MenuEntry;
use glasspane_core::{Command, Point};
use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    AppendMenuW, CheckMenuRadioItem, CreatePopupMenu, DestroyMenu, HMENU, MF_BYCOMMAND,
    MF_CHECKED, MF_POPUP, MF_SEPARATOR, MF_STRING, PostMessageW, SetForegroundWindow,
    TPM_LEFTALIGN, TPM_RETURNCMD, TPM_RIGHTBUTTON, TPM_TOPALIGN, TrackPopupMenu, WM_NULL,
};
use windows::core::{HSTRING, PCWSTR};

/// Menu item ids handed to Win32, in order of appearance.
///
/// Id 0 means "dismissed" to `TrackPopupMenu`, so ids start at 1.
#[derive(Debug, Default)]
struct CommandIds {
    commands: Vec<Command>,
}

impl CommandIds {
    fn assign(&mut self, command: &Command) -> u32 {
        self.commands.push(command.clone());
        self.commands.len() as u32
    }

    fn command(&self, id: u32) -> Option<Command> {
        let index = usize::try_from(id).ok()?.checked_sub(1)?;
        self.commands.get(index).cloned()
    }
}

/// Shows `entries` as a popup menu at `at` and blocks until the user
/// picks an item or dismisses the menu.
pub fn show(owner: HWND, at: Point, entries: &[MenuEntry]) -> Option<Command> {
    let mut ids = CommandIds::default();

    // SAFETY: the menu handle is created, tracked, and destroyed here; the
    // submenus appended to it are destroyed along with it.
    unsafe {
        let menu = CreatePopupMenu().ok()?;
        if let Err(e) = append_entries(menu, entries, &mut ids) {
            glasspane_core::log_warn!("could not build context menu: {e}");
            let _ = DestroyMenu(menu);
            return None;
        }

        // A popup menu only closes on outside clicks while its owner is
        // the foreground window.
        let _ = SetForegroundWindow(owner);
        let chosen = TrackPopupMenu(
            menu,
            TPM_RETURNCMD | TPM_RIGHTBUTTON | TPM_LEFTALIGN | TPM_TOPALIGN,
            at.x,
            at.y,
            None,
            owner,
            None,
        );
        let _ = PostMessageW(Some(owner), WM_NULL, WPARAM(0), LPARAM(0));
        let _ = DestroyMenu(menu);

        ids.command(chosen.0 as u32)
    }
}

unsafe fn append_entries(
    menu: HMENU,
    entries: &[MenuEntry],
    ids: &mut CommandIds,
) -> windows::core::Result<()> {
    for entry in entries {
        match entry {
            MenuEntry::Item { label, command } => unsafe {
                AppendMenuW(menu, MF_STRING, ids.assign(command) as usize, &HSTRING::from(label))?;
            },
            MenuEntry::Toggle {
                label,
                checked,
                command,
            } => {
                let flags = if *checked { MF_STRING | MF_CHECKED } else { MF_STRING };
                unsafe {
                    AppendMenuW(menu, flags, ids.assign(command) as usize, &HSTRING::from(label))?;
                }
            }
            MenuEntry::Choices { label, options } => unsafe {
                let submenu = CreatePopupMenu()?;
                let mut checked_id = None;
                let mut range = None::<(u32, u32)>;
                for option in options {
                    let id = ids.assign(&option.command);
                    AppendMenuW(submenu, MF_STRING, id as usize, &HSTRING::from(&option.label))?;
                    range = Some(range.map_or((id, id), |(first, _)| (first, id)));
                    if option.checked {
                        checked_id = Some(id);
                    }
                }
                if let (Some((first, last)), Some(id)) = (range, checked_id) {
                    let _ = CheckMenuRadioItem(submenu, first, last, id, MF_BYCOMMAND.0);
                }
                AppendMenuW(menu, MF_POPUP, submenu.0 as usize, &HSTRING::from(label))?;
            },
            MenuEntry::Separator => unsafe {
                AppendMenuW(menu, MF_SEPARATOR, 0, PCWSTR::null())?;
            },
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_start_at_one_and_map_back() {
        // Arrange
        let mut ids = CommandIds::default();

        // Act
        let first = ids.assign(&Command::SetOpacity(0.5));
        let second = ids.assign(&Command::Quit);

        // Assert
        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(ids.command(2), Some(Command::Quit));
    }

    #[test]
    fn dismissed_menu_maps_to_nothing() {
        let mut ids = CommandIds::default();
        ids.assign(&Command::Quit);

        assert_eq!(ids.command(0), None);
        assert_eq!(ids.command(9), None);
    }
}
