/// Named keys and their virtual key codes. Names are upper case.
const NAMED: &[(&str, u32)] = &[
    ("ENTER", 0x0D),
    ("RETURN", 0x0D),
    ("TAB", 0x09),
    ("ESCAPE", 0x1B),
    ("ESC", 0x1B),
    ("SPACE", 0x20),
    ("BACKSPACE", 0x08),
    ("DELETE", 0x2E),
    ("INSERT", 0x2D),
    ("HOME", 0x24),
    ("END", 0x23),
    ("PAGEUP", 0x21),
    ("PAGEDOWN", 0x22),
    ("LEFT", 0x25),
    ("UP", 0x26),
    ("RIGHT", 0x27),
    ("DOWN", 0x28),
    ("PAUSE", 0x13),
    ("SCROLLLOCK", 0x91),
    ("MINUS", 0xBD),
    ("PLUS", 0xBB),
    ("EQUALS", 0xBB),
    ("COMMA", 0xBC),
    ("PERIOD", 0xBE),
    ("SLASH", 0xBF),
    ("BACKTICK", 0xC0),
    ("NUMPADPLUS", 0x6B),
    ("NUMPADMINUS", 0x6D),
];

/// Resolves a hotkey key name to a Windows virtual key code.
///
/// Accepts letters, digits, `F1`-`F24`, `Numpad0`-`Numpad9`, and the names
/// in the table above, case-insensitively.
pub fn vk_from_name(name: &str) -> Option<u32> {
    let upper = name.trim().to_ascii_uppercase();

    if let [ch] = upper.as_bytes()
        && ch.is_ascii_alphanumeric()
    {
        return Some(u32::from(*ch));
    }

    if let Some(n) = upper.strip_prefix('F').and_then(|r| r.parse::<u32>().ok()) {
        return (1..=24).contains(&n).then(|| 0x70 + n - 1);
    }

    if let Some(n) = upper.strip_prefix("NUMPAD").and_then(|r| r.parse::<u32>().ok()) {
        return (n <= 9).then(|| 0x60 + n);
    }

    NAMED
        .iter()
        .find(|(key, _)| *key == upper)
        .map(|&(_, vk)| vk)
}
