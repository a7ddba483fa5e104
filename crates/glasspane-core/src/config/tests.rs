use super::*;

#[test]
fn default_config_has_expected_values() {
    let mut config = Config::default();
    config.validate();

    assert_eq!(config.overlay.width, 800);
    assert_eq!(config.overlay.height, 600);
    assert_eq!(config.overlay.min_size(), MinSize { width: 260, height: 1 });
    assert_eq!(config.pointer.edge_margin, 12);
    assert!(config.pointer.native_gestures);
    assert!(!config.pointer.recover_stale_gestures);
    assert!(!config.log.enabled);
}

#[test]
fn default_hotkeys_include_click_through_escape() {
    // Act
    let bindings = hotkey::defaults();

    // Assert
    let toggle = bindings
        .iter()
        .find(|h| h.action == HotkeyAction::ToggleClickThrough)
        .unwrap();
    assert_eq!(toggle.key, "T");
    assert_eq!(toggle.modifiers, vec![Modifier::Ctrl, Modifier::Alt]);
}

#[test]
fn partial_toml_uses_defaults_for_missing_sections() {
    // Arrange
    let toml_str = "[overlay]\nwidth = 1024\n";

    // Act
    let config: Config = toml::from_str(toml_str).unwrap();

    // Assert
    assert_eq!(config.overlay.width, 1024);
    assert_eq!(config.overlay.height, 600);
    assert_eq!(config.pointer, RouterOptions::default());
    assert_eq!(config.hotkey, hotkey::defaults());
}

#[test]
fn hotkey_table_replaces_defaults() {
    let toml_str = r#"
[[hotkey]]
action = "zoom-in"
key = "F8"
modifiers = ["win"]
"#;

    let config: Config = toml::from_str(toml_str).unwrap();

    assert_eq!(
        config.hotkey,
        vec![Hotkey {
            action: HotkeyAction::ZoomIn,
            key: "F8".into(),
            modifiers: vec![Modifier::Win],
        }]
    );
}

#[test]
fn pointer_section_round_trips_flags() {
    let toml_str = "[pointer]\nnative_gestures = false\nrecover_stale_gestures = true\n";

    let config: Config = toml::from_str(toml_str).unwrap();

    assert!(!config.pointer.native_gestures);
    assert!(config.pointer.recover_stale_gestures);
    assert_eq!(config.pointer.edge_margin, 12);
}

#[test]
fn validate_clamps_out_of_range_values() {
    // Arrange
    let mut config = Config {
        overlay: OverlayConfig {
            width: 10,
            height: -5,
            min_width: 0,
            min_height: 40,
            opacity: 3.0,
            zoom: f64::INFINITY,
        },
        pointer: RouterOptions {
            edge_margin: -4,
            ..Default::default()
        },
        ..Default::default()
    };

    // Act
    config.validate();

    // Assert
    assert_eq!(config.overlay.min_width, 1);
    assert_eq!(config.overlay.width, 10);
    assert_eq!(config.overlay.height, 40);
    assert_eq!(config.overlay.opacity, 1.0);
    assert_eq!(config.overlay.zoom, 1.0);
    assert_eq!(config.pointer.edge_margin, 0);
}

#[test]
fn hotkey_action_maps_to_command() {
    assert_eq!(
        HotkeyAction::ToggleClickThrough.command(),
        crate::Command::ToggleClickThrough
    );
    assert_eq!(HotkeyAction::OpacityDown.command(), crate::Command::OpacityDown);
}

#[test]
fn missing_file_yields_defaults() {
    let path = std::env::temp_dir().join("glasspane-no-such-config.toml");

    let config = load_from(Some(&path));

    assert_eq!(config, Config::default());
}

#[test]
fn broken_file_yields_defaults_and_reports_parse_error() {
    // Arrange
    let dir = std::env::temp_dir().join(format!("glasspane-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("broken.toml");
    std::fs::write(&path, "[overlay\nwidth = ").unwrap();

    // Act
    let strict = try_load_from(&path);
    let lenient = load_from(Some(&path));

    // Assert
    assert!(matches!(strict, Err(ConfigError::Parse { .. })));
    assert_eq!(lenient, Config::default());
}

#[test]
fn initial_rect_uses_configured_size() {
    let overlay = OverlayConfig::default();

    assert_eq!(overlay.initial_rect(10, 20), Rect::new(10, 20, 810, 620));
}
