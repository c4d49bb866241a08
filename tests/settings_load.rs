use device_mirror::screen::Orientation;
use device_mirror::settings::ScreenSettings;
use tempfile::tempdir;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let settings = ScreenSettings::load(dir.path().join("screen.json")).unwrap();
    assert_eq!(settings, ScreenSettings::default());
}

#[test]
fn blank_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("screen.json");
    std::fs::write(&path, "  \n").unwrap();
    assert_eq!(ScreenSettings::load(&path).unwrap(), ScreenSettings::default());
}

#[test]
fn partial_file_fills_remaining_fields_with_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("screen.json");
    std::fs::write(
        &path,
        r#"{"orientation":"flip270","window_width":720,"panel_show":true,"window_x":-100}"#,
    )
    .unwrap();

    let settings = ScreenSettings::load(&path).unwrap();
    assert_eq!(settings.orientation, Orientation::Flip270);
    assert_eq!(settings.window_width, Some(720));
    assert_eq!(settings.window_height, None);
    assert!(settings.panel_show);
    assert!(!settings.fullscreen);

    let params = settings.to_params();
    assert_eq!(params.window.x, Some(-100));
    assert_eq!(params.window.y, None);
}

#[test]
fn malformed_file_reports_its_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = ScreenSettings::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("broken.json"));
}

#[test]
fn out_of_range_values_are_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("screen.json");

    std::fs::write(&path, r#"{"window_y":70000}"#).unwrap();
    assert!(ScreenSettings::load(&path).is_err());

    std::fs::write(&path, r#"{"window_height":70000}"#).unwrap();
    assert!(ScreenSettings::load(&path).is_err());

    std::fs::write(&path, r#"{"orientation":"45"}"#).unwrap();
    assert!(ScreenSettings::load(&path).is_err());
}

#[test]
fn debug_logging_flag_drives_logging_setup() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("screen.json");
    std::fs::write(&path, r#"{"debug_logging":true}"#).unwrap();

    let settings = ScreenSettings::load(&path).unwrap();
    assert!(settings.debug_logging);
    settings.init_logging();
    tracing::debug!("screen settings loaded");
}
