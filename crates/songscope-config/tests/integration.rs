//! Config file round trips through the filesystem.

use songscope_config::{ConfigError, DashboardConfig};
use tempfile::TempDir;

#[test]
fn save_creates_parent_dirs_and_loads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("config.toml");

    let mut config = DashboardConfig::default().with_data_path("custom/songs.json");
    config.universe.max_zoom = 6.0;
    config.search.max_suggestions = 5;
    config.style.transition_secs = 0.5;

    config.save(&path).unwrap();
    assert!(path.exists());

    let loaded = DashboardConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.zoom_limits().max_zoom, 6.0);
}

#[test]
fn discover_prefers_explicit_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("explicit.toml");
    std::fs::write(&path, "[search]\nmax_suggestions = 3\n").unwrap();

    let config = DashboardConfig::discover(Some(&path)).unwrap();
    assert_eq!(config.search.max_suggestions, 3);
    assert_eq!(config.universe, DashboardConfig::default().universe);
}

#[test]
fn load_rejects_malformed_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[universe\nmin_zoom = ").unwrap();

    let err = DashboardConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::TomlParse(_)));
}

#[test]
fn load_rejects_out_of_range_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[style]\nmatched_opacity = 2.0\n").unwrap();

    let err = DashboardConfig::load(&path).unwrap_err();
    assert!(err.to_string().contains("style.matched_opacity"));
}

#[test]
fn load_missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let err = DashboardConfig::load(&path).unwrap_err();
    assert!(err.to_string().contains("absent.toml"));
}
