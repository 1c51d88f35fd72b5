//! The dashboard configuration file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use songscope_core::{PointStyle, ZoomLimits};

use crate::error::ConfigError;
use crate::paths;
use crate::validation::validate_config;

/// Dataset loaded when nothing else is configured, relative to the working
/// directory (or to the page URL on the web build).
pub const DEFAULT_DATA_PATH: &str = "data/visualization_data.json";

/// Top-level dashboard settings.
///
/// Every field has a default, so an empty file or a file naming only a few
/// keys is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Dataset location: a file path natively, a URL on the web.
    pub data_path: PathBuf,
    /// Projection view settings.
    pub universe: UniverseConfig,
    /// Artist search settings.
    pub search: SearchConfig,
    /// Point styling.
    pub style: StyleConfig,
}

/// `[universe]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UniverseConfig {
    /// Smallest zoom factor.
    pub min_zoom: f64,
    /// Largest zoom factor.
    pub max_zoom: f64,
    /// How far past the plot edges the view may pan, in pixels.
    pub pan_margin: f64,
    /// Radius of the least streamed song.
    pub min_point_radius: f64,
    /// Radius of the most streamed song.
    pub max_point_radius: f64,
}

/// `[search]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Most suggestions shown under the search box.
    pub max_suggestions: usize,
}

/// `[style]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Opacity of matching points.
    pub matched_opacity: f32,
    /// Opacity of points failing a filter.
    pub ghost_opacity: f32,
    /// Opacity of points outside a brush being dragged.
    pub preview_outside_opacity: f32,
    /// Opacity of points outside a platform highlight.
    pub highlight_outside_opacity: f32,
    /// Length of the opacity animation, in seconds.
    pub transition_secs: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            universe: UniverseConfig::default(),
            search: SearchConfig::default(),
            style: StyleConfig::default(),
        }
    }
}

impl Default for UniverseConfig {
    fn default() -> Self {
        let limits = ZoomLimits::default();
        Self {
            min_zoom: limits.min_zoom,
            max_zoom: limits.max_zoom,
            pan_margin: limits.pan_margin,
            min_point_radius: 3.0,
            max_point_radius: 20.0,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_suggestions: 8 }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        let style = PointStyle::default();
        Self {
            matched_opacity: style.matched_opacity,
            ghost_opacity: style.ghost_opacity,
            preview_outside_opacity: style.preview_outside_opacity,
            highlight_outside_opacity: style.highlight_outside_opacity,
            transition_secs: 0.3,
        }
    }
}

impl DashboardConfig {
    /// Override the dataset location.
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse and validate a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = toml::from_str(toml_str)?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Save to a file, creating the parent directory if needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Resolve the configuration to use.
    ///
    /// An explicit path must load. Without one, the user config file is used
    /// if it exists, and the defaults otherwise.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let user = paths::user_config_file();
        if user.is_file() {
            Self::load(user)
        } else {
            Ok(Self::default())
        }
    }

    /// Zoom and pan bounds for the projection view.
    pub fn zoom_limits(&self) -> ZoomLimits {
        ZoomLimits {
            min_zoom: self.universe.min_zoom,
            max_zoom: self.universe.max_zoom,
            pan_margin: self.universe.pan_margin,
        }
    }

    /// Point radius range for the projection view.
    pub fn radius_range(&self) -> (f64, f64) {
        (self.universe.min_point_radius, self.universe.max_point_radius)
    }

    /// Point opacities and outline widths.
    pub fn point_style(&self) -> PointStyle {
        PointStyle {
            matched_opacity: self.style.matched_opacity,
            ghost_opacity: self.style.ghost_opacity,
            preview_outside_opacity: self.style.preview_outside_opacity,
            highlight_outside_opacity: self.style.highlight_outside_opacity,
            ..PointStyle::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(config.zoom_limits(), ZoomLimits::default());
        assert_eq!(config.point_style(), PointStyle::default());
        assert_eq!(config.radius_range(), (3.0, 20.0));
        assert_eq!(config.search.max_suggestions, 8);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(DashboardConfig::from_toml("").unwrap(), DashboardConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let toml = r#"
data_path = "songs.json"

[universe]
max_zoom = 4.0

[style]
ghost_opacity = 0.1
"#;
        let config = DashboardConfig::from_toml(toml).unwrap();
        assert_eq!(config.data_path, PathBuf::from("songs.json"));
        assert_eq!(config.universe.max_zoom, 4.0);
        assert_eq!(config.universe.min_zoom, 0.5);
        assert_eq!(config.style.ghost_opacity, 0.1);
        assert_eq!(config.style.matched_opacity, 0.9);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = DashboardConfig::from_toml("[universe]\nmin_zoom = 20.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = DashboardConfig::default().with_data_path("elsewhere.json");
        let text = config.to_toml().unwrap();
        assert!(text.contains("[universe]"));
        assert_eq!(DashboardConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_discover_explicit_missing_fails() {
        let err = DashboardConfig::discover(Some(Path::new("/no/such/songscope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }
}
