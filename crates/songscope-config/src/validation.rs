//! Configuration validation.
//!
//! Checks every numeric setting against the range the dashboard can work
//! with and reports all violations at once.
//!
//! # Example
//!
//! ```rust
//! use songscope_config::{DashboardConfig, validate_config};
//!
//! let mut config = DashboardConfig::default();
//! assert!(validate_config(&config).is_ok());
//!
//! config.universe.min_zoom = 0.0;
//! assert!(validate_config(&config).is_err());
//! ```

use thiserror::Error;

use crate::config::DashboardConfig;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A value that must be strictly positive is not.
    #[error("'{field}' must be positive, got {value}")]
    NotPositive {
        /// Dotted key of the setting.
        field: &'static str,
        /// The offending value.
        value: f64,
    },

    /// A value that must not be negative is.
    #[error("'{field}' must not be negative, got {value}")]
    Negative {
        /// Dotted key of the setting.
        field: &'static str,
        /// The offending value.
        value: f64,
    },

    /// Zoom bounds out of order.
    #[error("min_zoom {min} must be below max_zoom {max}")]
    ZoomOrder {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },

    /// Point radius bounds out of order.
    #[error("min_point_radius {min} must not exceed max_point_radius {max}")]
    RadiusOrder {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },

    /// An opacity outside `[0, 1]`.
    #[error("'{field}' must lie in [0, 1], got {value}")]
    Opacity {
        /// Dotted key of the setting.
        field: &'static str,
        /// The offending value.
        value: f32,
    },

    /// The suggestion list would always be empty.
    #[error("search.max_suggestions must be at least 1")]
    NoSuggestions,

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate a configuration, collecting every violation. NaN fails every check.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn validate_config(config: &DashboardConfig) -> ValidationResult<()> {
    let mut errors = Vec::new();
    let u = &config.universe;

    if !(u.min_zoom > 0.0) {
        errors.push(ValidationError::NotPositive {
            field: "universe.min_zoom",
            value: u.min_zoom,
        });
    } else if !(u.min_zoom < u.max_zoom) {
        errors.push(ValidationError::ZoomOrder {
            min: u.min_zoom,
            max: u.max_zoom,
        });
    }
    if !(u.pan_margin >= 0.0) {
        errors.push(ValidationError::Negative {
            field: "universe.pan_margin",
            value: u.pan_margin,
        });
    }
    if !(u.min_point_radius > 0.0) {
        errors.push(ValidationError::NotPositive {
            field: "universe.min_point_radius",
            value: u.min_point_radius,
        });
    } else if !(u.min_point_radius <= u.max_point_radius) {
        errors.push(ValidationError::RadiusOrder {
            min: u.min_point_radius,
            max: u.max_point_radius,
        });
    }

    if config.search.max_suggestions == 0 {
        errors.push(ValidationError::NoSuggestions);
    }

    let s = &config.style;
    for (field, value) in [
        ("style.matched_opacity", s.matched_opacity),
        ("style.ghost_opacity", s.ghost_opacity),
        ("style.preview_outside_opacity", s.preview_outside_opacity),
        ("style.highlight_outside_opacity", s.highlight_outside_opacity),
    ] {
        if !(0.0..=1.0).contains(&value) {
            errors.push(ValidationError::Opacity { field, value });
        }
    }
    if !(s.transition_secs >= 0.0) {
        errors.push(ValidationError::Negative {
            field: "style.transition_secs",
            value: f64::from(s.transition_secs),
        });
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(validate_config(&DashboardConfig::default()), Ok(()));
    }

    #[test]
    fn test_zoom_order() {
        let mut config = DashboardConfig::default();
        config.universe.min_zoom = 10.0;
        config.universe.max_zoom = 10.0;
        assert_eq!(
            validate_config(&config),
            Err(ValidationError::ZoomOrder { min: 10.0, max: 10.0 })
        );
    }

    #[test]
    fn test_nan_zoom_rejected() {
        let mut config = DashboardConfig::default();
        config.universe.min_zoom = f64::NAN;
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::NotPositive { field: "universe.min_zoom", .. })
        ));
    }

    #[test]
    fn test_collects_multiple() {
        let mut config = DashboardConfig::default();
        config.universe.pan_margin = -1.0;
        config.search.max_suggestions = 0;
        config.style.ghost_opacity = 1.5;
        let Err(ValidationError::Multiple(errors)) = validate_config(&config) else {
            panic!("expected multiple errors");
        };
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::NoSuggestions));
    }

    #[test]
    fn test_radius_order() {
        let mut config = DashboardConfig::default();
        config.universe.min_point_radius = 25.0;
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::RadiusOrder { .. })
        ));
    }
}
