//! Configuration for the songscope dashboard.
//!
//! Settings live in a single optional TOML file. Every key has a default, so
//! the dashboard runs without any file at all.
//!
//! # Features
//!
//! - **Config file**: `data_path` plus `[universe]`, `[search]` and `[style]`
//! - **Discovery**: explicit path, then the user config directory, then defaults
//! - **Validation**: numeric settings are range-checked on load
//! - **Writing**: the dashboard itself only reads. [`DashboardConfig::save`]
//!   and [`DashboardConfig::to_toml`] are for tooling that writes a starter
//!   file with every default spelled out.
//!
//! # Example
//!
//! ```rust,no_run
//! use songscope_config::{DashboardConfig, user_config_file};
//!
//! let config = DashboardConfig::discover(None).unwrap();
//! println!("zoom range: {:?}", config.zoom_limits());
//!
//! config.save(user_config_file()).unwrap();
//! ```

mod config;
mod error;

/// Platform-specific configuration paths.
pub mod paths;

/// Configuration validation.
pub mod validation;

pub use config::{DEFAULT_DATA_PATH, DashboardConfig, SearchConfig, StyleConfig, UniverseConfig};
pub use error::ConfigError;
pub use paths::{CONFIG_FILE_NAME, user_config_dir, user_config_file};
pub use validation::{ValidationError, ValidationResult, validate_config};
