//! Platform-specific configuration paths.
//!
//! - Linux: `~/.config/songscope/`
//! - macOS: `~/Library/Application Support/songscope/`
//! - Windows: `%APPDATA%\songscope\`
//!
//! On targets without a config directory (wasm32) the paths fall back to the
//! current directory and are never found to exist.

use std::path::PathBuf;

/// Application name used for directory paths.
const APP_NAME: &str = "songscope";

/// File name of the user configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Returns the user-specific configuration directory.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the user configuration file path.
pub fn user_config_file() -> PathBuf {
    user_config_dir().join(CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_config_dir_ends_with_app_name() {
        assert!(user_config_dir().ends_with(APP_NAME));
    }

    #[test]
    fn test_user_config_file_inside_dir() {
        let file = user_config_file();
        assert_eq!(file.parent(), Some(user_config_dir().as_path()));
        assert!(file.ends_with(CONFIG_FILE_NAME));
    }
}
