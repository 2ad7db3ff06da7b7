//! Platform configuration directory lookup.
//!
//! Hosts normally hand the store their own config directory.  When they do not
//! (for example the `modcfg` command-line tool run without `--config-dir`), the
//! platform's per-user configuration directory is used:
//!
//! - Windows:  `%APPDATA%`
//! - Linux:    `$XDG_CONFIG_HOME` or `~/.config`
//! - macOS:    `~/Library/Application Support`

use std::path::PathBuf;

use super::json_file::StoreError;

/// Determines the platform-appropriate base configuration directory.
///
/// # Errors
///
/// Returns [`StoreError::NoPlatformConfigDir`] when the base directory cannot
/// be determined from the environment.
pub fn default_base_dir() -> Result<PathBuf, StoreError> {
    platform_config_dir().ok_or(StoreError::NoPlatformConfigDir)
}

fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(PathBuf::from)
    }

    #[cfg(target_os = "linux")]
    {
        std::env::var_os("XDG_CONFIG_HOME")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME")
            .map(|h| PathBuf::from(h).join("Library").join("Application Support"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}
