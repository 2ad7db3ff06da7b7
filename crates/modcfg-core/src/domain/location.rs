//! Identifies one configuration file relative to the host's config directory.

use std::fmt;
use std::path::{Path, PathBuf};

/// File extension every configuration file carries.
pub const JSON_EXTENSION: &str = ".json";

/// A logical directory segment plus a file name.
///
/// The file name is normalized at construction: `.json` is appended unless it
/// is already present, so `("mymod", "settings")` and
/// `("mymod", "settings.json")` name the same file.
///
/// # Example
///
/// ```rust
/// use modcfg_core::ConfigLocation;
/// use std::path::Path;
///
/// let loc = ConfigLocation::new("mymod", "settings");
/// assert_eq!(loc.file_name(), "settings.json");
/// assert_eq!(
///     loc.resolve(Path::new("/game/config")),
///     Path::new("/game/config/mymod/settings.json"),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLocation {
    dir: String,
    file_name: String,
}

impl ConfigLocation {
    pub fn new(dir: impl Into<String>, file_name: impl Into<String>) -> Self {
        let mut file_name = file_name.into();
        if !file_name.ends_with(JSON_EXTENSION) {
            file_name.push_str(JSON_EXTENSION);
        }
        Self {
            dir: dir.into(),
            file_name,
        }
    }

    /// The directory segment, which may itself contain `/`-separated parts.
    pub fn dir(&self) -> &str {
        &self.dir
    }

    /// The normalized file name, always ending in `.json`.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The absolute path of this file under `base`.
    pub fn resolve(&self, base: &Path) -> PathBuf {
        base.join(&self.dir).join(&self.file_name)
    }
}

impl fmt::Display for ConfigLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dir.is_empty() {
            f.write_str(&self.file_name)
        } else {
            write!(f, "{}/{}", self.dir, self.file_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_appends_json_extension() {
        let loc = ConfigLocation::new("mymod", "settings");
        assert_eq!(loc.file_name(), "settings.json");
    }

    #[test]
    fn test_new_keeps_existing_json_extension() {
        let loc = ConfigLocation::new("mymod", "settings.json");
        assert_eq!(loc.file_name(), "settings.json");
    }

    #[test]
    fn test_other_extensions_still_get_json_appended() {
        let loc = ConfigLocation::new("mymod", "settings.txt");
        assert_eq!(loc.file_name(), "settings.txt.json");
    }

    #[test]
    fn test_resolve_joins_base_dir_and_file() {
        let loc = ConfigLocation::new("mymod/sub", "list");
        let path = loc.resolve(Path::new("/base"));
        assert_eq!(path, PathBuf::from("/base/mymod/sub/list.json"));
    }

    #[test]
    fn test_display_shows_dir_and_file() {
        assert_eq!(ConfigLocation::new("mymod", "a").to_string(), "mymod/a.json");
        assert_eq!(ConfigLocation::new("", "a").to_string(), "a.json");
    }

    #[test]
    fn test_equal_after_normalization() {
        assert_eq!(
            ConfigLocation::new("m", "s"),
            ConfigLocation::new("m", "s.json")
        );
    }
}
