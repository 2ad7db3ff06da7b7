//! Filesystem persistence for a single [`ConfigDocument`].
//!
//! These functions are the only place in the crate that performs file I/O.
//! They return a typed [`StoreError`] and never log; the application layer
//! decides how loudly to report a failure and what to fall back to.
//!
//! Writes are plain `std::fs::write` calls: there is no temp-file-and-rename
//! step, so a crash mid-write can leave a truncated file.  The next load then
//! reports it as [`StoreError::Parse`].

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::document::{ConfigDocument, DocumentError};

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not valid JSON.
    #[error("failed to parse config JSON at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The file is valid JSON but its root is not an object.
    #[error("config at {path} is a JSON {found}, expected an object")]
    NotAnObject { path: PathBuf, found: &'static str },

    /// The document could not be serialized.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    /// `true` when the file exists but its content is unusable.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreError::Parse { .. } | StoreError::NotAnObject { .. })
    }

    fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result of [`ensure_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ensured {
    /// The file was already there; nothing was written.
    Existing,
    /// The file was created and now holds an empty document.
    Created,
}

/// Returns `true` if a regular file exists at `path`.
pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}

/// Creates every missing parent directory of `path`.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if a directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<(), StoreError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            std::fs::create_dir_all(dir).map_err(|source| StoreError::io(dir, source))
        }
        _ => Ok(()),
    }
}

/// Makes sure the file at `path` exists, creating it (and its directories)
/// with an empty `{}` document if it does not.
///
/// An existing file is never touched, whatever its content.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if a directory or the file cannot be created.
pub fn ensure_file(path: &Path) -> Result<Ensured, StoreError> {
    ensure_parent_dir(path)?;

    if file_exists(path) {
        return Ok(Ensured::Existing);
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        // Someone else created it between the check and the open.
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(Ensured::Existing),
        Err(e) => return Err(StoreError::io(path, e)),
    };

    let content = ConfigDocument::new().to_json_pretty()?;
    file.write_all(content.as_bytes())
        .map_err(|source| StoreError::io(path, source))?;
    Ok(Ensured::Created)
}

/// Loads the document at `path`.
///
/// Returns `Ok(None)` when the file does not exist.  An empty file loads as an
/// empty document.
///
/// # Errors
///
/// Returns [`StoreError::Io`] for read failures other than "not found",
/// [`StoreError::Parse`] for malformed JSON, and
/// [`StoreError::NotAnObject`] when the root is not an object.
pub fn read_document(path: &Path) -> Result<Option<ConfigDocument>, StoreError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::io(path, e)),
    };

    match ConfigDocument::from_json(&content) {
        Ok(doc) => Ok(Some(doc)),
        Err(DocumentError::Syntax(source)) => Err(StoreError::Parse {
            path: path.to_path_buf(),
            source,
        }),
        Err(DocumentError::NotAnObject { found }) => Err(StoreError::NotAnObject {
            path: path.to_path_buf(),
            found,
        }),
    }
}

/// Writes `doc` to `path` as pretty-printed JSON, replacing the whole file.
///
/// Missing parent directories are created first.
///
/// # Errors
///
/// Returns [`StoreError::Io`] for file-system failures or
/// [`StoreError::Serialize`] if serialization fails.
pub fn write_document(path: &Path, doc: &ConfigDocument) -> Result<(), StoreError> {
    ensure_parent_dir(path)?;
    let content = doc.to_json_pretty()?;
    std::fs::write(path, content).map_err(|source| StoreError::io(path, source))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value::Scalar;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("modcfg_test_{}", Uuid::new_v4()))
    }

    #[test]
    fn test_ensure_file_creates_directories_and_empty_object() {
        // Arrange
        let dir = temp_dir();
        let path = dir.join("mymod").join("deep").join("settings.json");

        // Act
        let outcome = ensure_file(&path).expect("ensure must succeed");

        // Assert
        assert_eq!(outcome, Ensured::Created);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}\n");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_ensure_file_leaves_existing_content_alone() {
        // Arrange
        let dir = temp_dir();
        let path = dir.join("settings.json");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "not json at all").unwrap();

        // Act
        let outcome = ensure_file(&path).unwrap();

        // Assert
        assert_eq!(outcome, Ensured::Existing);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json at all");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_read_document_absent_file_is_none() {
        let path = temp_dir().join("missing.json");
        assert!(read_document(&path).unwrap().is_none());
    }

    #[test]
    fn test_read_document_empty_file_is_empty_document() {
        let dir = temp_dir();
        let path = dir.join("empty.json");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "").unwrap();

        let doc = read_document(&path).unwrap().expect("file exists");
        assert!(doc.is_empty());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_read_document_reports_corrupt_content() {
        // Arrange
        let dir = temp_dir();
        std::fs::create_dir_all(&dir).unwrap();
        let bad_json = dir.join("bad.json");
        let bad_root = dir.join("root.json");
        std::fs::write(&bad_json, "{ \"volume\": ").unwrap();
        std::fs::write(&bad_root, "\"just a string\"").unwrap();

        // Act
        let json_err = read_document(&bad_json).unwrap_err();
        let root_err = read_document(&bad_root).unwrap_err();

        // Assert
        assert!(matches!(json_err, StoreError::Parse { .. }));
        assert!(matches!(root_err, StoreError::NotAnObject { found: "string", .. }));
        assert!(json_err.is_corrupt());
        assert!(root_err.is_corrupt());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_write_then_read_round_trip() {
        // Arrange
        let dir = temp_dir();
        let path = dir.join("a").join("b.json");
        let mut doc = ConfigDocument::new();
        doc.set("volume", Scalar::from(75));
        doc.append_unique("blocked", Scalar::from("alice"));

        // Act
        write_document(&path, &doc).expect("write must succeed");
        let loaded = read_document(&path).unwrap().expect("file must exist");

        // Assert
        assert_eq!(loaded, doc);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_write_document_into_a_file_parent_is_io_error() {
        // Arrange: a regular file where a directory should be
        let dir = temp_dir();
        std::fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        // Act
        let result = write_document(&blocker.join("c.json"), &ConfigDocument::new());

        // Assert
        assert!(matches!(result, Err(StoreError::Io { .. })));
        assert!(!result.unwrap_err().is_corrupt());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_file_exists_is_false_for_directories() {
        let dir = temp_dir();
        std::fs::create_dir_all(&dir).unwrap();
        assert!(!file_exists(&dir));
        std::fs::remove_dir_all(&dir).ok();
    }
}
