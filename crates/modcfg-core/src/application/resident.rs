//! Resident configuration: load once, write through on every change.
//!
//! A [`ResidentConfig`] owns an in-memory [`ConfigDocument`] for one location.
//! Reads never touch the disk.  Every mutation updates memory and then
//! immediately rewrites the whole file, so there is no "dirty" state a caller
//! could forget to flush.
//!
//! # Lifecycle (for beginners)
//!
//! ```text
//! open() ──► Loaded ──set/remove/append/reset──► persisted ──► Loaded
//!              ▲                                                  │
//!              └──────────────────── reload() ◄───────────────────┘
//! ```
//!
//! If the file is missing or cannot be parsed when the config is opened, an
//! empty document takes its place and is written out straight away.

use std::path::{Path, PathBuf};

use crate::application::access::ConfigAccess;
use crate::application::store::ConfigStore;
use crate::domain::document::ConfigDocument;
use crate::domain::location::ConfigLocation;
use crate::domain::value::Scalar;
use crate::infrastructure::json_file;

/// A configuration document kept in memory for the lifetime of the owner.
#[derive(Debug)]
pub struct ResidentConfig {
    store: ConfigStore,
    location: ConfigLocation,
    path: PathBuf,
    document: ConfigDocument,
}

impl ResidentConfig {
    /// Loads `location` through `store`.
    ///
    /// A missing or unreadable file is replaced by an empty document, which is
    /// persisted immediately.  If that write fails the config still opens with
    /// the empty document in memory; the failure is reported to the sink.
    pub fn open(store: ConfigStore, location: ConfigLocation) -> Self {
        let path = store.path_of(&location);
        let sink = store.sink();

        let document = match json_file::read_document(&path) {
            Ok(Some(doc)) => {
                sink.info(&format!("loaded config {location} ({} keys)", doc.len()));
                doc
            }
            Ok(None) => {
                sink.info(&format!("no config at {}, creating default", path.display()));
                let doc = ConfigDocument::new();
                store.persist(&path, &doc);
                doc
            }
            Err(e) => {
                sink.error(&format!("failed to load config {location}, using default: {e}"));
                let doc = ConfigDocument::new();
                store.persist(&path, &doc);
                doc
            }
        };

        Self {
            store,
            location,
            path,
            document,
        }
    }

    pub fn location(&self) -> &ConfigLocation {
        &self.location
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The in-memory document.
    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    /// String representations of every element of the array at `key`.
    pub fn array_values(&self, key: &str) -> Vec<String> {
        self.document.array_values(key)
    }

    /// Discards the in-memory document and loads the file again.
    ///
    /// A file that has disappeared is recreated empty, as in [`open`](Self::open).
    /// If the file exists but cannot be read or parsed, the in-memory document
    /// is kept and `false` is returned.
    pub fn reload(&mut self) -> bool {
        let sink = self.store.sink();
        match json_file::read_document(&self.path) {
            Ok(Some(doc)) => {
                sink.info(&format!("reloaded config {}", self.location));
                self.document = doc;
                true
            }
            Ok(None) => {
                sink.warn(&format!("config {} vanished, recreating default", self.path.display()));
                self.document = ConfigDocument::new();
                self.store.persist(&self.path, &self.document)
            }
            Err(e) => {
                sink.error(&format!(
                    "failed to reload config {}, keeping current values: {e}",
                    self.location
                ));
                false
            }
        }
    }

    /// Replaces the document with an empty one and persists it.
    pub fn reset(&mut self) -> bool {
        self.store.sink().info(&format!("resetting config {}", self.location));
        self.document = ConfigDocument::new();
        self.save()
    }

    /// Writes the in-memory document to disk.
    ///
    /// Mutations already do this; the method exists for callers that edited
    /// the file away and want memory to win.
    pub fn save(&self) -> bool {
        self.store.persist(&self.path, &self.document)
    }
}

impl ConfigAccess for ResidentConfig {
    fn scalar(&self, key: &str) -> Option<Scalar> {
        self.document.scalar::<Scalar>(key)
    }

    fn set_scalar(&mut self, key: &str, value: Scalar) -> bool {
        self.store.sink().debug(&format!("setting {key} in {}", self.location));
        self.document.set(key, value);
        self.save()
    }

    fn has_key(&self, key: &str) -> bool {
        self.document.contains_key(key)
    }

    fn remove_key(&mut self, key: &str) -> bool {
        if self.document.remove(key).is_none() {
            return false;
        }
        self.store.sink().debug(&format!("removed {key} from {}", self.location));
        self.save()
    }

    fn array_contains(&self, key: &str, target: &str) -> bool {
        self.document.array_contains(key, target)
    }

    fn array_append_unique(&mut self, key: &str, value: Scalar) -> bool {
        if !self.document.append_unique(key, value) {
            return false;
        }
        self.save()
    }

    fn array_len(&self, key: &str) -> usize {
        self.document.array_len(key)
    }

    fn array_element_at(&self, key: &str, index: usize) -> Option<String> {
        self.document.array_element_at(key, index)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::diagnostics::{Level, MemorySink};
    use std::sync::Arc;
    use uuid::Uuid;

    fn fixture() -> (ConfigStore, Arc<MemorySink>, PathBuf) {
        let dir = std::env::temp_dir().join(format!("modcfg_resident_{}", Uuid::new_v4()));
        let sink = Arc::new(MemorySink::new());
        let store = ConfigStore::new(&dir).with_sink(sink.clone());
        (store, sink, dir)
    }

    fn location() -> ConfigLocation {
        ConfigLocation::new("mymod", "state")
    }

    #[test]
    fn test_open_missing_file_persists_empty_document() {
        // Arrange
        let (store, _sink, dir) = fixture();

        // Act
        let cfg = store.resident(location());

        // Assert
        assert!(cfg.document().is_empty());
        assert_eq!(std::fs::read_to_string(cfg.path()).unwrap(), "{}\n");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_open_corrupt_file_replaces_it_with_empty_document() {
        // Arrange
        let (store, sink, dir) = fixture();
        let path = store.path_of(&location());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "garbage").unwrap();

        // Act
        let cfg = store.resident(location());

        // Assert
        assert!(cfg.document().is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}\n");
        assert!(sink.contains(Level::Error, "using default"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_open_existing_file_loads_values() {
        let (store, _sink, dir) = fixture();
        store.set_scalar(&location(), "volume", 75);

        let cfg = store.resident(location());

        assert_eq!(cfg.get_scalar("volume", 0_i64), 75);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_mutations_are_written_through() {
        // Arrange
        let (store, _sink, dir) = fixture();
        let mut cfg = store.resident(location());

        // Act
        assert!(cfg.set("volume", 75));
        assert!(cfg.array_append_unique("blocked", Scalar::from("alice")));
        assert!(!cfg.array_append_unique("blocked", Scalar::from("alice")));

        // Assert: a stateless read sees the same values
        assert_eq!(store.get_scalar(&location(), "volume", 0_i64), 75);
        assert_eq!(store.array_values(&location(), "blocked"), vec!["alice"]);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_remove_key_persists_only_when_present() {
        let (store, _sink, dir) = fixture();
        let mut cfg = store.resident(location());
        cfg.set("volume", 1);

        assert!(cfg.remove_key("volume"));
        assert!(!cfg.remove_key("volume"));
        assert!(!cfg.has_key("volume"));
        assert!(!store.has_key(&location(), "volume"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_reads_do_not_see_external_edits_until_reload() {
        // Arrange
        let (store, _sink, dir) = fixture();
        let mut cfg = store.resident(location());
        cfg.set("volume", 1);
        std::fs::write(cfg.path(), r#"{"volume": 2}"#).unwrap();

        // Act / Assert
        assert_eq!(cfg.get_scalar("volume", 0_i64), 1);
        assert!(cfg.reload());
        assert_eq!(cfg.get_scalar("volume", 0_i64), 2);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_reload_of_corrupt_file_keeps_memory() {
        let (store, _sink, dir) = fixture();
        let mut cfg = store.resident(location());
        cfg.set("volume", 1);
        std::fs::write(cfg.path(), "{ broken").unwrap();

        assert!(!cfg.reload());
        assert_eq!(cfg.get_scalar("volume", 0_i64), 1);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_reload_after_delete_recreates_empty_file() {
        let (store, _sink, dir) = fixture();
        let mut cfg = store.resident(location());
        cfg.set("volume", 1);
        std::fs::remove_file(cfg.path()).unwrap();

        assert!(cfg.reload());
        assert!(cfg.document().is_empty());
        assert!(cfg.path().is_file());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_reset_clears_memory_and_disk() {
        // Arrange
        let (store, _sink, dir) = fixture();
        let mut cfg = store.resident(location());
        cfg.set("volume", 1);
        cfg.array_append_unique("blocked", Scalar::from("bob"));

        // Act
        let ok = cfg.reset();

        // Assert
        assert!(ok);
        assert!(cfg.document().is_empty());
        assert_eq!(std::fs::read_to_string(cfg.path()).unwrap(), "{}\n");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_array_queries_use_memory() {
        let (store, _sink, dir) = fixture();
        let mut cfg = store.resident(location());
        cfg.array_append_unique("ids", Scalar::from(3));
        cfg.array_append_unique("ids", Scalar::from(4));

        assert_eq!(cfg.array_len("ids"), 2);
        assert!(cfg.array_contains("ids", "4"));
        assert_eq!(cfg.array_element_at("ids", 0), Some("3".to_string()));
        assert_eq!(cfg.array_element_at("ids", 2), None);
        assert_eq!(cfg.array_values("ids"), vec!["3", "4"]);

        std::fs::remove_dir_all(&dir).ok();
    }
}
