//! Stateless configuration store.
//!
//! [`ConfigStore`] resolves a [`ConfigLocation`] against the host's base
//! directory and performs one self-contained operation per call:
//!
//! ```text
//! resolve path → (ensure file) → read JSON or start empty → mutate → write back
//! ```
//!
//! Nothing is cached between calls, so edits made by other programs are
//! always picked up.  Read-modify-write is not atomic: two writers targeting
//! the same file race, and the last one wins.  Callers that share a store
//! across threads must serialize access per location themselves.
//!
//! # Corrupt files
//!
//! Reads treat an unparsable file like a missing one and return the default.
//! Writes follow the store's [`CorruptFilePolicy`]: with the default
//! [`CorruptFilePolicy::Abort`] a corrupt file is left untouched and the
//! write returns `false`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::access::ConfigAccess;
use crate::application::resident::ResidentConfig;
use crate::domain::document::ConfigDocument;
use crate::domain::location::ConfigLocation;
use crate::domain::policy::CorruptFilePolicy;
use crate::domain::value::{FromScalar, Scalar};
use crate::infrastructure::diagnostics::{DiagnosticSink, TracingSink};
use crate::infrastructure::json_file::{self, Ensured};

/// Facade over the JSON configuration files below one base directory.
///
/// Cloning is cheap; clones share the diagnostic sink.
///
/// # Example
///
/// ```rust,no_run
/// use modcfg_core::{ConfigLocation, ConfigStore};
///
/// let store = ConfigStore::new("/game/config");
/// let loc = ConfigLocation::new("mymod", "settings");
///
/// store.set_scalar(&loc, "volume", 75);
/// assert_eq!(store.get_scalar(&loc, "volume", 0_i64), 75);
/// ```
#[derive(Clone)]
pub struct ConfigStore {
    base_dir: PathBuf,
    policy: CorruptFilePolicy,
    sink: Arc<dyn DiagnosticSink>,
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigStore")
            .field("base_dir", &self.base_dir)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl ConfigStore {
    /// Creates a store rooted at `base_dir`, logging through `tracing` and
    /// aborting writes to corrupt files.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            policy: CorruptFilePolicy::default(),
            sink: Arc::new(TracingSink),
        }
    }

    /// Replaces the diagnostic sink.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Replaces the corrupt-file policy used by write operations.
    pub fn with_policy(mut self, policy: CorruptFilePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn policy(&self) -> CorruptFilePolicy {
        self.policy
    }

    pub(crate) fn sink(&self) -> &dyn DiagnosticSink {
        self.sink.as_ref()
    }

    /// Absolute path of the file named by `location`.
    pub fn path_of(&self, location: &ConfigLocation) -> PathBuf {
        location.resolve(&self.base_dir)
    }

    /// A stateless handle bound to `location`.
    pub fn file(&self, location: ConfigLocation) -> ConfigFile {
        ConfigFile {
            store: self.clone(),
            location,
        }
    }

    /// Loads `location` once and keeps it resident.  See [`ResidentConfig`].
    pub fn resident(&self, location: ConfigLocation) -> ResidentConfig {
        ResidentConfig::open(self.clone(), location)
    }

    // ── File lifecycle ────────────────────────────────────────────────────────

    /// Makes sure the directory and file for `location` exist.
    ///
    /// A new file is created holding `{}`.  An existing file is left alone.
    /// Returns `false` only on I/O failure.
    pub fn ensure_file(&self, location: &ConfigLocation) -> bool {
        let path = self.path_of(location);
        self.sink.info(&format!("ensuring config file {location} at {}", path.display()));

        match json_file::ensure_file(&path) {
            Ok(Ensured::Existing) => {
                self.sink.info(&format!("config file already exists: {}", path.display()));
                true
            }
            Ok(Ensured::Created) => {
                self.sink.info(&format!("config file created: {}", path.display()));
                true
            }
            Err(e) => {
                self.sink.error(&format!("failed to create config file {location}: {e}"));
                false
            }
        }
    }

    /// Returns `true` if the file for `location` exists.  Never creates anything.
    pub fn file_exists(&self, location: &ConfigLocation) -> bool {
        let path = self.path_of(location);
        let exists = json_file::file_exists(&path);
        self.sink.debug(&format!("config file {} exists: {exists}", path.display()));
        exists
    }

    // ── Scalars ───────────────────────────────────────────────────────────────

    /// The primitive stored at `key`, or `None` if the file is missing or
    /// unreadable, the key is absent, or the value is not a primitive.
    pub fn scalar(&self, location: &ConfigLocation, key: &str) -> Option<Scalar> {
        self.load_for_read(location)?.scalar::<Scalar>(key)
    }

    /// The value at `key` converted to `T`, or `default`.
    ///
    /// Missing file, empty file, parse failure, missing key and kind mismatch
    /// all yield `default`; none of them is reported to the caller as an error.
    pub fn get_scalar<T: FromScalar>(&self, location: &ConfigLocation, key: &str, default: T) -> T {
        match self.scalar(location, key).and_then(|s| T::from_scalar(&s)) {
            Some(value) => {
                self.sink.debug(&format!("read {key} from {location}"));
                value
            }
            None => {
                self.sink.debug(&format!(
                    "{key} missing or of another kind in {location}, using default"
                ));
                default
            }
        }
    }

    /// Stores `value` under `key`, creating the file if needed.
    ///
    /// Returns `true` iff the rewritten document reached the disk.
    pub fn set_scalar(
        &self,
        location: &ConfigLocation,
        key: &str,
        value: impl Into<Scalar>,
    ) -> bool {
        let value = value.into();
        self.sink.info(&format!("setting {key} ({}) in {location}", value.kind()));

        if !self.ensure_file(location) {
            return false;
        }
        let path = self.path_of(location);
        let Some(mut doc) = self.load_for_write(&path) else {
            return false;
        };

        doc.set(key, value);
        let saved = self.persist(&path, &doc);
        if saved {
            self.sink.info(&format!("saved {key} to {}", path.display()));
        }
        saved
    }

    // ── Keys ──────────────────────────────────────────────────────────────────

    /// Returns `true` iff the document contains `key`, whatever its value.
    pub fn has_key(&self, location: &ConfigLocation, key: &str) -> bool {
        self.load_for_read(location)
            .is_some_and(|doc| doc.contains_key(key))
    }

    /// Removes `key` and rewrites the file.
    ///
    /// Returns `false` without writing when the file is missing or the key is
    /// not present.
    pub fn remove_key(&self, location: &ConfigLocation, key: &str) -> bool {
        self.sink.info(&format!("removing {key} from {location}"));

        let path = self.path_of(location);
        if !json_file::file_exists(&path) {
            self.sink.warn(&format!("config file not found: {}", path.display()));
            return false;
        }
        let Some(mut doc) = self.load_for_write(&path) else {
            return false;
        };

        if doc.remove(key).is_none() {
            self.sink.info(&format!("{key} not present in {location}"));
            return false;
        }
        let saved = self.persist(&path, &doc);
        if saved {
            self.sink.info(&format!("removed {key} and saved {}", path.display()));
        }
        saved
    }

    /// Top-level keys in sorted order; empty when the file is missing or unreadable.
    pub fn keys(&self, location: &ConfigLocation) -> Vec<String> {
        self.load_for_read(location)
            .map(|doc| doc.keys().map(str::to_string).collect())
            .unwrap_or_default()
    }

    // ── Arrays ────────────────────────────────────────────────────────────────

    /// Returns `true` iff the array at `key` holds an element whose string
    /// representation equals `target` exactly.
    pub fn array_contains(&self, location: &ConfigLocation, key: &str, target: &str) -> bool {
        self.sink.info(&format!("checking {location} array {key} for {target:?}"));

        let found = self
            .load_for_read(location)
            .is_some_and(|doc| doc.array_contains(key, target));
        if found {
            self.sink.info(&format!("found {target:?} in {key}"));
        } else {
            self.sink.info(&format!("{target:?} not found in {key}"));
        }
        found
    }

    /// Appends `value` to the array at `key` unless an equal element exists.
    ///
    /// A missing key, or one holding a non-array value, becomes a new array.
    /// Returns `true` iff the value was appended and the file was written.
    pub fn array_append_unique(
        &self,
        location: &ConfigLocation,
        key: &str,
        value: impl Into<Scalar>,
    ) -> bool {
        let value = value.into();
        self.sink.info(&format!("adding {:?} to {location} array {key}", value.to_string()));

        let path = self.path_of(location);
        let Some(mut doc) = self.load_for_write(&path) else {
            return false;
        };

        let rendered = value.to_string();
        if !doc.append_unique(key, value) {
            self.sink.info(&format!("{rendered:?} already present in {key}"));
            return false;
        }
        let saved = self.persist(&path, &doc);
        if saved {
            self.sink.info(&format!("added {rendered:?} to {key} and saved {}", path.display()));
        }
        saved
    }

    /// Number of elements in the array at `key`; `0` when there is no such array.
    pub fn array_len(&self, location: &ConfigLocation, key: &str) -> usize {
        self.load_for_read(location)
            .map_or(0, |doc| doc.array_len(key))
    }

    /// String representation of element `index` of the array at `key`.
    ///
    /// `None` when the file, key or array is missing, or `index >= len`.
    pub fn array_element_at(
        &self,
        location: &ConfigLocation,
        key: &str,
        index: usize,
    ) -> Option<String> {
        self.load_for_read(location)?.array_element_at(key, index)
    }

    /// String representations of every element of the array at `key`.
    pub fn array_values(&self, location: &ConfigLocation, key: &str) -> Vec<String> {
        self.load_for_read(location)
            .map(|doc| doc.array_values(key))
            .unwrap_or_default()
    }

    // ── Load / save helpers ───────────────────────────────────────────────────

    /// Loads for a read operation: every failure becomes `None`.
    fn load_for_read(&self, location: &ConfigLocation) -> Option<ConfigDocument> {
        let path = self.path_of(location);
        match json_file::read_document(&path) {
            Ok(Some(doc)) => Some(doc),
            Ok(None) => {
                self.sink.warn(&format!("config file not found: {}", path.display()));
                None
            }
            Err(e) => {
                self.sink.error(&format!("error reading or parsing config file: {e}"));
                None
            }
        }
    }

    /// Loads for a write operation.
    ///
    /// A missing file is an empty document.  A corrupt file is an empty
    /// document under [`CorruptFilePolicy::Discard`] and a failure (`None`)
    /// under [`CorruptFilePolicy::Abort`].  Other I/O errors always fail.
    fn load_for_write(&self, path: &Path) -> Option<ConfigDocument> {
        match json_file::read_document(path) {
            Ok(Some(doc)) => Some(doc),
            Ok(None) => Some(ConfigDocument::new()),
            Err(e) if e.is_corrupt() && self.policy == CorruptFilePolicy::Discard => {
                self.sink.warn(&format!("discarding unreadable config file: {e}"));
                Some(ConfigDocument::new())
            }
            Err(e) => {
                self.sink.error(&format!("failed to read or parse config file: {e}"));
                None
            }
        }
    }

    /// Writes `doc` to `path`, reporting failures to the sink.
    pub(crate) fn persist(&self, path: &Path, doc: &ConfigDocument) -> bool {
        match json_file::write_document(path, doc) {
            Ok(()) => true,
            Err(e) => {
                self.sink.error(&format!("failed to write config file: {e}"));
                false
            }
        }
    }
}

// ── Stateless handle ──────────────────────────────────────────────────────────

/// A [`ConfigStore`] bound to one [`ConfigLocation`].
///
/// Every call goes to disk; the handle itself holds no document.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    store: ConfigStore,
    location: ConfigLocation,
}

impl ConfigFile {
    pub fn location(&self) -> &ConfigLocation {
        &self.location
    }

    pub fn path(&self) -> PathBuf {
        self.store.path_of(&self.location)
    }

    pub fn ensure(&self) -> bool {
        self.store.ensure_file(&self.location)
    }

    pub fn exists(&self) -> bool {
        self.store.file_exists(&self.location)
    }

    pub fn array_values(&self, key: &str) -> Vec<String> {
        self.store.array_values(&self.location, key)
    }
}

impl ConfigAccess for ConfigFile {
    fn scalar(&self, key: &str) -> Option<Scalar> {
        self.store.scalar(&self.location, key)
    }

    fn set_scalar(&mut self, key: &str, value: Scalar) -> bool {
        self.store.set_scalar(&self.location, key, value)
    }

    fn has_key(&self, key: &str) -> bool {
        self.store.has_key(&self.location, key)
    }

    fn remove_key(&mut self, key: &str) -> bool {
        self.store.remove_key(&self.location, key)
    }

    fn array_contains(&self, key: &str, target: &str) -> bool {
        self.store.array_contains(&self.location, key, target)
    }

    fn array_append_unique(&mut self, key: &str, value: Scalar) -> bool {
        self.store.array_append_unique(&self.location, key, value)
    }

    fn array_len(&self, key: &str) -> usize {
        self.store.array_len(&self.location, key)
    }

    fn array_element_at(&self, key: &str, index: usize) -> Option<String> {
        self.store.array_element_at(&self.location, key, index)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
