//! # modcfg-core
//!
//! JSON-backed configuration files for plugins and mods hosted by a larger
//! application.  Each plugin owns one or more small JSON documents that live
//! under the host's configuration directory:
//!
//! ```text
//! <base-config-dir>/<dir>/<file>.json
//! ```
//!
//! The crate offers two interchangeable ways of working with such a file:
//!
//! - [`ConfigStore`] / [`ConfigFile`] – stateless.  Every call re-reads the
//!   file from disk and every mutation rewrites it.
//! - [`ResidentConfig`] – the document is loaded once and kept in memory;
//!   every mutation is written through to disk immediately, and the caller can
//!   explicitly `reload()` or `reset()`.
//!
//! Both implement the [`ConfigAccess`] trait.
//!
//! # Failure model (for beginners)
//!
//! Configuration access must never bring the host down.  Every I/O or parse
//! failure is logged through a [`DiagnosticSink`] and then converted into a
//! `false`, a default value, or `None`.  The lower-level
//! [`infrastructure::json_file`] functions still return a typed
//! [`StoreError`] for embedders that want the details.
//!
//! # Layers
//!
//! - **`domain`** – pure data types: [`Scalar`], [`ConfigValue`],
//!   [`ConfigDocument`], [`ConfigLocation`], [`CorruptFilePolicy`].
//! - **`infrastructure`** – filesystem reads/writes, platform directory
//!   lookup, and diagnostic sinks.
//! - **`application`** – the store facades built from the two layers above.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::access::ConfigAccess;
pub use application::resident::ResidentConfig;
pub use application::store::{ConfigFile, ConfigStore};
pub use domain::document::{ConfigDocument, DocumentError};
pub use domain::location::ConfigLocation;
pub use domain::policy::CorruptFilePolicy;
pub use domain::value::{ArrayItem, ConfigValue, FromScalar, Scalar};
pub use infrastructure::diagnostics::{DiagnosticSink, Level, MemorySink, TracingSink};
pub use infrastructure::json_file::StoreError;
