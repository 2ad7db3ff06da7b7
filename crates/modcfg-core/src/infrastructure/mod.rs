//! Infrastructure layer: everything that touches the outside world.
//!
//! - [`json_file`] reads and writes one document on disk.
//! - [`paths`] finds the platform configuration directory.
//! - [`diagnostics`] routes log messages to an injectable sink.
//!
//! **Dependency rule**: this layer may depend on `domain`, but MUST NOT be
//! imported by the `domain` layer.

pub mod diagnostics;
pub mod json_file;
pub mod paths;
