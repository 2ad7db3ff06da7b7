//! Domain types for JSON configuration documents.
//!
//! Nothing in this module touches the filesystem.  Documents are parsed from
//! and rendered to strings; the infrastructure layer decides where those
//! strings come from and go to.  Keeping the types pure means every rule about
//! which JSON shapes are supported can be unit-tested without a temp dir.

/// The top-level key/value document.
pub mod document;
/// Where a document lives relative to the host's config directory.
pub mod location;
/// What to do with unreadable files on the write path.
pub mod policy;
/// Tagged JSON value types.
pub mod value;
