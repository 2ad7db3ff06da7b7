//! Application layer: the configuration store facades.
//!
//! Two strategies sit behind the [`access::ConfigAccess`] trait:
//!
//! ```text
//! ConfigStore ──file()─────► ConfigFile      reload on every call
//!             └─resident()─► ResidentConfig  load once, write-through
//! ```
//!
//! Pick [`store::ConfigFile`] when other processes may edit the file between
//! calls, and [`resident::ResidentConfig`] when this process is the only
//! writer and reads are frequent.

pub mod access;
pub mod resident;
pub mod store;
