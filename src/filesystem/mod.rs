// src/filesystem/mod.rs
//!
//! Filesystem Access Service
//!
//! Thin async wrapper over primitive disk operations. Every call re-reads
//! disk truth; all failures are reported as [`FsError`] values, never panics.

mod error;
mod service;
#[cfg(test)]
mod tests;

pub use error::FsError;
pub use service::{normalize_path, DiskFs, FsAccess, RawEntry};
