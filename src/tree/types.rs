// src/tree/types.rs
//!
//! UI-facing tree types
//!

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One filesystem node as of the last tree build.
///
/// Entries are created fresh on every build and never mutated in place; a
/// rebuild replaces the whole tree. `path` is unique within one snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryEntry {
    /// Entry name (not full path)
    pub name: String,
    /// Normalized absolute path, forward-slash separators on every host OS
    pub path: String,
    /// True if this is a directory
    pub is_directory: bool,
    /// Lowercase extension including the leading dot; absent for directories
    /// and extensionless files
    pub extension: Option<String>,
    /// Last modified time (Unix timestamp in milliseconds)
    pub last_modified: Option<u64>,
    /// File size in bytes (0 for directories)
    pub size: u64,
    /// Entries one level down; populated only for directories above the
    /// depth bound, empty at and below it regardless of actual contents
    pub children: Vec<DirectoryEntry>,
}

/// One immutable point-in-time tree result for the opened root.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TreeSnapshot {
    pub root_path: String,
    pub entries: Vec<DirectoryEntry>,
}

/// Lowercase extension of a file name, with the leading dot.
///
/// Dotfiles (".gitignore") and trailing-dot names carry no extension.
pub(crate) fn extension_of(name: &str) -> Option<String> {
    let dot = name.rfind('.')?;
    if dot == 0 || dot + 1 == name.len() {
        return None;
    }
    Some(format!(".{}", name[dot + 1..].to_lowercase()))
}

/// Presentation order: directories first, then case-insensitive by name,
/// applied to every level. Stable, so the tree view can re-apply it on each
/// render while the builder's own walk order stays unspecified.
pub fn sort_entries(entries: &mut [DirectoryEntry]) {
    entries.sort_by(|a, b| match (a.is_directory, b.is_directory) {
        (true, false) => std::cmp::Ordering::Less,
        (false, true) => std::cmp::Ordering::Greater,
        _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    });

    for entry in entries.iter_mut() {
        if !entry.children.is_empty() {
            sort_entries(&mut entry.children);
        }
    }
}
