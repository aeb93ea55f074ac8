// src/tree/builder.rs
//!
//! Directory tree builder
//!
//! Walks a root path to a bounded depth and produces a fresh snapshot. A
//! failure on an individual subdirectory is swallowed for that subtree only;
//! a failure on the root aborts the build.

use futures_util::future::{BoxFuture, FutureExt};
use tracing::warn;

use super::types::{extension_of, DirectoryEntry, TreeSnapshot};
use crate::filesystem::{normalize_path, FsAccess, FsError, RawEntry};

/// Depth bound for tree builds: root's direct children are depth 1, their
/// children depth 2, deeper levels are pruned and shown as empty. Unbounded
/// walks over a large root (a home directory opened by accident) are the
/// hazard; navigation below the bound goes through [`list_directory`].
pub const DEFAULT_DEPTH_BOUND: u32 = 2;

/// Build a snapshot of `root_path` down to `depth_bound` levels.
pub async fn build_tree(
    fs: &dyn FsAccess,
    root_path: &str,
    depth_bound: u32,
) -> Result<TreeSnapshot, FsError> {
    let root_path = normalize_path(root_path);
    let entries = build_level(fs, &root_path, 1, depth_bound).await?;
    Ok(TreeSnapshot { root_path, entries })
}

/// Single-level on-demand listing for navigating below the depth bound.
/// `children` is always empty here.
pub async fn list_directory(
    fs: &dyn FsAccess,
    path: &str,
) -> Result<Vec<DirectoryEntry>, FsError> {
    let path = normalize_path(path);
    let raw = fs.list_entries(&path).await?;
    Ok(raw
        .into_iter()
        .map(|item| entry_from_raw(&path, item, Vec::new()))
        .collect())
}

fn entry_from_raw(parent: &str, item: RawEntry, children: Vec<DirectoryEntry>) -> DirectoryEntry {
    let path = format!("{}/{}", parent.trim_end_matches('/'), item.name);
    let extension = if item.is_directory {
        None
    } else {
        extension_of(&item.name)
    };
    DirectoryEntry {
        name: item.name,
        path,
        is_directory: item.is_directory,
        extension,
        last_modified: item.last_modified,
        size: item.size,
        children,
    }
}

fn build_level<'a>(
    fs: &'a dyn FsAccess,
    path: &'a str,
    depth: u32,
    bound: u32,
) -> BoxFuture<'a, Result<Vec<DirectoryEntry>, FsError>> {
    async move {
        let raw = fs.list_entries(path).await?;

        let mut entries = Vec::with_capacity(raw.len());
        for item in raw {
            let child_path = format!("{}/{}", path.trim_end_matches('/'), item.name);
            let children = if item.is_directory && depth < bound {
                match build_level(fs, &child_path, depth + 1, bound).await {
                    Ok(children) => children,
                    Err(err) => {
                        // One unreadable subtree must not fail the build.
                        warn!(path = %child_path, error = %err, "skipping unreadable subdirectory");
                        Vec::new()
                    }
                }
            } else {
                Vec::new()
            };
            entries.push(entry_from_raw(path, item, children));
        }

        Ok(entries)
    }
    .boxed()
}
