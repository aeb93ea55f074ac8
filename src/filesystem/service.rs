// src/filesystem/service.rs
//!
//! The filesystem access service: a thin async wrapper over primitive disk
//! operations. Owns no state; every call re-reads disk truth.

use async_trait::async_trait;
use futures_util::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use tokio::fs;
use tracing::warn;

use super::error::FsError;

/// Normalize a path for use as a comparison key: Windows backslashes become
/// forward slashes so every consumer sees a single canonical form.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// One entry of a directory listing, as reported by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntry {
    /// Entry name (not full path)
    pub name: String,
    /// True if this is a directory
    pub is_directory: bool,
    /// File size in bytes (0 for directories)
    pub size: u64,
    /// Last modified time (Unix timestamp in milliseconds)
    pub last_modified: Option<u64>,
}

/// Primitive filesystem operations consumed by the tree builder, the document
/// session, and the mutation coordinator. Implementations must report every
/// failure as an [`FsError`]; nothing may panic across this boundary.
#[async_trait]
pub trait FsAccess: Send + Sync {
    /// List the direct entries of a directory.
    ///
    /// Entries whose metadata cannot be read (permission, vanished mid-walk)
    /// are skipped rather than failing the listing; only a failure on `path`
    /// itself is an error.
    async fn list_entries(&self, path: &str) -> Result<Vec<RawEntry>, FsError>;

    /// Read a file as UTF-8 text.
    async fn read_file(&self, path: &str) -> Result<String, FsError>;

    /// Write text to a file, creating it if absent and overwriting otherwise.
    async fn write_file(&self, path: &str, contents: &str) -> Result<(), FsError>;

    /// Create an empty file named `name` inside `dir_path` and return its
    /// normalized path.
    async fn create_file(&self, dir_path: &str, name: &str) -> Result<String, FsError>;

    /// Create a directory named `name` inside `parent_path` and return its
    /// normalized path. Single-level: the parent must already exist.
    async fn create_directory(&self, parent_path: &str, name: &str) -> Result<String, FsError>;

    /// Delete a single file.
    async fn delete_file(&self, path: &str) -> Result<(), FsError>;

    /// Delete a directory and everything below it, descendants first.
    ///
    /// Best-effort: the walk continues past individual failures, and anything
    /// left behind is reported as [`FsError::PartialDelete`].
    async fn delete_directory_recursive(&self, path: &str) -> Result<(), FsError>;

    /// Open the native folder picker. Cancellation is `Ok(None)`.
    async fn pick_directory(&self) -> Result<Option<String>, FsError>;
}

/// Production implementation over the local disk.
#[derive(Debug, Clone, Default)]
pub struct DiskFs;

impl DiskFs {
    pub fn new() -> Self {
        Self
    }
}

/// Normalized `parent/name` join.
fn child_path(parent: &str, name: &str) -> String {
    let parent = normalize_path(parent);
    format!("{}/{}", parent.trim_end_matches('/'), name)
}

fn modified_millis(metadata: &std::fs::Metadata) -> Option<u64> {
    metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_millis() as u64)
}

/// Metadata for a path that must exist, with `NotFound` mapped eagerly.
async fn require_metadata(path: &str) -> Result<std::fs::Metadata, FsError> {
    fs::metadata(path).await.map_err(|e| FsError::from_io(path, e))
}

#[async_trait]
impl FsAccess for DiskFs {
    async fn list_entries(&self, path: &str) -> Result<Vec<RawEntry>, FsError> {
        let metadata = require_metadata(path).await?;
        if !metadata.is_dir() {
            return Err(FsError::NotADirectory {
                path: path.to_string(),
            });
        }

        let mut dir = fs::read_dir(path)
            .await
            .map_err(|e| FsError::from_io(path, e))?;

        let mut entries = Vec::new();
        loop {
            let entry = match dir.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!(path, error = %e, "directory iteration stopped early");
                    break;
                }
            };

            // One unreadable child must not fail the whole listing.
            let metadata = match entry.metadata().await {
                Ok(metadata) => metadata,
                Err(e) => {
                    warn!(entry = %entry.path().display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            entries.push(RawEntry {
                name: entry.file_name().to_string_lossy().to_string(),
                is_directory: metadata.is_dir(),
                size: if metadata.is_file() { metadata.len() } else { 0 },
                last_modified: modified_millis(&metadata),
            });
        }

        Ok(entries)
    }

    async fn read_file(&self, path: &str) -> Result<String, FsError> {
        let metadata = require_metadata(path).await?;
        if metadata.is_dir() {
            return Err(FsError::NotAFile {
                path: path.to_string(),
            });
        }

        fs::read_to_string(path)
            .await
            .map_err(|e| FsError::from_io(path, e))
    }

    async fn write_file(&self, path: &str, contents: &str) -> Result<(), FsError> {
        fs::write(path, contents)
            .await
            .map_err(|e| FsError::from_io(path, e))
    }

    async fn create_file(&self, dir_path: &str, name: &str) -> Result<String, FsError> {
        let metadata = require_metadata(dir_path).await?;
        if !metadata.is_dir() {
            return Err(FsError::NotADirectory {
                path: dir_path.to_string(),
            });
        }

        let path = child_path(dir_path, name);
        if fs::try_exists(&path)
            .await
            .map_err(|e| FsError::from_io(&path, e))?
        {
            return Err(FsError::AlreadyExists { path });
        }

        fs::write(&path, "")
            .await
            .map_err(|e| FsError::from_io(&path, e))?;
        Ok(path)
    }

    async fn create_directory(&self, parent_path: &str, name: &str) -> Result<String, FsError> {
        let metadata = require_metadata(parent_path).await?;
        if !metadata.is_dir() {
            return Err(FsError::NotADirectory {
                path: parent_path.to_string(),
            });
        }

        let path = child_path(parent_path, name);
        if fs::try_exists(&path)
            .await
            .map_err(|e| FsError::from_io(&path, e))?
        {
            return Err(FsError::AlreadyExists { path });
        }

        fs::create_dir(&path)
            .await
            .map_err(|e| FsError::from_io(&path, e))?;
        Ok(path)
    }

    async fn delete_file(&self, path: &str) -> Result<(), FsError> {
        let metadata = require_metadata(path).await?;
        if metadata.is_dir() {
            return Err(FsError::NotAFile {
                path: path.to_string(),
            });
        }

        fs::remove_file(path)
            .await
            .map_err(|e| FsError::from_io(path, e))
    }

    async fn delete_directory_recursive(&self, path: &str) -> Result<(), FsError> {
        let metadata = require_metadata(path).await?;
        if !metadata.is_dir() {
            return Err(FsError::NotADirectory {
                path: path.to_string(),
            });
        }

        let mut failures = Vec::new();
        remove_tree(Path::new(path), &mut failures).await;

        if failures.is_empty() {
            Ok(())
        } else {
            Err(FsError::PartialDelete {
                path: path.to_string(),
                reason: format!(
                    "{} item(s) could not be removed, first failure: {}",
                    failures.len(),
                    failures[0]
                ),
            })
        }
    }

    async fn pick_directory(&self) -> Result<Option<String>, FsError> {
        let picked = rfd::AsyncFileDialog::new().pick_folder().await;
        Ok(picked.map(|handle| normalize_path(&handle.path().to_string_lossy())))
    }
}

/// Post-order removal: descendants before the directory itself. Individual
/// failures are recorded and the walk continues past them.
fn remove_tree<'a>(path: &'a Path, failures: &'a mut Vec<String>) -> BoxFuture<'a, ()> {
    async move {
        let mut dir = match fs::read_dir(path).await {
            Ok(dir) => dir,
            Err(e) => {
                failures.push(format!("{}: {}", path.display(), e));
                return;
            }
        };

        let mut children: Vec<(PathBuf, bool)> = Vec::new();
        loop {
            match dir.next_entry().await {
                Ok(Some(entry)) => {
                    // Symlinks are unlinked, never followed.
                    let is_dir = match entry.file_type().await {
                        Ok(file_type) => file_type.is_dir(),
                        Err(e) => {
                            failures.push(format!("{}: {}", entry.path().display(), e));
                            continue;
                        }
                    };
                    children.push((entry.path(), is_dir));
                }
                Ok(None) => break,
                Err(e) => {
                    failures.push(format!("{}: {}", path.display(), e));
                    break;
                }
            }
        }
        drop(dir);

        for (child, is_dir) in children {
            if is_dir {
                remove_tree(&child, failures).await;
            } else if let Err(e) = fs::remove_file(&child).await {
                failures.push(format!("{}: {}", child.display(), e));
            }
        }

        if let Err(e) = fs::remove_dir(path).await {
            failures.push(format!("{}: {}", path.display(), e));
        }
    }
    .boxed()
}
