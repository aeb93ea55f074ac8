// src/mutation/coordinator.rs
//!
//! Mutation coordinator
//!
//! Serializes structural changes (create/delete file or folder) against the
//! filesystem service and keeps the tree cache consistent: the structural
//! call always completes first, and success triggers exactly one refresh.
//! Overlapping refreshes ride the cache's single-flight guarantee.

use std::sync::Arc;
use tracing::debug;

use crate::filesystem::{FsAccess, FsError};
use crate::tree::TreeCache;

/// Extension appended to created documents when the supplied name lacks it.
pub const DOCUMENT_EXTENSION: &str = ".md";

pub struct MutationCoordinator {
    fs: Arc<dyn FsAccess>,
    tree: TreeCache,
}

impl MutationCoordinator {
    pub fn new(fs: Arc<dyn FsAccess>, tree: TreeCache) -> Self {
        Self { fs, tree }
    }

    /// Create an empty document in `dir_path` and return its path. The name
    /// gets [`DOCUMENT_EXTENSION`] appended unless it already ends with it;
    /// an existing file of that name surfaces as `AlreadyExists`.
    pub async fn create_file(&self, dir_path: &str, name: &str) -> Result<String, FsError> {
        let name = validate_name(name)?;
        let file_name = ensure_document_extension(&name);
        debug!(dir = %dir_path, file = %file_name, "creating document");

        let path = self.fs.create_file(dir_path, &file_name).await?;
        self.tree.refresh().await?;
        Ok(path)
    }

    /// Create a folder in `parent_path` and return its path. No extension
    /// policy applies to folders.
    pub async fn create_folder(&self, parent_path: &str, name: &str) -> Result<String, FsError> {
        let name = validate_name(name)?;
        debug!(parent = %parent_path, folder = %name, "creating folder");

        let path = self.fs.create_directory(parent_path, &name).await?;
        self.tree.refresh().await?;
        Ok(path)
    }

    pub async fn delete_file(&self, path: &str) -> Result<(), FsError> {
        debug!(path = %path, "deleting file");
        self.fs.delete_file(path).await?;
        self.tree.refresh().await?;
        Ok(())
    }

    /// Delete a folder and all its contents. A failed (or partial) delete
    /// leaves the cache unrefreshed; the prior snapshot is what the caller
    /// keeps showing.
    pub async fn delete_folder(&self, path: &str) -> Result<(), FsError> {
        debug!(path = %path, "deleting folder");
        self.fs.delete_directory_recursive(path).await?;
        self.tree.refresh().await?;
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<String, FsError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FsError::InvalidPath {
            reason: "name must not be empty".to_string(),
        });
    }
    // A name with separators would escape the target directory.
    if name.contains('/') || name.contains('\\') {
        return Err(FsError::InvalidPath {
            reason: format!("name must not contain path separators: {name}"),
        });
    }
    Ok(name.to_string())
}

pub(crate) fn ensure_document_extension(name: &str) -> String {
    if name.ends_with(DOCUMENT_EXTENSION) {
        name.to_string()
    } else {
        format!("{name}{DOCUMENT_EXTENSION}")
    }
}
