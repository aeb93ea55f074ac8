//! Directory tree synchronization and document session core for the Anomaly
//! markdown editor.
//!
//! The shell (window, menus, tree view, editor widget, markdown preview)
//! renders from this crate and calls back into it; everything here is
//! constructible and testable without any rendering layer.
//!
//! # Architecture
//!
//! - `filesystem/` - async filesystem access service (`FsAccess`, `DiskFs`)
//! - `tree/` - bounded-depth tree builder, snapshot cache, expansion state
//! - `session/` - the single open document and its dirty state
//! - `mutation/` - create/delete operations serialized with tree refreshes

pub mod filesystem;
pub mod mutation;
pub mod session;
pub mod tree;

use std::sync::Arc;

pub use filesystem::{normalize_path, DiskFs, FsAccess, FsError, RawEntry};
pub use mutation::{MutationCoordinator, DOCUMENT_EXTENSION};
pub use session::{DocumentSession, DocumentState, DocumentView};
pub use tree::{
    build_tree, list_directory, sort_entries, DirectoryEntry, TreeCache, TreeSnapshot,
    DEFAULT_DEPTH_BOUND,
};

/// Per-session state the shell manages: one open root, one open document.
pub struct AppState {
    fs: Arc<dyn FsAccess>,
    pub tree: TreeCache,
    pub session: DocumentSession,
    pub mutations: MutationCoordinator,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_fs(Arc::new(DiskFs::new()))
    }

    /// Assemble the singletons over a caller-supplied service implementation.
    pub fn with_fs(fs: Arc<dyn FsAccess>) -> Self {
        let tree = TreeCache::new(Arc::clone(&fs));
        let session = DocumentSession::new(Arc::clone(&fs));
        let mutations = MutationCoordinator::new(Arc::clone(&fs), tree.clone());
        Self {
            fs,
            tree,
            session,
            mutations,
        }
    }

    /// Switch the workspace to a new root directory: the open document is
    /// dropped (the unsaved-changes gate has already run in the UI), prior
    /// expansion state is cleared, and the tree is loaded fresh.
    pub async fn open_root(&self, path: &str) -> Result<Arc<TreeSnapshot>, FsError> {
        self.session.close();
        self.tree.set_root(path);
        self.tree.refresh().await
    }

    /// Run the native folder picker and open the chosen directory.
    /// Cancellation is `Ok(None)`, not an error.
    pub async fn pick_and_open_root(&self) -> Result<Option<Arc<TreeSnapshot>>, FsError> {
        match self.fs.pick_directory().await? {
            Some(path) => self.open_root(&path).await.map(Some),
            None => Ok(None),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
