// src/tree/cache.rs
//!
//! Tree cache and expansion state
//!
//! Holds exactly one snapshot for the opened root plus the set of expanded
//! directory paths, which survives rebuilds because paths are stable string
//! identities. Overlapping refreshes collapse onto a single in-flight build.

use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tracing::debug;

use super::builder::{self, DEFAULT_DEPTH_BOUND};
use super::types::TreeSnapshot;
use crate::filesystem::{normalize_path, FsAccess, FsError};

type BuildFuture = Shared<BoxFuture<'static, Result<Arc<TreeSnapshot>, FsError>>>;

struct InFlightBuild {
    id: u64,
    root: String,
    future: BuildFuture,
}

#[derive(Default)]
struct CacheInner {
    root: Option<String>,
    snapshot: Option<Arc<TreeSnapshot>>,
    expanded: HashSet<String>,
    in_flight: Option<InFlightBuild>,
    build_seq: u64,
}

/// Per-session singleton owning the current [`TreeSnapshot`] and expansion
/// state. Clones are handles onto the same session.
#[derive(Clone)]
pub struct TreeCache {
    fs: Arc<dyn FsAccess>,
    inner: Arc<Mutex<CacheInner>>,
    depth_bound: u32,
}

impl TreeCache {
    pub fn new(fs: Arc<dyn FsAccess>) -> Self {
        Self::with_depth_bound(fs, DEFAULT_DEPTH_BOUND)
    }

    pub fn with_depth_bound(fs: Arc<dyn FsAccess>, depth_bound: u32) -> Self {
        Self {
            fs,
            inner: Arc::new(Mutex::new(CacheInner::default())),
            depth_bound,
        }
    }

    /// Replace the root. Clears the snapshot and the entire expansion state;
    /// a directory expanded under the old root has no meaning under the new
    /// one. An outstanding build for the old root keeps running (there is no
    /// cancellation) but its result is discarded on completion.
    pub fn set_root(&self, path: &str) {
        let root = normalize_path(path);
        debug!(root = %root, "switching root");
        let mut inner = self.inner.lock().unwrap();
        inner.root = Some(root);
        inner.snapshot = None;
        inner.expanded.clear();
    }

    pub fn root(&self) -> Option<String> {
        self.inner.lock().unwrap().root.clone()
    }

    /// The last successfully built snapshot, if any.
    pub fn snapshot(&self) -> Option<Arc<TreeSnapshot>> {
        self.inner.lock().unwrap().snapshot.clone()
    }

    pub fn toggle_expanded(&self, path: &str) {
        let path = normalize_path(path);
        let mut inner = self.inner.lock().unwrap();
        if !inner.expanded.remove(&path) {
            inner.expanded.insert(path);
        }
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.inner
            .lock()
            .unwrap()
            .expanded
            .contains(&normalize_path(path))
    }

    /// Rebuild the tree for the current root and replace the snapshot.
    /// Expansion state is left untouched.
    ///
    /// Single-flight: a call arriving while a build for the same root is
    /// outstanding awaits that build's shared result instead of starting a
    /// redundant walk.
    pub async fn refresh(&self) -> Result<Arc<TreeSnapshot>, FsError> {
        let future = {
            let mut inner = self.inner.lock().unwrap();
            let root = inner.root.clone().ok_or_else(|| FsError::InvalidPath {
                reason: "no root directory is open".to_string(),
            })?;

            match &inner.in_flight {
                Some(build) if build.root == root => build.future.clone(),
                _ => {
                    inner.build_seq += 1;
                    let id = inner.build_seq;
                    let fs = Arc::clone(&self.fs);
                    let state = Arc::clone(&self.inner);
                    let depth_bound = self.depth_bound;
                    let walk_root = root.clone();

                    let future: BuildFuture = async move {
                        let result =
                            builder::build_tree(fs.as_ref(), &walk_root, depth_bound).await;

                        let mut inner = state.lock().unwrap();
                        if inner.in_flight.as_ref().map(|b| b.id) == Some(id) {
                            inner.in_flight = None;
                        }
                        let snapshot = Arc::new(result?);
                        // A root switch during the walk makes this result
                        // stale; it is discarded, not stored.
                        if inner.root.as_deref() == Some(walk_root.as_str()) {
                            inner.snapshot = Some(Arc::clone(&snapshot));
                        }
                        Ok(snapshot)
                    }
                    .boxed()
                    .shared();

                    inner.in_flight = Some(InFlightBuild {
                        id,
                        root,
                        future: future.clone(),
                    });
                    future
                }
            }
        };

        future.await
    }
}
