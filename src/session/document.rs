// src/session/document.rs
//!
//! Document session: the single currently open document.
//!
//! While a document is open its in-memory buffer is authoritative over disk;
//! the dirty flag tracks whether the buffer has diverged since the last load
//! or save. At most one document is open at a time; there is no tab model.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::debug;
use ts_rs::TS;

use crate::filesystem::{normalize_path, FsAccess, FsError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DocumentState {
    /// No file open
    Empty,
    /// File open, buffer matches disk as last loaded or saved
    Clean,
    /// Buffer modified since last load or save
    Dirty,
}

/// Read-only view of the session for the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DocumentView {
    pub path: Option<String>,
    pub content: String,
    pub state: DocumentState,
}

struct SessionInner {
    path: Option<String>,
    content: String,
    state: DocumentState,
}

pub struct DocumentSession {
    fs: Arc<dyn FsAccess>,
    inner: Mutex<SessionInner>,
}

impl DocumentSession {
    pub fn new(fs: Arc<dyn FsAccess>) -> Self {
        Self {
            fs,
            inner: Mutex::new(SessionInner {
                path: None,
                content: String::new(),
                state: DocumentState::Empty,
            }),
        }
    }

    /// Load a file and replace the session with it.
    ///
    /// On a read failure the previous session is left exactly as it was.
    /// Confirming unsaved changes before replacing a dirty session is the
    /// caller's gate, not this method's.
    pub async fn open(&self, path: &str) -> Result<(), FsError> {
        let path = normalize_path(path);
        let content = self.fs.read_file(&path).await?;
        debug!(path = %path, "opened document");

        let mut inner = self.inner.lock().unwrap();
        inner.path = Some(path);
        inner.content = content;
        inner.state = DocumentState::Clean;
        Ok(())
    }

    /// Replace the buffer with an edited version. A no-op while nothing is
    /// open; from `Clean` or `Dirty` the session becomes `Dirty`.
    pub fn edit(&self, content: impl Into<String>) {
        let mut inner = self.inner.lock().unwrap();
        if inner.state == DocumentState::Empty {
            return;
        }
        inner.content = content.into();
        inner.state = DocumentState::Dirty;
    }

    /// Write the buffer back to disk.
    ///
    /// `Empty` and `Clean` are no-ops, so repeated saves perform one
    /// effective write per dirty cycle. A write failure leaves the session
    /// `Dirty`, so nothing is silently lost.
    pub async fn save(&self) -> Result<(), FsError> {
        let (path, content) = {
            let inner = self.inner.lock().unwrap();
            match inner.state {
                DocumentState::Empty | DocumentState::Clean => return Ok(()),
                DocumentState::Dirty => {}
            }
            let path = inner.path.clone().ok_or_else(|| FsError::InvalidPath {
                reason: "dirty session has no path".to_string(),
            })?;
            (path, inner.content.clone())
        };

        self.fs.write_file(&path, &content).await?;
        debug!(path = %path, "saved document");

        let mut inner = self.inner.lock().unwrap();
        // An open() or edit() that landed while the write was in flight must
        // not be marked clean.
        if inner.path.as_deref() == Some(path.as_str()) && inner.content == content {
            inner.state = DocumentState::Clean;
        }
        Ok(())
    }

    /// Drop the open document, back to `Empty`.
    pub fn close(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.path = None;
        inner.content.clear();
        inner.state = DocumentState::Empty;
    }

    pub fn state(&self) -> DocumentState {
        self.inner.lock().unwrap().state
    }

    pub fn is_dirty(&self) -> bool {
        self.state() == DocumentState::Dirty
    }

    pub fn path(&self) -> Option<String> {
        self.inner.lock().unwrap().path.clone()
    }

    pub fn content(&self) -> String {
        self.inner.lock().unwrap().content.clone()
    }

    pub fn view(&self) -> DocumentView {
        let inner = self.inner.lock().unwrap();
        DocumentView {
            path: inner.path.clone(),
            content: inner.content.clone(),
            state: inner.state,
        }
    }
}
