// src/filesystem/tests.rs
//!
//! Tests for the filesystem access service (DiskFs against real temp dirs)
//!

#[cfg(test)]
mod error_tests {
    use crate::filesystem::FsError;

    #[test]
    fn test_display_contains_path() {
        let error = FsError::NotFound {
            path: "/proj/missing.md".to_string(),
        };
        assert_eq!(error.to_string(), "File not found: /proj/missing.md");
    }

    #[test]
    fn test_partial_delete_display() {
        let error = FsError::PartialDelete {
            path: "/proj/docs".to_string(),
            reason: "2 item(s) could not be removed, first failure: /proj/docs/a: busy".to_string(),
        };
        let display = error.to_string();
        assert!(display.contains("/proj/docs"));
        assert!(display.contains("2 item(s)"));
    }

    #[test]
    fn test_serializes_as_display_string() {
        let error = FsError::AlreadyExists {
            path: "/proj/notes.md".to_string(),
        };
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json, serde_json::json!("Already exists: /proj/notes.md"));
    }

    #[test]
    fn test_from_io_maps_kinds() {
        use std::io::{Error, ErrorKind};

        let not_found = FsError::from_io("/p", Error::new(ErrorKind::NotFound, "x"));
        assert!(matches!(not_found, FsError::NotFound { .. }));

        let denied = FsError::from_io("/p", Error::new(ErrorKind::PermissionDenied, "x"));
        assert!(matches!(denied, FsError::PermissionDenied { .. }));

        let exists = FsError::from_io("/p", Error::new(ErrorKind::AlreadyExists, "x"));
        assert!(matches!(exists, FsError::AlreadyExists { .. }));

        let other = FsError::from_io("/p", Error::new(ErrorKind::Interrupted, "x"));
        assert!(matches!(other, FsError::IoError { .. }));
    }
}

#[cfg(test)]
mod service_tests {
    use crate::filesystem::{normalize_path, DiskFs, FsAccess, FsError};
    use std::fs;
    use tempfile::TempDir;

    fn path_str(path: &std::path::Path) -> String {
        normalize_path(&path.to_string_lossy())
    }

    #[test]
    fn test_normalize_path_folds_backslashes() {
        assert_eq!(normalize_path("C:\\Users\\me\\docs"), "C:/Users/me/docs");
        assert_eq!(normalize_path("/already/fine"), "/already/fine");
    }

    #[tokio::test]
    async fn test_list_entries_reports_files_and_dirs() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("readme.md"), "hello").unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();

        let entries = DiskFs::new().list_entries(&path_str(dir.path())).await.unwrap();

        assert_eq!(entries.len(), 2);
        let readme = entries.iter().find(|e| e.name == "readme.md").unwrap();
        assert!(!readme.is_directory);
        assert_eq!(readme.size, 5);
        assert!(readme.last_modified.is_some());

        let docs = entries.iter().find(|e| e.name == "docs").unwrap();
        assert!(docs.is_directory);
        assert_eq!(docs.size, 0);
    }

    #[tokio::test]
    async fn test_list_entries_missing_path() {
        let result = DiskFs::new().list_entries("/nonexistent/anomaly-test").await;
        assert!(matches!(result, Err(FsError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_entries_on_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain.md");
        fs::write(&file, "").unwrap();

        let result = DiskFs::new().list_entries(&path_str(&file)).await;
        assert!(matches!(result, Err(FsError::NotADirectory { .. })));
    }

    #[tokio::test]
    async fn test_read_file_roundtrip() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("notes.md");

        let fs_access = DiskFs::new();
        fs_access.write_file(&path_str(&file), "# Notes\n").await.unwrap();
        let content = fs_access.read_file(&path_str(&file)).await.unwrap();
        assert_eq!(content, "# Notes\n");
    }

    #[tokio::test]
    async fn test_read_file_missing() {
        let result = DiskFs::new().read_file("/nonexistent/notes.md").await;
        assert!(matches!(result, Err(FsError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_read_file_on_directory() {
        let dir = TempDir::new().unwrap();
        let result = DiskFs::new().read_file(&path_str(dir.path())).await;
        assert!(matches!(result, Err(FsError::NotAFile { .. })));
    }

    #[tokio::test]
    async fn test_write_file_overwrites() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("draft.md");
        fs::write(&file, "old").unwrap();

        DiskFs::new().write_file(&path_str(&file), "new").await.unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "new");
    }

    #[tokio::test]
    async fn test_create_file_returns_normalized_path() {
        let dir = TempDir::new().unwrap();
        let created = DiskFs::new()
            .create_file(&path_str(dir.path()), "notes.md")
            .await
            .unwrap();

        assert!(created.ends_with("/notes.md"));
        assert!(!created.contains('\\'));
        assert_eq!(fs::read_to_string(dir.path().join("notes.md")).unwrap(), "");
    }

    #[tokio::test]
    async fn test_create_file_already_exists() {
        let dir = TempDir::new().unwrap();
        let fs_access = DiskFs::new();
        fs_access.create_file(&path_str(dir.path()), "notes.md").await.unwrap();

        let result = fs_access.create_file(&path_str(dir.path()), "notes.md").await;
        assert!(matches!(result, Err(FsError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_create_file_missing_parent() {
        let result = DiskFs::new().create_file("/nonexistent/dir", "notes.md").await;
        assert!(matches!(result, Err(FsError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_create_directory() {
        let dir = TempDir::new().unwrap();
        let created = DiskFs::new()
            .create_directory(&path_str(dir.path()), "docs")
            .await
            .unwrap();

        assert!(created.ends_with("/docs"));
        assert!(dir.path().join("docs").is_dir());
    }

    #[tokio::test]
    async fn test_create_directory_already_exists() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();

        let result = DiskFs::new().create_directory(&path_str(dir.path()), "docs").await;
        assert!(matches!(result, Err(FsError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_delete_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("stale.md");
        fs::write(&file, "x").unwrap();

        DiskFs::new().delete_file(&path_str(&file)).await.unwrap();
        assert!(!file.exists());
    }

    #[tokio::test]
    async fn test_delete_file_missing() {
        let result = DiskFs::new().delete_file("/nonexistent/stale.md").await;
        assert!(matches!(result, Err(FsError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_file_on_directory() {
        let dir = TempDir::new().unwrap();
        let result = DiskFs::new().delete_file(&path_str(dir.path())).await;
        assert!(matches!(result, Err(FsError::NotAFile { .. })));
    }

    #[tokio::test]
    async fn test_delete_directory_recursive_removes_descendants() {
        let dir = TempDir::new().unwrap();
        let docs = dir.path().join("docs");
        fs::create_dir_all(docs.join("drafts")).unwrap();
        fs::write(docs.join("a.md"), "a").unwrap();
        fs::write(docs.join("drafts").join("b.md"), "b").unwrap();

        DiskFs::new()
            .delete_directory_recursive(&path_str(&docs))
            .await
            .unwrap();

        assert!(!docs.exists());
        let remaining = DiskFs::new().list_entries(&path_str(dir.path())).await.unwrap();
        assert!(remaining.iter().all(|e| e.name != "docs"));
    }

    #[tokio::test]
    async fn test_delete_directory_recursive_on_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain.md");
        fs::write(&file, "").unwrap();

        let result = DiskFs::new().delete_directory_recursive(&path_str(&file)).await;
        assert!(matches!(result, Err(FsError::NotADirectory { .. })));
    }

    #[tokio::test]
    async fn test_delete_directory_recursive_missing() {
        let result = DiskFs::new()
            .delete_directory_recursive("/nonexistent/docs")
            .await;
        assert!(matches!(result, Err(FsError::NotFound { .. })));
    }
}
