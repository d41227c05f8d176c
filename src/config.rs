// src/config.rs
//
// Runtime configuration
//
// Sessions are stored in the application data directory by default.
// Path structure: {APP_DATA}/file-renamer/sessions/<session id>/

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Upload size limit per file (100 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 100 * 1024 * 1024;

const APP_DIR: &str = "file-renamer";
const SESSIONS_DIR: &str = "sessions";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding one folder per session
    pub workspace_root: PathBuf,

    /// Largest file accepted by an upload
    pub max_upload_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace_root: default_workspace_root(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl AppConfig {
    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = root.into();
        self
    }

    pub fn with_max_upload_bytes(mut self, bytes: u64) -> Self {
        self.max_upload_bytes = bytes;
        self
    }

    /// Create the workspace root if it does not exist yet.
    pub fn ensure_workspace_root(&self) -> AppResult<&Path> {
        if self.workspace_root.as_os_str().is_empty() {
            return Err(AppError::InvalidInput(
                "Workspace root must not be empty".to_string(),
            ));
        }
        std::fs::create_dir_all(&self.workspace_root)?;
        Ok(&self.workspace_root)
    }
}

/// `{APP_DATA}/file-renamer/sessions`, or the temp directory when the
/// platform has no data directory.
pub fn default_workspace_root() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
        .join(SESSIONS_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_root_ends_with_sessions() {
        let config = AppConfig::default();

        assert!(config.workspace_root.ends_with("file-renamer/sessions"));
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    }

    #[test]
    fn test_ensure_workspace_root_creates_it() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("nested").join("sessions");
        let config = AppConfig::default().with_workspace_root(&root);

        config.ensure_workspace_root().unwrap();

        assert!(root.is_dir());
    }

    #[test]
    fn test_empty_root_is_rejected() {
        let config = AppConfig::default().with_workspace_root("");
        assert!(config.ensure_workspace_root().is_err());
    }
}
