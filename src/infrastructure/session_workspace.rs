// src/infrastructure/session_workspace.rs
//
// Session Workspace Management
//
// CRITICAL RULES:
// - One workspace per rename session, isolated from every other session
// - Session ids are UUIDs; nothing else is accepted as a directory name
// - Cleanup requires an explicit reset and never leaves the workspace root
// - Uploaded files are copied in; the user's originals are never touched

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::domain::{validate_mapping_row, AuditLog, MappingRow};
use crate::error::{AppError, AppResult};
use crate::infrastructure::working_area::AreaLayout;

/// On-disk working area of one rename session
///
/// INVARIANTS:
/// - `layout.root` is `<workspace_root>/<id>`
/// - The mapping is stored normalized (already cleaned rows)
#[derive(Debug, Clone)]
pub struct SessionWorkspace {
    /// Session identifier (simple-format UUID)
    pub id: String,

    /// Directory holding every session
    pub workspace_root: PathBuf,

    /// Folders of this session's working area
    pub layout: AreaLayout,

    /// Whether this workspace has been reset
    pub is_cleaned: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredMapping {
    saved_at: DateTime<Utc>,
    rows: Vec<MappingRow>,
}

impl SessionWorkspace {
    const MAPPING_FILE: &'static str = "mapping.json";

    /// Create a fresh session directory under `workspace_root`.
    pub fn create(workspace_root: &Path) -> AppResult<Self> {
        let id = Uuid::new_v4().simple().to_string();
        let layout = AreaLayout::under(workspace_root.join(&id));

        fs::create_dir_all(&layout.root)?;
        info!("Created session {} at {}", id, layout.root.display());

        Ok(Self {
            id,
            workspace_root: workspace_root.to_path_buf(),
            layout,
            is_cleaned: false,
        })
    }

    /// Open an existing session.
    pub fn open(workspace_root: &Path, id: &str) -> AppResult<Self> {
        let id = Uuid::parse_str(id.trim())?.simple().to_string();
        let layout = AreaLayout::under(workspace_root.join(&id));

        if !layout.root.is_dir() {
            return Err(AppError::NotFound);
        }

        Ok(Self {
            id,
            workspace_root: workspace_root.to_path_buf(),
            layout,
            is_cleaned: false,
        })
    }

    pub fn is_valid(&self) -> bool {
        !self.is_cleaned && self.layout.root.exists()
    }

    // ========================================================================
    // MAPPING
    // ========================================================================

    pub fn save_mapping(&self, rows: &[MappingRow]) -> AppResult<()> {
        let stored = StoredMapping {
            saved_at: Utc::now(),
            rows: rows.to_vec(),
        };
        let json = serde_json::to_vec_pretty(&stored)?;
        fs::write(self.mapping_path(), json)?;
        Ok(())
    }

    /// Load the stored mapping; rows are re-validated on the way in.
    pub fn load_mapping(&self) -> AppResult<Vec<MappingRow>> {
        let path = self.mapping_path();
        if !path.is_file() {
            return Err(AppError::InvalidInput(
                "Please upload a mapping first".to_string(),
            ));
        }

        let stored: StoredMapping = serde_json::from_slice(&fs::read(path)?)?;
        for row in &stored.rows {
            validate_mapping_row(row)?;
        }
        Ok(stored.rows)
    }

    pub fn has_mapping(&self) -> bool {
        self.mapping_path().is_file()
    }

    fn mapping_path(&self) -> PathBuf {
        self.layout.root.join(Self::MAPPING_FILE)
    }

    // ========================================================================
    // FILES
    // ========================================================================

    /// Copy a file into the session's `files/` folder under a sanitized name.
    /// A file already stored under that name is replaced.
    pub fn import_file(&self, source: &Path, max_bytes: u64) -> AppResult<String> {
        let raw_name = source
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AppError::InvalidInput(format!("Invalid file name: {:?}", source)))?;

        let name = sanitize_file_name(raw_name).ok_or_else(|| {
            AppError::InvalidInput(format!("File name has no usable characters: {}", raw_name))
        })?;

        let size = fs::metadata(source)?.len();
        if size > max_bytes {
            return Err(AppError::InvalidInput(format!(
                "{} is {} bytes, over the {} byte upload limit",
                raw_name, size, max_bytes
            )));
        }

        fs::create_dir_all(&self.layout.files_dir)?;
        fs::copy(source, self.layout.files_dir.join(&name))?;
        Ok(name)
    }

    /// True once files have been uploaded, even if every one of them has
    /// since been moved into a bucket.
    pub fn has_files(&self) -> bool {
        self.layout.files_dir.is_dir()
    }

    /// Names of the audit logs written in this session, oldest first.
    pub fn audit_logs(&self) -> AppResult<Vec<String>> {
        let mut logs = Vec::new();
        for entry in fs::read_dir(&self.layout.root)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with(AuditLog::FILE_PREFIX) && entry.file_type()?.is_file() {
                logs.push(name);
            }
        }
        logs.sort();
        Ok(logs)
    }

    // ========================================================================
    // CLEANUP
    // ========================================================================

    /// Delete the session directory and everything in it.
    ///
    /// CRITICAL: refuses to delete anything outside the workspace root.
    pub fn cleanup(&mut self) -> AppResult<()> {
        if self.is_cleaned {
            return Ok(());
        }

        if self.layout.root.parent() != Some(self.workspace_root.as_path()) {
            return Err(AppError::Other(
                "Session directory is not in the expected workspace location".to_string(),
            ));
        }

        if self.layout.root.exists() {
            fs::remove_dir_all(&self.layout.root)?;
        }

        info!("Reset session {}", self.id);
        self.is_cleaned = true;
        Ok(())
    }
}

/// Reduce an uploaded file name to a safe, portable one.
///
/// Accented letters are folded to their ASCII base (NFKD, marks dropped).
/// Keeps ASCII letters, digits, '.', '-' and '_'; whitespace runs become a
/// single '_'; everything else is dropped, then leading and trailing '.'
/// and '_' are stripped. Returns None when nothing usable is left.
pub fn sanitize_file_name(name: &str) -> Option<String> {
    let mut cleaned = String::with_capacity(name.len());
    let mut pending_space = false;

    for ch in name.nfkd() {
        if ch.is_whitespace() || ch == '/' || ch == '\\' {
            pending_space = true;
            continue;
        }
        if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') {
            if pending_space && !cleaned.is_empty() {
                cleaned.push('_');
            }
            pending_space = false;
            cleaned.push(ch);
        }
    }

    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ============================================================================
// WORKSPACE EVENTS
// ============================================================================

use crate::events::types::DomainEvent;

/// Emitted when a session workspace is created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub session_id: String,
}

impl SessionCreated {
    pub fn new(session_id: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            session_id,
        }
    }
}

impl DomainEvent for SessionCreated {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "SessionCreated" }
}

/// Emitted when a session workspace is reset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReset {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub session_id: String,
}

impl SessionReset {
    pub fn new(session_id: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            session_id,
        }
    }
}

impl DomainEvent for SessionReset {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "SessionReset" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use tempfile::TempDir;

    #[test]
    fn test_workspace_creation() {
        let root = TempDir::new().unwrap();
        let workspace = SessionWorkspace::create(root.path()).unwrap();

        assert!(workspace.is_valid());
        assert!(workspace.layout.root.is_dir());
        assert!(!workspace.has_files());
        assert_eq!(workspace.layout.root, root.path().join(&workspace.id));
        assert_eq!(workspace.id.len(), 32);
    }

    #[test]
    fn test_open_existing_and_missing() {
        let root = TempDir::new().unwrap();
        let created = SessionWorkspace::create(root.path()).unwrap();

        let opened = SessionWorkspace::open(root.path(), &created.id).unwrap();
        assert_eq!(opened.layout, created.layout);

        let missing = SessionWorkspace::open(root.path(), &Uuid::new_v4().to_string());
        assert!(matches!(missing, Err(AppError::NotFound)));
    }

    #[test]
    fn test_open_rejects_non_uuid_ids() {
        let root = TempDir::new().unwrap();
        let result = SessionWorkspace::open(root.path(), "../../etc");
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_mapping_round_trip_and_missing_mapping() {
        let root = TempDir::new().unwrap();
        let workspace = SessionWorkspace::create(root.path()).unwrap();

        assert!(matches!(workspace.load_mapping(), Err(AppError::InvalidInput(_))));

        let rows = vec![
            MappingRow::new("a.txt", "b.txt", Category::Active),
            MappingRow::new("c.txt", "d.txt", Category::Uncategorized),
        ];
        workspace.save_mapping(&rows).unwrap();

        assert!(workspace.has_mapping());
        assert_eq!(workspace.load_mapping().unwrap(), rows);
    }

    #[test]
    fn test_import_file_sanitizes_name() {
        let root = TempDir::new().unwrap();
        let uploads = TempDir::new().unwrap();
        let workspace = SessionWorkspace::create(root.path()).unwrap();

        let source = uploads.path().join("My Report (final).pdf");
        fs::write(&source, b"pdf").unwrap();

        assert!(!workspace.has_files());
        let stored = workspace.import_file(&source, 1024).unwrap();

        assert_eq!(stored, "My_Report_final.pdf");
        assert!(workspace.has_files());
        assert!(workspace.layout.files_dir.join(&stored).is_file());
        assert!(source.exists());
    }

    #[test]
    fn test_has_files_survives_an_emptied_files_folder() {
        let root = TempDir::new().unwrap();
        let uploads = TempDir::new().unwrap();
        let workspace = SessionWorkspace::create(root.path()).unwrap();

        let source = uploads.path().join("a.txt");
        fs::write(&source, b"a").unwrap();
        let stored = workspace.import_file(&source, 1024).unwrap();
        fs::remove_file(workspace.layout.files_dir.join(stored)).unwrap();

        assert!(workspace.has_files());
    }

    #[test]
    fn test_import_file_enforces_size_limit() {
        let root = TempDir::new().unwrap();
        let uploads = TempDir::new().unwrap();
        let workspace = SessionWorkspace::create(root.path()).unwrap();

        let source = uploads.path().join("big.bin");
        fs::write(&source, vec![0u8; 64]).unwrap();

        let result = workspace.import_file(&source, 10);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_audit_logs_listing() {
        let root = TempDir::new().unwrap();
        let workspace = SessionWorkspace::create(root.path()).unwrap();

        fs::write(workspace.layout.root.join("rename_backup_20240102_000000.txt"), b"").unwrap();
        fs::write(workspace.layout.root.join("rename_backup_20240101_000000.txt"), b"").unwrap();
        fs::write(workspace.layout.root.join("notes.txt"), b"").unwrap();

        assert_eq!(
            workspace.audit_logs().unwrap(),
            vec![
                "rename_backup_20240101_000000.txt",
                "rename_backup_20240102_000000.txt"
            ]
        );
    }

    #[test]
    fn test_cleanup_removes_session_only() {
        let root = TempDir::new().unwrap();
        let mut doomed = SessionWorkspace::create(root.path()).unwrap();
        let survivor = SessionWorkspace::create(root.path()).unwrap();

        doomed.cleanup().unwrap();

        assert!(doomed.is_cleaned);
        assert!(!doomed.layout.root.exists());
        assert!(survivor.is_valid());
        assert!(root.path().exists());

        // Second cleanup is a no-op
        doomed.cleanup().unwrap();
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("a b  c.txt").as_deref(), Some("a_b_c.txt"));
        assert_eq!(sanitize_file_name("../../etc/passwd").as_deref(), Some("etc_passwd"));
        assert_eq!(sanitize_file_name("  .hidden ").as_deref(), Some("hidden"));
        assert_eq!(sanitize_file_name("résumé.pdf").as_deref(), Some("resume.pdf"));
        assert_eq!(sanitize_file_name("Ｆｉｌｅ ñ.txt").as_deref(), Some("File_n.txt"));
        assert_eq!(sanitize_file_name("日本.txt").as_deref(), Some("txt"));
        assert_eq!(sanitize_file_name("???"), None);
    }
}
