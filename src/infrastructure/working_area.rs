// src/infrastructure/working_area.rs
//
// Filesystem collaborator used by the executor.
//
// RULES:
// - The core never touches std::fs directly; it goes through WorkingArea
// - A move never overwrites an existing destination
// - Every failure is returned, never swallowed

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::domain::Bucket;
use crate::error::{AppError, AppResult};

/// Minimal filesystem surface a rename pass needs.
#[cfg_attr(test, mockall::automock)]
pub trait WorkingArea: Send + Sync {
    /// Names of the regular files directly inside `dir`.
    fn list(&self, dir: &Path) -> AppResult<Vec<String>>;

    /// Move `src` to `dst`. Fails if `dst` already exists.
    fn move_file(&self, src: &Path, dst: &Path) -> AppResult<()>;

    /// Create `dir` and its parents if missing.
    fn ensure_directory(&self, dir: &Path) -> AppResult<()>;

    /// Create or replace the file at `path` with `bytes`.
    fn write(&self, path: &Path, bytes: &[u8]) -> AppResult<()>;

    fn exists(&self, path: &Path) -> bool;
}

// ============================================================================
// AREA LAYOUT
// ============================================================================

/// Folders of one working area.
///
/// ```text
/// <root>/
/// ├── files/        uploaded files, also the Root bucket
/// ├── Active/
/// ├── Terminated/
/// └── rename_backup_*.txt
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaLayout {
    pub root: PathBuf,
    pub files_dir: PathBuf,
    pub active_dir: PathBuf,
    pub terminated_dir: PathBuf,
}

impl AreaLayout {
    pub const FILES_DIR: &'static str = "files";
    pub const ACTIVE_DIR: &'static str = "Active";
    pub const TERMINATED_DIR: &'static str = "Terminated";

    pub fn under(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            files_dir: root.join(Self::FILES_DIR),
            active_dir: root.join(Self::ACTIVE_DIR),
            terminated_dir: root.join(Self::TERMINATED_DIR),
            root,
        }
    }

    pub fn bucket_dir(&self, bucket: Bucket) -> &Path {
        match bucket {
            Bucket::Active => &self.active_dir,
            Bucket::Terminated => &self.terminated_dir,
            Bucket::Root => &self.files_dir,
        }
    }

    /// Audit logs live next to the bucket folders.
    pub fn audit_dir(&self) -> &Path {
        &self.root
    }
}

// ============================================================================
// LOCAL FILESYSTEM
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl WorkingArea for LocalFileSystem {
    fn list(&self, dir: &Path) -> AppResult<Vec<String>> {
        if !dir.is_dir() {
            return Err(AppError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Directory not found: {}", dir.display()),
            )));
        }

        let mut names = Vec::new();
        for entry in walkdir::WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            match entry.file_name().to_str() {
                Some(name) => names.push(name.to_string()),
                None => warn!("Skipping non UTF-8 file name: {:?}", entry.path()),
            }
        }

        Ok(names)
    }

    fn move_file(&self, src: &Path, dst: &Path) -> AppResult<()> {
        if dst.exists() {
            return Err(AppError::Io(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Destination already exists: {}", dst.display()),
            )));
        }

        match fs::rename(src, dst) {
            Ok(()) => Ok(()),
            Err(rename_err) => {
                // rename cannot cross filesystems; fall back to copy + delete
                if !src.is_file() {
                    return Err(AppError::Io(rename_err));
                }
                debug!(
                    "rename {} -> {} failed ({}), copying instead",
                    src.display(),
                    dst.display(),
                    rename_err
                );
                fs::copy(src, dst)?;
                fs::remove_file(src)?;
                Ok(())
            }
        }
    }

    fn ensure_directory(&self, dir: &Path) -> AppResult<()> {
        fs::create_dir_all(dir)?;
        Ok(())
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> AppResult<()> {
        fs::write(path, bytes)?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_layout_buckets() {
        let layout = AreaLayout::under("/tmp/session");

        assert_eq!(layout.bucket_dir(Bucket::Root), Path::new("/tmp/session/files"));
        assert_eq!(layout.bucket_dir(Bucket::Active), Path::new("/tmp/session/Active"));
        assert_eq!(
            layout.bucket_dir(Bucket::Terminated),
            Path::new("/tmp/session/Terminated")
        );
        assert_eq!(layout.audit_dir(), Path::new("/tmp/session"));
    }

    #[test]
    fn test_list_returns_only_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), b"a").unwrap();
        fs::write(dir.path().join("b.pdf"), b"b").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.txt"), b"c").unwrap();

        let mut names = LocalFileSystem.list(dir.path()).unwrap();
        names.sort();

        assert_eq!(names, vec!["a.txt", "b.pdf"]);
    }

    #[test]
    fn test_list_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let result = LocalFileSystem.list(&dir.path().join("missing"));
        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[test]
    fn test_move_file() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("old.txt");
        let dst = dir.path().join("new.txt");
        fs::write(&src, b"content").unwrap();

        LocalFileSystem.move_file(&src, &dst).unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read(&dst).unwrap(), b"content");
    }

    #[test]
    fn test_move_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("old.txt");
        let dst = dir.path().join("new.txt");
        fs::write(&src, b"source").unwrap();
        fs::write(&dst, b"existing").unwrap();

        let result = LocalFileSystem.move_file(&src, &dst);

        assert!(result.is_err());
        assert!(src.exists());
        assert_eq!(fs::read(&dst).unwrap(), b"existing");
    }

    #[test]
    fn test_move_missing_source_fails() {
        let dir = TempDir::new().unwrap();
        let result = LocalFileSystem.move_file(
            &dir.path().join("missing.txt"),
            &dir.path().join("new.txt"),
        );
        assert!(result.is_err());
    }
}
