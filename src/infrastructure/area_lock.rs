// src/infrastructure/area_lock.rs
//
// Per-working-area mutual exclusion.
//
// Only one execution pass may run against a working area at a time, across
// threads and across processes. A second attempt fails immediately with
// AppError::AreaBusy; it never waits.
//
// CRITICAL RULES:
// - The claim is a lock file created with create_new in the area root
// - The in-process table is checked first so one process never races itself
// - The guard removes both claims when dropped, including on early return
// - A lock file left behind by a killed process keeps the area busy until
//   it is deleted by hand or the session is reset

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use log::{debug, warn};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Default)]
pub struct AreaLocks {
    held: Arc<Mutex<HashSet<PathBuf>>>,
}

impl AreaLocks {
    pub const LOCK_FILE: &'static str = ".execute.lock";

    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `area` for the lifetime of the returned guard.
    pub fn acquire(&self, area: &Path) -> AppResult<AreaGuard> {
        let mut held = self.held.lock().unwrap_or_else(|e| e.into_inner());

        if held.contains(area) {
            return Err(AppError::AreaBusy(area.to_path_buf()));
        }

        let lock_file = Self::lock_file(area);
        match OpenOptions::new().write(true).create_new(true).open(&lock_file) {
            Ok(mut file) => {
                // Owner pid is informational only
                let _ = writeln!(file, "pid={}", std::process::id());
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                debug!("Lock file {} is held elsewhere", lock_file.display());
                return Err(AppError::AreaBusy(area.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        }

        held.insert(area.to_path_buf());
        debug!("Locked working area {}", area.display());

        Ok(AreaGuard {
            held: Arc::clone(&self.held),
            area: area.to_path_buf(),
            lock_file,
        })
    }

    /// True while any process holds `area`.
    pub fn is_locked(&self, area: &Path) -> bool {
        self.held
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(area)
            || Self::lock_file(area).exists()
    }

    fn lock_file(area: &Path) -> PathBuf {
        area.join(Self::LOCK_FILE)
    }
}

/// Holds a working area until dropped.
#[derive(Debug)]
pub struct AreaGuard {
    held: Arc<Mutex<HashSet<PathBuf>>>,
    area: PathBuf,
    lock_file: PathBuf,
}

impl Drop for AreaGuard {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.lock_file) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!(
                    "Could not remove lock file {}: {}",
                    self.lock_file.display(),
                    e
                );
            }
        }

        self.held
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.area);
        debug!("Released working area {}", self.area.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_second_acquire_is_rejected() {
        let dir = TempDir::new().unwrap();
        let locks = AreaLocks::new();
        let area = dir.path();

        let _guard = locks.acquire(area).unwrap();
        let second = locks.acquire(area);

        assert!(matches!(second, Err(AppError::AreaBusy(p)) if p == area));
    }

    #[test]
    fn test_drop_releases_area() {
        let dir = TempDir::new().unwrap();
        let locks = AreaLocks::new();
        let area = dir.path();

        {
            let _guard = locks.acquire(area).unwrap();
            assert!(locks.is_locked(area));
            assert!(area.join(AreaLocks::LOCK_FILE).is_file());
        }

        assert!(!locks.is_locked(area));
        assert!(!area.join(AreaLocks::LOCK_FILE).exists());
        assert!(locks.acquire(area).is_ok());
    }

    #[test]
    fn test_areas_are_independent() {
        let one = TempDir::new().unwrap();
        let two = TempDir::new().unwrap();
        let locks = AreaLocks::new();

        let _one = locks.acquire(one.path()).unwrap();
        assert!(locks.acquire(two.path()).is_ok());
    }

    #[test]
    fn test_clones_share_state() {
        let dir = TempDir::new().unwrap();
        let locks = AreaLocks::new();
        let shared = locks.clone();

        let _guard = locks.acquire(dir.path()).unwrap();
        assert!(shared.acquire(dir.path()).is_err());
    }

    #[test]
    fn test_separate_tables_see_the_lock_file() {
        let dir = TempDir::new().unwrap();
        let first = AreaLocks::new();
        let second = AreaLocks::new();

        let guard = first.acquire(dir.path()).unwrap();
        assert!(second.is_locked(dir.path()));
        assert!(matches!(
            second.acquire(dir.path()),
            Err(AppError::AreaBusy(_))
        ));

        drop(guard);
        assert!(second.acquire(dir.path()).is_ok());
    }

    #[test]
    fn test_leftover_lock_file_keeps_area_busy() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(AreaLocks::LOCK_FILE), b"pid=1\n").unwrap();

        let result = AreaLocks::new().acquire(dir.path());
        assert!(matches!(result, Err(AppError::AreaBusy(_))));
    }

    #[test]
    fn test_missing_area_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let result = AreaLocks::new().acquire(&dir.path().join("gone"));
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
