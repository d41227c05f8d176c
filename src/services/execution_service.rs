// src/services/execution_service.rs
//
// Execution Service
//
// Applies a rename plan to a working area: every ready row's matched file is
// moved into its category bucket under its final name.
//
// CRITICAL RULES:
// - The plan is re-resolved against the area's current listing, never reused
// - Only executable items (ready, matched, name changes) are attempted
// - A failed move is recorded and the pass continues with the next item
// - Destinations are never overwritten
// - One pass per working area at a time; a concurrent pass fails fast
// - Every successful move appears in the audit log, and nothing else does
//
// PASS-LEVEL FAILURES (nothing is moved):
// - the area is already being executed
// - bucket folders cannot be created
// - the files folder cannot be listed
//
// An audit log that cannot be written after moves happened is also returned
// as an error; the completed moves are logged before returning.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use log::{error, info, warn};

use crate::domain::file_name::{is_plain_file_name, split_extension};
use crate::domain::{
    AuditLog, Bucket, ExecutionOutcome, ExecutionReport, ExecutionSummary, MappingRow,
    OutcomeStatus, ResolvedItem,
};
use crate::error::{AppError, AppResult};
use crate::events::{BatchExecuted, EventBus, RenameApplied, RenameFailed};
use crate::infrastructure::{AreaLayout, AreaLocks, WorkingArea};
use crate::services::resolution_service::ResolutionService;

// ============================================================================
// EXECUTION SERVICE
// ============================================================================

pub struct ExecutionService {
    resolution: Arc<ResolutionService>,
    event_bus: Arc<EventBus>,
    locks: AreaLocks,
}

impl ExecutionService {
    pub fn new(resolution: Arc<ResolutionService>, event_bus: Arc<EventBus>) -> Self {
        Self {
            resolution,
            event_bus,
            locks: AreaLocks::new(),
        }
    }

    /// Share an existing lock table, so several services guard the same areas.
    pub fn with_locks(mut self, locks: AreaLocks) -> Self {
        self.locks = locks;
        self
    }

    pub fn locks(&self) -> &AreaLocks {
        &self.locks
    }

    /// Execute `rows` against the working area described by `layout`.
    pub fn execute_plan(
        &self,
        rows: &[MappingRow],
        area: &dyn WorkingArea,
        layout: &AreaLayout,
    ) -> AppResult<ExecutionReport> {
        let start_time = Instant::now();

        // Step 1: Claim the area
        let _guard = self.locks.acquire(&layout.root)?;

        // Step 2: Bucket folders
        area.ensure_directory(layout.bucket_dir(Bucket::Active))?;
        area.ensure_directory(layout.bucket_dir(Bucket::Terminated))?;

        // Step 3: Re-resolve against what is actually there now
        let available = area.list(&layout.files_dir)?;
        let plan = self.resolution.resolve_plan(rows, &available);

        // Step 4: Move every executable item
        let mut audit_log = AuditLog::new(Local::now());
        let outcomes: Vec<ExecutionOutcome> = plan
            .executable()
            .map(|item| self.apply_item(item, area, layout, &mut audit_log))
            .collect();

        let summary = ExecutionSummary::tally(&outcomes);

        // Step 5: Persist the audit log
        let audit_log_id = match self.write_audit_log(&audit_log, area, layout) {
            Ok(id) => id,
            Err(e) => {
                error!(
                    "Audit log could not be written after {} moves: {}",
                    summary.success, e
                );
                for entry in audit_log.entries() {
                    error!("  {}", entry);
                }
                return Err(e);
            }
        };

        let duration_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "Executed {} renames in {}: {} succeeded, {} failed ({} ms)",
            summary.total,
            layout.root.display(),
            summary.success,
            summary.failed,
            duration_ms
        );

        self.event_bus.emit(BatchExecuted::new(
            summary.success,
            summary.failed,
            audit_log_id.clone(),
            duration_ms,
        ));

        Ok(ExecutionReport {
            outcomes,
            summary,
            audit_log_id,
        })
    }

    // ========================================================================
    // INTERNAL
    // ========================================================================

    fn apply_item(
        &self,
        item: &ResolvedItem,
        area: &dyn WorkingArea,
        layout: &AreaLayout,
        audit_log: &mut AuditLog,
    ) -> ExecutionOutcome {
        let bucket = Bucket::for_category(item.category);

        match self.move_item(item, bucket, area, layout) {
            Ok(source) => {
                audit_log.record(&source, bucket, &item.final_new);
                self.event_bus.emit(RenameApplied::new(
                    source.clone(),
                    item.final_new.clone(),
                    bucket,
                ));

                ExecutionOutcome {
                    current: item.current.clone(),
                    final_new: item.final_new.clone(),
                    category: item.category,
                    folder: bucket,
                    outcome: OutcomeStatus::Success,
                    detail: format!(
                        "Renamed successfully → {} folder (was: {})",
                        bucket, source
                    ),
                }
            }
            Err(e) => {
                warn!(
                    "Failed to rename {} -> {}/{}: {}",
                    item.current, bucket, item.final_new, e
                );
                self.event_bus.emit(RenameFailed::new(
                    item.current.clone(),
                    item.final_new.clone(),
                    e.to_string(),
                ));

                ExecutionOutcome {
                    current: item.current.clone(),
                    final_new: item.final_new.clone(),
                    category: item.category,
                    folder: bucket,
                    outcome: OutcomeStatus::Failed,
                    detail: format!("Error: {}", e),
                }
            }
        }
    }

    /// Move one item; returns the name of the file that was moved.
    fn move_item(
        &self,
        item: &ResolvedItem,
        bucket: Bucket,
        area: &dyn WorkingArea,
        layout: &AreaLayout,
    ) -> AppResult<String> {
        let source = item
            .matched_file
            .clone()
            .ok_or_else(|| AppError::Other(format!("No file matched '{}'", item.current)))?;

        if !is_plain_file_name(&item.final_new) {
            return Err(AppError::InvalidInput(format!(
                "'{}' is not a plain file name",
                item.final_new
            )));
        }

        let src = layout.files_dir.join(&source);
        let dst = layout.bucket_dir(bucket).join(&item.final_new);
        area.move_file(&src, &dst)?;

        Ok(source)
    }

    fn write_audit_log(
        &self,
        audit_log: &AuditLog,
        area: &dyn WorkingArea,
        layout: &AreaLayout,
    ) -> AppResult<String> {
        let name = unique_name(area, layout.audit_dir(), &audit_log.file_name());
        area.write(
            &layout.audit_dir().join(&name),
            audit_log.render().as_bytes(),
        )?;
        Ok(name)
    }
}

/// `name` if free in `dir`, otherwise `stem_2.ext`, `stem_3.ext`, ...
fn unique_name(area: &dyn WorkingArea, dir: &Path, name: &str) -> String {
    if !area.exists(&dir.join(name)) {
        return name.to_string();
    }

    let (stem, extension) = split_extension(name);
    let mut n = 2u32;
    loop {
        let candidate = format!("{}_{}{}", stem, n, extension);
        if !area.exists(&dir.join(&candidate)) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MockWorkingArea;
    use std::path::PathBuf;

    #[test]
    fn test_unique_name_adds_suffix_when_taken() {
        let mut area = MockWorkingArea::new();
        area.expect_exists().returning(|path: &Path| {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            name == "rename_backup_20240101_120000.txt"
                || name == "rename_backup_20240101_120000_2.txt"
        });

        let name = unique_name(
            &area,
            &PathBuf::from("/area"),
            "rename_backup_20240101_120000.txt",
        );

        assert_eq!(name, "rename_backup_20240101_120000_3.txt");
    }

    #[test]
    fn test_unique_name_keeps_free_name() {
        let mut area = MockWorkingArea::new();
        area.expect_exists().returning(|_| false);

        assert_eq!(
            unique_name(&area, Path::new("/area"), "rename_backup_1.txt"),
            "rename_backup_1.txt"
        );
    }
}
