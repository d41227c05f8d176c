// src/services/resolution_service.rs
//
// Resolution Service
//
// Turns a normalized mapping plus a listing of available files into a
// ResolvedPlan without touching the filesystem.
//
// CRITICAL RULES:
// - Pure over its inputs: same rows + same listing → identical plan
// - Never reads or writes files; the caller supplies the listing
// - Every row yields exactly one ResolvedItem, in mapping order
// - Emits PlanResolved once per resolution
//
// PRECEDENCE (first rule that applies wins):
// 1. no available file matches `current`            → Error
// 2. `current` equals the final name                 → Warning
// 3. final name is an available file not in mapping  → Error
// 4. otherwise                                       → Ready

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, info};

use crate::domain::{
    disambiguate, Category, FileIndex, MappingRow, PlannedRename, ResolutionStatus, ResolvedItem,
    ResolvedPlan,
};
use crate::events::{EventBus, PlanResolved};

pub const NOTE_SOURCE_NOT_FOUND: &str = "Source file not found";
pub const NOTE_SAME_NAME: &str = "Same name - no change needed";
pub const NOTE_TARGET_EXISTS: &str = "Target name already exists (not in mapping)";

// ============================================================================
// RESOLUTION SERVICE
// ============================================================================

pub struct ResolutionService {
    event_bus: Arc<EventBus>,
}

impl ResolutionService {
    pub fn new(event_bus: Arc<EventBus>) -> Self {
        Self { event_bus }
    }

    /// Resolve `rows` against the files currently available.
    pub fn resolve_plan(&self, rows: &[MappingRow], available: &[String]) -> ResolvedPlan {
        let index = FileIndex::build(available.iter().cloned());
        let plan = resolve_rows(rows, &index);

        info!(
            "Resolved {} rows: {} ready, {} warnings, {} errors",
            plan.summary.total, plan.summary.ready, plan.summary.warning, plan.summary.error
        );
        self.event_bus.emit(PlanResolved::new(plan.summary));

        plan
    }
}

// ============================================================================
// PURE RESOLUTION
// ============================================================================

/// Resolve `rows` against an already built index.
pub fn resolve_rows(rows: &[MappingRow], index: &FileIndex) -> ResolvedPlan {
    let planned = disambiguate(rows);

    // Names a row will vacate; landing on one of these is not a conflict.
    let mapped_sources: HashSet<&str> = rows.iter().map(|row| row.current.as_str()).collect();

    let items = planned
        .iter()
        .map(|plan| resolve_one(plan, index, &mapped_sources))
        .collect();

    ResolvedPlan::new(items)
}

fn resolve_one(
    plan: &PlannedRename,
    index: &FileIndex,
    mapped_sources: &HashSet<&str>,
) -> ResolvedItem {
    let matched_file = index.find_match(plan.current()).map(str::to_string);

    let (status, notes) = match &matched_file {
        None => (
            ResolutionStatus::Error,
            vec![NOTE_SOURCE_NOT_FOUND.to_string()],
        ),
        Some(_) if plan.current() == plan.final_new => {
            (ResolutionStatus::Warning, vec![NOTE_SAME_NAME.to_string()])
        }
        Some(_)
            if index.contains(&plan.final_new)
                && !mapped_sources.contains(plan.final_new.as_str()) =>
        {
            (
                ResolutionStatus::Error,
                vec![NOTE_TARGET_EXISTS.to_string()],
            )
        }
        Some(_) => (ResolutionStatus::Ready, ready_notes(plan)),
    };

    debug!(
        "{} -> {} [{}] matched={:?}",
        plan.current(),
        plan.final_new,
        status,
        matched_file
    );

    ResolvedItem {
        current: plan.current().to_string(),
        final_new: plan.final_new.clone(),
        original_new: plan.original_new().to_string(),
        category: plan.category(),
        status,
        matched_file,
        notes,
    }
}

fn ready_notes(plan: &PlannedRename) -> Vec<String> {
    let mut notes = Vec::new();
    let renamed = plan.was_renamed();

    if renamed {
        notes.push(format!(
            "Auto-renamed to avoid duplicate (was: {})",
            plan.original_new()
        ));
    }

    let folder = match plan.category() {
        Category::Active => Some("Active"),
        Category::Terminated => Some("Terminated"),
        Category::Uncategorized => None,
    };

    match (folder, renamed) {
        (Some(folder), true) => notes.push(format!("→ {} folder", folder)),
        (Some(folder), false) => notes.push(format!("Ready to rename → {} folder", folder)),
        (None, false) => notes.push("Ready to rename".to_string()),
        (None, true) => {}
    }

    notes
}
