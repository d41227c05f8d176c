// src/domain/execution/value_objects.rs
//
// Execution Value Objects
//
// Records of what an execution pass actually did. Outcomes are created once
// per attempted move and never change afterwards.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::domain::mapping::Category;

// ============================================================================
// BUCKET
// ============================================================================

/// Destination folder of a move.
/// Root is the working area's own file folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bucket {
    Active,
    Terminated,
    Root,
}

impl Bucket {
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Active => Bucket::Active,
            Category::Terminated => Bucket::Terminated,
            Category::Uncategorized => Bucket::Root,
        }
    }

    /// Parse a folder label as written in reports ("Active", "Terminated", "Root").
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Active" => Some(Bucket::Active),
            "Terminated" => Some(Bucket::Terminated),
            "Root" => Some(Bucket::Root),
            _ => None,
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bucket::Active => write!(f, "Active"),
            Bucket::Terminated => write!(f, "Terminated"),
            Bucket::Root => write!(f, "Root"),
        }
    }
}

// ============================================================================
// EXECUTION OUTCOME
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Success,
    Failed,
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutcomeStatus::Success => write!(f, "success"),
            OutcomeStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Result of attempting one move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    pub current: String,
    pub final_new: String,
    pub category: Category,
    /// Bucket the file was (or would have been) moved into
    pub folder: Bucket,
    pub outcome: OutcomeStatus,
    pub detail: String,
}

impl ExecutionOutcome {
    pub fn succeeded(&self) -> bool {
        self.outcome == OutcomeStatus::Success
    }
}

// ============================================================================
// EXECUTION SUMMARY
// ============================================================================

/// Counts over one execution pass.
/// Bucket counts include successful moves only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionSummary {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
    pub active: usize,
    pub terminated: usize,
    pub uncategorized: usize,
}

impl ExecutionSummary {
    pub fn tally(outcomes: &[ExecutionOutcome]) -> Self {
        let mut summary = ExecutionSummary {
            total: outcomes.len(),
            ..Default::default()
        };

        for outcome in outcomes {
            if !outcome.succeeded() {
                summary.failed += 1;
                continue;
            }

            summary.success += 1;
            match outcome.folder {
                Bucket::Active => summary.active += 1,
                Bucket::Terminated => summary.terminated += 1,
                Bucket::Root => summary.uncategorized += 1,
            }
        }

        summary
    }
}

// ============================================================================
// AUDIT LOG
// ============================================================================

/// Append-only record of the moves made by one execution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLog {
    started_at: DateTime<Local>,
    entries: Vec<String>,
}

impl AuditLog {
    pub const FILE_PREFIX: &'static str = "rename_backup_";

    pub fn new(started_at: DateTime<Local>) -> Self {
        Self {
            started_at,
            entries: Vec::new(),
        }
    }

    /// Record one successful move.
    pub fn record(&mut self, source: &str, bucket: Bucket, final_new: &str) {
        self.entries
            .push(format!("{} -> {}/{}", source, bucket, final_new));
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Default file name; the caller adds a suffix if it is already taken.
    pub fn file_name(&self) -> String {
        format!(
            "{}{}.txt",
            Self::FILE_PREFIX,
            self.started_at.format("%Y%m%d_%H%M%S")
        )
    }

    pub fn render(&self) -> String {
        let mut text = format!(
            "Rename Backup Log - {}\n",
            self.started_at.format("%Y-%m-%d %H:%M:%S")
        );
        text.push_str(&"=".repeat(80));
        text.push_str("\n\n");

        for entry in &self.entries {
            text.push_str(entry);
            text.push('\n');
        }

        text
    }
}

// ============================================================================
// EXECUTION REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub outcomes: Vec<ExecutionOutcome>,
    pub summary: ExecutionSummary,
    /// File name of the audit log written for this pass
    pub audit_log_id: String,
}
