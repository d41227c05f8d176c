// src/services/report_service.rs
//
// Report Service
//
// Renders preview or execution results as a plain-text report.
//
// LAYOUT:
// - title and generation timestamp
// - summary counts
// - mapping table of successful (or ready) renames
// - warnings with their reasons
// - errors and failures with their issues
//
// Sections with no entries are omitted. Output is UTF-8.

use chrono::{DateTime, Local};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::domain::{Bucket, Category, ExecutionOutcome, OutcomeStatus, ResolvedItem};

const RULE_WIDTH: usize = 80;
const MIN_COLUMN_WIDTH: usize = 20;
const FOLDER_COLUMN_WIDTH: usize = 15;

// ============================================================================
// REPORT ENTRY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Ready,
    Success,
    Warning,
    Error,
    Failed,
    /// Anything else; counted in the total only
    Other,
}

impl ReportStatus {
    pub fn parse(status: &str) -> Self {
        match status.trim().to_lowercase().as_str() {
            "ready" => ReportStatus::Ready,
            "success" => ReportStatus::Success,
            "warning" => ReportStatus::Warning,
            "error" => ReportStatus::Error,
            "failed" => ReportStatus::Failed,
            _ => ReportStatus::Other,
        }
    }

    fn is_successful(self) -> bool {
        matches!(self, ReportStatus::Success | ReportStatus::Ready)
    }

    fn is_error(self) -> bool {
        matches!(self, ReportStatus::Error | ReportStatus::Failed)
    }
}

/// One line of a report, from either a preview or an execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub status: ReportStatus,
    pub current: String,
    pub new: String,
    pub category: Category,
    /// Folder recorded by an execution; derived from the category when absent
    pub folder: Option<Bucket>,
    pub notes: String,
}

impl ReportEntry {
    fn folder(&self) -> Bucket {
        self.folder
            .unwrap_or_else(|| Bucket::for_category(self.category))
    }
}

impl From<&ResolvedItem> for ReportEntry {
    fn from(item: &ResolvedItem) -> Self {
        Self {
            status: ReportStatus::parse(&item.status.to_string()),
            current: item.current.clone(),
            new: item.final_new.clone(),
            category: item.category,
            folder: None,
            notes: item.notes_line(),
        }
    }
}

impl From<&ExecutionOutcome> for ReportEntry {
    fn from(outcome: &ExecutionOutcome) -> Self {
        Self {
            status: match outcome.outcome {
                OutcomeStatus::Success => ReportStatus::Success,
                OutcomeStatus::Failed => ReportStatus::Failed,
            },
            current: outcome.current.clone(),
            new: outcome.final_new.clone(),
            category: outcome.category,
            folder: Some(outcome.folder),
            notes: outcome.detail.clone(),
        }
    }
}

// ============================================================================
// REPORT SERVICE
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportService;

impl ReportService {
    pub fn new() -> Self {
        Self
    }

    /// Render `entries` stamped with the current local time.
    pub fn render_report(&self, entries: &[ReportEntry]) -> Vec<u8> {
        let text = render_report_at(entries, Local::now());
        debug!("Rendered report for {} entries ({} bytes)", entries.len(), text.len());
        text.into_bytes()
    }

    /// Suggested download name for a report generated now.
    pub fn report_file_name(&self) -> String {
        format!("rename_report_{}.txt", Local::now().format("%Y%m%d_%H%M%S"))
    }
}

/// Render `entries` with a fixed generation time.
pub fn render_report_at(entries: &[ReportEntry], generated_at: DateTime<Local>) -> String {
    let successful: Vec<&ReportEntry> = entries
        .iter()
        .filter(|e| e.status.is_successful())
        .collect();
    let warnings: Vec<&ReportEntry> = entries
        .iter()
        .filter(|e| e.status == ReportStatus::Warning)
        .collect();
    let errors: Vec<&ReportEntry> = entries.iter().filter(|e| e.status.is_error()).collect();

    let heavy = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("{}\nFILE RENAME REPORT\n{}\n\n", heavy, heavy));
    out.push_str(&format!(
        "Generated: {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));

    out.push_str("SUMMARY\n");
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str(&format!("Total Files: {}\n", entries.len()));
    out.push_str(&format!("✓ Successful: {}\n", successful.len()));
    out.push_str(&format!("⚠ Warnings: {}\n", warnings.len()));
    out.push_str(&format!("✗ Errors: {}\n\n\n", errors.len()));

    if !successful.is_empty() {
        push_section_title(&mut out, &heavy, "SUCCESSFUL RENAMES - MAPPING TABLE");

        let current_width = column_width(successful.iter().map(|e| e.current.as_str()));
        let new_width = column_width(successful.iter().map(|e| e.new.as_str()));

        out.push_str(&format!(
            "{:<w1$}  →  {:<w2$}  FOLDER\n",
            "ORIGINAL NAME",
            "NEW NAME",
            w1 = current_width,
            w2 = new_width
        ));
        out.push_str(&format!(
            "{}     {}  {}\n",
            "-".repeat(current_width),
            "-".repeat(new_width),
            "-".repeat(FOLDER_COLUMN_WIDTH)
        ));

        for entry in &successful {
            out.push_str(&format!(
                "{:<w1$}  →  {:<w2$}  {}\n",
                entry.current,
                entry.new,
                entry.folder(),
                w1 = current_width,
                w2 = new_width
            ));
        }
        out.push('\n');
    }

    if !warnings.is_empty() {
        push_section_title(&mut out, &heavy, "WARNINGS");
        for (i, entry) in warnings.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, entry.current));
            out.push_str(&format!("   Reason: {}\n\n", entry.notes));
        }
    }

    if !errors.is_empty() {
        push_section_title(&mut out, &heavy, "ERRORS (Files Not Renamed)");
        for (i, entry) in errors.iter().enumerate() {
            out.push_str(&format!("{}. {} → {}\n", i + 1, entry.current, entry.new));
            out.push_str(&format!("   Issue: {}\n\n", entry.notes));
        }
    }

    out.push_str(&format!("\n{}\nEnd of Report\n{}\n", heavy, heavy));
    out
}

fn push_section_title(out: &mut String, heavy: &str, title: &str) {
    out.push_str(&format!("{}\n{}\n{}\n\n", heavy, title, heavy));
}

/// Widest value in characters, never narrower than the minimum.
fn column_width<'a>(values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0)
        .max(MIN_COLUMN_WIDTH)
}
