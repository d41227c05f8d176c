// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations
// - DTOs NEVER leak domain invariants
// - DTOs are simple, serializable structs
// - Conversion FROM domain values, except for the raw inputs a user posts

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{
    Bucket, Category, ExecutionOutcome, ExecutionSummary, PlanSummary, RawMappingRow,
    ResolvedItem,
};
use crate::services::{ReportEntry, ReportStatus};

// ============================================================================
// SESSION DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub success: bool,
    pub session_id: String,
    pub message: String,
}

// ============================================================================
// MAPPING DTOs
// ============================================================================

/// One posted mapping row: either positional cells
/// (`["old.txt", "new.txt", "A"]`) or named fields.
/// Cells may be strings, numbers, booleans or null.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MappingRowDto {
    Cells(Vec<Value>),
    Fields {
        #[serde(default)]
        current: Option<Value>,
        #[serde(default)]
        new: Option<Value>,
        #[serde(default)]
        category: Option<Value>,
    },
}

impl MappingRowDto {
    /// Number of columns this row carries.
    pub fn width(&self) -> usize {
        match self {
            MappingRowDto::Cells(cells) => cells.len(),
            MappingRowDto::Fields { category, .. } => {
                if category.is_some() {
                    3
                } else {
                    2
                }
            }
        }
    }

    pub fn to_raw(&self) -> RawMappingRow {
        match self {
            MappingRowDto::Cells(cells) => {
                let fields: Vec<Option<String>> = cells.iter().map(cell_text).collect();
                RawMappingRow::from_fields(&fields)
            }
            MappingRowDto::Fields {
                current,
                new,
                category,
            } => RawMappingRow::from_fields(&[
                current.as_ref().and_then(cell_text),
                new.as_ref().and_then(cell_text),
                category.as_ref().and_then(cell_text),
            ]),
        }
    }
}

fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadMappingResponse {
    pub success: bool,
    pub count: usize,
    pub message: String,
}

// ============================================================================
// FILE DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadFilesResponse {
    pub success: bool,
    pub count: usize,
    pub files: Vec<String>,
    pub message: String,
    /// Files that could not be imported; the others were still stored
    #[serde(default)]
    pub rejected: Vec<RejectedFileDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedFileDto {
    pub file: String,
    pub error: String,
}

// ============================================================================
// PREVIEW DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewResultDto {
    pub status: String,
    pub current: String,
    pub new: String,
    pub category: String,
    pub notes: String,
    pub matched_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub success: bool,
    pub results: Vec<PreviewResultDto>,
    pub summary: PlanSummary,
}

// ============================================================================
// EXECUTE DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteResultDto {
    pub status: String,
    pub current: String,
    pub new: String,
    pub category: String,
    pub folder: String,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteResponse {
    pub success: bool,
    pub results: Vec<ExecuteResultDto>,
    pub summary: ExecutionSummary,
    pub backup_log: String,
}

// ============================================================================
// REPORT DTOs
// ============================================================================

/// A result record as posted back for a report. Every field but `status`
/// may be missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRecordDto {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub current: Option<String>,
    #[serde(default)]
    pub new: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportRequestDto {
    #[serde(default)]
    pub results: Vec<ReportRecordDto>,
}

// ============================================================================
// DOWNLOAD DTOs
// ============================================================================

/// Zip of a session's sorted files and audit logs, built in memory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadResponse {
    pub success: bool,
    pub file_name: String,
    pub entries: Vec<String>,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

// ============================================================================
// CONVERSION HELPERS
// ============================================================================

impl From<&ResolvedItem> for PreviewResultDto {
    fn from(item: &ResolvedItem) -> Self {
        Self {
            status: item.status.to_string(),
            current: item.current.clone(),
            new: item.final_new.clone(),
            category: item.category.code().to_string(),
            notes: item.notes_line(),
            matched_file: item.matched_file.clone(),
        }
    }
}

impl From<&ExecutionOutcome> for ExecuteResultDto {
    fn from(outcome: &ExecutionOutcome) -> Self {
        Self {
            status: outcome.outcome.to_string(),
            current: outcome.current.clone(),
            new: outcome.final_new.clone(),
            category: outcome.category.code().to_string(),
            folder: outcome.folder.to_string(),
            notes: outcome.detail.clone(),
        }
    }
}

impl From<&ReportRecordDto> for ReportEntry {
    fn from(record: &ReportRecordDto) -> Self {
        Self {
            status: ReportStatus::parse(&record.status),
            current: record.current.clone().unwrap_or_default(),
            new: record.new.clone().unwrap_or_default(),
            category: record
                .category
                .as_deref()
                .map(Category::from_code)
                .unwrap_or_default(),
            folder: record
                .folder
                .as_deref()
                .filter(|f| !f.trim().is_empty())
                .and_then(Bucket::from_label),
            notes: record
                .notes
                .clone()
                .unwrap_or_else(|| "No details".to_string()),
        }
    }
}
