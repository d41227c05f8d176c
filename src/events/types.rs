// src/events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Bucket, PlanSummary};

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// MAPPING EVENTS
// ============================================================================

/// Emitted when an uploaded mapping has been normalized and stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingLoaded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub session_id: String,
    pub kept: usize,
    pub dropped: usize,
}

impl MappingLoaded {
    pub fn new(session_id: String, kept: usize, dropped: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            session_id,
            kept,
            dropped,
        }
    }
}

impl DomainEvent for MappingLoaded {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "MappingLoaded" }
}

/// Emitted when files are copied into a session's working area
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesImported {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub session_id: String,
    pub file_names: Vec<String>,
}

impl FilesImported {
    pub fn new(session_id: String, file_names: Vec<String>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            session_id,
            file_names,
        }
    }
}

impl DomainEvent for FilesImported {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "FilesImported" }
}

// ============================================================================
// RESOLUTION EVENTS
// ============================================================================

/// Emitted after every resolution pass (preview or execute)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResolved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub summary: PlanSummary,
}

impl PlanResolved {
    pub fn new(summary: PlanSummary) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            summary,
        }
    }
}

impl DomainEvent for PlanResolved {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "PlanResolved" }
}

// ============================================================================
// EXECUTION EVENTS
// ============================================================================

/// Emitted for each file moved into its bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameApplied {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub source: String,
    pub final_new: String,
    pub bucket: Bucket,
}

impl RenameApplied {
    pub fn new(source: String, final_new: String, bucket: Bucket) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            source,
            final_new,
            bucket,
        }
    }
}

impl DomainEvent for RenameApplied {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "RenameApplied" }
}

/// Emitted for each move that failed; the batch continues
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub source: String,
    pub final_new: String,
    pub reason: String,
}

impl RenameFailed {
    pub fn new(source: String, final_new: String, reason: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            source,
            final_new,
            reason,
        }
    }
}

impl DomainEvent for RenameFailed {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "RenameFailed" }
}

/// Emitted once an execution pass has written its audit log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchExecuted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub success: usize,
    pub failed: usize,
    pub audit_log_id: String,
    pub duration_ms: u64,
}

impl BatchExecuted {
    pub fn new(success: usize, failed: usize, audit_log_id: String, duration_ms: u64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            success,
            failed,
            audit_log_id,
            duration_ms,
        }
    }
}

impl DomainEvent for BatchExecuted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "BatchExecuted" }
}
