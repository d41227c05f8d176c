// src/lib.rs
// file-renamer - mapping-driven batch file renamer
//
// Architecture:
// - Domain-centric: mapping rows, file index, plan resolution and execution
//   records are plain values with no I/O
// - Event-driven: services report what happened through the event bus
// - Explicit: the working area is always passed in, never global
// - Application Layer: CLI boundary (commands + DTOs)

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod infrastructure;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod cli;

// ============================================================================
// PUBLIC API - Domain Values
// ============================================================================

pub use domain::{
    disambiguate,
    normalize_rows,
    validate_mapping_row,
    // Execution
    AuditLog,
    Bucket,
    // Mapping
    Category,
    ExecutionOutcome,
    ExecutionReport,
    ExecutionSummary,
    // Resolution
    FileIndex,
    MappingRow,
    NormalizationSummary,
    NormalizedMapping,
    OutcomeStatus,
    PlanSummary,
    PlannedRename,
    RawMappingRow,
    ResolutionStatus,
    ResolvedItem,
    ResolvedPlan,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    BatchExecuted,
    DomainEvent,
    EventBus,
    EventLogEntry,
    FilesImported,
    MappingLoaded,
    PlanResolved,
    RenameApplied,
    RenameFailed,
};

// ============================================================================
// PUBLIC API - Infrastructure
// ============================================================================

pub use infrastructure::{
    archive_file_name, write_results_archive, AreaGuard, AreaLayout, AreaLocks, LocalFileSystem,
    SessionCreated, SessionReset, SessionWorkspace, WorkingArea,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    ExecutionService,
    ReportEntry,
    ReportService,
    ReportStatus,
    ResolutionService,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::AppState;
pub use config::AppConfig;

pub use application::commands;
pub use application::dto;
