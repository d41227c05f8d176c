// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file declares all domain modules and re-exports their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod execution;
pub mod file_index;
pub mod file_name;
pub mod mapping;
pub mod resolution;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Mapping Domain
pub use mapping::{
    disambiguate, normalize_rows, validate_mapping_row, Category, MappingRow,
    NormalizationSummary, NormalizedMapping, PlannedRename, RawMappingRow,
};

// File Index
pub use file_index::FileIndex;

// Resolution Domain
pub use resolution::{PlanSummary, ResolutionStatus, ResolvedItem, ResolvedPlan};

// Execution Domain
pub use execution::{
    AuditLog, Bucket, ExecutionOutcome, ExecutionReport, ExecutionSummary, OutcomeStatus,
};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
