// src/domain/execution/mod.rs
//
// Execution Domain
//
// Value objects produced when a resolved plan is applied to a working area.

pub mod value_objects;

pub use value_objects::{
    AuditLog, Bucket, ExecutionOutcome, ExecutionReport, ExecutionSummary, OutcomeStatus,
};
