// src/domain/resolution/mod.rs
//
// Resolution Domain
//
// Value objects describing the outcome of resolving a rename plan against
// the files of a working area. Resolution is knowledge, not mutation:
// - All types are pure value objects
// - No side effects
// - No event emission (that's the service's job)
// - Deterministic: same input → same output

pub mod value_objects;

pub use value_objects::{PlanSummary, ResolutionStatus, ResolvedItem, ResolvedPlan};
