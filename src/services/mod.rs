// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod execution_service;
pub mod report_service;
pub mod resolution_service;


pub use execution_service::ExecutionService;

pub use report_service::{render_report_at, ReportEntry, ReportService, ReportStatus};

pub use resolution_service::{resolve_rows, ResolutionService};
