// src/infrastructure/mod.rs
//
// Infrastructure Layer
//
// Contains implementation details that support the domain
// but are not part of the domain itself.
//
// RULES:
// - Infrastructure serves the domain
// - Infrastructure never dictates domain behavior
// - Infrastructure is replaceable

pub mod area_lock;
pub mod results_archive;
pub mod session_workspace;
pub mod working_area;

pub use area_lock::{AreaGuard, AreaLocks};
pub use results_archive::{archive_file_name, write_results_archive};
pub use session_workspace::{sanitize_file_name, SessionCreated, SessionReset, SessionWorkspace};
pub use working_area::{AreaLayout, LocalFileSystem, WorkingArea};

#[cfg(test)]
pub use working_area::MockWorkingArea;
