// src/application/commands/session_commands.rs
//
// Session Command Handlers
//
// RULES:
// - Accept DTOs
// - Call services and the session workspace
// - Return DTOs
// - Never contain resolution or execution logic

use std::path::PathBuf;

use log::{info, warn};

use crate::application::{dto::*, state::AppState};
use crate::domain::normalize_rows;
use crate::error::{AppError, AppResult};
use crate::events::{FilesImported, MappingLoaded};
use crate::infrastructure::{SessionCreated, SessionReset, SessionWorkspace};

/// Start a new, empty session
pub fn create_session(state: &AppState) -> AppResult<SessionResponse> {
    let root = state.config.ensure_workspace_root()?;
    let workspace = SessionWorkspace::create(root)?;

    state
        .event_bus
        .emit(SessionCreated::new(workspace.id.clone()));

    Ok(SessionResponse {
        success: true,
        session_id: workspace.id,
        message: "Session created".to_string(),
    })
}

/// Delete a session and everything uploaded or renamed in it
pub fn reset_session(state: &AppState, session_id: &str) -> AppResult<SessionResponse> {
    let mut workspace = SessionWorkspace::open(&state.config.workspace_root, session_id)?;
    workspace.cleanup()?;

    state.event_bus.emit(SessionReset::new(workspace.id.clone()));

    Ok(SessionResponse {
        success: true,
        session_id: workspace.id,
        message: "Session reset successfully".to_string(),
    })
}

/// Normalize and store a mapping, replacing any previous one
pub fn upload_mapping(
    state: &AppState,
    session_id: &str,
    rows: &[MappingRowDto],
) -> AppResult<UploadMappingResponse> {
    let workspace = SessionWorkspace::open(&state.config.workspace_root, session_id)?;

    let width = rows.iter().map(MappingRowDto::width).max().unwrap_or(0);
    if width < 2 {
        return Err(AppError::InvalidInput(
            "Mapping must have at least 2 columns (current name, new name)".to_string(),
        ));
    }

    let raw: Vec<_> = rows.iter().map(MappingRowDto::to_raw).collect();
    let normalized = normalize_rows(&raw);

    if normalized.rows.is_empty() {
        return Err(AppError::InvalidInput(
            "No valid rename mappings found".to_string(),
        ));
    }

    if normalized.summary.dropped > 0 {
        warn!(
            "Dropped {} of {} mapping rows with a missing name",
            normalized.summary.dropped, normalized.summary.total
        );
    }

    workspace.save_mapping(&normalized.rows)?;
    info!(
        "Session {}: stored {} mapping rows",
        workspace.id, normalized.summary.kept
    );

    state.event_bus.emit(MappingLoaded::new(
        workspace.id.clone(),
        normalized.summary.kept,
        normalized.summary.dropped,
    ));

    Ok(UploadMappingResponse {
        success: true,
        count: normalized.summary.kept,
        message: normalized.summary.message(),
    })
}

/// Copy files into the session under sanitized names
///
/// Each file is imported on its own: a file that fails is reported in
/// `rejected` and the rest are still stored. Fails only when nothing at all
/// could be imported.
pub fn upload_files(
    state: &AppState,
    session_id: &str,
    paths: &[PathBuf],
) -> AppResult<UploadFilesResponse> {
    let workspace = SessionWorkspace::open(&state.config.workspace_root, session_id)?;

    if paths.is_empty() {
        return Err(AppError::InvalidInput("No files provided".to_string()));
    }

    let mut files = Vec::with_capacity(paths.len());
    let mut rejected = Vec::new();
    for path in paths {
        match workspace.import_file(path, state.config.max_upload_bytes) {
            Ok(stored) => files.push(stored),
            Err(e) => {
                warn!("Session {}: could not import {}: {}", workspace.id, path.display(), e);
                rejected.push(RejectedFileDto {
                    file: path.display().to_string(),
                    error: e.to_string(),
                });
            }
        }
    }

    if files.is_empty() {
        let reasons: Vec<String> = rejected
            .iter()
            .map(|r| format!("{}: {}", r.file, r.error))
            .collect();
        return Err(AppError::InvalidInput(format!(
            "No files could be uploaded ({})",
            reasons.join("; ")
        )));
    }

    info!("Session {}: imported {} files", workspace.id, files.len());
    state
        .event_bus
        .emit(FilesImported::new(workspace.id.clone(), files.clone()));

    let mut message = format!("{} file(s) uploaded successfully", files.len());
    if !rejected.is_empty() {
        message.push_str(&format!(", {} rejected", rejected.len()));
    }

    Ok(UploadFilesResponse {
        success: true,
        count: files.len(),
        message,
        files,
        rejected,
    })
}
