// src/application/commands/plan_commands.rs
//
// Preview / Execute / Report / Download Command Handlers
//
// RULES:
// - Accept DTOs
// - Call services
// - Return DTOs
// - Never contain resolution or execution logic

use std::io::Cursor;

use chrono::Local;
use log::info;

use crate::application::{dto::*, state::AppState};
use crate::error::{AppError, AppResult};
use crate::infrastructure::{archive_file_name, write_results_archive, SessionWorkspace};
use crate::services::ReportEntry;

fn open_ready_session(state: &AppState, session_id: &str) -> AppResult<SessionWorkspace> {
    let workspace = SessionWorkspace::open(&state.config.workspace_root, session_id)?;

    if !workspace.has_mapping() {
        return Err(AppError::InvalidInput(
            "Please upload a mapping first".to_string(),
        ));
    }
    if !workspace.has_files() {
        return Err(AppError::InvalidInput(
            "Please upload files first".to_string(),
        ));
    }

    Ok(workspace)
}

/// Resolve the stored mapping against the session's files without moving anything
pub fn preview(state: &AppState, session_id: &str) -> AppResult<PreviewResponse> {
    let workspace = open_ready_session(state, session_id)?;
    let rows = workspace.load_mapping()?;

    let available = state.working_area.list(&workspace.layout.files_dir)?;
    let plan = state.resolution_service.resolve_plan(&rows, &available);

    Ok(PreviewResponse {
        success: true,
        results: plan.items.iter().map(PreviewResultDto::from).collect(),
        summary: plan.summary,
    })
}

/// Apply every ready rename and write the audit log
pub fn execute(state: &AppState, session_id: &str) -> AppResult<ExecuteResponse> {
    let workspace = open_ready_session(state, session_id)?;
    let rows = workspace.load_mapping()?;

    let report = state.execution_service.execute_plan(
        &rows,
        state.working_area.as_ref(),
        &workspace.layout,
    )?;

    Ok(ExecuteResponse {
        success: true,
        results: report.outcomes.iter().map(ExecuteResultDto::from).collect(),
        summary: report.summary,
        backup_log: report.audit_log_id,
    })
}

/// Render posted result records as a text report
pub fn download_report(state: &AppState, request: &ReportRequestDto) -> Vec<u8> {
    let entries: Vec<ReportEntry> = request.results.iter().map(ReportEntry::from).collect();
    state.report_service.render_report(&entries)
}

/// Zip the session's Active/ and Terminated/ folders and its audit logs
pub fn download(state: &AppState, session_id: &str) -> AppResult<DownloadResponse> {
    let workspace = SessionWorkspace::open(&state.config.workspace_root, session_id)?;

    let mut buffer = Cursor::new(Vec::new());
    let entries = write_results_archive(&workspace, &mut buffer)?;
    let file_name = archive_file_name(Local::now());

    info!(
        "Session {}: packed {} entries into {}",
        workspace.id,
        entries.len(),
        file_name
    );

    Ok(DownloadResponse {
        success: true,
        file_name,
        entries,
        bytes: buffer.into_inner(),
    })
}
