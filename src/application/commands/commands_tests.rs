// src/application/commands/commands_tests.rs
//
// End-to-end command tests over a temporary workspace root
//
// INVARIANTS TESTED:
// - A session goes create → mapping → files → preview → execute → report
// - Preview and execute refuse to run before their inputs exist
// - Uploads with no usable rows are rejected
// - Reset removes the session and nothing else
// - A session stays previewable after every file was sorted away
// - One bad file does not sink the rest of an upload
// - An execute in another process (another AppState) blocks this one
// - The download archive holds the buckets and audit logs

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::application::commands::*;
use crate::application::dto::*;
use crate::application::state::AppState;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::infrastructure::AreaLocks;

struct Fixture {
    _root: TempDir,
    uploads: TempDir,
    state: AppState,
}

fn fixture() -> Fixture {
    let root = TempDir::new().unwrap();
    let config = AppConfig::default().with_workspace_root(root.path().join("sessions"));
    Fixture {
        state: AppState::new(config),
        _root: root,
        uploads: TempDir::new().unwrap(),
    }
}

fn upload(fixture: &Fixture, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = fixture.uploads.path().join(name);
            fs::write(&path, name.as_bytes()).unwrap();
            path
        })
        .collect()
}

fn mapping(json: &str) -> Vec<MappingRowDto> {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_full_session_flow() {
    let fx = fixture();
    let session = create_session(&fx.state).unwrap().session_id;

    let loaded = upload_mapping(
        &fx.state,
        &session,
        &mapping(
            r#"[
                ["Report", "Summary.pdf", "a"],
                ["notes.txt", "notes.txt", "T"],
                ["ghost.txt", "x.txt", ""],
                ["", "", ""]
            ]"#,
        ),
    )
    .unwrap();
    assert_eq!(loaded.count, 3);
    assert_eq!(
        loaded.message,
        "Mapping loaded: 3 rename mappings found (Active: 1, Terminated: 1, Uncategorized: 1)"
    );

    let files = upload_files(&fx.state, &session, &upload(&fx, &["report.PDF", "notes.txt"])).unwrap();
    assert_eq!(files.count, 2);
    assert_eq!(files.message, "2 file(s) uploaded successfully");

    let previewed = preview(&fx.state, &session).unwrap();
    let statuses: Vec<&str> = previewed.results.iter().map(|r| r.status.as_str()).collect();
    assert_eq!(statuses, vec!["ready", "warning", "error"]);
    assert_eq!(previewed.results[0].matched_file.as_deref(), Some("report.PDF"));
    assert_eq!(previewed.results[0].category, "A");

    let executed = execute(&fx.state, &session).unwrap();
    assert_eq!(executed.summary.success, 1);
    assert_eq!(executed.results[0].folder, "Active");
    assert!(executed.backup_log.starts_with("rename_backup_"));

    let layout_root = fx.state.config.workspace_root.join(&session);
    assert!(layout_root.join("Active").join("Summary.pdf").is_file());
    assert!(layout_root.join(&executed.backup_log).is_file());

    let request: ReportRequestDto =
        serde_json::from_value(serde_json::to_value(&executed).unwrap()).unwrap();
    let report = String::from_utf8(download_report(&fx.state, &request)).unwrap();
    assert!(report.contains("✓ Successful: 1"));
    assert!(report.contains("Summary.pdf"));
}

#[test]
fn test_preview_requires_mapping_then_files() {
    let fx = fixture();
    let session = create_session(&fx.state).unwrap().session_id;

    let err = preview(&fx.state, &session).unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(ref m) if m == "Please upload a mapping first"));

    upload_mapping(&fx.state, &session, &mapping(r#"[["a.txt", "b.txt"]]"#)).unwrap();

    let err = execute(&fx.state, &session).unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(ref m) if m == "Please upload files first"));
}

#[test]
fn test_mapping_without_valid_rows_is_rejected() {
    let fx = fixture();
    let session = create_session(&fx.state).unwrap().session_id;

    let err = upload_mapping(&fx.state, &session, &mapping(r#"[["a.txt", ""], [null, "b"]]"#))
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(ref m) if m.contains("No valid rename mappings")));

    let err = upload_mapping(&fx.state, &session, &mapping(r#"[["only-one"]]"#)).unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(ref m) if m.contains("at least 2 columns")));
}

#[test]
fn test_unknown_session_is_not_found() {
    let fx = fixture();
    fs::create_dir_all(&fx.state.config.workspace_root).unwrap();

    let err = preview(&fx.state, "2f1c9a3e5b7d4e0f8a6b1c2d3e4f5a6b").unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[test]
fn test_upload_without_files_is_rejected() {
    let fx = fixture();
    let session = create_session(&fx.state).unwrap().session_id;

    let err = upload_files(&fx.state, &session, &[]).unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
}

#[test]
fn test_reset_removes_session() {
    let fx = fixture();
    let keep = create_session(&fx.state).unwrap().session_id;
    let gone = create_session(&fx.state).unwrap().session_id;

    let response = reset_session(&fx.state, &gone).unwrap();
    assert_eq!(response.message, "Session reset successfully");

    assert!(!fx.state.config.workspace_root.join(&gone).exists());
    assert!(fx.state.config.workspace_root.join(&keep).exists());
    assert!(matches!(preview(&fx.state, &gone), Err(AppError::NotFound)));
}

#[test]
fn test_session_stays_usable_after_every_file_is_sorted() {
    let fx = fixture();
    let session = create_session(&fx.state).unwrap().session_id;
    upload_mapping(&fx.state, &session, &mapping(r#"[["a.txt", "b.txt", "A"]]"#)).unwrap();
    upload_files(&fx.state, &session, &upload(&fx, &["a.txt"])).unwrap();

    assert_eq!(execute(&fx.state, &session).unwrap().summary.success, 1);

    let previewed = preview(&fx.state, &session).unwrap();
    assert_eq!(previewed.results[0].status, "error");
    assert_eq!(previewed.results[0].notes, "Source file not found");

    let again = execute(&fx.state, &session).unwrap();
    assert!(again.results.is_empty());
}

#[test]
fn test_upload_keeps_good_files_when_one_fails() {
    let fx = fixture();
    let session = create_session(&fx.state).unwrap().session_id;

    let mut paths = upload(&fx, &["good.txt"]);
    paths.push(fx.uploads.path().join("missing.txt"));
    paths.extend(upload(&fx, &["also good.txt"]));

    let response = upload_files(&fx.state, &session, &paths).unwrap();

    assert_eq!(response.files, vec!["good.txt", "also_good.txt"]);
    assert_eq!(response.count, 2);
    assert_eq!(response.rejected.len(), 1);
    assert!(response.rejected[0].file.ends_with("missing.txt"));
    assert_eq!(response.message, "2 file(s) uploaded successfully, 1 rejected");
    let imported = fx
        .state
        .event_bus
        .get_event_log()
        .iter()
        .filter(|e| e.event_type == "FilesImported")
        .count();
    assert_eq!(imported, 1);

    let err = upload_files(&fx.state, &session, &[fx.uploads.path().join("nope.txt")])
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(ref m) if m.starts_with("No files could be uploaded")));
}

#[test]
fn test_execute_is_blocked_by_another_state_on_the_same_session() {
    let fx = fixture();
    let session = create_session(&fx.state).unwrap().session_id;
    upload_mapping(&fx.state, &session, &mapping(r#"[["a.txt", "b.txt", "A"]]"#)).unwrap();
    upload_files(&fx.state, &session, &upload(&fx, &["a.txt"])).unwrap();

    let other = AppState::new(fx.state.config.clone());
    let session_root = fx.state.config.workspace_root.join(&session);

    let guard = fx
        .state
        .execution_service
        .locks()
        .acquire(&session_root)
        .unwrap();
    assert!(session_root.join(AreaLocks::LOCK_FILE).is_file());

    let err = execute(&other, &session).unwrap_err();
    assert!(matches!(err, AppError::AreaBusy(_)));
    assert!(session_root.join("files").join("a.txt").is_file());

    drop(guard);
    assert_eq!(execute(&other, &session).unwrap().summary.success, 1);
}

#[test]
fn test_download_packs_buckets_and_audit_log() {
    let fx = fixture();
    let session = create_session(&fx.state).unwrap().session_id;
    upload_mapping(
        &fx.state,
        &session,
        &mapping(r#"[["a.txt", "alpha.txt", "A"], ["b.txt", "beta.txt", "T"], ["c.txt", "gamma.txt", ""]]"#),
    )
    .unwrap();
    upload_files(&fx.state, &session, &upload(&fx, &["a.txt", "b.txt", "c.txt"])).unwrap();
    let executed = execute(&fx.state, &session).unwrap();

    let archive = download(&fx.state, &session).unwrap();

    assert!(archive.file_name.starts_with("renamed_files_"));
    assert!(archive.file_name.ends_with(".zip"));
    assert_eq!(
        archive.entries,
        vec![
            "Active/alpha.txt".to_string(),
            "Terminated/beta.txt".to_string(),
            executed.backup_log.clone(),
        ]
    );

    let reader = zip::ZipArchive::new(Cursor::new(archive.bytes)).unwrap();
    let mut names: Vec<&str> = reader.file_names().collect();
    names.sort();
    let mut expected = vec!["Active/alpha.txt", "Terminated/beta.txt", executed.backup_log.as_str()];
    expected.sort();
    assert_eq!(names, expected);
}
