// src/infrastructure/results_archive.rs
//
// Results archive: a zip of a session's sorted files and audit logs.
//
// LAYOUT:
// - Active/<file>      every regular file in the Active bucket
// - Terminated/<file>  every regular file in the Terminated bucket
// - <audit log>        every rename_backup_* file, at the archive root
//
// Uncategorized files stay in files/ and are not included. A bucket that
// was never created contributes nothing.

use std::fs::{self, File};
use std::io::{self, Seek, Write};
use std::path::Path;

use chrono::{DateTime, Local};
use log::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::domain::Bucket;
use crate::error::AppResult;
use crate::infrastructure::session_workspace::SessionWorkspace;

pub const ARCHIVE_PREFIX: &str = "renamed_files_";

/// `renamed_files_<YYYYmmdd_HHMMSS>.zip`
pub fn archive_file_name(at: DateTime<Local>) -> String {
    format!("{}{}.zip", ARCHIVE_PREFIX, at.format("%Y%m%d_%H%M%S"))
}

/// Write the session's results into `writer`; returns the entry names in
/// archive order.
pub fn write_results_archive<W: Write + Seek>(
    workspace: &SessionWorkspace,
    writer: W,
) -> AppResult<Vec<String>> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut entries = Vec::new();

    for bucket in [Bucket::Active, Bucket::Terminated] {
        let dir = workspace.layout.bucket_dir(bucket);
        for name in regular_files(dir)? {
            let entry = format!("{}/{}", bucket, name);
            add_file(&mut zip, &dir.join(&name), &entry, options)?;
            entries.push(entry);
        }
    }

    for log_name in workspace.audit_logs()? {
        add_file(&mut zip, &workspace.layout.root.join(&log_name), &log_name, options)?;
        entries.push(log_name);
    }

    zip.finish()?;
    debug!(
        "Archived {} entries from session {}",
        entries.len(),
        workspace.id
    );
    Ok(entries)
}

fn add_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    path: &Path,
    entry: &str,
    options: SimpleFileOptions,
) -> AppResult<()> {
    zip.start_file(entry, options)?;
    let mut file = File::open(path)?;
    io::copy(&mut file, zip)?;
    Ok(())
}

/// Sorted names of the regular files directly inside `dir`; empty when the
/// folder does not exist.
fn regular_files(dir: &Path) -> AppResult<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}
