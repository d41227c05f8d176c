// src/cli.rs
//
// Command-line interface definitions (clap derive).
//
// Every subcommand maps onto one application command; the binary only
// parses arguments, calls the command and prints the response.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Rename and sort files according to a mapping
#[derive(Parser, Debug)]
#[command(name = "file-renamer")]
#[command(about = "Rename uploaded files from a mapping and sort them into Active/Terminated folders")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the session folders
    #[arg(long, env = "FILE_RENAMER_WORKSPACE", global = true)]
    pub workspace_root: Option<PathBuf>,

    /// Print responses as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Show debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create or reset sessions
    #[command(subcommand)]
    Session(SessionCommand),

    /// Load a mapping (JSON rows) into a session, replacing the previous one
    LoadMapping(LoadMappingArgs),

    /// Copy files into a session
    AddFiles(AddFilesArgs),

    /// Show what a rename pass would do, without moving anything
    Preview(PassArgs),

    /// Rename and sort the session's files
    Execute(PassArgs),

    /// Render a text report from saved preview/execute JSON output
    Report(ReportArgs),

    /// Pack the sorted files and audit logs into a zip archive
    Download(DownloadArgs),
}

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Start a new session and print its id
    New,

    /// Delete a session and everything in it
    Reset {
        /// Session id
        session: String,
    },
}

#[derive(Args, Debug)]
pub struct LoadMappingArgs {
    /// Session id
    pub session: String,

    /// JSON file: an array of rows, each `[current, new, category?]` or
    /// `{"current": .., "new": .., "category": ..}`
    pub mapping: PathBuf,
}

#[derive(Args, Debug)]
pub struct AddFilesArgs {
    /// Session id
    pub session: String,

    /// Files to copy in
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct PassArgs {
    /// Session id
    pub session: String,

    /// Also write a text report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// JSON file with a `results` array (as printed by `preview --json` or `execute --json`)
    pub results: PathBuf,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Session id
    pub session: String,

    /// Archive path; defaults to renamed_files_<timestamp>.zip in the current directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
