// src/main.rs
//
// file-renamer binary: parse arguments, wire the application state, run one
// command, print its response.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use serde::Serialize;

use file_renamer::application::commands::*;
use file_renamer::application::dto::*;
use file_renamer::application::{AppState, ErrorResponse};
use file_renamer::cli::{Cli, Commands, SessionCommand};
use file_renamer::config::AppConfig;
use file_renamer::AppError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_error(&cli, e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::new()
            .filter_level(LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }
}

fn report_error(cli: &Cli, e: anyhow::Error) {
    if !cli.json {
        eprintln!("Error: {:#}", e);
        return;
    }

    let app_error = match e.downcast::<AppError>() {
        Ok(app_error) => app_error,
        Err(other) => AppError::Other(format!("{:#}", other)),
    };
    let response = ErrorResponse::from_app_error(app_error);
    match serde_json::to_string_pretty(&response) {
        Ok(json) => println!("{}", json),
        Err(_) => eprintln!("Error: {}", response.message),
    }
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let mut config = AppConfig::default();
    if let Some(root) = &cli.workspace_root {
        config = config.with_workspace_root(root);
    }
    let state = AppState::new(config);

    match &cli.command {
        Commands::Session(SessionCommand::New) => {
            let response = create_session(&state)?;
            render(cli, &response, |r| format!("{}\n", r.session_id))
        }

        Commands::Session(SessionCommand::Reset { session }) => {
            let response = reset_session(&state, session)?;
            render(cli, &response, |r| format!("{}\n", r.message))
        }

        Commands::LoadMapping(args) => {
            let bytes = fs::read(&args.mapping)
                .with_context(|| format!("reading mapping {}", args.mapping.display()))?;
            let rows: Vec<MappingRowDto> = serde_json::from_slice(&bytes)
                .with_context(|| format!("parsing mapping {}", args.mapping.display()))?;

            let response = upload_mapping(&state, &args.session, &rows)?;
            render(cli, &response, |r| format!("{}\n", r.message))
        }

        Commands::AddFiles(args) => {
            let response = upload_files(&state, &args.session, &args.files)?;
            render(cli, &response, |r| {
                let mut out = format!("{}\n", r.message);
                for file in &r.files {
                    out.push_str(&format!("  {}\n", file));
                }
                for rejected in &r.rejected {
                    out.push_str(&format!("  skipped {}: {}\n", rejected.file, rejected.error));
                }
                out
            })
        }

        Commands::Preview(args) => {
            let response = preview(&state, &args.session)?;
            if let Some(path) = &args.report {
                let request = ReportRequestDto {
                    results: response.results.iter().map(preview_record).collect(),
                };
                write_report(&state, &request, path)?;
            }
            render(cli, &response, format_preview)
        }

        Commands::Execute(args) => {
            let response = execute(&state, &args.session)?;
            if let Some(path) = &args.report {
                let request = ReportRequestDto {
                    results: response.results.iter().map(execute_record).collect(),
                };
                write_report(&state, &request, path)?;
            }
            render(cli, &response, format_execute)
        }

        Commands::Report(args) => {
            let bytes = fs::read(&args.results)
                .with_context(|| format!("reading results {}", args.results.display()))?;
            let request: ReportRequestDto = serde_json::from_slice(&bytes)
                .with_context(|| format!("parsing results {}", args.results.display()))?;

            let report = download_report(&state, &request);
            match &args.output {
                Some(path) => {
                    fs::write(path, &report)
                        .with_context(|| format!("writing report {}", path.display()))?;
                    Ok(format!("Report written to {}\n", path.display()))
                }
                None => Ok(String::from_utf8_lossy(&report).into_owned()),
            }
        }

        Commands::Download(args) => {
            let response = download(&state, &args.session)?;
            let path = args
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(&response.file_name));
            fs::write(&path, &response.bytes)
                .with_context(|| format!("writing archive {}", path.display()))?;

            render(cli, &response, |r| {
                format!("Archive written to {} ({} entries)\n", path.display(), r.entries.len())
            })
        }
    }
}

fn render<T: Serialize>(
    cli: &Cli,
    response: &T,
    text: impl FnOnce(&T) -> String,
) -> anyhow::Result<String> {
    if cli.json {
        Ok(format!("{}\n", serde_json::to_string_pretty(response)?))
    } else {
        Ok(text(response))
    }
}

fn write_report(state: &AppState, request: &ReportRequestDto, path: &Path) -> anyhow::Result<()> {
    let report = download_report(state, request);
    fs::write(path, report).with_context(|| format!("writing report {}", path.display()))?;
    log::info!("Report written to {}", path.display());
    Ok(())
}

fn preview_record(r: &PreviewResultDto) -> ReportRecordDto {
    ReportRecordDto {
        status: r.status.clone(),
        current: Some(r.current.clone()),
        new: Some(r.new.clone()),
        category: Some(r.category.clone()),
        folder: None,
        notes: Some(r.notes.clone()),
    }
}

fn execute_record(r: &ExecuteResultDto) -> ReportRecordDto {
    ReportRecordDto {
        status: r.status.clone(),
        current: Some(r.current.clone()),
        new: Some(r.new.clone()),
        category: Some(r.category.clone()),
        folder: Some(r.folder.clone()),
        notes: Some(r.notes.clone()),
    }
}

fn format_preview(response: &PreviewResponse) -> String {
    let mut out = String::new();
    for r in &response.results {
        out.push_str(&format!(
            "[{:<7}] {} -> {}  ({})\n",
            r.status, r.current, r.new, r.notes
        ));
    }

    let s = &response.summary;
    out.push_str(&format!(
        "\n{} rows: {} ready, {} warnings, {} errors (Active: {}, Terminated: {}, auto-renamed: {})\n",
        s.total, s.ready, s.warning, s.error, s.active, s.terminated, s.auto_renamed
    ));
    out
}

fn format_execute(response: &ExecuteResponse) -> String {
    let mut out = String::new();
    for r in &response.results {
        out.push_str(&format!(
            "[{:<7}] {} -> {}/{}  ({})\n",
            r.status, r.current, r.folder, r.new, r.notes
        ));
    }

    let s = &response.summary;
    out.push_str(&format!(
        "\n{} renamed, {} failed (Active: {}, Terminated: {}, Root: {})\nBackup log: {}\n",
        s.success, s.failed, s.active, s.terminated, s.uncategorized, response.backup_log
    ));
    out
}
