//! CLI smoke entry point.
//!
//! # Responsibility
//! - Open the configured notebook database and print a short summary.
//! - Keep output deterministic for quick local sanity checks.

use notebook_core::{init_logging, NoteRepository, NotebookConfig, SqliteNoteRepository};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("notebook error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let config = NotebookConfig::from_env().map_err(|err| err.to_string())?;
    if let Some(log_dir) = config.log_dir.as_ref() {
        init_logging(config.log_level, &log_dir.to_string_lossy())?;
    }

    let conn = config.open_database().map_err(|err| err.to_string())?;
    let repo = SqliteNoteRepository::new(&conn);
    let notes = repo.get_notes().map_err(|err| err.to_string())?;
    let tags = repo.get_all_tags().map_err(|err| err.to_string())?;
    log::info!(
        "event=cli_summary module=cli status=ok notes={} tags={}",
        notes.len(),
        tags.len()
    );

    println!("notebook_core version={}", notebook_core::core_version());
    match config.database_path.as_ref() {
        Some(path) => println!("database={}", path.display()),
        None => println!("database=:memory:"),
    }
    println!("notes={}", notes.len());
    println!("tags={}", tags.len());
    Ok(())
}
