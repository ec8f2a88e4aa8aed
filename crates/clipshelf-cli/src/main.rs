mod commands;
mod logging;

use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, Parser};
use clipshelf_core::scanner::FileRecord;
use clipshelf_core::{Error, Session};
use colored::*;
use commands::{Cli, Commands};
use dotenv::dotenv;
use tracing::error;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match clipshelf_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    let command = match args.command {
        Some(command) => command,
        None => {
            let _ = Cli::command().print_long_help();
            return Ok(());
        }
    };

    if let Commands::PrintConfig = command {
        println!("Configuration: {:?}", config);
        return Ok(());
    }

    let mut session = Session::new(config)?;

    match command {
        Commands::List => run_list(&session),
        Commands::Refresh => run_refresh(&mut session)?,
        Commands::Upload { file } => {
            session.upload(Some(file.as_path()))?;
            println!("Uploaded {}", file.display().to_string().green());
            run_list(&session);
        }
        Commands::Download { paths } => run_download(&session, &paths)?,
        Commands::DownloadAll { dir } => {
            match session.download_all(dir) {
                Ok(outcome) => {
                    println!("{}", outcome.message.green());
                    print_downloads(&session)?;
                }
                Err(Error::EmptySelection) => {
                    println!("{}", format!("No videos in the {} directory", dir.label()).yellow());
                }
                Err(err) => return Err(err.into()),
            }
        }
        Commands::Delete { paths } => {
            let summary = session.delete_files(&paths)?;
            println!(
                "Deleted {} of {} files",
                summary.deleted.to_string().red(),
                summary.requested
            );
            run_list(&session);
        }
        Commands::ClearDir { dir } => {
            let summary = session.clear_directory(dir)?;
            println!(
                "Cleared {} directory, {} files removed",
                dir.label(),
                summary.deleted.to_string().red()
            );
        }
        Commands::Downloads => print_downloads(&session)?,
        Commands::ClearDownloads => {
            let (message, listing) = session.clear_downloads()?;
            println!("{}", message.green());
            println!("{} files in the download area", listing.len());
        }
        Commands::PrintConfig => unreachable!("handled before session setup"),
    }

    Ok(())
}

fn run_list(session: &Session) {
    let store = session.snapshots();
    print_snapshot("incoming", &store.incoming);
    print_snapshot("processed", &store.processed);
}

fn print_snapshot(label: &str, snapshot: &[FileRecord]) {
    println!("{} ({} files)", label.bold(), snapshot.len());
    for record in snapshot {
        println!(
            "  {}  {:>10}  {}",
            record.modified_at.dimmed(),
            record.size,
            record.name.green()
        );
    }
}

fn run_refresh(session: &mut Session) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = session.soft_refresh()?;

    if outcome.is_unchanged() {
        println!("{}", "No changes detected".dimmed());
        return Ok(());
    }
    if let Some(incoming) = &outcome.incoming {
        print_snapshot("incoming (changed)", incoming);
    }
    if let Some(processed) = &outcome.processed {
        print_snapshot("processed (changed)", processed);
    }
    Ok(())
}

fn run_download(session: &Session, paths: &[PathBuf]) -> Result<(), Box<dyn std::error::Error>> {
    match session.download(paths) {
        Ok(outcome) => {
            println!("{}", outcome.message.green());
            print_downloads(session)?;
        }
        Err(Error::EmptySelection) => {
            println!("{}", "Select files to download first".yellow());
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

fn print_downloads(session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let listing = session.list_downloads()?;
    println!("{} ({} files)", "downloads".bold(), listing.len());
    for path in listing {
        println!("  {}", path.display());
    }
    Ok(())
}
