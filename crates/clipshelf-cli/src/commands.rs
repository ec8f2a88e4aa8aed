use clap::{Parser, Subcommand};
use clipshelf_core::SourceDir;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "clipshelf")]
#[command(about = "Manage, preview and package local video directories", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the video files in both managed directories
    List,
    /// Rescan both directories and report which of them changed
    Refresh,
    /// Copy a video into the incoming directory
    Upload {
        file: PathBuf,
    },
    /// Package the given files into a zip in the download area
    Download {
        paths: Vec<PathBuf>,
    },
    /// Package every video in one directory
    DownloadAll {
        #[arg(value_parser = parse_source)]
        dir: SourceDir,
    },
    /// Delete the given files, then rescan
    Delete {
        paths: Vec<PathBuf>,
    },
    /// Delete every file in one directory
    ClearDir {
        #[arg(value_parser = parse_source)]
        dir: SourceDir,
    },
    /// List the download area
    Downloads,
    /// Empty the download area
    ClearDownloads,
    /// Print configuration values
    PrintConfig,
}

pub fn parse_source(value: &str) -> Result<SourceDir, String> {
    match value {
        "incoming" => Ok(SourceDir::Incoming),
        "processed" => Ok(SourceDir::Processed),
        other => Err(format!(
            "unknown directory '{}', expected 'incoming' or 'processed'",
            other
        )),
    }
}
