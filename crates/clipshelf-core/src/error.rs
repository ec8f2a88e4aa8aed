use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("no files selected")]
    EmptySelection,

    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("selection error: {0}")]
    Selection(String),
}
