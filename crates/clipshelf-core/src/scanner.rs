use crate::error::Error;
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::info;

/// Extensions the listing accepts, compared case-insensitively.
pub const VIDEO_EXTENSIONS: [&str; 5] = ["mp4", "avi", "mov", "mkv", "webm"];

/// One row of a directory listing. Identity is `path`; equality over all
/// fields is what change detection compares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub selected: bool,
    pub name: String,
    pub path: PathBuf,
    pub size: String,
    pub modified_at: String,
}

/// Listing of one directory's matching files, in directory order. Also the
/// row data the UI table edits, so rows carry the `selected` flag.
pub type DirectorySnapshot = Vec<FileRecord>;

pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .map(|e| VIDEO_EXTENSIONS.contains(&e.as_str()))
        .unwrap_or(false)
}

/// List the video files in one directory.
///
/// Entries come back in `read_dir` order; nothing is sorted, so the order is
/// stable only while the directory itself is unchanged. Non-files and
/// non-matching extensions are silently excluded, and every row starts
/// unselected.
pub fn scan(dir: &Path) -> Result<DirectorySnapshot, Error> {
    let mut records = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || !is_video_file(&path) {
            continue;
        }

        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };

        let metadata = entry.metadata()?;
        let modified_at = metadata.modified().map(format_modified).unwrap_or_default();

        records.push(FileRecord {
            selected: false,
            name,
            path,
            size: format_size(metadata.len()),
            modified_at,
        });
    }

    info!(
        "Listed {} video files in {}",
        records.len(),
        dir.display()
    );
    Ok(records)
}

pub fn format_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

pub fn format_modified(time: SystemTime) -> String {
    let local: DateTime<Local> = time.into();
    local.format("%Y-%m-%d %H:%M").to_string()
}
