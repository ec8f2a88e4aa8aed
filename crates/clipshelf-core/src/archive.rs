use crate::error::Error;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

#[derive(Debug, Clone)]
pub struct ArchiveOutcome {
    pub path: PathBuf,
    pub message: String,
}

/// The archive label comes from the first path only. A mixed batch is
/// accepted and labeled after its first member.
fn source_label(first: &Path, incoming_dir: &Path) -> &'static str {
    if first.starts_with(incoming_dir) {
        "incoming"
    } else {
        "processed"
    }
}

fn archive_name(paths: &[PathBuf], label: &str) -> String {
    if paths.len() == 1 {
        let stem = paths[0]
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("{}_{}.zip", label, stem)
    } else {
        format!("{}_multiple.zip", label)
    }
}

/// Pack the given files into one zip under the downloads directory, members
/// stored under their base names.
///
/// An empty input short-circuits with `EmptySelection` before any write.
/// Missing files are skipped with an error log; the archive is still written
/// from whatever subset exists, so an all-missing input yields an empty
/// archive rather than a failure.
pub fn build_archive(
    paths: &[PathBuf],
    downloads_dir: &Path,
    incoming_dir: &Path,
) -> Result<ArchiveOutcome, Error> {
    if paths.is_empty() {
        info!("Download requested with no files selected");
        return Err(Error::EmptySelection);
    }

    let label = source_label(&paths[0], incoming_dir);
    let zip_name = archive_name(paths, label);
    let zip_path = downloads_dir.join(&zip_name);

    let file = File::create(&zip_path)?;
    let mut writer = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut added = 0usize;
    for path in paths {
        if !path.exists() {
            error!("Skipping missing file for archive: {}", path.display());
            continue;
        }
        let member = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        writer.start_file(member, options)?;
        let mut src = File::open(path)?;
        io::copy(&mut src, &mut writer)?;
        info!("Added {} to {}", path.display(), zip_name);
        added += 1;
    }

    writer.finish()?;
    info!(
        "Archive ready: {} ({} of {} files)",
        zip_path.display(),
        added,
        paths.len()
    );

    Ok(ArchiveOutcome {
        path: zip_path,
        message: format!("Download ready: {}", zip_name),
    })
}

/// Plain files directly inside the downloads directory, in directory order.
pub fn list_downloads(downloads_dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut files = Vec::new();
    for entry in fs::read_dir(downloads_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }

    info!("Download area holds {} files", files.len());
    Ok(files)
}

/// Remove every plain file directly inside the downloads directory. Per-file
/// failures are logged and skipped; the batch always runs to the end.
pub fn clear_downloads(downloads_dir: &Path) -> Result<(String, Vec<PathBuf>), Error> {
    let mut cleared = 0usize;
    for entry in fs::read_dir(downloads_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        match fs::remove_file(&path) {
            Ok(()) => {
                info!("Cleared download {}", path.display());
                cleared += 1;
            }
            Err(err) => error!("Failed to clear download {}: {}", path.display(), err),
        }
    }

    info!("Download area cleanup complete, {} files removed", cleared);
    let listing = list_downloads(downloads_dir)?;
    Ok(("Downloads cleared".to_string(), listing))
}
