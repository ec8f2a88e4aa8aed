use crate::config::SourceDir;
use crate::error::Error;
use crate::selection::SelectionSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One entry of the preview dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewOption {
    pub label: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct PreviewOptions {
    pub options: Vec<PreviewOption>,
    /// First incoming candidate, else first processed, else none.
    pub default: Option<PathBuf>,
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn labeled(source: SourceDir, path: &Path) -> PreviewOption {
    PreviewOption {
        label: format!("{} {}", source.tag(), basename(path)),
        path: path.to_path_buf(),
    }
}

/// Combined candidate list for the preview dropdown: incoming entries first,
/// then processed, each set in its own iteration order.
pub fn preview_options(incoming: &SelectionSet, processed: &SelectionSet) -> PreviewOptions {
    let mut options = Vec::with_capacity(incoming.len() + processed.len());

    for path in incoming.iter() {
        options.push(labeled(SourceDir::Incoming, path));
    }
    for path in processed.iter() {
        options.push(labeled(SourceDir::Processed, path));
    }

    let default = options.first().map(|option| option.path.clone());
    info!("Preview selector rebuilt with {} candidates", options.len());

    PreviewOptions { options, default }
}

/// Precedence: explicit pick, then first incoming, then first processed.
pub fn resolve_preview(
    explicit: Option<&Path>,
    incoming: &SelectionSet,
    processed: &SelectionSet,
) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| incoming.first().cloned())
        .or_else(|| processed.first().cloned())
}

/// Existence check immediately before the path is handed to the playback
/// widget. A vanished file is reported, never played.
pub fn load_preview(path: &Path) -> Result<PathBuf, Error> {
    if path.exists() {
        info!("Previewing {}", path.display());
        Ok(path.to_path_buf())
    } else {
        warn!("Preview target no longer exists: {}", path.display());
        Err(Error::NotFound(path.to_path_buf()))
    }
}
