use crate::archive::{self, ArchiveOutcome};
use crate::config::{AppConfig, SourceDir};
use crate::error::Error;
use crate::preview::{self, PreviewOptions};
use crate::refresh::{self, RefreshOutcome, SnapshotStore};
use crate::scanner::{self, DirectorySnapshot};
use crate::selection::{self, ReconcileOutcome, SelectionSet, SelectionUpdate};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Per-UI-session context: the last-known snapshots plus the two selection
/// sets. Handlers run one at a time, so there is no interior locking.
///
/// The stored snapshots always come straight from the scanner (all rows
/// unselected); the UI's edited tables live outside and flow back in through
/// [`Session::apply_tables`]. That keeps selection edits from registering as
/// directory changes on the next soft refresh.
pub struct Session {
    config: AppConfig,
    store: SnapshotStore,
    incoming_selection: SelectionSet,
    processed_selection: SelectionSet,
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteSummary {
    pub deleted: usize,
    pub requested: usize,
}

impl Session {
    /// Create the managed directories if absent and take the initial
    /// snapshots.
    pub fn new(config: AppConfig) -> Result<Self, Error> {
        config.ensure_directories()?;
        let store = refresh::hard_refresh(&config)?;
        Ok(Self {
            config,
            store,
            incoming_selection: SelectionSet::new(),
            processed_selection: SelectionSet::new(),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn snapshots(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn selection(&self, source: SourceDir) -> &SelectionSet {
        match source {
            SourceDir::Incoming => &self.incoming_selection,
            SourceDir::Processed => &self.processed_selection,
        }
    }

    fn set_selection(&mut self, source: SourceDir, selection: SelectionSet) {
        match source {
            SourceDir::Incoming => self.incoming_selection = selection,
            SourceDir::Processed => self.processed_selection = selection,
        }
    }

    /// Rescan both directories, reporting new listings only where something
    /// actually changed. Selections are left untouched.
    pub fn soft_refresh(&mut self) -> Result<RefreshOutcome, Error> {
        let (store, outcome) = refresh::soft_refresh(&self.config, &self.store)?;
        self.store = store;
        Ok(outcome)
    }

    /// Rescan both directories and drop both selections. Runs after any
    /// operation that shifts the underlying file identity sets.
    pub fn hard_refresh(&mut self) -> Result<&SnapshotStore, Error> {
        self.store = refresh::hard_refresh(&self.config)?;
        self.incoming_selection = SelectionSet::new();
        self.processed_selection = SelectionSet::new();
        Ok(&self.store)
    }

    /// Route one table-change event through the shared reconciliation path.
    /// Both tables are passed every time; the derived sets become the new
    /// authoritative selections.
    pub fn apply_tables(
        &mut self,
        incoming_table: &DirectorySnapshot,
        processed_table: &DirectorySnapshot,
    ) -> ReconcileOutcome {
        let outcome = selection::reconcile(
            incoming_table,
            processed_table,
            &self.incoming_selection,
            &self.processed_selection,
        );
        self.incoming_selection = outcome.incoming_selection.clone();
        self.processed_selection = outcome.processed_selection.clone();
        outcome
    }

    pub fn select_all(&mut self, source: SourceDir, table: &DirectorySnapshot) -> SelectionUpdate {
        let update = selection::select_all(table);
        self.set_selection(source, update.selection.clone());
        update
    }

    pub fn clear_selection(
        &mut self,
        source: SourceDir,
        table: &DirectorySnapshot,
    ) -> SelectionUpdate {
        let update = selection::clear_selection(table);
        self.set_selection(source, update.selection.clone());
        update
    }

    pub fn preview_options(&self) -> PreviewOptions {
        preview::preview_options(&self.incoming_selection, &self.processed_selection)
    }

    /// Resolve and existence-check the preview target. A vanished file comes
    /// back as `None`; the playback widget never sees a dead path.
    pub fn preview(&self, explicit: Option<&Path>) -> Option<PathBuf> {
        let resolved =
            preview::resolve_preview(explicit, &self.incoming_selection, &self.processed_selection)?;
        preview::load_preview(&resolved).ok()
    }

    /// Copy one file into the incoming directory under its base name,
    /// overwriting any same-named file, then hard-refresh. `None` (no file
    /// chosen) still hard-refreshes.
    pub fn upload(&mut self, file: Option<&Path>) -> Result<&SnapshotStore, Error> {
        match file {
            Some(source) => {
                let name = source
                    .file_name()
                    .ok_or_else(|| Error::NotFound(source.to_path_buf()))?;
                let dest = self.config.incoming_dir.join(name);
                fs::copy(source, &dest)?;
                info!("Uploaded {} to {}", source.display(), dest.display());
            }
            None => info!("Upload requested with no file chosen"),
        }
        self.hard_refresh()
    }

    /// Remove each path independently; a missing path or unlink failure is
    /// logged and skipped. Always ends with a hard refresh, so both
    /// selections are cleared whether or not anything was actually deleted.
    pub fn delete_files(&mut self, paths: &[PathBuf]) -> Result<DeleteSummary, Error> {
        if paths.is_empty() {
            info!("Delete requested with no files selected");
            self.hard_refresh()?;
            return Ok(DeleteSummary {
                deleted: 0,
                requested: 0,
            });
        }

        let mut deleted = 0usize;
        for path in paths {
            if !path.exists() {
                error!("Cannot delete missing file: {}", path.display());
                continue;
            }
            match fs::remove_file(path) {
                Ok(()) => {
                    info!("Deleted {}", path.display());
                    deleted += 1;
                }
                Err(err) => error!("Failed to delete {}: {}", path.display(), err),
            }
        }

        info!(
            "Bulk delete finished, {} of {} files removed",
            deleted,
            paths.len()
        );
        self.hard_refresh()?;
        Ok(DeleteSummary {
            deleted,
            requested: paths.len(),
        })
    }

    pub fn delete_selected(&mut self, source: SourceDir) -> Result<DeleteSummary, Error> {
        let paths = self.selection(source).to_vec();
        self.delete_files(&paths)
    }

    /// Empty a managed directory entirely (every plain file, video or not),
    /// then hard-refresh.
    pub fn clear_directory(&mut self, source: SourceDir) -> Result<DeleteSummary, Error> {
        let dir = self.config.dir(source);
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() {
                paths.push(path);
            }
        }

        info!(
            "Clearing {} directory, {} files queued",
            source.label(),
            paths.len()
        );
        self.delete_files(&paths)
    }

    /// Build an archive from explicit paths. The download area listing is the
    /// caller's to re-read via [`Session::list_downloads`].
    pub fn download(&self, paths: &[PathBuf]) -> Result<ArchiveOutcome, Error> {
        archive::build_archive(paths, &self.config.downloads_dir, &self.config.incoming_dir)
    }

    pub fn download_selected(&self, source: SourceDir) -> Result<ArchiveOutcome, Error> {
        let paths = self.selection(source).to_vec();
        self.download(&paths)
    }

    /// Archive every eligible video currently in the directory, regardless of
    /// selection. An empty directory surfaces as `EmptySelection`, same as an
    /// empty selection would.
    pub fn download_all(&self, source: SourceDir) -> Result<ArchiveOutcome, Error> {
        let snapshot = scanner::scan(self.config.dir(source))?;
        let paths: Vec<PathBuf> = snapshot.into_iter().map(|record| record.path).collect();
        self.download(&paths)
    }

    pub fn list_downloads(&self) -> Result<Vec<PathBuf>, Error> {
        archive::list_downloads(&self.config.downloads_dir)
    }

    pub fn clear_downloads(&self) -> Result<(String, Vec<PathBuf>), Error> {
        archive::clear_downloads(&self.config.downloads_dir)
    }
}
