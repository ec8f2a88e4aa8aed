use crate::config::AppConfig;
use crate::error::Error;
use crate::scanner::{self, DirectorySnapshot};
use tracing::info;

/// Last-known listing pair for the two managed directories. Owned by the
/// session and replaced through explicit return values, never mutated behind
/// the caller's back.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    pub incoming: DirectorySnapshot,
    pub processed: DirectorySnapshot,
}

/// Result of a soft refresh. A directory whose listing did not change yields
/// `None`, which the UI layer reads as "keep the current table untouched".
#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    pub incoming: Option<DirectorySnapshot>,
    pub processed: Option<DirectorySnapshot>,
}

impl RefreshOutcome {
    pub fn is_unchanged(&self) -> bool {
        self.incoming.is_none() && self.processed.is_none()
    }
}

/// Element-wise, order-sensitive comparison: a reordering of otherwise
/// identical records counts as a change.
pub fn snapshot_changed(previous: &DirectorySnapshot, current: &DirectorySnapshot) -> bool {
    previous != current
}

/// Rescan both directories and report only the ones whose listing differs
/// from the store. Selection state is deliberately not touched here.
pub fn soft_refresh(
    config: &AppConfig,
    store: &SnapshotStore,
) -> Result<(SnapshotStore, RefreshOutcome), Error> {
    let current_incoming = scanner::scan(&config.incoming_dir)?;
    let current_processed = scanner::scan(&config.processed_dir)?;

    let incoming_changed = snapshot_changed(&store.incoming, &current_incoming);
    let processed_changed = snapshot_changed(&store.processed, &current_processed);

    if incoming_changed {
        info!(
            "Incoming directory changed, now listing {} files",
            current_incoming.len()
        );
    }
    if processed_changed {
        info!(
            "Processed directory changed, now listing {} files",
            current_processed.len()
        );
    }
    if !incoming_changed && !processed_changed {
        info!("No directory changes detected, keeping current state");
    }

    let outcome = RefreshOutcome {
        incoming: incoming_changed.then(|| current_incoming.clone()),
        processed: processed_changed.then(|| current_processed.clone()),
    };
    let store = SnapshotStore {
        incoming: current_incoming,
        processed: current_processed,
    };

    Ok((store, outcome))
}

/// Unconditional rescan of both directories. The caller is expected to drop
/// its selection sets alongside installing the returned store; file identity
/// has definitely shifted when this is used (upload, delete, clear).
pub fn hard_refresh(config: &AppConfig) -> Result<SnapshotStore, Error> {
    let incoming = scanner::scan(&config.incoming_dir)?;
    let processed = scanner::scan(&config.processed_dir)?;

    info!(
        "Full refresh, {} incoming / {} processed files",
        incoming.len(),
        processed.len()
    );

    Ok(SnapshotStore {
        incoming,
        processed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::FileRecord;
    use std::path::PathBuf;

    fn record(name: &str) -> FileRecord {
        FileRecord {
            selected: false,
            name: name.to_string(),
            path: PathBuf::from("/videos").join(name),
            size: "1.00 MB".to_string(),
            modified_at: "2024-01-01 00:00".to_string(),
        }
    }

    #[test]
    fn test_identical_snapshots_are_unchanged() {
        let a = vec![record("a.mp4"), record("b.mov")];
        let b = vec![record("a.mp4"), record("b.mov")];
        assert!(!snapshot_changed(&a, &b));
    }

    #[test]
    fn test_reordering_counts_as_change() {
        let a = vec![record("a.mp4"), record("b.mov")];
        let b = vec![record("b.mov"), record("a.mp4")];
        assert!(snapshot_changed(&a, &b));
    }

    #[test]
    fn test_field_difference_counts_as_change() {
        let a = vec![record("a.mp4")];
        let mut changed = vec![record("a.mp4")];
        changed[0].size = "2.00 MB".to_string();
        assert!(snapshot_changed(&a, &changed));
    }

    #[test]
    fn test_added_and_removed_rows_count_as_change() {
        let a = vec![record("a.mp4")];
        let b = vec![record("a.mp4"), record("b.mov")];
        assert!(snapshot_changed(&a, &b));
        assert!(snapshot_changed(&b, &a));
        assert!(!snapshot_changed(&Vec::new(), &Vec::new()));
    }
}
