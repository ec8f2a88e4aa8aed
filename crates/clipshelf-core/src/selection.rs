use crate::error::Error;
use crate::scanner::DirectorySnapshot;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Shown wherever a selection list would otherwise be empty.
pub const NO_SELECTION_PLACEHOLDER: &str = "No files selected";

/// Duplicate-free path set that keeps table insertion order. Order matters:
/// the preview default is the first element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    paths: Vec<PathBuf>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self { paths: Vec::new() }
    }

    pub fn insert(&mut self, path: PathBuf) {
        if !self.paths.contains(&path) {
            self.paths.push(path);
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    pub fn first(&self) -> Option<&PathBuf> {
        self.paths.first()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.paths.iter()
    }

    pub fn to_vec(&self) -> Vec<PathBuf> {
        self.paths.clone()
    }
}

impl FromIterator<PathBuf> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = PathBuf>>(iter: I) -> Self {
        let mut set = SelectionSet::new();
        for path in iter {
            set.insert(path);
        }
        set
    }
}

/// Everything one table-change event produces: the two authoritative
/// selection sets, their count/display strings, and tables whose flags have
/// been re-stamped to match the derived sets exactly.
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    pub incoming_selection: SelectionSet,
    pub processed_selection: SelectionSet,
    pub incoming_count: String,
    pub incoming_display: String,
    pub processed_count: String,
    pub processed_display: String,
    pub incoming_table: DirectorySnapshot,
    pub processed_table: DirectorySnapshot,
}

/// Result of a select-all or clear-selection over one table.
#[derive(Debug, Clone)]
pub struct SelectionUpdate {
    pub selection: SelectionSet,
    pub count: String,
    pub display: String,
    pub table: DirectorySnapshot,
}

/// Newline-joined `• <basename>` lines, or the placeholder when empty.
pub fn selection_display(selection: &SelectionSet) -> String {
    if selection.is_empty() {
        return NO_SELECTION_PLACEHOLDER.to_string();
    }
    selection
        .iter()
        .map(|path| format!("• {}", basename(path)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Derive the authoritative selection for one table from its row flags and
/// re-stamp every flag from the derived set. The returned table is a
/// fixpoint: deriving again yields the same set and the same flags.
fn derive_selection(table: &DirectorySnapshot) -> Result<(SelectionSet, DirectorySnapshot), Error> {
    let mut selection = SelectionSet::new();
    for row in table {
        if row.path.file_name().is_none() {
            return Err(Error::Selection(format!(
                "row has no usable file name: {}",
                row.path.display()
            )));
        }
        if row.selected {
            selection.insert(row.path.clone());
        }
    }

    let corrected = table
        .iter()
        .map(|row| {
            let mut row = row.clone();
            row.selected = selection.contains(&row.path);
            row
        })
        .collect();

    Ok((selection, corrected))
}

/// Recompute both selection sets from the user-edited tables.
///
/// The tables are authoritative; the prior sets are only a fallback. On any
/// derivation failure the prior selections and the original tables come back
/// untouched, with zeroed count/placeholder display, so a bad event can never
/// half-apply.
pub fn reconcile(
    incoming_table: &DirectorySnapshot,
    processed_table: &DirectorySnapshot,
    prior_incoming: &SelectionSet,
    prior_processed: &SelectionSet,
) -> ReconcileOutcome {
    match try_reconcile(incoming_table, processed_table) {
        Ok(outcome) => {
            info!(
                "Selection updated, incoming: {}, processed: {}",
                outcome.incoming_selection.len(),
                outcome.processed_selection.len()
            );
            outcome
        }
        Err(err) => {
            error!("Selection update failed, keeping prior state: {}", err);
            ReconcileOutcome {
                incoming_selection: prior_incoming.clone(),
                processed_selection: prior_processed.clone(),
                incoming_count: "0".to_string(),
                incoming_display: NO_SELECTION_PLACEHOLDER.to_string(),
                processed_count: "0".to_string(),
                processed_display: NO_SELECTION_PLACEHOLDER.to_string(),
                incoming_table: incoming_table.clone(),
                processed_table: processed_table.clone(),
            }
        }
    }
}

fn try_reconcile(
    incoming_table: &DirectorySnapshot,
    processed_table: &DirectorySnapshot,
) -> Result<ReconcileOutcome, Error> {
    let (incoming_selection, incoming_table) = derive_selection(incoming_table)?;
    let (processed_selection, processed_table) = derive_selection(processed_table)?;

    Ok(ReconcileOutcome {
        incoming_count: incoming_selection.len().to_string(),
        incoming_display: selection_display(&incoming_selection),
        processed_count: processed_selection.len().to_string(),
        processed_display: selection_display(&processed_selection),
        incoming_selection,
        processed_selection,
        incoming_table,
        processed_table,
    })
}

/// Flag every row and return the complete path set. Total over an empty
/// table.
pub fn select_all(table: &DirectorySnapshot) -> SelectionUpdate {
    if table.is_empty() {
        info!("Select-all on an empty table, nothing to select");
        return SelectionUpdate {
            selection: SelectionSet::new(),
            count: "0".to_string(),
            display: NO_SELECTION_PLACEHOLDER.to_string(),
            table: table.clone(),
        };
    }

    let selection: SelectionSet = table.iter().map(|row| row.path.clone()).collect();
    let updated = table
        .iter()
        .map(|row| {
            let mut row = row.clone();
            row.selected = true;
            row
        })
        .collect();

    info!("Selected all {} files", selection.len());
    SelectionUpdate {
        count: selection.len().to_string(),
        display: selection_display(&selection),
        selection,
        table: updated,
    }
}

/// Unflag every row and return an empty set, whatever the table size.
pub fn clear_selection(table: &DirectorySnapshot) -> SelectionUpdate {
    let updated = table
        .iter()
        .map(|row| {
            let mut row = row.clone();
            row.selected = false;
            row
        })
        .collect();

    info!("Cleared selection over {} rows", table.len());
    SelectionUpdate {
        selection: SelectionSet::new(),
        count: "0".to_string(),
        display: NO_SELECTION_PLACEHOLDER.to_string(),
        table: updated,
    }
}
