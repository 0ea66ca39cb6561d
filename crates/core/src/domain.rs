use std::collections::HashSet;
use std::path::PathBuf;

/// Accepted values that tune what a run matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileConfig {
    /// Extension of the primary (RAW) files, without the dot. Matched case-sensitively.
    pub raw_extension: String,
    /// Suffix a backing file path must end with to be adopted. Compared verbatim.
    pub backing_suffix: String,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            raw_extension: "NEF".to_string(),
            backing_suffix: "JPG".to_string(),
        }
    }
}

/// Whether a run persists its changes or throws them away at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Persist,
    Simulate,
}

impl RunMode {
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run {
            RunMode::Simulate
        } else {
            RunMode::Persist
        }
    }

    pub fn is_simulation(self) -> bool {
        self == RunMode::Simulate
    }
}

/// A `PhotoTable` row, reduced to the columns reconciliation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRecord {
    pub id: i64,
    /// Develop linkage to a backing row, `None` when the catalog holds the "no backing" sentinel.
    pub backing_id: Option<i64>,
    pub path: PathBuf,
}

/// A backing-file row as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackingRecord {
    pub id: i64,
    pub path: PathBuf,
}

/// One photo switched from its missing RAW file to a backing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Promotion {
    pub photo_id: i64,
    pub backing_id: i64,
    pub from: PathBuf,
    pub to: PathBuf,
    /// Backing rows removed by the delete on `backing_id`.
    pub retired: usize,
}

/// Outcome of a whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    pub mode: RunMode,
    pub prefixes: Vec<String>,
    /// Distinct missing primaries found across all prefixes, resolved or not.
    pub missing: usize,
    pub promoted: Vec<Promotion>,
    /// Missing primaries left untouched for lack of a usable backing file.
    pub unresolved: Vec<PathBuf>,
    /// Photo ids already handled, so overlapping prefixes count each photo once.
    pub(crate) examined: HashSet<i64>,
}

impl ReconcileReport {
    pub fn new(mode: RunMode) -> Self {
        Self {
            mode,
            prefixes: Vec::new(),
            missing: 0,
            promoted: Vec::new(),
            unresolved: Vec::new(),
            examined: HashSet::new(),
        }
    }

    /// True when the changes listed here were written to the catalog.
    pub fn committed(&self) -> bool {
        !self.mode.is_simulation()
    }
}
