use tracing::debug;

use crate::catalog::CatalogStore;
use crate::domain::BackingRecord;
use crate::error::Result;

/// Whether a backing file can stand in for a missing primary: its path ends
/// with `suffix` (exact case) and the file is on disk.
pub fn is_usable_backing(backing: &BackingRecord, suffix: &str) -> bool {
    backing.path.to_string_lossy().ends_with(suffix) && backing.path.exists()
}

/// Pick the first usable backing file linked through `backing_id`.
///
/// Candidates are examined in store order and the search stops at the first
/// usable one. `None` covers both "no linkage" and "nothing usable".
pub fn resolve_backing(
    store: &impl CatalogStore,
    backing_id: Option<i64>,
    suffix: &str,
) -> Result<Option<BackingRecord>> {
    let Some(backing_id) = backing_id else {
        return Ok(None);
    };

    for candidate in store.backings_for(backing_id)? {
        debug!(backing_id, path = %candidate.path.display(), "candidate backing file");
        if is_usable_backing(&candidate, suffix) {
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}
