use crate::catalog::CatalogStore;
use crate::domain::PhotoRecord;
use crate::error::Result;

/// Build the `LIKE` pattern selecting `extension` files under `prefix`.
/// Wildcards inside `prefix` are passed through untouched.
pub fn like_pattern(prefix: &str, extension: &str) -> String {
    format!("{prefix}%.{extension}")
}

/// Find photos under `prefix` with the given extension whose primary file is gone from disk.
pub fn find_missing_primaries(
    store: &impl CatalogStore,
    prefix: &str,
    extension: &str,
) -> Result<Vec<PhotoRecord>> {
    let candidates = store.photos_like(&like_pattern(prefix, extension))?;
    Ok(candidates
        .into_iter()
        .filter(|photo| !photo.path.exists())
        .collect())
}
