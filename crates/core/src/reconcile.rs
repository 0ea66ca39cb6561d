use tracing::{debug, info};

use crate::catalog::CatalogStore;
use crate::domain::*;
use crate::error::Result;
use crate::resolver;
use crate::scanner;

/// Switch a photo to its backing file and drop the consumed backing row.
pub fn promote(
    store: &mut impl CatalogStore,
    photo: &PhotoRecord,
    backing: &BackingRecord,
) -> Result<Promotion> {
    store.promote_backing(photo.id, &backing.path)?;
    debug!(photo_id = photo.id, "switched to backing file");

    // Deletes by reference, so siblings sharing the id go too.
    let retired = store.retire_backing(backing.id)?;
    debug!(backing_id = backing.id, retired, "removed backing file");

    Ok(Promotion {
        photo_id: photo.id,
        backing_id: backing.id,
        from: photo.path.clone(),
        to: backing.path.clone(),
        retired,
    })
}

/// Reconcile every photo under one path prefix, recording outcomes in `report`.
///
/// Never commits; the caller owns the transaction behind `store`.
pub fn reconcile_prefix(
    store: &mut impl CatalogStore,
    prefix: &str,
    config: &ReconcileConfig,
    report: &mut ReconcileReport,
) -> Result<()> {
    debug!(prefix, "scanning path");
    report.prefixes.push(prefix.to_string());

    for photo in scanner::find_missing_primaries(&*store, prefix, &config.raw_extension)? {
        info!(photo_id = photo.id, path = %photo.path.display(), "found missing photo");
        if !report.examined.insert(photo.id) {
            debug!(photo_id = photo.id, "already examined under an earlier prefix");
            continue;
        }
        report.missing += 1;

        match resolver::resolve_backing(&*store, photo.backing_id, &config.backing_suffix)? {
            Some(backing) => {
                info!(path = %backing.path.display(), "found a valid existing backing file");
                let promotion = promote(store, &photo, &backing)?;
                report.promoted.push(promotion);
            }
            None => {
                info!(
                    photo_id = photo.id,
                    path = %photo.path.display(),
                    "could not find backing photo"
                );
                report.unresolved.push(photo.path);
            }
        }
    }
    Ok(())
}
