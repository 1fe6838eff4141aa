//! Aggregation of directories worth searching for orphaned application data.

use std::fs;
use std::path::PathBuf;

use crate::common::errors::ResolveError;
use crate::platform::{paths_equal, KnownLocation, PathResolver};

/// Subfolder of local app-data where the platform redirects writes that
/// applications aimed at protected directories.
const VIRTUAL_STORE: &str = "VirtualStore";

/// Resolve the full junk-search set: five well-known roots plus every
/// immediate subdirectory of the local app-data VirtualStore, deduplicated in
/// first-seen order.
///
/// Callers memoize the result; this function re-resolves every time it runs.
/// A missing VirtualStore is normal. A well-known root that cannot be
/// resolved is not, and fails the whole query.
pub(crate) fn resolve_junk_dirs<R: PathResolver>(
    resolver: &R,
) -> Result<Vec<PathBuf>, ResolveError> {
    let local_data = resolver.known_path(KnownLocation::LocalAppData)?;

    let mut candidates = vec![
        resolver.known_path(KnownLocation::UserStartMenuPrograms)?,
        resolver.known_path(KnownLocation::CommonStartMenuPrograms)?,
        resolver.known_path(KnownLocation::UserAppData)?,
        resolver.known_path(KnownLocation::CommonAppData)?,
        local_data.clone(),
    ];

    let virtual_store = local_data.join(VIRTUAL_STORE);
    if virtual_store.is_dir() {
        match fs::read_dir(&virtual_store) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    let path = entry.path();
                    if path.is_dir() {
                        candidates.push(path);
                    }
                }
            }
            Err(err) => {
                tracing::debug!(
                    path = %virtual_store.display(),
                    %err,
                    "cannot enumerate the VirtualStore"
                );
            }
        }
    }

    let mut dirs: Vec<PathBuf> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !dirs.iter().any(|existing| paths_equal(existing, &candidate)) {
            dirs.push(candidate);
        }
    }
    Ok(dirs)
}
