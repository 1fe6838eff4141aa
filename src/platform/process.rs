//! Location of the running binary.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static INSTALL_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Directory containing the running binary, memoized after the first lookup.
///
/// Returns `None` only when the OS cannot report the executable path at all,
/// which indicates a broken process environment rather than a condition
/// callers are expected to handle.
pub fn install_location() -> Option<&'static Path> {
    INSTALL_DIR.get_or_init(resolve_install_dir).as_deref()
}

fn resolve_install_dir() -> Option<PathBuf> {
    match std::env::current_exe() {
        Ok(binary) => match binary.parent() {
            Some(dir) => Some(dir.to_path_buf()),
            None => Some(binary),
        },
        Err(err) => {
            debug_assert!(false, "current_exe failed: {err}");
            tracing::warn!(%err, "cannot resolve own binary location");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_location_is_a_directory() {
        let dir = install_location().expect("test binary has a location");
        assert!(dir.is_dir());
    }

    #[test]
    fn test_install_location_is_memoized() {
        let first = install_location().unwrap();
        let second = install_location().unwrap();
        assert!(std::ptr::eq(first, second));
    }
}
