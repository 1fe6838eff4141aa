//! Classified program-install roots.

use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::platform::{paths_equal, PathResolver};

/// Bitness classification of a program-install root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchHint {
    /// Hosts 64-bit installs — the native root on a 64-bit system.
    X64,
    /// Hosts 32-bit installs — the alternate "(x86)" root.
    X86,
    /// User-supplied root whose bitness cannot be inferred.
    Unknown,
}

impl fmt::Display for ArchHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchHint::X64 => write!(f, "64-bit"),
            ArchHint::X86 => write!(f, "32-bit"),
            ArchHint::Unknown => write!(f, "unknown"),
        }
    }
}

/// A program-install root that existed at query time.
///
/// Read-only snapshot — the directory is not held open, and the SYSTEM
/// attribute reflects the moment of the query.
#[derive(Debug, Clone, Serialize)]
pub struct ProgramRoot {
    /// Absolute directory path.
    pub path: PathBuf,
    /// Leaf directory name.
    pub name: String,
    /// Platform SYSTEM attribute at query time.
    pub is_system: bool,
    /// Bitness classification.
    pub arch: ArchHint,
}

/// Order and classify the candidate roots.
///
/// Alternate root first (assumed 32-bit), native root second when the two are
/// path-distinct (64-bit), then custom roots in the order given with anything
/// path-equal to an earlier candidate skipped. When native and alternate
/// collapse to one path, the single entry keeps the 32-bit tag.
pub(crate) fn classified_candidates(
    pf_native: PathBuf,
    pf_alt: PathBuf,
    custom: Option<&[PathBuf]>,
) -> Vec<(PathBuf, ArchHint)> {
    let mut candidates: Vec<(PathBuf, ArchHint)> = Vec::with_capacity(2);
    candidates.push((pf_alt, ArchHint::X86));
    if !paths_equal(&pf_native, &candidates[0].0) {
        candidates.push((pf_native, ArchHint::X64));
    }

    if let Some(custom) = custom {
        for root in custom {
            if candidates
                .iter()
                .any(|(existing, _)| paths_equal(existing, root))
            {
                continue;
            }
            candidates.push((root.clone(), ArchHint::Unknown));
        }
    }

    candidates
}

/// Snapshot a candidate directory, or `None` when it is missing, unreadable,
/// or not a directory. Those are expected conditions (removable drives,
/// restricted ACLs, stale custom roots), so they only log at debug level.
pub(crate) fn snapshot<R: PathResolver>(
    resolver: &R,
    path: PathBuf,
    arch: ArchHint,
) -> Option<ProgramRoot> {
    match fs::metadata(&path) {
        Ok(meta) if meta.is_dir() => {
            let name = leaf_name(&path);
            let is_system = resolver.is_system_marked(&path);
            Some(ProgramRoot {
                path,
                name,
                is_system,
                arch,
            })
        }
        Ok(_) => {
            tracing::debug!(path = %path.display(), "candidate root is not a directory");
            None
        }
        Err(err) => {
            tracing::debug!(path = %path.display(), %err, "skipping unreadable candidate root");
            None
        }
    }
}

/// Leaf name of a directory; drive roots keep their full spelling.
pub(crate) fn leaf_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_roots_give_both_tags() {
        let candidates = classified_candidates(
            PathBuf::from(r"C:\Program Files"),
            PathBuf::from(r"C:\Program Files (x86)"),
            None,
        );
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].1, ArchHint::X86);
        assert_eq!(candidates[1].1, ArchHint::X64);
    }

    #[test]
    fn test_equal_roots_collapse_to_x86() {
        let candidates = classified_candidates(
            PathBuf::from(r"C:\Program Files"),
            PathBuf::from(r"c:\program files\"),
            None,
        );
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].1, ArchHint::X86);
    }

    #[test]
    fn test_custom_duplicate_of_platform_root_keeps_platform_tag() {
        let custom = vec![PathBuf::from(r"C:\PROGRAM FILES")];
        let candidates = classified_candidates(
            PathBuf::from(r"C:\Program Files"),
            PathBuf::from(r"C:\Program Files (x86)"),
            Some(&custom),
        );
        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|(_, arch)| *arch != ArchHint::Unknown));
    }

    #[test]
    fn test_custom_duplicates_of_each_other_dedup() {
        let custom = vec![PathBuf::from(r"D:\Apps"), PathBuf::from(r"d:\apps\")];
        let candidates = classified_candidates(
            PathBuf::from(r"C:\Program Files"),
            PathBuf::from(r"C:\Program Files (x86)"),
            Some(&custom),
        );
        assert_eq!(candidates.len(), 3);
    }

    #[test]
    fn test_leaf_name() {
        assert_eq!(leaf_name(Path::new("/opt/Program Files")), "Program Files");
        // Roots have no file name; the spelling is kept whole.
        assert_eq!(leaf_name(Path::new("/")), "/");
    }
}
