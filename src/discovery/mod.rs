//! Discovery of program-install roots and junk-search directories.
//!
//! The entry point is [`Discovery`]: build one at startup with the resolver
//! and options, then query it. Results are read-only snapshots; the junk set
//! is resolved once and cached for the lifetime of the instance.

pub mod classifier;
pub mod junk;
pub mod roots;

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::common::config::Config;
use crate::common::errors::ResolveError;
use crate::platform::{paths_equal, KnownLocation, PathResolver};

pub use classifier::{
    is_questionable_directory_name, is_system_directory_name, DIRECTORY_BLACKLIST,
    QUESTIONABLE_DIRECTORY_NAMES,
};
pub use roots::{ArchHint, ProgramRoot};

/// Discovery inputs, fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryOptions {
    /// Extra program-install roots supplied by the host, in priority order.
    pub custom_program_roots: Vec<PathBuf>,
}

impl DiscoveryOptions {
    /// Build options from the persisted configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            custom_program_roots: config.custom_roots(),
        }
    }
}

/// Directory-discovery engine.
///
/// Owns the injected [`PathResolver`] and the memoized junk-search set.
/// Construct one instance at startup and share it; the caches are per
/// instance, guarded by atomic check-and-set, so every caller observes the
/// same resolved values.
pub struct Discovery<R: PathResolver> {
    resolver: R,
    options: DiscoveryOptions,
    junk_dirs: OnceLock<Vec<PathBuf>>,
}

impl<R: PathResolver> Discovery<R> {
    pub fn new(resolver: R, options: DiscoveryOptions) -> Self {
        Self {
            resolver,
            options,
            junk_dirs: OnceLock::new(),
        }
    }

    /// Program-install roots that exist right now, classified by bitness.
    ///
    /// The alternate "(x86)" root comes first, the native root second when
    /// the two are path-distinct, then custom roots in configured order.
    /// Candidates that are missing or unreadable are dropped silently —
    /// expected for removable drives and restricted ACLs. Failing to resolve
    /// either platform root is an error.
    pub fn program_roots(&self, include_custom: bool) -> Result<Vec<ProgramRoot>, ResolveError> {
        let pf_native = self.resolver.known_path(KnownLocation::ProgramFiles)?;
        let pf_alt = self.resolver.known_path(KnownLocation::ProgramFilesX86)?;

        let custom = include_custom.then(|| self.options.custom_program_roots.as_slice());
        let candidates = roots::classified_candidates(pf_native, pf_alt, custom);

        Ok(candidates
            .into_iter()
            .filter_map(|(path, arch)| roots::snapshot(&self.resolver, path, arch))
            .collect())
    }

    /// Raw union of the stock platform roots and the custom roots, with no
    /// existence check. Callers that do their own filtering start from this.
    pub fn all_program_root_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = Vec::new();
        for location in [KnownLocation::ProgramFiles, KnownLocation::ProgramFilesX86] {
            match self.resolver.known_path(location) {
                Ok(path) => {
                    if !paths.iter().any(|existing| paths_equal(existing, &path)) {
                        paths.push(path);
                    }
                }
                Err(err) => tracing::debug!(%err, "stock program root unavailable"),
            }
        }
        paths.extend(self.options.custom_program_roots.iter().cloned());
        paths
    }

    /// Directories worth searching for leftover application data.
    ///
    /// Resolved once per instance; later calls return the same cached slice
    /// even if the filesystem changed in between.
    pub fn junk_dirs(&self) -> Result<&[PathBuf], ResolveError> {
        if let Some(cached) = self.junk_dirs.get() {
            return Ok(cached.as_slice());
        }
        // Concurrent first calls may both resolve, but only one result is
        // published and every caller sees it.
        let resolved = junk::resolve_junk_dirs(&self.resolver)?;
        Ok(self.junk_dirs.get_or_init(|| resolved).as_slice())
    }

    /// Guard for directory walkers: true when `path` must not be treated as
    /// an application directory.
    pub fn is_system_directory(&self, path: &Path) -> bool {
        let name = roots::leaf_name(path);
        is_system_directory_name(&name, self.resolver.is_system_marked(path))
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn options(&self) -> &DiscoveryOptions {
        &self.options
    }
}
