//! Well-known system locations and the capability to resolve them.
//!
//! Discovery never hard-codes absolute paths. Everything it needs is asked of
//! a [`PathResolver`], so tests can substitute a fixture-backed resolver and
//! the production build reads the live environment through [`SystemPaths`].

pub mod icon;
pub mod process;

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::common::errors::ResolveError;

/// Identifiers for the well-known locations discovery depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownLocation {
    /// Native Program Files root (64-bit installs on a 64-bit system).
    ProgramFiles,
    /// Alternate "(x86)" Program Files root; equals the native root on
    /// systems without an architecture split.
    ProgramFilesX86,
    /// Per-user Start Menu programs folder.
    UserStartMenuPrograms,
    /// All-users Start Menu programs folder.
    CommonStartMenuPrograms,
    /// Per-user roaming application data root.
    UserAppData,
    /// All-users application data root (ProgramData).
    CommonAppData,
    /// Per-user local application data root.
    LocalAppData,
}

impl fmt::Display for KnownLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            KnownLocation::ProgramFiles => "the Program Files root",
            KnownLocation::ProgramFilesX86 => "the Program Files (x86) root",
            KnownLocation::UserStartMenuPrograms => "the user Start Menu programs folder",
            KnownLocation::CommonStartMenuPrograms => "the shared Start Menu programs folder",
            KnownLocation::UserAppData => "the user application-data root",
            KnownLocation::CommonAppData => "the shared application-data root",
            KnownLocation::LocalAppData => "the local application-data root",
        };
        write!(f, "{}", label)
    }
}

/// Capability to resolve well-known locations and query platform attributes.
///
/// Injected into [`Discovery`](crate::discovery::Discovery); the host supplies
/// [`SystemPaths`] in production and tests supply fixture resolvers.
pub trait PathResolver {
    /// Absolute path for a well-known location.
    fn known_path(&self, location: KnownLocation) -> Result<PathBuf, ResolveError>;

    /// Whether the platform marks the directory as a protected system entry.
    fn is_system_marked(&self, path: &Path) -> bool;
}

/// Resolves well-known locations from the live environment.
///
/// Reads the standard Windows environment variables, falling back to the
/// conventions reported by the `dirs` crate for the per-user roots. The
/// Start Menu programs folders are derived from the matching app-data root.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemPaths;

impl SystemPaths {
    fn env_path(name: &str) -> Option<PathBuf> {
        env::var_os(name)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }

    fn start_menu_programs(root: PathBuf) -> PathBuf {
        root.join("Microsoft")
            .join("Windows")
            .join("Start Menu")
            .join("Programs")
    }
}

impl PathResolver for SystemPaths {
    fn known_path(&self, location: KnownLocation) -> Result<PathBuf, ResolveError> {
        let resolved = match location {
            KnownLocation::ProgramFiles => Self::env_path("ProgramFiles"),
            // 32-bit hosts have no split; the one Program Files serves both.
            KnownLocation::ProgramFilesX86 => {
                Self::env_path("ProgramFiles(x86)").or_else(|| Self::env_path("ProgramFiles"))
            }
            KnownLocation::UserAppData => Self::env_path("APPDATA").or_else(dirs::data_dir),
            KnownLocation::CommonAppData => Self::env_path("ProgramData"),
            KnownLocation::LocalAppData => {
                Self::env_path("LOCALAPPDATA").or_else(dirs::data_local_dir)
            }
            KnownLocation::UserStartMenuPrograms => Self::env_path("APPDATA")
                .or_else(dirs::data_dir)
                .map(Self::start_menu_programs),
            KnownLocation::CommonStartMenuPrograms => {
                Self::env_path("ProgramData").map(Self::start_menu_programs)
            }
        };
        resolved.ok_or_else(|| {
            ResolveError::new(location, "the environment does not provide a path for it")
        })
    }

    fn is_system_marked(&self, path: &Path) -> bool {
        system_attribute(path)
    }
}

/// Compare two paths the way Windows does: case-insensitive, forward and
/// backward slashes interchangeable, trailing separators ignored.
pub fn paths_equal(a: &Path, b: &Path) -> bool {
    normalized(a) == normalized(b)
}

fn normalized(path: &Path) -> String {
    let text = path.to_string_lossy().replace('/', "\\");
    text.trim_end_matches('\\').to_lowercase()
}

/// Whether the platform marks `path` with the SYSTEM attribute.
#[cfg(windows)]
pub fn system_attribute(path: &Path) -> bool {
    use std::os::windows::ffi::OsStrExt;
    use windows::core::PCWSTR;
    use windows::Win32::Storage::FileSystem::{
        GetFileAttributesW, FILE_ATTRIBUTE_SYSTEM, INVALID_FILE_ATTRIBUTES,
    };

    let wide: Vec<u16> = path
        .as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();
    let attributes = unsafe { GetFileAttributesW(PCWSTR(wide.as_ptr())) };
    attributes != INVALID_FILE_ATTRIBUTES && (attributes & FILE_ATTRIBUTE_SYSTEM.0) != 0
}

/// No SYSTEM attribute exists outside Windows.
#[cfg(not(windows))]
pub fn system_attribute(_path: &Path) -> bool {
    false
}
