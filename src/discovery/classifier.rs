//! Tells protected system directories apart from application roots.
//!
//! Directory walkers call [`is_system_directory_name`] before recursing into
//! anything they found under a program root or junk-search directory. A name
//! on the blacklist, or the platform SYSTEM attribute, means the directory
//! belongs to the OS and must never be treated as application data.

/// Directory names that are system-owned no matter what their attributes say.
/// The comparison is case-insensitive.
pub const DIRECTORY_BLACKLIST: &[&str] = &[
    "Microsoft",
    "Microsoft Games",
    "Temp",
    "Programs",
    "Common",
    "Common Files",
    "Clients",
    "Desktop",
    "Internet Explorer",
    "Windows NT",
    "Windows Photo Viewer",
    "Windows Mail",
    "Windows Defender",
    "Windows Media Player",
    "Uninstall Information",
    "Reference Assemblies",
    "InstallShield Installation Information",
];

/// Names that hint at infrastructure rather than an installed application.
/// Advisory only — nothing in discovery enforces these.
pub const QUESTIONABLE_DIRECTORY_NAMES: &[&str] = &[
    "install",
    "settings",
    "config",
    "configuration",
    "users",
    "data",
];

/// True when a directory with this name and attribute flag must never be
/// treated as a user-installed application root.
pub fn is_system_directory_name(name: &str, system_attribute: bool) -> bool {
    system_attribute
        || DIRECTORY_BLACKLIST
            .iter()
            .any(|entry| entry.eq_ignore_ascii_case(name))
}

/// True when the name matches one of the advisory infrastructure hints.
pub fn is_questionable_directory_name(name: &str) -> bool {
    QUESTIONABLE_DIRECTORY_NAMES
        .iter()
        .any(|entry| entry.eq_ignore_ascii_case(name))
}
