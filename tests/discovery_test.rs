use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use junkscout::common::errors::ResolveError;
use junkscout::discovery::{ArchHint, Discovery, DiscoveryOptions};
use junkscout::platform::{KnownLocation, PathResolver};

// ─── Fixture resolver ─────────────────────────────────────────────────────────

#[derive(Default)]
struct FakeResolver {
    paths: HashMap<KnownLocation, PathBuf>,
    system_marked: Vec<PathBuf>,
}

impl FakeResolver {
    fn with(mut self, location: KnownLocation, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(location, path.into());
        self
    }

    fn mark_system(mut self, path: impl Into<PathBuf>) -> Self {
        self.system_marked.push(path.into());
        self
    }
}

impl PathResolver for FakeResolver {
    fn known_path(&self, location: KnownLocation) -> Result<PathBuf, ResolveError> {
        self.paths
            .get(&location)
            .cloned()
            .ok_or_else(|| ResolveError::new(location, "not configured in this fixture"))
    }

    fn is_system_marked(&self, path: &Path) -> bool {
        self.system_marked.iter().any(|marked| marked == path)
    }
}

fn discovery(resolver: FakeResolver) -> Discovery<FakeResolver> {
    Discovery::new(resolver, DiscoveryOptions::default())
}

fn discovery_with_custom(resolver: FakeResolver, custom: &[PathBuf]) -> Discovery<FakeResolver> {
    Discovery::new(
        resolver,
        DiscoveryOptions {
            custom_program_roots: custom.to_vec(),
        },
    )
}

fn program_files_resolver(native: &Path, alt: &Path) -> FakeResolver {
    FakeResolver::default()
        .with(KnownLocation::ProgramFiles, native)
        .with(KnownLocation::ProgramFilesX86, alt)
}

// ─── Program roots ────────────────────────────────────────────────────────────

#[test]
fn test_stock_roots_alternate_first_with_tags() {
    let tmp = TempDir::new().unwrap();
    let native = tmp.path().join("Program Files");
    let alt = tmp.path().join("Program Files (x86)");
    fs::create_dir_all(&native).unwrap();
    fs::create_dir_all(&alt).unwrap();

    let d = discovery(program_files_resolver(&native, &alt));
    let roots = d.program_roots(false).unwrap();

    assert_eq!(roots.len(), 2);
    assert_eq!(roots[0].path, alt);
    assert_eq!(roots[0].arch, ArchHint::X86);
    assert_eq!(roots[1].path, native);
    assert_eq!(roots[1].arch, ArchHint::X64);
    assert_eq!(roots[1].name, "Program Files");
    assert!(!roots[0].is_system);
}

#[test]
fn test_equal_platform_roots_collapse_to_single_entry() {
    let tmp = TempDir::new().unwrap();
    let native = tmp.path().join("Program Files");
    fs::create_dir_all(&native).unwrap();

    let d = discovery(program_files_resolver(&native, &native));
    let roots = d.program_roots(false).unwrap();

    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].arch, ArchHint::X86);
}

#[test]
fn test_missing_alternate_root_is_omitted() {
    let tmp = TempDir::new().unwrap();
    let native = tmp.path().join("Program Files");
    let alt = tmp.path().join("Program Files (x86)");
    fs::create_dir_all(&native).unwrap();
    // alt is never created.

    let d = discovery(program_files_resolver(&native, &alt));
    let roots = d.program_roots(false).unwrap();

    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].path, native);
    assert_eq!(roots[0].arch, ArchHint::X64);
}

#[test]
fn test_custom_roots_follow_platform_roots_in_order() {
    let tmp = TempDir::new().unwrap();
    let native = tmp.path().join("Program Files");
    let alt = tmp.path().join("Program Files (x86)");
    let apps = tmp.path().join("Apps");
    let tools = tmp.path().join("Tools");
    for dir in [&native, &alt, &apps, &tools] {
        fs::create_dir_all(dir).unwrap();
    }

    let d = discovery_with_custom(
        program_files_resolver(&native, &alt),
        &[apps.clone(), tools.clone()],
    );
    let roots = d.program_roots(true).unwrap();

    assert_eq!(roots.len(), 4);
    assert_eq!(roots[0].path, alt);
    assert_eq!(roots[1].path, native);
    assert_eq!(roots[2].path, apps);
    assert_eq!(roots[2].arch, ArchHint::Unknown);
    assert_eq!(roots[3].path, tools);
    assert_eq!(roots[3].arch, ArchHint::Unknown);
}

#[test]
fn test_exclude_custom_ignores_configured_roots() {
    let tmp = TempDir::new().unwrap();
    let native = tmp.path().join("Program Files");
    let alt = tmp.path().join("Program Files (x86)");
    let apps = tmp.path().join("Apps");
    for dir in [&native, &alt, &apps] {
        fs::create_dir_all(dir).unwrap();
    }

    let d = discovery_with_custom(program_files_resolver(&native, &alt), &[apps]);
    let roots = d.program_roots(false).unwrap();

    assert_eq!(roots.len(), 2);
    assert!(roots.iter().all(|root| root.arch != ArchHint::Unknown));
}

#[test]
fn test_custom_duplicate_of_platform_root_keeps_platform_tag() {
    let tmp = TempDir::new().unwrap();
    let native = tmp.path().join("Program Files");
    let alt = tmp.path().join("Program Files (x86)");
    fs::create_dir_all(&native).unwrap();
    fs::create_dir_all(&alt).unwrap();

    // Same directory as the native root, spelled with a trailing separator.
    let duplicate = PathBuf::from(format!("{}/", native.display()));
    let d = discovery_with_custom(program_files_resolver(&native, &alt), &[duplicate]);
    let roots = d.program_roots(true).unwrap();

    assert_eq!(roots.len(), 2);
    let native_entry = roots
        .iter()
        .find(|root| root.path == native)
        .expect("native root present");
    assert_eq!(native_entry.arch, ArchHint::X64);
}

#[test]
fn test_missing_custom_root_is_dropped_silently() {
    let tmp = TempDir::new().unwrap();
    let native = tmp.path().join("Program Files");
    let alt = tmp.path().join("Program Files (x86)");
    fs::create_dir_all(&native).unwrap();
    fs::create_dir_all(&alt).unwrap();

    let ghost = tmp.path().join("Removable");
    let d = discovery_with_custom(program_files_resolver(&native, &alt), &[ghost]);
    let roots = d.program_roots(true).unwrap();

    assert_eq!(roots.len(), 2);
}

#[test]
fn test_unresolvable_platform_root_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let alt = tmp.path().join("Program Files (x86)");
    fs::create_dir_all(&alt).unwrap();

    let d = discovery(FakeResolver::default().with(KnownLocation::ProgramFilesX86, &alt));
    let err = d.program_roots(false).unwrap_err();
    assert_eq!(err.location, KnownLocation::ProgramFiles);
}

#[test]
fn test_system_attribute_is_captured_on_roots() {
    let tmp = TempDir::new().unwrap();
    let native = tmp.path().join("Program Files");
    let alt = tmp.path().join("Program Files (x86)");
    fs::create_dir_all(&native).unwrap();
    fs::create_dir_all(&alt).unwrap();

    let resolver = program_files_resolver(&native, &alt).mark_system(&native);
    let roots = discovery(resolver).program_roots(false).unwrap();

    assert!(!roots[0].is_system);
    assert!(roots[1].is_system);
}

#[test]
fn test_all_program_root_paths_skips_existence_check() {
    let tmp = TempDir::new().unwrap();
    let native = tmp.path().join("Program Files");
    fs::create_dir_all(&native).unwrap();

    let ghost = tmp.path().join("NotYetMounted");
    let d = discovery_with_custom(program_files_resolver(&native, &native), &[ghost.clone()]);
    let paths = d.all_program_root_paths();

    // Stock pair collapses to one, the custom root rides along unchecked.
    assert_eq!(paths, vec![native, ghost]);
}

// ─── Junk-search directories ──────────────────────────────────────────────────

fn junk_resolver(tmp: &Path) -> FakeResolver {
    FakeResolver::default()
        .with(KnownLocation::UserStartMenuPrograms, tmp.join("user-menu"))
        .with(KnownLocation::CommonStartMenuPrograms, tmp.join("common-menu"))
        .with(KnownLocation::UserAppData, tmp.join("roaming"))
        .with(KnownLocation::CommonAppData, tmp.join("programdata"))
        .with(KnownLocation::LocalAppData, tmp.join("local"))
}

#[test]
fn test_junk_dirs_are_the_five_bases() {
    let tmp = TempDir::new().unwrap();
    let d = discovery(junk_resolver(tmp.path()));

    let dirs = d.junk_dirs().unwrap();
    // Base locations are reported whether or not they exist on disk.
    assert_eq!(
        dirs,
        &[
            tmp.path().join("user-menu"),
            tmp.path().join("common-menu"),
            tmp.path().join("roaming"),
            tmp.path().join("programdata"),
            tmp.path().join("local"),
        ]
    );
}

#[test]
fn test_virtual_store_subdirectories_are_appended() {
    let tmp = TempDir::new().unwrap();
    let store = tmp.path().join("local").join("VirtualStore");
    fs::create_dir_all(store.join("Alpha")).unwrap();
    fs::create_dir_all(store.join("Beta")).unwrap();
    fs::write(store.join("stray.txt"), "not a directory").unwrap();

    let d = discovery(junk_resolver(tmp.path()));
    let dirs = d.junk_dirs().unwrap();

    assert_eq!(dirs.len(), 7);
    assert!(dirs.contains(&store.join("Alpha")));
    assert!(dirs.contains(&store.join("Beta")));
    assert!(!dirs.iter().any(|dir| dir.ends_with("stray.txt")));
}

#[test]
fn test_junk_dirs_deduplicate_equal_paths() {
    let tmp = TempDir::new().unwrap();
    let shared = tmp.path().join("appdata");
    let resolver = junk_resolver(tmp.path())
        .with(KnownLocation::UserAppData, &shared)
        .with(KnownLocation::CommonAppData, &shared);

    let d = discovery(resolver);
    let dirs = d.junk_dirs().unwrap();

    assert_eq!(dirs.len(), 4);
    assert_eq!(dirs.iter().filter(|dir| **dir == shared).count(), 1);
}

#[test]
fn test_junk_dirs_memoized_across_filesystem_changes() {
    let tmp = TempDir::new().unwrap();
    let store = tmp.path().join("local").join("VirtualStore");
    fs::create_dir_all(store.join("Alpha")).unwrap();

    let d = discovery(junk_resolver(tmp.path()));
    let first = d.junk_dirs().unwrap();
    let first_ptr = first.as_ptr();
    let first_snapshot: Vec<_> = first.to_vec();

    // New redirection folder appears after the first query.
    fs::create_dir_all(store.join("Beta")).unwrap();

    let second = d.junk_dirs().unwrap();
    assert_eq!(second, first_snapshot.as_slice());
    assert!(std::ptr::eq(first_ptr, second.as_ptr()));
    assert!(!second.contains(&store.join("Beta")));
}

#[test]
fn test_unresolvable_local_appdata_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let mut resolver = junk_resolver(tmp.path());
    resolver.paths.remove(&KnownLocation::LocalAppData);

    let d = discovery(resolver);
    let err = d.junk_dirs().unwrap_err();
    assert_eq!(err.location, KnownLocation::LocalAppData);
}

#[test]
fn test_unresolvable_shared_appdata_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let mut resolver = junk_resolver(tmp.path());
    resolver.paths.remove(&KnownLocation::CommonAppData);

    let d = discovery(resolver);
    assert!(d.junk_dirs().is_err());
}

// ─── System-directory guard ───────────────────────────────────────────────────

#[test]
fn test_blacklisted_directory_is_system() {
    let tmp = TempDir::new().unwrap();
    let common = tmp.path().join("Common Files");
    fs::create_dir_all(&common).unwrap();

    let d = discovery(FakeResolver::default());
    assert!(d.is_system_directory(&common));
}

#[test]
fn test_marked_directory_is_system_regardless_of_name() {
    let tmp = TempDir::new().unwrap();
    let acme = tmp.path().join("Acme");
    fs::create_dir_all(&acme).unwrap();

    let plain = discovery(FakeResolver::default());
    assert!(!plain.is_system_directory(&acme));

    let marked = discovery(FakeResolver::default().mark_system(&acme));
    assert!(marked.is_system_directory(&acme));
}
