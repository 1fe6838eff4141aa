use colored::*;
use serde::Serialize;
use std::path::PathBuf;

use crate::discovery::{is_questionable_directory_name, is_system_directory_name, ArchHint, ProgramRoot};

/// One classified name from the `check` command.
#[derive(Debug, Serialize)]
pub struct CheckEntry {
    pub name: String,
    pub system: bool,
    pub questionable: bool,
}

impl CheckEntry {
    pub fn classify(name: &str) -> Self {
        Self {
            name: name.to_string(),
            system: is_system_directory_name(name, false),
            questionable: is_questionable_directory_name(name),
        }
    }
}

#[derive(Serialize)]
struct RootsReport<'a> {
    generated: chrono::DateTime<chrono::Utc>,
    roots: &'a [ProgramRoot],
}

#[derive(Serialize)]
struct CandidatesReport<'a> {
    generated: chrono::DateTime<chrono::Utc>,
    candidates: &'a [PathBuf],
}

#[derive(Serialize)]
struct JunkReport<'a> {
    generated: chrono::DateTime<chrono::Utc>,
    directories: &'a [PathBuf],
}

#[derive(Serialize)]
struct CheckReport<'a> {
    entries: &'a [CheckEntry],
}

// ─── Program roots ────────────────────────────────────────────────────────────

/// Print classified install roots in human-readable format
pub fn print_roots(roots: &[ProgramRoot], include_custom: bool) {
    println!();
    println!("  Program-install roots");
    println!("{}", "─".repeat(60).dimmed());

    if roots.is_empty() {
        println!("  No install roots exist on this system.");
        return;
    }

    for root in roots {
        let arch = match root.arch {
            ArchHint::X64 => "64-bit ".green(),
            ArchHint::X86 => "32-bit ".cyan(),
            ArchHint::Unknown => "custom ".yellow(),
        };
        let marker = if root.is_system {
            " [system]".red().to_string()
        } else {
            String::new()
        };
        println!("  {} {}{}", arch, root.path.display(), marker);
    }

    println!();
    if !include_custom {
        println!(
            "  {} Run {} to include configured custom roots",
            "💡".to_string(),
            "junkscout roots --include-custom".cyan()
        );
        println!();
    }
}

/// Print install roots as JSON
pub fn print_roots_json(roots: &[ProgramRoot]) {
    let report = RootsReport {
        generated: chrono::Utc::now(),
        roots,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
    );
}

/// Print install roots as bare paths, one per line
pub fn print_roots_quiet(roots: &[ProgramRoot]) {
    for root in roots {
        println!("{}", root.path.display());
    }
}

/// Print the unchecked candidate union (stock + custom paths)
pub fn print_candidates(paths: &[PathBuf]) {
    println!();
    println!("  Candidate install roots (existence not checked)");
    println!("{}", "─".repeat(60).dimmed());
    for path in paths {
        println!("  {}", path.display());
    }
    println!();
}

/// Print the candidate union as JSON
pub fn print_candidates_json(paths: &[PathBuf]) {
    let report = CandidatesReport {
        generated: chrono::Utc::now(),
        candidates: paths,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
    );
}

/// Print the candidate union as bare paths
pub fn print_candidates_quiet(paths: &[PathBuf]) {
    for path in paths {
        println!("{}", path.display());
    }
}

// ─── Junk-search directories ──────────────────────────────────────────────────

/// Print the junk-search set in human-readable format
pub fn print_junk_dirs(dirs: &[PathBuf]) {
    println!();
    println!("  Leftover-search directories");
    println!("{}", "─".repeat(60).dimmed());
    for dir in dirs {
        println!("  {}", dir.display());
    }
    println!();
    println!(
        "  {} {} locations worth scanning after an uninstall",
        "🔍".to_string(),
        dirs.len().to_string().bold()
    );
    println!();
}

/// Print the junk-search set as JSON
pub fn print_junk_json(dirs: &[PathBuf]) {
    let report = JunkReport {
        generated: chrono::Utc::now(),
        directories: dirs,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
    );
}

/// Print the junk-search set as bare paths
pub fn print_junk_quiet(dirs: &[PathBuf]) {
    for dir in dirs {
        println!("{}", dir.display());
    }
}

// ─── Name classification ──────────────────────────────────────────────────────

/// Print name classifications in human-readable format
pub fn print_check(entries: &[CheckEntry]) {
    println!();
    for entry in entries {
        let verdict = if entry.system {
            "system   ".red().bold()
        } else if entry.questionable {
            "doubtful ".yellow()
        } else {
            "ordinary ".green()
        };
        println!("  {} {}", verdict, entry.name);
    }
    println!();
}

/// Print name classifications as JSON
pub fn print_check_json(entries: &[CheckEntry]) {
    let report = CheckReport { entries };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
    );
}

/// Print only the system-owned names, one per line
pub fn print_check_quiet(entries: &[CheckEntry]) {
    for entry in entries.iter().filter(|entry| entry.system) {
        println!("{}", entry.name);
    }
}
