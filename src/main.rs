use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::Path;

use junkscout::cli::args::{Cli, Commands, ConfigAction};
use junkscout::cli::output::{self, CheckEntry};
use junkscout::common::config::{Config, OutputFormat};
use junkscout::discovery::{Discovery, DiscoveryOptions};
use junkscout::platform::{icon, process, SystemPaths};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("junkscout=debug")
            .init();
    }

    let config = Config::load()?;
    let format = if cli.quiet {
        OutputFormat::Quiet
    } else {
        cli.format
            .clone()
            .map(Into::into)
            .unwrap_or_else(|| config.output_format.clone())
    };

    match cli.command {
        Commands::Roots {
            include_custom,
            all,
        } => cmd_roots(&config, include_custom, all, &format),

        Commands::Junk => cmd_junk(&config, &format),

        Commands::Check { ref names } => cmd_check(names, &format),

        Commands::Icon { ref path } => cmd_icon(path),

        Commands::SelfLocate => cmd_self_locate(),

        Commands::Config { ref action } => cmd_config(action),

        Commands::Completions { shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            let shell = match shell {
                junkscout::cli::args::CompletionShell::Bash => clap_complete::Shell::Bash,
                junkscout::cli::args::CompletionShell::Zsh => clap_complete::Shell::Zsh,
                junkscout::cli::args::CompletionShell::Fish => clap_complete::Shell::Fish,
            };
            clap_complete::generate(shell, &mut cmd, "junkscout", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn build_discovery(config: &Config) -> Discovery<SystemPaths> {
    Discovery::new(SystemPaths, DiscoveryOptions::from_config(config))
}

// ─── Roots ────────────────────────────────────────────────────────────────────

fn cmd_roots(config: &Config, include_custom: bool, all: bool, format: &OutputFormat) -> Result<()> {
    let discovery = build_discovery(config);

    if all {
        let candidates = discovery.all_program_root_paths();
        match format {
            OutputFormat::Human => output::print_candidates(&candidates),
            OutputFormat::Json => output::print_candidates_json(&candidates),
            OutputFormat::Quiet => output::print_candidates_quiet(&candidates),
        }
        return Ok(());
    }

    let roots = discovery
        .program_roots(include_custom)
        .context("resolving program-install roots")?;
    match format {
        OutputFormat::Human => output::print_roots(&roots, include_custom),
        OutputFormat::Json => output::print_roots_json(&roots),
        OutputFormat::Quiet => output::print_roots_quiet(&roots),
    }
    Ok(())
}

// ─── Junk-search directories ──────────────────────────────────────────────────

fn cmd_junk(config: &Config, format: &OutputFormat) -> Result<()> {
    let discovery = build_discovery(config);
    let dirs = discovery
        .junk_dirs()
        .context("resolving junk-search directories")?;
    match format {
        OutputFormat::Human => output::print_junk_dirs(dirs),
        OutputFormat::Json => output::print_junk_json(dirs),
        OutputFormat::Quiet => output::print_junk_quiet(dirs),
    }
    Ok(())
}

// ─── Name classification ──────────────────────────────────────────────────────

fn cmd_check(names: &[String], format: &OutputFormat) -> Result<()> {
    let entries: Vec<CheckEntry> = names
        .iter()
        .map(|name| CheckEntry::classify(name))
        .collect();
    match format {
        OutputFormat::Human => output::print_check(&entries),
        OutputFormat::Json => output::print_check_json(&entries),
        OutputFormat::Quiet => output::print_check_quiet(&entries),
    }
    Ok(())
}

// ─── Auxiliary lookups ────────────────────────────────────────────────────────

fn cmd_icon(path: &str) -> Result<()> {
    match icon::extract_associated_icon(Path::new(path)) {
        Some(icon) => println!(
            "{}x{} icon ({} bytes RGBA)",
            icon.width,
            icon.height,
            icon.rgba.len()
        ),
        None => println!("No icon could be derived for '{}'", path),
    }
    Ok(())
}

fn cmd_self_locate() -> Result<()> {
    match process::install_location() {
        Some(dir) => {
            println!("{}", dir.display());
            Ok(())
        }
        None => anyhow::bail!("cannot determine this binary's location"),
    }
}

// ─── Config ───────────────────────────────────────────────────────────────────

fn cmd_config(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            let rendered = toml::to_string_pretty(&config).context("Failed to render config")?;
            println!();
            println!("  Config file: {}", Config::config_path().display());
            println!();
            print!("{}", rendered);
            println!();
            Ok(())
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("{} Configuration reset to defaults", "✓".green());
            Ok(())
        }
        ConfigAction::AddRoot { path } => {
            let mut config = Config::load()?;
            if config.add_custom_root(path) {
                config.save()?;
                println!("{} Added custom root: {}", "✓".green(), path);
            } else {
                println!("Custom root already configured: {}", path);
            }
            Ok(())
        }
        ConfigAction::RemoveRoot { path } => {
            let mut config = Config::load()?;
            if config.remove_custom_root(path) {
                config.save()?;
                println!("{} Removed custom root: {}", "✓".green(), path);
            } else {
                println!("No matching custom root: {}", path);
            }
            Ok(())
        }
    }
}
