use clap::{Parser, Subcommand, ValueEnum};

/// junkscout — find program install roots and leftover app-data locations
#[derive(Parser, Debug)]
#[command(
    name = "junkscout",
    version,
    about = "Finds where programs get installed and where leftover app data hides",
    long_about = "junkscout resolves the directories that matter when hunting for\n\
                  installed programs and their leftovers: the Program Files pair\n\
                  classified 32/64-bit, custom install roots, and the app-data and\n\
                  start-menu locations worth searching after an uninstall.",
    after_help = "EXAMPLES:\n  \
        junkscout roots                         Platform install roots\n  \
        junkscout roots --include-custom        Add configured custom roots\n  \
        junkscout junk --format json            Junk-search set as JSON\n  \
        junkscout check \"Common Files\" MyApp    Classify directory names\n  \
        junkscout icon C:\\Tools\\app.exe            Probe a file's icon\n  \
        junkscout self-locate                   Directory of this binary\n  \
        junkscout config show                   Show configuration"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (defaults to the configured preference)
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode — minimal output
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List program-install roots with their bitness
    Roots {
        /// Include configured custom roots
        #[arg(long, short = 'c')]
        include_custom: bool,

        /// List every candidate path, even ones that do not exist
        #[arg(long)]
        all: bool,
    },

    /// List directories worth searching for leftover app data
    Junk,

    /// Classify directory names against the system blacklist
    Check {
        /// Directory names to classify
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Probe the icon associated with a file
    Icon {
        /// File to probe
        path: String,
    },

    /// Show the directory containing this binary
    SelfLocate,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset to default configuration
    Reset,

    /// Add a custom program-install root
    AddRoot {
        /// Directory path
        path: String,
    },

    /// Remove a custom program-install root
    RemoveRoot {
        /// Directory path
        path: String,
    },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Quiet,
}

impl From<OutputFormat> for crate::common::config::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Human => Self::Human,
            OutputFormat::Json => Self::Json,
            OutputFormat::Quiet => Self::Quiet,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
