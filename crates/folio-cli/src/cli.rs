//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand, ValueEnum};

// ============================================================================
// CLI argument types
// ============================================================================

/// Assemble and render documentation pages.
#[derive(Parser, Debug)]
#[command(name = "folio", author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "FOLIO_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format for rendered pages.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// Standalone HTML documents.
    #[default]
    Html,
    /// Markdown with YAML frontmatter.
    Markdown,
}

impl Format {
    /// File extension for pages written in this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Markdown => "md",
        }
    }
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render every page and write the navigation index.
    Build {
        /// Output directory (defaults to `output.path` or `<site>/public`).
        #[arg(short, long)]
        output: Option<String>,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = Format::Html)]
        format: Format,

        /// Fail on the first page that cannot be assembled.
        #[arg(long)]
        strict: bool,
    },

    /// Load every page and report edit-path problems.
    Check {
        /// Fail on the first page that cannot be assembled.
        #[arg(long)]
        strict: bool,
    },

    /// Print the navigation index as JSON.
    Index {
        /// Pretty-print the JSON.
        #[arg(long)]
        pretty: bool,
    },

    /// Render a single page to stdout.
    Show {
        /// Page slug, e.g. `docs/continuous-integration/circleci`.
        slug: String,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = Format::Markdown)]
        format: Format,
    },

    /// Print version information.
    Version,

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "site.edit_base_url").
        key: String,
    },

    /// Set a configuration value by dotted key.
    Set {
        /// Dotted key (e.g., "site.strict").
        key: String,

        /// Value to set.
        value: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to `./folio.toml`).
        #[arg(short, long)]
        file: Option<String>,

        /// Write the per-user config under the XDG config directory instead.
        #[arg(long, conflicts_with = "file")]
        user: bool,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },

    /// Export configuration as environment variables.
    Export {
        /// Format as Docker --env flags.
        #[arg(long)]
        docker_env: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================
