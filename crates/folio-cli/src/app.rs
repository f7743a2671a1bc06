//! The `folio` application: logging setup and command dispatch.

use std::path::PathBuf;

use folio_core::Result;
use folio_core::traits::ConfigProvider;
use tracing_subscriber::EnvFilter;

use crate::build_handlers::{self, BuildOptions};
use crate::cli::{CliArgs, Command};
use crate::config::FolioConfig;
use crate::config_handlers;

// ============================================================================
// FolioCli
// ============================================================================

/// CLI application bound to a loaded [`FolioConfig`].
pub struct FolioCli {
    name: String,
    config: FolioConfig,
    version: String,
}

impl FolioCli {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(args: &CliArgs) -> Result<Self> {
        let config = FolioConfig::load(args.config.as_deref())?;
        Ok(Self::new(config))
    }

    /// Create a CLI application around an already loaded config.
    pub fn new(config: FolioConfig) -> Self {
        Self {
            name: config.project_name().to_string(),
            config,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// The loaded configuration.
    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` if set, otherwise defaults based on verbosity flags.
    /// Records emitted through the `log` facade by the library crates are
    /// picked up by the same subscriber.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // A subscriber may already be installed (e.g. in tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);

        match args.command {
            Some(Command::Build {
                output,
                format,
                strict,
            }) => {
                tracing::debug!(?format, strict, "build");
                let options = BuildOptions {
                    output: output.map(PathBuf::from),
                    format,
                    strict,
                };
                let report = build_handlers::handle_build(&self.config, options).await?;
                if !args.quiet {
                    println!(
                        "Wrote {} page(s) to {} ({} skipped, {} duplicate, {} slug collision)",
                        report.pages_written,
                        report.output.display(),
                        report.skipped,
                        report.duplicates,
                        report.collisions
                    );
                }
                Ok(())
            }
            Some(Command::Check { strict }) => {
                build_handlers::handle_check(&self.config, strict).await?;
                Ok(())
            }
            Some(Command::Index { pretty }) => {
                println!("{}", build_handlers::handle_index(&self.config, pretty).await?);
                Ok(())
            }
            Some(Command::Show { slug, format }) => {
                print!("{}", build_handlers::handle_show(&self.config, &slug, format).await?);
                Ok(())
            }
            Some(Command::Version) => {
                println!("{} {}", self.name, self.version);
                Ok(())
            }
            Some(Command::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            None => {
                println!("{} {}: use --help for usage", self.name, self.version);
                Ok(())
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
