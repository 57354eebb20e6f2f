//! Command-line interface for ridgen.
//!
//! The CLI is a thin layer over the [`generator`](crate::generator)
//! pipeline. Parsing uses the `clap` derive API; each subcommand lives
//! in its own module and receives the globally available
//! `--manifest-path` override, falling back to manifest discovery when
//! it is absent.
//!
//! # Commands
//!
//! - `generate` — run the full pipeline and write every configured
//!   artifact.
//! - `check` — run the pipeline and compare the configured artifacts
//!   against what is on disk, without writing anything.
//! - `expand <rid>` — print a RID's full fallback chain from the freshly
//!   generated graph.
//!
//! # Global flags
//!
//! `--verbose` raises logging to `debug`, `--quiet` suppresses the log
//! subscriber entirely (the final error display still prints), and the
//! default level is `info`. When both are given, `--verbose` wins.
//! Logging goes to stderr so stdout stays parseable by scripts.

pub mod check;
pub mod expand;
pub mod generate;


use std::path::PathBuf;
use std::sync::Once;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Guards the global tracing subscriber so it is installed exactly once.
static INIT_LOGGING: Once = Once::new();

/// Runtime configuration derived from the global CLI flags.
///
/// Kept separate from [`Cli`] so tests can inject a configuration
/// without going through argument parsing.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Tracing filter directive for the log subscriber.
    ///
    /// `None` means no subscriber is installed at all, which is what
    /// `--quiet` requests. `RUST_LOG` overrides this when set.
    pub log_level: Option<String>,
}

impl CliConfig {
    /// Create a configuration with no log level override.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber, once per process.
    ///
    /// `RUST_LOG` wins when set; otherwise the configured level applies,
    /// and with neither present no subscriber is installed.
    pub fn init_logging(&self) {
        INIT_LOGGING.call_once(|| {
            let filter = if std::env::var("RUST_LOG").is_ok() {
                EnvFilter::from_default_env()
            } else if let Some(level) = &self.log_level {
                EnvFilter::new(level)
            } else {
                // No logging when quiet
                return;
            };

            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init();
        });
    }
}

/// Main CLI structure for ridgen.
///
/// Options marked `global = true` are accepted by every subcommand, so
/// `ridgen generate --verbose` and `ridgen --verbose generate` both
/// work.
#[derive(Parser)]
#[command(
    name = "ridgen",
    version,
    about = "Generate and verify runtime identifier compatibility graphs"
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output for debugging.
    ///
    /// Shows per-group expansion counts, inference decisions and
    /// redundancy drops. Equivalent to `RUST_LOG=debug`.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all log output for automation.
    ///
    /// Command output on stdout and the final error display are not
    /// affected.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the manifest file (ridgen.toml).
    ///
    /// By default ridgen searches the current directory and its parents.
    #[arg(long, global = true, value_name = "FILE")]
    manifest_path: Option<PathBuf>,
}

/// All available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Generate the runtime graph and write every configured artifact.
    ///
    /// See [`generate::GenerateCommand`] for behavior details.
    Generate(generate::GenerateCommand),

    /// Verify that the artifacts on disk match the generated graph.
    ///
    /// Never writes; exits non-zero when a configured artifact is
    /// missing or stale. See [`check::CheckCommand`].
    Check(check::CheckCommand),

    /// Print the full fallback chain of a runtime identifier.
    ///
    /// See [`expand::ExpandCommand`].
    Expand(expand::ExpandCommand),
}

impl Cli {
    /// Execute the CLI with configuration derived from the parsed flags.
    ///
    /// # Errors
    ///
    /// Propagates the subcommand's failure for the caller to display.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config)
    }

    /// Build a [`CliConfig`] from the parsed CLI arguments.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None // No logging when quiet
        } else {
            Some("info".to_string())
        };

        CliConfig { log_level }
    }

    /// Execute the CLI with an injected configuration.
    ///
    /// # Errors
    ///
    /// Propagates the subcommand's failure for the caller to display.
    pub fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        match self.command {
            Commands::Generate(cmd) => cmd.execute_with_manifest_path(self.manifest_path),
            Commands::Check(cmd) => cmd.execute_with_manifest_path(self.manifest_path),
            Commands::Expand(cmd) => cmd.execute_with_manifest_path(self.manifest_path),
        }
    }
}
