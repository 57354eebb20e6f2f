//! The `generate` command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::generator::{self, RunMode};
use crate::manifest::{find_manifest_with_optional, Manifest};

/// Run the full pipeline and write every configured artifact.
///
/// Loads the manifest, assembles and validates the runtime graph, and
/// writes the configured `runtime.json`, compatibility map and DOT
/// export atomically. Fails without writing partial files when the
/// manifest cannot be loaded; fails after writing when the generated
/// graph carries validation errors, so the on-disk state can still be
/// inspected.
#[derive(Args, Debug)]
pub struct GenerateCommand {}

impl GenerateCommand {
    /// Execute with an optional explicit manifest path.
    ///
    /// # Errors
    ///
    /// Returns an error when no manifest can be found, the manifest is
    /// invalid, or generation fails.
    pub fn execute_with_manifest_path(self, manifest_path: Option<PathBuf>) -> Result<()> {
        let manifest_path = find_manifest_with_optional(manifest_path)?;
        self.execute_from_path(&manifest_path)
    }

    fn execute_from_path(self, manifest_path: &Path) -> Result<()> {
        let manifest = Manifest::load(manifest_path)?;
        let generation = generator::run(&manifest, RunMode::Update)?;

        println!(
            "{} Generated runtime graph with {} runtime definitions",
            "✓".green(),
            generation.graph.runtimes.len()
        );

        Ok(())
    }
}
