//! The `check` command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::generator::{self, RunMode};
use crate::manifest::{find_manifest_with_optional, Manifest};

/// Verify that the artifacts on disk match the generated graph.
///
/// Runs the same pipeline as `generate` but compares each configured
/// artifact with its on-disk counterpart instead of writing it. A
/// missing or stale artifact is reported per file and fails the run,
/// which makes the command suitable as a CI gate against hand-edited
/// or forgotten regenerations. Nothing is ever written.
#[derive(Args, Debug)]
pub struct CheckCommand {}

impl CheckCommand {
    /// Execute with an optional explicit manifest path.
    ///
    /// # Errors
    ///
    /// Returns an error when no manifest can be found, the manifest is
    /// invalid, generation fails, or an artifact is missing or stale.
    pub fn execute_with_manifest_path(self, manifest_path: Option<PathBuf>) -> Result<()> {
        let manifest_path = find_manifest_with_optional(manifest_path)?;
        self.execute_from_path(&manifest_path)
    }

    fn execute_from_path(self, manifest_path: &Path) -> Result<()> {
        let manifest = Manifest::load(manifest_path)?;
        generator::run(&manifest, RunMode::Check)?;

        println!("{} All generated artifacts are up to date", "✓".green());

        Ok(())
    }
}
