//! The `expand` command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use crate::core::RidgenError;
use crate::generator;
use crate::manifest::{find_manifest_with_optional, Manifest};

/// Print the full fallback chain of a runtime identifier.
///
/// Assembles the graph from the manifest (without touching any artifact
/// on disk) and prints the RID followed by every RID it transitively
/// imports, one per line in precedence order. This is the order asset
/// resolution would try them in.
#[derive(Args, Debug)]
pub struct ExpandCommand {
    /// The runtime identifier to expand.
    #[arg(value_name = "RID")]
    pub rid: String,
}

impl ExpandCommand {
    /// Execute with an optional explicit manifest path.
    ///
    /// # Errors
    ///
    /// Returns an error when no manifest can be found, generation fails,
    /// or the requested RID is not defined in the generated graph.
    pub fn execute_with_manifest_path(self, manifest_path: Option<PathBuf>) -> Result<()> {
        let manifest_path = find_manifest_with_optional(manifest_path)?;
        self.execute_from_path(&manifest_path)
    }

    fn execute_from_path(self, manifest_path: &Path) -> Result<()> {
        let manifest = Manifest::load(manifest_path)?;
        let generation = generator::build_graph(&manifest)?;

        if !generation.graph.contains(&self.rid) {
            return Err(RidgenError::UnknownRuntime { rid: self.rid }.into());
        }

        for rid in generation.graph.expand_runtime(&self.rid) {
            println!("{rid}");
        }

        Ok(())
    }
}
