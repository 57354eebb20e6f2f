//! JSON interchange for runtime graphs and compatibility maps.
//!
//! The on-disk graph format is the adjacency list consumed by downstream
//! asset-resolution tooling:
//!
//! ```json
//! {
//!   "runtimes": {
//!     "win7-x64": {
//!       "#import": [
//!         "win7",
//!         "win-x64"
//!       ]
//!     }
//!   }
//! }
//! ```
//!
//! A RID with no fallbacks still carries an empty `#import` array so the
//! file is self-describing. The companion compatibility map file is a plain
//! object from RID to its full precedence list. Both files are written with
//! sorted keys and a trailing newline so regeneration produces stable diffs.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::RidgenError;
use crate::graph::{RuntimeDescription, RuntimeGraph};
use crate::utils::fs::{atomic_write, ensure_writable};

/// Wire shape of a runtime.json document.
#[derive(Debug, Serialize, Deserialize)]
struct RuntimeGraphJson {
    runtimes: BTreeMap<String, RuntimeImportsJson>,
}

/// Wire shape of a single runtime entry.
#[derive(Debug, Serialize, Deserialize)]
struct RuntimeImportsJson {
    #[serde(rename = "#import", default)]
    import: Vec<String>,
}

impl From<&RuntimeGraph> for RuntimeGraphJson {
    fn from(graph: &RuntimeGraph) -> Self {
        Self {
            runtimes: graph
                .runtimes
                .iter()
                .map(|(rid, description)| {
                    (
                        rid.clone(),
                        RuntimeImportsJson {
                            import: description.imports.clone(),
                        },
                    )
                })
                .collect(),
        }
    }
}

impl From<RuntimeGraphJson> for RuntimeGraph {
    fn from(wire: RuntimeGraphJson) -> Self {
        let mut graph = Self::new();
        for (rid, entry) in wire.runtimes {
            graph.add_runtime(RuntimeDescription::new(rid, entry.import));
        }
        graph
    }
}

/// Load a runtime graph from a runtime.json file.
///
/// # Errors
///
/// Returns [`RidgenError::GraphNotFound`] when the file does not exist and
/// [`RidgenError::GraphParseError`] when it is not valid graph JSON.
pub fn load_runtime_graph(path: &Path) -> Result<RuntimeGraph> {
    if !path.exists() {
        return Err(RidgenError::GraphNotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Cannot read runtime graph: {}\n\n\
                Possible causes:\n\
                - Permission denied (check file ownership)\n\
                - File is locked by another process",
            path.display()
        )
    })?;

    let wire: RuntimeGraphJson =
        serde_json::from_str(&content).map_err(|e| RidgenError::GraphParseError {
            file: path.display().to_string(),
            reason: e.to_string(),
        })?;

    Ok(wire.into())
}

/// Render a runtime graph as pretty-printed JSON with a trailing newline.
pub fn render_runtime_graph(graph: &RuntimeGraph) -> Result<String> {
    let wire = RuntimeGraphJson::from(graph);
    let mut rendered = serde_json::to_string_pretty(&wire)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Write a runtime graph to disk atomically.
pub fn write_runtime_graph(path: &Path, graph: &RuntimeGraph) -> Result<()> {
    let rendered = render_runtime_graph(graph)?;
    ensure_writable(path)?;
    atomic_write(path, rendered.as_bytes()).with_context(|| {
        format!(
            "Cannot write runtime graph: {}\n\n\
                Possible causes:\n\
                - Permission denied (check directory ownership)\n\
                - Disk is full or read-only",
            path.display()
        )
    })
}

/// Load a compatibility map from disk.
///
/// # Errors
///
/// Returns [`RidgenError::GraphNotFound`] when the file does not exist and
/// [`RidgenError::GraphParseError`] when it is not a valid map document.
pub fn load_compatibility_map(path: &Path) -> Result<BTreeMap<String, Vec<String>>> {
    if !path.exists() {
        return Err(RidgenError::GraphNotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Cannot read compatibility map: {}\n\n\
                Possible causes:\n\
                - Permission denied (check file ownership)\n\
                - File is locked by another process",
            path.display()
        )
    })?;

    let map: BTreeMap<String, Vec<String>> =
        serde_json::from_str(&content).map_err(|e| RidgenError::GraphParseError {
            file: path.display().to_string(),
            reason: e.to_string(),
        })?;

    Ok(map)
}

/// Render a compatibility map as pretty-printed JSON with a trailing newline.
pub fn render_compatibility_map(map: &BTreeMap<String, Vec<String>>) -> Result<String> {
    let mut rendered = serde_json::to_string_pretty(map)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Write a compatibility map to disk atomically.
pub fn write_compatibility_map(path: &Path, map: &BTreeMap<String, Vec<String>>) -> Result<()> {
    let rendered = render_compatibility_map(map)?;
    ensure_writable(path)?;
    atomic_write(path, rendered.as_bytes()).with_context(|| {
        format!(
            "Cannot write compatibility map: {}\n\n\
                Possible causes:\n\
                - Permission denied (check directory ownership)\n\
                - Disk is full or read-only",
            path.display()
        )
    })
}
