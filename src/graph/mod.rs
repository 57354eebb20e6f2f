//! The runtime graph: RID definitions and their fallback imports.
//!
//! A runtime graph maps each runtime identifier to an ordered list of
//! imports, the RIDs that asset resolution should fall back to when no asset
//! matches the identifier itself. The order of an import list is the
//! precedence order, so merging and comparison treat it as significant.
//!
//! This module provides the in-memory model ([`RuntimeGraph`],
//! [`RuntimeDescription`]), graph merging, and the transitive fallback
//! expansion used to build compatibility maps. The JSON interchange format
//! lives in [`json`] and the diagnostic DOT export in [`dot`].
//!
//! # Examples
//!
//! ```rust
//! use ridgen_cli::graph::{RuntimeDescription, RuntimeGraph};
//!
//! let mut graph = RuntimeGraph::new();
//! graph.add_runtime(RuntimeDescription::new("any", Vec::new()));
//! graph.add_runtime(RuntimeDescription::new("win", vec!["any".to_string()]));
//! graph.add_runtime(RuntimeDescription::new("win-x64", vec!["win".to_string()]));
//!
//! assert_eq!(graph.expand_runtime("win-x64"), vec!["win-x64", "win", "any"]);
//! ```

pub mod dot;
pub mod json;

use std::collections::BTreeMap;

/// A single runtime definition: a RID and its ordered fallback imports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeDescription {
    /// The runtime identifier this description defines.
    pub runtime_identifier: String,
    /// Fallback RIDs in precedence order.
    pub imports: Vec<String>,
}

impl RuntimeDescription {
    /// Create a description for `runtime_identifier` with the given imports.
    pub fn new(runtime_identifier: impl Into<String>, imports: Vec<String>) -> Self {
        Self {
            runtime_identifier: runtime_identifier.into(),
            imports,
        }
    }
}

/// A full runtime graph keyed by RID.
///
/// Keys are kept sorted so that serialization and iteration are
/// deterministic, which keeps generated files diffable. Equality compares
/// the key set and every ordered import list, which is exactly the
/// comparison check mode needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeGraph {
    /// All runtime definitions, keyed by their identifier.
    pub runtimes: BTreeMap<String, RuntimeDescription>,
}

impl RuntimeGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a runtime definition.
    pub fn add_runtime(&mut self, description: RuntimeDescription) {
        self.runtimes.insert(description.runtime_identifier.clone(), description);
    }

    /// Whether the graph defines `rid`.
    #[must_use]
    pub fn contains(&self, rid: &str) -> bool {
        self.runtimes.contains_key(rid)
    }

    /// Merge another graph into this one.
    ///
    /// When both sides define a RID the existing definition wins, unless its
    /// import list is empty and the incoming one is not. Conflicting
    /// non-empty import lists are not resolved here; the generator reports
    /// them before merging.
    pub fn merge(&mut self, other: Self) {
        for (rid, description) in other.runtimes {
            match self.runtimes.entry(rid) {
                std::collections::btree_map::Entry::Vacant(entry) => {
                    entry.insert(description);
                }
                std::collections::btree_map::Entry::Occupied(mut entry) => {
                    if entry.get().imports.is_empty() && !description.imports.is_empty() {
                        entry.insert(description);
                    }
                }
            }
        }
    }

    /// Expand a RID into its full fallback precedence list.
    ///
    /// The result starts with `rid` itself, followed by every transitively
    /// imported RID in breadth-first order. Each RID appears once; the
    /// visited check also makes the expansion terminate on a cyclic graph,
    /// although cycles are rejected by validation before anything consumes
    /// the expansion.
    ///
    /// A RID the graph does not define expands to just itself.
    #[must_use]
    pub fn expand_runtime(&self, rid: &str) -> Vec<String> {
        let mut expansion = vec![rid.to_string()];
        let mut index = 0;

        while index < expansion.len() {
            if let Some(description) = self.runtimes.get(&expansion[index]) {
                for import in &description.imports {
                    if !expansion.iter().any(|seen| seen == import) {
                        expansion.push(import.clone());
                    }
                }
            }
            index += 1;
        }

        expansion
    }

    /// Compute the compatibility map: every RID expanded to its closure.
    #[must_use]
    pub fn compatibility_map(&self) -> BTreeMap<String, Vec<String>> {
        self.runtimes
            .keys()
            .map(|rid| (rid.clone(), self.expand_runtime(rid)))
            .collect()
    }
}
