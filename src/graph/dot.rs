//! Directed-graph view of a runtime graph: cycle detection and DOT export.
//!
//! The runtime graph is an adjacency list keyed by RID. For structural
//! checks and visualization it is rebuilt here as a petgraph directed graph
//! with one node per RID and one edge per import. The same structure backs
//! both the cycle scan run during validation and the optional GraphViz
//! export (`ridgen.dot`) used to eyeball fallback precedence.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use petgraph::graph::{DiGraph, NodeIndex};

use crate::core::RidgenError;
use crate::graph::RuntimeGraph;
use crate::utils::fs::{atomic_write, ensure_writable};

/// Color states for cycle detection using DFS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Node has not been visited.
    White,
    /// Node is currently being visited (in the DFS stack).
    Gray,
    /// Node has been fully visited.
    Black,
}

/// A runtime graph rebuilt as an explicit directed graph.
///
/// Nodes are created for every defined RID and for every import target,
/// including targets the graph does not define, so the export shows
/// dangling references rather than hiding them. Node order follows the
/// sorted order of the underlying graph, keeping the rendered output
/// stable across runs.
pub struct ImportGraph {
    /// The underlying directed graph, one node per RID.
    graph: DiGraph<String, ()>,
    /// Map from RID to its graph index.
    node_map: HashMap<String, NodeIndex>,
}

impl ImportGraph {
    /// Build the directed view of a runtime graph.
    #[must_use]
    pub fn from_runtime_graph(runtime_graph: &RuntimeGraph) -> Self {
        let mut import_graph = Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        };

        for (rid, description) in &runtime_graph.runtimes {
            let from = import_graph.ensure_node(rid);
            for import in &description.imports {
                let to = import_graph.ensure_node(import);
                if !import_graph.graph.contains_edge(from, to) {
                    import_graph.graph.add_edge(from, to, ());
                }
            }
        }

        import_graph
    }

    /// Add a node to the graph if it doesn't already exist.
    fn ensure_node(&mut self, rid: &str) -> NodeIndex {
        if let Some(&index) = self.node_map.get(rid) {
            index
        } else {
            let index = self.graph.add_node(rid.to_string());
            self.node_map.insert(rid.to_string(), index);
            index
        }
    }

    /// Detect import cycles using DFS with colors.
    ///
    /// # Errors
    ///
    /// Returns [`RidgenError::CyclicImport`] carrying the cycle path when
    /// one exists. Fallback resolution walks imports transitively, so a
    /// cycle would make every RID on it import itself.
    pub fn detect_cycles(&self) -> Result<(), RidgenError> {
        let mut colors: HashMap<NodeIndex, Color> = HashMap::new();
        let mut path: Vec<String> = Vec::new();

        for node in self.graph.node_indices() {
            colors.insert(node, Color::White);
        }

        for node in self.graph.node_indices() {
            if matches!(colors.get(&node), Some(Color::White))
                && let Some(cycle) = self.dfs_visit(node, &mut colors, &mut path)
            {
                return Err(RidgenError::CyclicImport {
                    chain: cycle.join(" → "),
                });
            }
        }

        Ok(())
    }

    /// DFS visit for cycle detection.
    ///
    /// Returns `Some(cycle_path)` if a cycle is detected, None otherwise.
    fn dfs_visit(
        &self,
        node: NodeIndex,
        colors: &mut HashMap<NodeIndex, Color>,
        path: &mut Vec<String>,
    ) -> Option<Vec<String>> {
        colors.insert(node, Color::Gray);
        path.push(self.graph[node].clone());

        for neighbor in self.graph.neighbors(node) {
            match colors.get(&neighbor) {
                Some(Color::Gray) => {
                    let cycle_start = path.iter().position(|n| *n == self.graph[neighbor])?;
                    let mut cycle = path[cycle_start..].to_vec();
                    // Repeat the entry node to show the cycle closes
                    cycle.push(self.graph[neighbor].clone());
                    return Some(cycle);
                }
                Some(Color::White) => {
                    if let Some(cycle) = self.dfs_visit(neighbor, colors, path) {
                        return Some(cycle);
                    }
                }
                _ => {}
            }
        }

        path.pop();
        colors.insert(node, Color::Black);
        None
    }

    /// Render the graph in GraphViz DOT syntax.
    ///
    /// Nodes are declared first, then one edge per import, both in the
    /// deterministic construction order.
    #[must_use]
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph runtimes {\n  rankdir=LR;\n\n");

        for node in self.graph.node_indices() {
            dot.push_str(&format!("  \"{}\";\n", escape(&self.graph[node])));
        }

        dot.push('\n');

        for edge in self.graph.edge_indices() {
            if let Some((from, to)) = self.graph.edge_endpoints(edge) {
                dot.push_str(&format!(
                    "  \"{}\" -> \"{}\";\n",
                    escape(&self.graph[from]),
                    escape(&self.graph[to])
                ));
            }
        }

        dot.push_str("}\n");
        dot
    }
}

fn escape(rid: &str) -> String {
    rid.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Write the DOT export of a runtime graph to disk atomically.
pub fn write_directed_graph(path: &Path, graph: &RuntimeGraph) -> Result<()> {
    let rendered = ImportGraph::from_runtime_graph(graph).to_dot();
    ensure_writable(path)?;
    atomic_write(path, rendered.as_bytes()).with_context(|| {
        format!(
            "Cannot write directed graph: {}\n\n\
                Possible causes:\n\
                - Permission denied (check directory ownership)\n\
                - Disk is full or read-only",
            path.display()
        )
    })
}
