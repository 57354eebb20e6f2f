//! Import validation for assembled runtime graphs.
//!
//! After all groups are expanded and merged, every RID mentioned as an
//! import must resolve to a definition, either in the generated graph
//! itself or in one of the external graphs named by the manifest. A RID
//! that is defined both locally and externally is ambiguous for
//! consumers, so that is reported too.

use std::collections::BTreeMap;

use crate::core::RidgenError;
use crate::graph::RuntimeGraph;

/// Checks every runtime definition in `graph` against the set of RIDs
/// provided by external graphs.
///
/// Returns one error per finding:
/// - [`RidgenError::DoubleDefinition`] when a RID defined in `graph` is
///   also defined by an external graph (keyed by the path it came from).
/// - [`RidgenError::DanglingImport`] for each import that neither the
///   graph nor any external graph defines.
///
/// Findings accumulate; an empty vector means the graph is closed.
#[must_use]
pub fn validate_imports(
    graph: &RuntimeGraph,
    external_rids: &BTreeMap<String, String>,
) -> Vec<RidgenError> {
    let mut errors = Vec::new();

    for (rid, runtime) in &graph.runtimes {
        if let Some(external_path) = external_rids.get(rid) {
            errors.push(RidgenError::DoubleDefinition {
                rid: rid.clone(),
                external_path: external_path.clone(),
            });
        }

        for import in &runtime.imports {
            if !graph.contains(import) && !external_rids.contains_key(import) {
                errors.push(RidgenError::DanglingImport {
                    rid: rid.clone(),
                    import: import.clone(),
                });
            }
        }
    }

    errors
}
