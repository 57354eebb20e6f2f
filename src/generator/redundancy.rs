//! Trimming of redundant inference-introduced runtime definitions.
//!
//! Inference can mint RIDs whose import lists add nothing over a
//! neighbouring definition the manifest already declares, for example a
//! `win.9` that imports exactly what `win.8` imports. Such definitions
//! bloat the graph without changing resolution for any consumer, so
//! they are dropped before the graph is written.
//!
//! Only RIDs introduced by inference are candidates; everything declared
//! by a group or carried in from the source graph is considered
//! intentional and is never removed. A candidate survives when no
//! neighbour justifies it being folded away, or when another definition
//! still imports it.

use std::collections::{HashSet, VecDeque};

use tracing::debug;

use crate::graph::RuntimeGraph;
use crate::group::RuntimeGroup;
use crate::rid::Rid;

/// Tracks which RIDs were declared up front and finds the
/// inference-introduced definitions the graph can live without.
#[derive(Debug, Default)]
pub struct RedundancyDetector {
    declared: HashSet<String>,
}

impl RedundancyDetector {
    /// Creates a detector with an empty declared set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks every RID defined by `graph` as declared.
    ///
    /// Call this with the source graph before inference runs.
    pub fn mark_graph(&mut self, graph: &RuntimeGraph) {
        for rid in graph.runtimes.keys() {
            self.declared.insert(rid.clone());
        }
    }

    /// Marks every RID the group's expansion defines as declared.
    ///
    /// Call this with each manifest group before inference runs, so
    /// that only RIDs minted by inference remain candidates.
    pub fn mark_group(&mut self, group: &RuntimeGroup) {
        for description in group.runtime_descriptions() {
            self.declared.insert(description.runtime_identifier);
        }
    }

    /// Whether `rid` was declared by a group or the source graph.
    #[must_use]
    pub fn is_declared(&self, rid: &str) -> bool {
        self.declared.contains(rid)
    }

    /// Returns the inference-introduced RIDs whose definitions are
    /// redundant and can be removed from `graph`.
    ///
    /// Candidates are examined once each, in graph order. A candidate is
    /// redundant when its nearest neighbour (same base, architecture and
    /// qualifier; greatest version not above the candidate's, with a
    /// version-less neighbour ranking below any versioned one) defines
    /// the same set of imports, the two agree on being versioned, and no
    /// surviving definition imports the candidate. Survivors stay
    /// visible as neighbours for the candidates examined after them.
    #[must_use]
    pub fn detect_redundant(&self, graph: &RuntimeGraph) -> Vec<String> {
        let mut queue: VecDeque<String> = graph
            .runtimes
            .keys()
            .filter(|rid| !self.is_declared(rid))
            .cloned()
            .collect();

        let mut dropped = Vec::new();
        let rounds = queue.len();

        for _ in 0..rounds {
            let Some(candidate) = queue.pop_front() else {
                break;
            };

            if self.is_redundant(&candidate, &queue, &dropped, graph) {
                debug!("dropping redundant inferred runtime {candidate}");
                dropped.push(candidate);
            } else {
                queue.push_back(candidate);
            }
        }

        dropped
    }

    fn is_redundant(
        &self,
        candidate: &str,
        remaining: &VecDeque<String>,
        dropped: &[String],
        graph: &RuntimeGraph,
    ) -> bool {
        let Ok(rid) = Rid::parse(candidate) else {
            return false;
        };

        // Other pending candidates are considered before the declared
        // definitions, so a surviving inferred RID can justify dropping
        // a later one.
        let pool = remaining
            .iter()
            .map(String::as_str)
            .chain(
                graph
                    .runtimes
                    .keys()
                    .filter(|other| self.is_declared(other))
                    .map(String::as_str),
            );

        let Some((nearest, nearest_rid)) = nearest_neighbour(&rid, pool) else {
            return false;
        };

        if rid.version.is_some() != nearest_rid.version.is_some() {
            return false;
        }

        let Some(candidate_runtime) = graph.runtimes.get(candidate) else {
            return false;
        };
        let Some(nearest_runtime) = graph.runtimes.get(&nearest) else {
            return false;
        };

        let candidate_imports: HashSet<&str> =
            candidate_runtime.imports.iter().map(String::as_str).collect();
        let nearest_imports: HashSet<&str> =
            nearest_runtime.imports.iter().map(String::as_str).collect();
        if candidate_imports != nearest_imports {
            return false;
        }

        let still_imported = graph.runtimes.iter().any(|(other, runtime)| {
            other != candidate
                && !dropped.contains(other)
                && runtime.imports.iter().any(|i| i == candidate)
        });

        !still_imported
    }
}

/// Picks the definition closest to `candidate` out of `pool`.
///
/// Neighbours must share the candidate's base, architecture and
/// qualifier. A versioned neighbour is eligible only when its version
/// does not exceed the candidate's; among eligible neighbours the
/// greatest version wins and a version-less neighbour ranks below any
/// versioned one. Ties keep the earlier entry.
fn nearest_neighbour<'a>(
    candidate: &Rid,
    pool: impl Iterator<Item = &'a str>,
) -> Option<(String, Rid)> {
    let mut best: Option<(String, Rid)> = None;

    for name in pool {
        let Ok(rid) = Rid::parse(name) else {
            continue;
        };

        if rid.base != candidate.base
            || rid.architecture != candidate.architecture
            || rid.qualifier != candidate.qualifier
        {
            continue;
        }

        if let Some(version) = &rid.version {
            match &candidate.version {
                Some(requested) if version <= requested => {}
                _ => continue,
            }
        }

        let better = match (&best, &rid.version) {
            (None, _) => true,
            (Some((_, best_rid)), Some(version)) => match &best_rid.version {
                Some(best_version) => version > best_version,
                None => true,
            },
            (Some(_), None) => false,
        };

        if better {
            best = Some((name.to_string(), rid));
        }
    }

    best
}
