//! The generation pipeline: from a loaded manifest to finished artifacts.
//!
//! A run walks a fixed sequence. The source graph (if any) is loaded as
//! the starting point and every group template is built from its config.
//! Before inference runs, all RIDs those inputs define are marked as
//! declared, so the later trim pass can tell intentional definitions
//! from inferred ones. Requested RIDs are then folded into the groups
//! ([`inference`]), each group is expanded and merged under conflict
//! detection, redundant inferred definitions are dropped
//! ([`redundancy`]), external graphs are collected, and the assembled
//! graph is validated for dangling imports, double definitions
//! ([`validation`]) and import cycles. Finally the configured artifacts
//! are written, or in check mode compared against what is on disk.
//!
//! Semantic problems do not stop the pipeline. They accumulate on a
//! [`RunReport`] (each logged as it is recorded) and surface together as
//! a single [`RidgenError::GenerationFailed`] at the end, so one run
//! reports every problem in the input. Only structural failures, a
//! manifest or graph that cannot be read or a RID that cannot be
//! parsed, abort immediately.

pub mod inference;
pub mod redundancy;
pub mod validation;

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use anyhow::Result;
use tracing::{debug, error, info, warn};

use crate::core::RidgenError;
use crate::graph::dot::{write_directed_graph, ImportGraph};
use crate::graph::json::{
    load_compatibility_map, load_runtime_graph, write_compatibility_map, write_runtime_graph,
};
use crate::graph::RuntimeGraph;
use crate::group::RuntimeGroup;
use crate::manifest::Manifest;

pub use inference::add_inferred_runtime_identifiers;
pub use redundancy::RedundancyDetector;
pub use validation::validate_imports;

/// Whether a run writes its artifacts or verifies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Write every configured artifact.
    Update,
    /// Compare every configured artifact against disk; never write.
    Check,
}

/// Accumulator for the semantic errors of a single run.
///
/// Each recorded error is logged immediately so problems appear in
/// context, and [`finish`](Self::finish) turns a non-empty report into
/// the run's failure.
#[derive(Debug, Default)]
pub struct RunReport {
    errors: Vec<RidgenError>,
}

impl RunReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs and stores an error without interrupting the run.
    pub fn record(&mut self, error: RidgenError) {
        error!("{error}");
        self.errors.push(error);
    }

    /// The errors recorded so far, in the order they were hit.
    #[must_use]
    pub fn errors(&self) -> &[RidgenError] {
        &self.errors
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Converts the report into the run's outcome.
    ///
    /// # Errors
    ///
    /// Returns [`RidgenError::GenerationFailed`] carrying the error count
    /// when anything was recorded.
    pub fn finish(&self) -> Result<(), RidgenError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(RidgenError::GenerationFailed {
                count: self.errors.len(),
            })
        }
    }
}

/// The outcome of graph assembly: the generated graph plus the RIDs
/// contributed by external graphs, keyed to the file that defines them.
#[derive(Debug, Clone)]
pub struct Generation {
    /// The assembled, trimmed and validated runtime graph.
    pub graph: RuntimeGraph,
    /// RID → external graph path, for every externally defined RID.
    pub external_rids: BTreeMap<String, String>,
}

/// Runs the full pipeline for `manifest` and produces its artifacts.
///
/// # Errors
///
/// Returns the first structural failure (unreadable graph file,
/// malformed RID or version), or [`RidgenError::GenerationFailed`] when
/// semantic errors accumulated during the run.
pub fn run(manifest: &Manifest, mode: RunMode) -> Result<Generation> {
    let mut report = RunReport::new();
    let generation = generate_graph(manifest, &mut report)?;
    produce_artifacts(manifest, &generation, mode, &mut report)?;
    report.finish()?;
    Ok(generation)
}

/// Assembles the graph without touching any artifact on disk.
///
/// Used by queries that only need the graph, like RID expansion.
///
/// # Errors
///
/// Same failure modes as [`run`], minus the artifact comparison.
pub fn build_graph(manifest: &Manifest) -> Result<Generation> {
    let mut report = RunReport::new();
    let generation = generate_graph(manifest, &mut report)?;
    report.finish()?;
    Ok(generation)
}

/// Assembles, trims and validates the runtime graph for `manifest`.
///
/// Semantic findings are recorded on `report`; the returned generation
/// reflects the graph as it would be written, conflicts resolved in
/// favor of the earliest definition.
///
/// # Errors
///
/// Returns an error when an input file cannot be loaded or a RID or
/// version spelling cannot be parsed.
pub fn generate_graph(manifest: &Manifest, report: &mut RunReport) -> Result<Generation> {
    let mut graph = match &manifest.source_graph {
        Some(path) => load_runtime_graph(&manifest.resolve_path(path))?,
        None => RuntimeGraph::new(),
    };

    let mut groups = Vec::with_capacity(manifest.groups.len());
    for config in &manifest.groups {
        groups.push(RuntimeGroup::from_config(config)?);
    }

    // Declared RIDs are marked before inference so that only definitions
    // minted by inference are candidates for the redundancy trim.
    let mut detector = RedundancyDetector::new();
    detector.mark_graph(&graph);
    for group in &groups {
        detector.mark_group(group);
    }

    add_inferred_runtime_identifiers(&mut groups, &manifest.infer, report)?;

    for group in &groups {
        safe_merge(&mut graph, group, report);
    }

    for rid in detector.detect_redundant(&graph) {
        graph.runtimes.remove(&rid);
    }

    let external_rids = collect_external_rids(manifest)?;

    for error in validate_imports(&graph, &external_rids) {
        report.record(error);
    }

    if let Err(error) = ImportGraph::from_runtime_graph(&graph).detect_cycles() {
        report.record(error);
    }

    Ok(Generation {
        graph,
        external_rids,
    })
}

/// Expands `group` and merges the result into `graph`.
///
/// A RID defined on both sides must carry identical ordered imports;
/// any other overlap is recorded as a conflict and the existing
/// definition wins.
fn safe_merge(graph: &mut RuntimeGraph, group: &RuntimeGroup, report: &mut RunReport) {
    let expansion = group.runtime_graph();
    debug!(
        "group '{}' expands to {} runtime definitions",
        group.base_rid,
        expansion.runtimes.len()
    );

    for (rid, description) in &expansion.runtimes {
        if let Some(existing) = graph.runtimes.get(rid) {
            if existing.imports != description.imports {
                report.record(RidgenError::ConflictingDefinition {
                    group: group.base_rid.clone(),
                    rid: rid.clone(),
                    new_imports: description.imports.join(";"),
                    existing_imports: existing.imports.join(";"),
                });
            }
        }
    }

    graph.merge(expansion);
}

/// Loads every external graph and indexes its RIDs by defining file.
///
/// When two external graphs define the same RID the first one listed in
/// the manifest is the one reported.
fn collect_external_rids(manifest: &Manifest) -> Result<BTreeMap<String, String>> {
    let mut external_rids = BTreeMap::new();

    for path in &manifest.external_graphs {
        let external = load_runtime_graph(&manifest.resolve_path(path))?;
        debug!(
            "external graph {} defines {} runtimes",
            path.display(),
            external.runtimes.len()
        );
        for rid in external.runtimes.into_keys() {
            match external_rids.entry(rid) {
                Entry::Vacant(slot) => {
                    slot.insert(path.display().to_string());
                }
                Entry::Occupied(existing) => {
                    warn!(
                        "runtime '{}' appears in both {} and {}; the first definition wins",
                        existing.key(),
                        existing.get(),
                        path.display()
                    );
                }
            }
        }
    }

    Ok(external_rids)
}

/// Writes or verifies every artifact the manifest configures.
///
/// In [`RunMode::Update`] each configured file is written atomically. In
/// [`RunMode::Check`] the runtime graph and compatibility map are
/// compared against what is on disk and differences are recorded on
/// `report`; nothing is written in check mode, and the DOT export is
/// skipped since it is a pure function of the runtime graph.
///
/// # Errors
///
/// Returns an error when a write fails or an existing artifact cannot
/// be parsed for comparison.
pub fn produce_artifacts(
    manifest: &Manifest,
    generation: &Generation,
    mode: RunMode,
    report: &mut RunReport,
) -> Result<()> {
    if let Some(path) = &manifest.output.runtime_json {
        let resolved = manifest.resolve_path(path);
        match mode {
            RunMode::Update => {
                write_runtime_graph(&resolved, &generation.graph)?;
                info!("wrote runtime graph {}", resolved.display());
            }
            RunMode::Check => check_runtime_graph(&resolved, &generation.graph, report)?,
        }
    }

    if let Some(path) = &manifest.output.compatibility_map {
        let resolved = manifest.resolve_path(path);
        let map = generation.graph.compatibility_map();
        match mode {
            RunMode::Update => {
                write_compatibility_map(&resolved, &map)?;
                info!("wrote compatibility map {}", resolved.display());
            }
            RunMode::Check => check_compatibility_map(&resolved, &map, report)?,
        }
    }

    if let Some(path) = &manifest.output.directed_graph {
        if mode == RunMode::Update {
            let resolved = manifest.resolve_path(path);
            write_directed_graph(&resolved, &generation.graph)?;
            info!("wrote directed graph {}", resolved.display());
        }
    }

    Ok(())
}

fn check_runtime_graph(
    path: &std::path::Path,
    graph: &RuntimeGraph,
    report: &mut RunReport,
) -> Result<()> {
    if !path.exists() {
        report.record(RidgenError::ArtifactMissing {
            path: path.display().to_string(),
        });
        return Ok(());
    }

    let on_disk = load_runtime_graph(path)?;
    if on_disk != *graph {
        report.record(RidgenError::ArtifactOutOfDate {
            path: path.display().to_string(),
        });
    }

    Ok(())
}

fn check_compatibility_map(
    path: &std::path::Path,
    map: &BTreeMap<String, Vec<String>>,
    report: &mut RunReport,
) -> Result<()> {
    if !path.exists() {
        report.record(RidgenError::ArtifactMissing {
            path: path.display().to_string(),
        });
        return Ok(());
    }

    let on_disk = load_compatibility_map(path)?;
    if on_disk != *map {
        report.record(RidgenError::ArtifactOutOfDate {
            path: path.display().to_string(),
        });
    }

    Ok(())
}
