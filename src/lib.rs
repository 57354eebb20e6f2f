//! ridgen - Runtime identifier graph generator
//!
//! Generates the runtime identifier (RID) compatibility graph that asset
//! resolution uses to pick the best platform-specific asset: which RIDs
//! exist, and for each one the ordered list of RIDs to fall back to when
//! no asset matches it exactly.
//!
//! # Architecture Overview
//!
//! ridgen follows a manifest/artifact model:
//! - `ridgen.toml` declares runtime groups — compact templates (base RID,
//!   versions, architectures, qualifiers) that expand into many concrete
//!   RID definitions.
//! - `runtime.json` is the generated adjacency-list graph, kept in a
//!   stable sorted order so regeneration is diffable.
//! - Optional companion artifacts: a compatibility map holding each RID's
//!   full transitive fallback closure, and a DOT export of the import
//!   graph for visual inspection.
//!
//! Concrete RIDs the groups do not spell out can be requested through the
//! manifest's `infer` list; they are folded into the closest matching
//! group before expansion, and inferred definitions that turn out to add
//! nothing over a neighbour are trimmed again. The assembled graph is
//! validated (no dangling imports, no double definitions against external
//! graphs, no cycles) before any artifact is written.
//!
//! # Core Modules
//!
//! - [`cli`] - Command-line interface (`generate`, `check`, `expand`)
//! - [`core`] - Error types and user-facing error rendering
//! - [`generator`] - The pipeline: inference, merging, trimming, validation
//! - [`graph`] - The runtime graph model, JSON interchange and DOT export
//! - [`group`] - Runtime group templates and their expansion rules
//! - [`manifest`] - Manifest parsing, validation and discovery (ridgen.toml)
//! - [`rid`] - RID and runtime version parsing and ordering
//! - [`utils`] - Filesystem helpers (atomic writes, permission handling)
//!
//! # Manifest Format (ridgen.toml)
//!
//! ```toml
//! [output]
//! runtime-json = "runtime.json"
//! compatibility-map = "runtime.compat.json"
//!
//! [[groups]]
//! base-rid = "any"
//!
//! [[groups]]
//! base-rid = "win"
//! parent = "any"
//! versions = ["7", "8", "81", "10"]
//! architectures = ["x86", "x64"]
//! omit-version-delimiter = true
//! ```
//!
//! Expanding the `win` group defines `win`, `win-x86`, `win-x64`, `win7`,
//! `win7-x86` and so on, each importing its fallbacks in precedence
//! order: `win81-x64` imports `win81`, then `win8-x64`.
//!
//! # Example
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

pub mod cli;
pub mod core;
pub mod generator;
pub mod graph;
pub mod group;
pub mod manifest;
pub mod rid;
pub mod utils;
