//! Manifest file parsing and validation for ridgen projects.
//!
//! This module handles `ridgen.toml` manifest files, the declarative input
//! that describes which runtime groups to expand, which graphs to merge or
//! reference, and which artifacts to produce.
//!
//! # Basic Structure
//!
//! ```toml
//! # Optional starting-point graph merged before any group expansion.
//! source-graph = "base/runtime.json"
//! # Graphs whose RIDs may be referenced but must not be redefined here.
//! external-graphs = ["external/runtime.json"]
//! # Extra bare RIDs folded into the groups before expansion.
//! infer = ["osx.10.14-x64"]
//!
//! [output]
//! runtime-json = "runtime.json"
//! compatibility-map = "runtime.compat.json"
//! directed-graph = "runtime.dot"
//!
//! [[groups]]
//! base-rid = "win"
//! parent = "any"
//! versions = ["7", "8", "81", "10"]
//! architectures = ["x86", "x64"]
//! omit-version-delimiter = true
//! ```
//!
//! `[[groups]]` order is the merge order. Group entries reject unknown keys
//! so a typo fails the run instead of silently changing the generated graph.
//!
//! # Discovery
//!
//! [`find_manifest`] searches for `ridgen.toml` starting from the current
//! working directory and walking up the directory tree, mirroring Cargo and
//! Git project file discovery, so commands work from any subdirectory of a
//! project. Relative paths inside the manifest always resolve against the
//! manifest's own directory, never the invocation directory.

use crate::core::RidgenError;
use crate::group::GroupConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The manifest file name ridgen searches for.
pub const MANIFEST_FILENAME: &str = "ridgen.toml";

/// Output artifact paths, all optional and all relative to the manifest.
///
/// `runtime-json` is the adjacency-list interchange graph; the compatibility
/// map holds the transitive closure per RID; the directed graph is a DOT
/// export for visualization tooling.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct OutputConfig {
    /// Path of the `runtime.json` artifact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_json: Option<PathBuf>,
    /// Path of the compatibility map artifact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compatibility_map: Option<PathBuf>,
    /// Path of the DOT directed-graph export.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directed_graph: Option<PathBuf>,
}

impl OutputConfig {
    /// Whether no output path is configured at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.runtime_json.is_none()
            && self.compatibility_map.is_none()
            && self.directed_graph.is_none()
    }
}

/// The main manifest structure representing a complete `ridgen.toml` file.
///
/// Field order mirrors the file layout: graph inputs first, then outputs,
/// then the group templates. See the module documentation for the format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Manifest {
    /// Optional starting-point graph merged before any group expansion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_graph: Option<PathBuf>,

    /// Graphs whose RIDs may be referenced but must not be redefined here.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_graphs: Vec<PathBuf>,

    /// Extra bare RIDs folded into the groups before expansion.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub infer: Vec<String>,

    /// Output artifact paths.
    #[serde(default, skip_serializing_if = "OutputConfig::is_empty")]
    pub output: OutputConfig,

    /// Runtime group templates, in merge order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupConfig>,

    /// Directory containing the manifest, for resolving relative paths.
    ///
    /// Set by [`Manifest::load`]; not part of the file format.
    #[serde(skip)]
    pub manifest_dir: Option<PathBuf>,
}

impl Manifest {
    /// Load and parse a manifest from a TOML file.
    ///
    /// Reads the file, parses it, records the manifest directory for
    /// relative-path resolution and validates the result. Either the
    /// manifest loads completely or an error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`RidgenError::ManifestParseError`] for TOML syntax or schema
    /// problems and [`RidgenError::ManifestValidationError`] for logically
    /// inconsistent content, both wrapped with actionable context.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest file: {}", path.display()))?;

        let mut manifest: Self = toml::from_str(&content)
            .map_err(|e| RidgenError::ManifestParseError {
                file: path.display().to_string(),
                reason: e.to_string(),
            })
            .with_context(|| {
                format!(
                    "Invalid TOML syntax in manifest file: {}\n\n\
                    Common TOML syntax errors:\n\
                    - Missing quotes around strings\n\
                    - Unmatched brackets [ ] or braces {{ }}\n\
                    - Misspelled group keys (group entries reject unknown fields)",
                    path.display()
                )
            })?;

        // Store the manifest directory for resolving relative paths
        manifest.manifest_dir = Some(
            path.parent()
                .ok_or_else(|| anyhow::anyhow!("Manifest path has no parent directory"))?
                .to_path_buf(),
        );

        manifest.validate()?;

        Ok(manifest)
    }

    /// Validate the manifest structure and enforce business rules.
    ///
    /// Automatically called by [`Self::load`] but usable independently on
    /// programmatically constructed manifests.
    ///
    /// # Validation Rules
    ///
    /// - The manifest must contain at least one group or a source graph.
    /// - `output.runtime-json` is required whenever groups or inferred RIDs
    ///   would generate content.
    /// - Every group needs a non-empty `base-rid`.
    /// - `apply-versions-to-parent` requires a `parent`; a version-specific
    ///   parent import cannot be formed without one.
    ///
    /// # Errors
    ///
    /// Returns [`RidgenError::ManifestValidationError`] describing the first
    /// rule violated.
    pub fn validate(&self) -> Result<()> {
        if self.groups.is_empty() && self.source_graph.is_none() {
            return Err(RidgenError::ManifestValidationError {
                reason: "manifest defines no groups and no source-graph; there is nothing to generate".to_string(),
            }
            .into());
        }

        if (!self.groups.is_empty() || !self.infer.is_empty())
            && self.output.runtime_json.is_none()
        {
            return Err(RidgenError::ManifestValidationError {
                reason: "output.runtime-json must be set when groups or inferred RIDs are present"
                    .to_string(),
            }
            .into());
        }

        for (index, group) in self.groups.iter().enumerate() {
            if group.base_rid.is_empty() {
                return Err(RidgenError::ManifestValidationError {
                    reason: format!("group entry {index} has an empty 'base-rid'"),
                }
                .into());
            }

            if group.apply_versions_to_parent && group.parent.is_none() {
                return Err(RidgenError::ManifestValidationError {
                    reason: format!(
                        "group '{}' sets apply-versions-to-parent but has no parent to apply versions to",
                        group.base_rid
                    ),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Resolve a manifest-relative path against the manifest's directory.
    ///
    /// Absolute paths pass through unchanged. Manifests constructed in code
    /// without a directory resolve against the current directory.
    #[must_use]
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match &self.manifest_dir {
            Some(dir) => dir.join(path),
            None => path.to_path_buf(),
        }
    }
}

/// Find manifest by searching up the directory tree from the current directory.
///
/// Searches for `ridgen.toml` starting from the current working directory
/// and walking up until found or the filesystem root is reached, mirroring
/// Cargo and Git project file discovery.
///
/// # Errors
///
/// Returns [`RidgenError::ManifestNotFound`] when the search exhausts every
/// parent directory.
pub fn find_manifest() -> Result<PathBuf> {
    let current = std::env::current_dir()
        .context("Cannot determine current working directory. This may indicate a permission issue or corrupted filesystem")?;
    find_manifest_from(current)
}

/// Find manifest using an explicit path or directory search.
///
/// Uses the explicit path if provided and existing, otherwise searches from
/// the current directory. This backs the global `--manifest-path` flag.
///
/// # Errors
///
/// Returns [`RidgenError::ManifestNotFound`] when the explicit path does not
/// exist, or when no explicit path is given and the search finds nothing.
pub fn find_manifest_with_optional(explicit_path: Option<PathBuf>) -> Result<PathBuf> {
    match explicit_path {
        Some(path) => {
            if path.exists() {
                Ok(path)
            } else {
                Err(RidgenError::ManifestNotFound.into())
            }
        }
        None => find_manifest(),
    }
}

/// Find manifest by searching up from a specific starting directory.
///
/// Core discovery loop used by [`find_manifest`]; exposed for tests and
/// embedders that want discovery relative to somewhere other than the
/// current directory.
pub fn find_manifest_from(mut current: PathBuf) -> Result<PathBuf> {
    loop {
        let manifest_path = current.join(MANIFEST_FILENAME);
        if manifest_path.exists() {
            return Ok(manifest_path);
        }

        if !current.pop() {
            return Err(RidgenError::ManifestNotFound.into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_manifest(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(MANIFEST_FILENAME);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_full_manifest() {
        let temp = TempDir::new().unwrap();
        let path = write_manifest(
            temp.path(),
            r#"
            source-graph = "base/runtime.json"
            external-graphs = ["external/runtime.json"]
            infer = ["osx.10.14-x64"]

            [output]
            runtime-json = "runtime.json"
            compatibility-map = "runtime.compat.json"
            directed-graph = "runtime.dot"

            [[groups]]
            base-rid = "win"
            parent = "any"
            versions = ["7", "8", "81", "10"]
            architectures = ["x86", "x64"]
            omit-version-delimiter = true

            [[groups]]
            base-rid = "osx"
            parent = "unix"
            versions = ["10.12", "10.13"]
            architectures = ["x64"]
            "#,
        );

        let manifest = Manifest::load(&path).unwrap();

        assert_eq!(manifest.source_graph, Some(PathBuf::from("base/runtime.json")));
        assert_eq!(manifest.external_graphs, vec![PathBuf::from("external/runtime.json")]);
        assert_eq!(manifest.infer, vec!["osx.10.14-x64"]);
        assert_eq!(manifest.output.runtime_json, Some(PathBuf::from("runtime.json")));
        assert_eq!(manifest.groups.len(), 2);
        assert_eq!(manifest.groups[0].base_rid, "win");
        assert!(manifest.groups[0].omit_version_delimiter);
        assert_eq!(manifest.groups[1].parent.as_deref(), Some("unix"));
        assert_eq!(manifest.manifest_dir.as_deref(), Some(temp.path()));
    }

    #[test]
    fn test_load_minimal_manifest() {
        let temp = TempDir::new().unwrap();
        let path = write_manifest(
            temp.path(),
            r#"
            [output]
            runtime-json = "runtime.json"

            [[groups]]
            base-rid = "any"
            "#,
        );

        let manifest = Manifest::load(&path).unwrap();
        assert!(manifest.source_graph.is_none());
        assert!(manifest.external_graphs.is_empty());
        assert!(manifest.infer.is_empty());
        assert!(manifest.output.compatibility_map.is_none());
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp = TempDir::new().unwrap();
        let path = write_manifest(temp.path(), "groups = [");

        let err = Manifest::load(&path).unwrap_err();
        let ridgen_err = err.downcast_ref::<RidgenError>().unwrap();
        assert!(matches!(ridgen_err, RidgenError::ManifestParseError { .. }));
    }

    #[test]
    fn test_load_rejects_unknown_group_key() {
        let temp = TempDir::new().unwrap();
        let path = write_manifest(
            temp.path(),
            r#"
            [output]
            runtime-json = "runtime.json"

            [[groups]]
            base-rid = "win"
            versons = ["7"]
            "#,
        );

        let err = Manifest::load(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid TOML syntax"));
    }

    #[test]
    fn test_validate_requires_groups_or_source_graph() {
        let manifest = Manifest::default();

        let err = manifest.validate().unwrap_err();
        let ridgen_err = err.downcast_ref::<RidgenError>().unwrap();
        match ridgen_err {
            RidgenError::ManifestValidationError {
                reason,
            } => {
                assert!(reason.contains("no groups and no source-graph"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_source_graph_only_is_legal() {
        let manifest = Manifest {
            source_graph: Some(PathBuf::from("runtime.json")),
            ..Default::default()
        };

        manifest.validate().unwrap();
    }

    #[test]
    fn test_validate_groups_require_runtime_json() {
        let manifest = Manifest {
            groups: vec![GroupConfig {
                base_rid: "win".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let err = manifest.validate().unwrap_err();
        assert!(err.to_string().contains("output.runtime-json"));
    }

    #[test]
    fn test_validate_infer_requires_runtime_json() {
        let manifest = Manifest {
            source_graph: Some(PathBuf::from("runtime.json")),
            infer: vec!["win11-x64".to_string()],
            ..Default::default()
        };

        let err = manifest.validate().unwrap_err();
        assert!(err.to_string().contains("output.runtime-json"));
    }

    #[test]
    fn test_validate_apply_versions_to_parent_requires_parent() {
        let manifest = Manifest {
            output: OutputConfig {
                runtime_json: Some(PathBuf::from("runtime.json")),
                ..Default::default()
            },
            groups: vec![GroupConfig {
                base_rid: "win".to_string(),
                apply_versions_to_parent: true,
                ..Default::default()
            }],
            ..Default::default()
        };

        let err = manifest.validate().unwrap_err();
        assert!(err.to_string().contains("apply-versions-to-parent"));
    }

    #[test]
    fn test_resolve_path_relative_to_manifest_dir() {
        let manifest = Manifest {
            manifest_dir: Some(PathBuf::from("/project")),
            ..Default::default()
        };

        assert_eq!(
            manifest.resolve_path(Path::new("base/runtime.json")),
            PathBuf::from("/project/base/runtime.json")
        );
        assert_eq!(
            manifest.resolve_path(Path::new("/absolute/runtime.json")),
            PathBuf::from("/absolute/runtime.json")
        );
    }

    #[test]
    fn test_find_manifest_from_walks_up() {
        let temp = TempDir::new().unwrap();
        let path = write_manifest(temp.path(), "");
        let nested = temp.path().join("a/b/c");
        fs::create_dir_all(&nested).unwrap();

        let found = find_manifest_from(nested).unwrap();
        assert_eq!(found, path);
    }

    #[test]
    fn test_find_manifest_from_not_found() {
        let temp = TempDir::new().unwrap();

        let err = find_manifest_from(temp.path().to_path_buf()).unwrap_err();
        let ridgen_err = err.downcast_ref::<RidgenError>().unwrap();
        assert!(matches!(ridgen_err, RidgenError::ManifestNotFound));
    }

    #[test]
    fn test_find_manifest_with_optional_missing_explicit() {
        let err = find_manifest_with_optional(Some(PathBuf::from("/no/such/ridgen.toml")))
            .unwrap_err();
        let ridgen_err = err.downcast_ref::<RidgenError>().unwrap();
        assert!(matches!(ridgen_err, RidgenError::ManifestNotFound));
    }
}
