//! Runtime group templates and their expansion into concrete RIDs.
//!
//! A [`RuntimeGroup`] is a declarative template: a base RID, an optional
//! parent, a set of versions, a set of architectures, extra qualifiers and a
//! few behavior flags. Expanding a group produces every concrete RID the
//! template covers together with its ordered fallback imports, one
//! [`RuntimeDescription`] per RID.
//!
//! Expansion is the generative heart of the tool. The rules fire in a fixed
//! order (base, architectures, versions, versions × architectures, then the
//! same ladder once per qualifier) and each rule derives its import list by
//! dropping one dimension at a time: qualifier first, then architecture,
//! then one version step. Version fallback normally chains each version to
//! the previous one in declaration order; with
//! [`treat_versions_as_compatible`] off every version falls back straight to
//! the unversioned RID instead.
//!
//! Declaration order is meaningful: versions chain in the order they are
//! written, and the emitted RID order follows the template, so group sets
//! stay diffable across regenerations.
//!
//! [`treat_versions_as_compatible`]: RuntimeGroup::treat_versions_as_compatible
//!
//! # Examples
//!
//! ```rust
//! use ridgen_cli::group::{GroupConfig, RuntimeGroup};
//!
//! let config: GroupConfig = toml::from_str(
//!     r#"
//!     base-rid = "osx"
//!     parent = "unix"
//!     versions = ["10.10", "10.11"]
//!     architectures = ["x64"]
//!     "#,
//! )
//! .unwrap();
//!
//! let group = RuntimeGroup::from_config(&config).unwrap();
//! let descriptions = group.runtime_descriptions();
//!
//! let osx_10_11 = descriptions
//!     .iter()
//!     .find(|d| d.runtime_identifier == "osx.10.11")
//!     .unwrap();
//! assert_eq!(osx_10_11.imports, vec!["osx.10.10"]);
//! ```

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::RidgenError;
use crate::graph::{RuntimeDescription, RuntimeGraph};
use crate::rid::{Rid, RuntimeVersion};

/// The synthetic root every platform family ultimately falls back to.
const ROOT_RID: &str = "any";

/// Declarative form of a runtime group as written in the manifest.
///
/// Field names are kebab-case in TOML (`base-rid`, `omit-rid-definitions`).
/// Unknown fields are rejected so typos surface as parse errors instead of
/// silently changing the generated graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct GroupConfig {
    /// The base RID this group generates definitions for.
    pub base_rid: String,
    /// RID the base falls back to, usually the parent platform family.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Version spellings, in fallback-chain order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub versions: Vec<String>,
    /// Architectures to combine with the base and each version.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub architectures: Vec<String>,
    /// Extra qualifiers; each applies independently, they never combine.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_qualifiers: Vec<String>,
    /// Chain each version's fallback to the previous version.
    #[serde(default = "default_true")]
    pub treat_versions_as_compatible: bool,
    /// Render versions without the dot delimiter (`win7` instead of `win.7`).
    #[serde(default)]
    pub omit_version_delimiter: bool,
    /// Make version-specific RIDs also import the version-specific parent.
    #[serde(default)]
    pub apply_versions_to_parent: bool,
    /// Generated RIDs to drop entirely, definitions and references both.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub omit_rids: Vec<String>,
    /// Generated RIDs to drop as definitions while keeping references to them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub omit_rid_definitions: Vec<String>,
    /// Generated RIDs to drop from import lists while keeping their definitions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub omit_rid_references: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            base_rid: String::new(),
            parent: None,
            versions: Vec::new(),
            architectures: Vec::new(),
            additional_qualifiers: Vec::new(),
            treat_versions_as_compatible: true,
            omit_version_delimiter: false,
            apply_versions_to_parent: false,
            omit_rids: Vec::new(),
            omit_rid_definitions: Vec::new(),
            omit_rid_references: Vec::new(),
        }
    }
}

/// A runtime group template, ready to expand.
///
/// Versions and architectures are kept in declaration order with duplicates
/// removed; the order drives both version chaining and the emission order of
/// the generated definitions.
#[derive(Debug, Clone)]
pub struct RuntimeGroup {
    /// The base RID this group generates definitions for.
    pub base_rid: String,
    /// RID the base falls back to.
    pub parent: Option<String>,
    /// Versions in fallback-chain order.
    pub versions: IndexSet<RuntimeVersion>,
    /// Chain each version's fallback to the previous version.
    pub treat_versions_as_compatible: bool,
    /// Render versions without the dot delimiter.
    pub omit_version_delimiter: bool,
    /// Make version-specific RIDs also import the version-specific parent.
    pub apply_versions_to_parent: bool,
    /// Architectures to combine with the base and each version.
    pub architectures: IndexSet<String>,
    /// Extra qualifiers; each applies independently.
    pub additional_qualifiers: Vec<String>,
    /// Generated RIDs to drop entirely.
    pub omit_rids: IndexSet<String>,
    /// Generated RIDs to drop as definitions only.
    pub omit_rid_definitions: IndexSet<String>,
    /// Generated RIDs to drop as references only.
    pub omit_rid_references: IndexSet<String>,
}

/// One generated RID together with its structured imports.
struct RidMapping {
    runtime_identifier: Rid,
    imports: Vec<Rid>,
}

impl RuntimeGroup {
    /// Build a group from its declarative config.
    ///
    /// # Errors
    ///
    /// Returns [`RidgenError::VersionParseError`] when a version spelling in
    /// the config is not a valid runtime version.
    pub fn from_config(config: &GroupConfig) -> Result<Self, RidgenError> {
        let mut versions = IndexSet::new();
        for raw in &config.versions {
            versions.insert(RuntimeVersion::parse(raw)?);
        }

        Ok(Self {
            base_rid: config.base_rid.clone(),
            parent: config.parent.clone(),
            versions,
            treat_versions_as_compatible: config.treat_versions_as_compatible,
            omit_version_delimiter: config.omit_version_delimiter,
            apply_versions_to_parent: config.apply_versions_to_parent,
            architectures: config.architectures.iter().cloned().collect(),
            additional_qualifiers: config.additional_qualifiers.clone(),
            omit_rids: config.omit_rids.iter().cloned().collect(),
            omit_rid_definitions: config.omit_rid_definitions.iter().cloned().collect(),
            omit_rid_references: config.omit_rid_references.iter().cloned().collect(),
        })
    }

    /// Create a new group matching an existing template for parent and
    /// format, with no architectures, versions or omissions.
    ///
    /// Used by RID inference when a requested RID has no version close
    /// enough to extend an existing group.
    #[must_use]
    pub fn from_template(template: &Self) -> Self {
        Self {
            base_rid: template.base_rid.clone(),
            parent: template.parent.clone(),
            versions: IndexSet::new(),
            treat_versions_as_compatible: template.treat_versions_as_compatible,
            omit_version_delimiter: template.omit_version_delimiter,
            apply_versions_to_parent: template.apply_versions_to_parent,
            architectures: IndexSet::new(),
            additional_qualifiers: template.additional_qualifiers.clone(),
            omit_rids: IndexSet::new(),
            omit_rid_definitions: IndexSet::new(),
            omit_rid_references: IndexSet::new(),
        }
    }

    fn create_runtime(
        &self,
        base: &str,
        version: Option<&RuntimeVersion>,
        architecture: Option<&str>,
        qualifier: Option<&str>,
    ) -> Rid {
        Rid {
            base: base.to_string(),
            omit_version_delimiter: self.omit_version_delimiter && version.is_some(),
            version: version.cloned(),
            architecture: architecture.map(str::to_string),
            qualifier: qualifier.map(str::to_string),
        }
    }

    fn non_root_parent(&self) -> Option<&str> {
        self.parent.as_deref().filter(|parent| *parent != ROOT_RID)
    }

    fn rid_mappings(&self) -> Vec<RidMapping> {
        let mut mappings = Vec::new();
        let base = self.base_rid.as_str();

        // base =>
        //      parent
        mappings.push(RidMapping {
            runtime_identifier: self.create_runtime(base, None, None, None),
            imports: match &self.parent {
                Some(parent) => vec![self.create_runtime(parent, None, None, None)],
                None => Vec::new(),
            },
        });

        for architecture in &self.architectures {
            // base + arch =>
            //      base,
            //      parent + arch
            let mut imports = vec![self.create_runtime(base, None, None, None)];

            if let Some(parent) = self.non_root_parent() {
                imports.push(self.create_runtime(parent, None, Some(architecture), None));
            }

            mappings.push(RidMapping {
                runtime_identifier: self.create_runtime(base, None, Some(architecture), None),
                imports,
            });
        }

        let mut last_version: Option<&RuntimeVersion> = None;
        for version in &self.versions {
            // base + version =>
            //      base + lastVersion,
            //      parent + version (optionally)
            let mut imports = vec![self.create_runtime(base, last_version, None, None)];

            if self.apply_versions_to_parent
                && let Some(parent) = &self.parent
            {
                imports.push(self.create_runtime(parent, Some(version), None, None));
            }

            mappings.push(RidMapping {
                runtime_identifier: self.create_runtime(base, Some(version), None, None),
                imports,
            });

            for architecture in &self.architectures {
                // base + version + architecture =>
                //      base + version,
                //      base + lastVersion + architecture,
                //      parent + version + architecture (optionally)
                let mut arch_imports = vec![
                    self.create_runtime(base, Some(version), None, None),
                    self.create_runtime(base, last_version, Some(architecture), None),
                ];

                if self.apply_versions_to_parent
                    && let Some(parent) = &self.parent
                {
                    arch_imports.push(self.create_runtime(
                        parent,
                        Some(version),
                        Some(architecture),
                        None,
                    ));
                }

                mappings.push(RidMapping {
                    runtime_identifier: self.create_runtime(
                        base,
                        Some(version),
                        Some(architecture),
                        None,
                    ),
                    imports: arch_imports,
                });
            }

            if self.treat_versions_as_compatible {
                last_version = Some(version);
            }
        }

        for qualifier in &self.additional_qualifiers {
            // base + qual =>
            //      base,
            //      parent + qual (or the qualifier as its own RID family)
            mappings.push(RidMapping {
                runtime_identifier: self.create_runtime(base, None, None, Some(qualifier)),
                imports: vec![
                    self.create_runtime(base, None, None, None),
                    match self.non_root_parent() {
                        Some(parent) => self.create_runtime(parent, None, None, Some(qualifier)),
                        None => self.create_runtime(qualifier, None, None, None),
                    },
                ],
            });

            for architecture in &self.architectures {
                // base + arch + qualifier =>
                //      base + qualifier,
                //      base + arch,
                //      parent + arch + qualifier
                let mut imports = vec![
                    self.create_runtime(base, None, None, Some(qualifier)),
                    self.create_runtime(base, None, Some(architecture), None),
                ];

                if let Some(parent) = self.non_root_parent() {
                    imports.push(self.create_runtime(
                        parent,
                        None,
                        Some(architecture),
                        Some(qualifier),
                    ));
                }

                mappings.push(RidMapping {
                    runtime_identifier: self.create_runtime(
                        base,
                        None,
                        Some(architecture),
                        Some(qualifier),
                    ),
                    imports,
                });
            }

            // version chaining restarts for each qualifier
            let mut last_version: Option<&RuntimeVersion> = None;
            for version in &self.versions {
                // base + version + qualifier =>
                //      base + version,
                //      base + lastVersion + qualifier,
                //      parent + version + qualifier (optionally)
                let mut imports = vec![
                    self.create_runtime(base, Some(version), None, None),
                    self.create_runtime(base, last_version, None, Some(qualifier)),
                ];

                if self.apply_versions_to_parent
                    && let Some(parent) = &self.parent
                {
                    imports.push(self.create_runtime(parent, Some(version), None, Some(qualifier)));
                }

                mappings.push(RidMapping {
                    runtime_identifier: self.create_runtime(base, Some(version), None, Some(qualifier)),
                    imports,
                });

                for architecture in &self.architectures {
                    // base + version + architecture + qualifier =>
                    //      base + version + qualifier,
                    //      base + version + architecture,
                    //      base + version,
                    //      base + lastVersion + architecture + qualifier,
                    //      parent + version + architecture + qualifier (optionally)
                    let mut arch_imports = vec![
                        self.create_runtime(base, Some(version), None, Some(qualifier)),
                        self.create_runtime(base, Some(version), Some(architecture), None),
                        self.create_runtime(base, Some(version), None, None),
                        self.create_runtime(
                            base,
                            last_version,
                            Some(architecture),
                            Some(qualifier),
                        ),
                    ];

                    if self.apply_versions_to_parent
                        && let Some(parent) = &self.parent
                    {
                        arch_imports.push(self.create_runtime(
                            parent,
                            Some(version),
                            Some(architecture),
                            Some(qualifier),
                        ));
                    }

                    mappings.push(RidMapping {
                        runtime_identifier: self.create_runtime(
                            base,
                            Some(version),
                            Some(architecture),
                            Some(qualifier),
                        ),
                        imports: arch_imports,
                    });
                }

                if self.treat_versions_as_compatible {
                    last_version = Some(version);
                }
            }
        }

        mappings
    }

    /// Expand the group into runtime descriptions, applying the omission sets.
    ///
    /// RIDs listed in `omit_rids` or `omit_rid_definitions` are not defined;
    /// imports listed in `omit_rids` or `omit_rid_references` are filtered
    /// out of every import list.
    #[must_use]
    pub fn runtime_descriptions(&self) -> Vec<RuntimeDescription> {
        let mut descriptions = Vec::new();

        for mapping in self.rid_mappings() {
            let rid = mapping.runtime_identifier.to_string();

            if self.omit_rids.contains(&rid) || self.omit_rid_definitions.contains(&rid) {
                continue;
            }

            let imports = mapping
                .imports
                .iter()
                .map(ToString::to_string)
                .filter(|import| {
                    !self.omit_rids.contains(import) && !self.omit_rid_references.contains(import)
                })
                .collect();

            descriptions.push(RuntimeDescription::new(rid, imports));
        }

        descriptions
    }

    /// Expand the group into a runtime graph.
    #[must_use]
    pub fn runtime_graph(&self) -> RuntimeGraph {
        let mut graph = RuntimeGraph::new();
        for description in self.runtime_descriptions() {
            graph.add_runtime(description);
        }
        graph
    }
}
