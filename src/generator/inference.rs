//! Inference of runtime identifiers that no group declares directly.
//!
//! A manifest can ask for concrete RIDs (say `osx.10.14-x64`) without
//! spelling out a matching group. Inference folds each requested RID
//! into the declared groups before expansion: when a group with the same
//! base already covers the architecture, the requested version is
//! appended to the closest group; when none does, a new group is
//! synthesized from an existing one as a template. Groups added here are
//! visible to later requests in the same run, so a sequence like
//! `osx.11.0-arm64`, `osx.12.0-arm64` builds on its own output.
//!
//! A requested RID must carry a version or an architecture; a bare base
//! is ambiguous and is reported rather than guessed at.

use tracing::debug;

use crate::core::RidgenError;
use crate::generator::RunReport;
use crate::group::RuntimeGroup;
use crate::rid::{Rid, RuntimeVersion};

/// Folds `runtime_identifiers` into `groups`, mutating existing groups
/// or appending synthesized ones.
///
/// Returns an error only when a requested RID fails to parse; semantic
/// problems (no version and no architecture, unknown base RID) are
/// recorded on `report` and processing continues with the next request.
pub fn add_inferred_runtime_identifiers(
    groups: &mut Vec<RuntimeGroup>,
    runtime_identifiers: &[String],
    report: &mut RunReport,
) -> Result<(), RidgenError> {
    for runtime_identifier in runtime_identifiers {
        let rid = Rid::parse(runtime_identifier)?;

        if rid.version.is_none() && rid.architecture.is_none() {
            report.record(RidgenError::InferenceError {
                rid: runtime_identifier.clone(),
                reason: "it has no version nor architecture".to_string(),
            });
            continue;
        }

        let candidates: Vec<usize> = groups
            .iter()
            .enumerate()
            .filter(|(_, group)| group.base_rid == rid.base)
            .map(|(index, _)| index)
            .collect();

        if candidates.is_empty() {
            let known_bases: Vec<&str> =
                groups.iter().map(|group| group.base_rid.as_str()).collect();
            report.record(RidgenError::InferenceError {
                rid: runtime_identifier.clone(),
                reason: format!(
                    "no group exists with base RID '{}' (known bases: {})",
                    rid.base,
                    known_bases.join(", ")
                ),
            });
            continue;
        }

        match closest_version_group(groups, &candidates, &rid) {
            Some((index, closest)) => {
                // A version-only mismatch means the closest group covers
                // the base and architecture but not this exact version.
                // A RID with an architecture and no version is already
                // satisfied by the match itself.
                if let Some(requested) = &rid.version {
                    if *requested != closest {
                        debug!(
                            "inferring {runtime_identifier}: adding version {requested} to group '{}'",
                            groups[index].base_rid
                        );
                        groups[index].versions.insert(requested.clone());
                    }
                }
            }
            None => {
                let mut group = RuntimeGroup::from_template(&groups[candidates[0]]);
                if let Some(architecture) = &rid.architecture {
                    group.architectures.insert(architecture.clone());
                }
                if let Some(version) = &rid.version {
                    group.versions.insert(version.clone());
                }
                debug!(
                    "inferring {runtime_identifier}: new group from template '{}'",
                    group.base_rid
                );
                groups.push(group);
            }
        }
    }

    Ok(())
}

/// Scans the candidate groups for the version closest to the request.
///
/// Candidates whose architecture set does not contain the requested
/// architecture are skipped entirely. Among the rest, the first version
/// encountered seeds the scan and is then only replaced by a version
/// that is both no greater than the requested one and greater than the
/// current closest. Returns `None` when no candidate contributes any
/// version, which is the signal to synthesize a fresh group.
fn closest_version_group(
    groups: &[RuntimeGroup],
    candidates: &[usize],
    rid: &Rid,
) -> Option<(usize, RuntimeVersion)> {
    let mut closest: Option<(usize, RuntimeVersion)> = None;

    for &index in candidates {
        let group = &groups[index];
        if let Some(architecture) = &rid.architecture {
            if !group.architectures.contains(architecture) {
                continue;
            }
        }

        for version in &group.versions {
            let replace = match (&closest, &rid.version) {
                (None, _) => true,
                (Some((_, current)), Some(requested)) => {
                    version <= requested && version > current
                }
                (Some(_), None) => false,
            };
            if replace {
                closest = Some((index, version.clone()));
            }
        }
    }

    closest
}
