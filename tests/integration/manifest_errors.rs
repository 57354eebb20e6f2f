//! Tests for manifest discovery and manifest error reporting.

use crate::common::TestProject;

const MINIMAL_MANIFEST: &str = r#"
[output]
runtime-json = "runtime.json"

[[groups]]
base-rid = "any"
"#;

/// Test that a missing manifest suggests creating one
#[test]
fn test_missing_manifest_suggests_creating_one() {
    let project = TestProject::new().unwrap();

    let output = project.run_ridgen(&["generate"]).unwrap();
    assert!(!output.success);
    assert!(output.stderr.contains("ridgen.toml not found"));
    assert!(output.stderr.contains("Create a ridgen.toml"));
}

/// Test that discovery walks up from a nested working directory
#[test]
fn test_manifest_discovery_walks_up_from_subdirectory() {
    let project = TestProject::new().unwrap();
    project.write_manifest(MINIMAL_MANIFEST).unwrap();

    let output = project
        .run_ridgen_in("nested/deep", &["generate"])
        .unwrap();
    assert!(output.success, "stderr: {}", output.stderr);

    // Artifacts land next to the manifest, not in the working directory.
    assert!(project.has_file("runtime.json"));
    assert!(!project.has_file("nested/deep/runtime.json"));
}

/// Test that --manifest-path overrides discovery
#[test]
fn test_manifest_path_flag_overrides_discovery() {
    let project = TestProject::new().unwrap();
    project
        .write_file("configs/custom.toml", MINIMAL_MANIFEST)
        .unwrap();

    let output = project
        .run_ridgen(&["generate", "--manifest-path", "configs/custom.toml"])
        .unwrap();
    assert!(output.success, "stderr: {}", output.stderr);
    assert!(project.has_file("configs/runtime.json"));
}

/// Test that broken TOML syntax is reported as a manifest error
#[test]
fn test_invalid_toml_syntax_is_reported() {
    let project = TestProject::new().unwrap();
    project.write_manifest("this is not [valid toml").unwrap();

    let output = project.run_ridgen(&["generate"]).unwrap();
    assert!(!output.success);
    assert!(output.stderr.contains("Invalid manifest file syntax"));
}

/// Test that unknown group keys are rejected rather than ignored
#[test]
fn test_unknown_group_key_is_rejected() {
    let project = TestProject::new().unwrap();
    project
        .write_manifest(
            r#"
[output]
runtime-json = "runtime.json"

[[groups]]
base-rid = "any"
bogus-key = true
"#,
        )
        .unwrap();

    let output = project.run_ridgen(&["generate"]).unwrap();
    assert!(!output.success);
    assert!(output.stderr.contains("Invalid manifest file syntax"));
}

/// Test that groups without a runtime-json output are rejected
#[test]
fn test_groups_without_runtime_json_output_rejected() {
    let project = TestProject::new().unwrap();
    project
        .write_manifest(
            r#"
[[groups]]
base-rid = "any"
"#,
        )
        .unwrap();

    let output = project.run_ridgen(&["generate"]).unwrap();
    assert!(!output.success);
    assert!(output.stderr.contains("Manifest validation failed"));
    assert!(output.stderr.contains("output.runtime-json must be set"));
}

/// Test that a manifest with nothing to generate is rejected
#[test]
fn test_empty_manifest_is_rejected() {
    let project = TestProject::new().unwrap();
    project.write_manifest("").unwrap();

    let output = project.run_ridgen(&["generate"]).unwrap();
    assert!(!output.success);
    assert!(output.stderr.contains("nothing to generate"));
}
