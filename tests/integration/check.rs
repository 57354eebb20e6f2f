//! Tests for the `check` command.

use crate::common::TestProject;

const MANIFEST: &str = r#"
[output]
runtime-json = "runtime.json"
compatibility-map = "runtime.compat.json"

[[groups]]
base-rid = "any"

[[groups]]
base-rid = "linux"
parent = "any"
versions = ["1.0"]
architectures = ["x64", "arm64"]
"#;

/// Test that check fails when artifacts were never generated
#[test]
fn test_check_fails_before_first_generate() {
    let project = TestProject::new().unwrap();
    project.write_manifest(MANIFEST).unwrap();

    let output = project.run_ridgen(&["check"]).unwrap();
    assert!(!output.success);
    assert!(output.stderr.contains("does not exist"));
    assert!(output.stderr.contains("runtime.json"));
    // Check never creates the missing artifact.
    assert!(!project.has_file("runtime.json"));
    assert!(!project.has_file("runtime.compat.json"));
}

/// Test that check passes on freshly generated artifacts
#[test]
fn test_check_passes_after_generate() {
    let project = TestProject::new().unwrap();
    project.write_manifest(MANIFEST).unwrap();

    let output = project.run_ridgen(&["generate"]).unwrap();
    assert!(output.success, "stderr: {}", output.stderr);

    let output = project.run_ridgen(&["check"]).unwrap();
    assert!(output.success, "stderr: {}", output.stderr);
    assert!(output.stdout.contains("up to date"));
}

/// Test that check detects manifest changes without rewriting anything
#[test]
fn test_check_detects_drift_after_manifest_change() {
    let project = TestProject::new().unwrap();
    project.write_manifest(MANIFEST).unwrap();
    project.run_ridgen(&["generate"]).unwrap();

    // Grow the graph in the manifest; the artifacts are now stale.
    project
        .write_manifest(&MANIFEST.replace(r#"versions = ["1.0"]"#, r#"versions = ["1.0", "2.0"]"#))
        .unwrap();

    let before = project.read_file("runtime.json").unwrap();
    let output = project.run_ridgen(&["check"]).unwrap();
    assert!(!output.success);
    assert!(output.stderr.contains("out of date"));
    assert_eq!(before, project.read_file("runtime.json").unwrap());
}

/// Test that check compares content, not formatting
#[test]
fn test_check_ignores_reformatting() {
    let project = TestProject::new().unwrap();
    project.write_manifest(MANIFEST).unwrap();
    project.run_ridgen(&["generate"]).unwrap();

    // Compact the JSON; the parsed graph is unchanged.
    let pretty = project.read_file("runtime.json").unwrap();
    let value: serde_json::Value = serde_json::from_str(&pretty).unwrap();
    project
        .write_file("runtime.json", &serde_json::to_string(&value).unwrap())
        .unwrap();

    let output = project.run_ridgen(&["check"]).unwrap();
    assert!(output.success, "stderr: {}", output.stderr);
}

/// Test that check flags hand-edited artifact content
#[test]
fn test_check_detects_hand_edits() {
    let project = TestProject::new().unwrap();
    project.write_manifest(MANIFEST).unwrap();
    project.run_ridgen(&["generate"]).unwrap();

    project
        .write_file("runtime.json", r##"{"runtimes":{"any":{"#import":[]}}}"##)
        .unwrap();

    let output = project.run_ridgen(&["check"]).unwrap();
    assert!(!output.success);
    assert!(output.stderr.contains("out of date"));
    assert!(output.stderr.contains("runtime.json"));
}

/// Test that check reports every stale artifact in one run
#[test]
fn test_check_reports_all_stale_artifacts() {
    let project = TestProject::new().unwrap();
    project.write_manifest(MANIFEST).unwrap();

    let output = project.run_ridgen(&["check"]).unwrap();
    assert!(!output.success);
    assert!(output.stderr.contains("runtime.json"));
    assert!(output.stderr.contains("runtime.compat.json"));
    assert!(output.stderr.contains("2 error(s)"));
}
