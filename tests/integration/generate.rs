//! Tests for the `generate` command.

use predicates::prelude::*;
use serde_json::Value;

use crate::common::TestProject;

const WINDOWS_MANIFEST: &str = r#"
[output]
runtime-json = "runtime.json"
compatibility-map = "runtime.compat.json"
directed-graph = "runtime.dot"

[[groups]]
base-rid = "any"

[[groups]]
base-rid = "win"
parent = "any"
versions = ["7", "8"]
architectures = ["x64"]
omit-version-delimiter = true
"#;

/// Test that generate writes every configured artifact
#[test]
fn test_generate_writes_all_configured_artifacts() {
    let project = TestProject::new().unwrap();
    project.write_manifest(WINDOWS_MANIFEST).unwrap();

    let output = project.run_ridgen(&["generate"]).unwrap();
    assert!(output.success, "stderr: {}", output.stderr);
    assert!(output.stdout.contains("✓"));
    assert!(output.stdout.contains("runtime definitions"));

    assert!(project.has_file("runtime.json"));
    assert!(project.has_file("runtime.compat.json"));
    assert!(project.has_file("runtime.dot"));
}

/// Test that version chains respect the omitted delimiter format
#[test]
fn test_generate_expands_version_chains() {
    let project = TestProject::new().unwrap();
    project.write_manifest(WINDOWS_MANIFEST).unwrap();

    let output = project.run_ridgen(&["generate"]).unwrap();
    assert!(output.success, "stderr: {}", output.stderr);

    let graph: Value =
        serde_json::from_str(&project.read_file("runtime.json").unwrap()).unwrap();
    let runtimes = &graph["runtimes"];

    // The delimiter is omitted, so win7 not win.7.
    assert!(runtimes.get("win.7").is_none());
    assert_eq!(runtimes["win7"]["#import"], serde_json::json!(["win"]));
    // Versions chain to their predecessor, architectures drop one
    // dimension at a time.
    assert_eq!(runtimes["win8"]["#import"], serde_json::json!(["win7"]));
    assert_eq!(
        runtimes["win8-x64"]["#import"],
        serde_json::json!(["win8", "win7-x64"])
    );
    assert_eq!(runtimes["win"]["#import"], serde_json::json!(["any"]));
    assert_eq!(runtimes["any"]["#import"], serde_json::json!([]));
}

/// Test that two runs over the same manifest produce identical bytes
#[test]
fn test_generate_output_is_deterministic() {
    let project = TestProject::new().unwrap();
    project.write_manifest(WINDOWS_MANIFEST).unwrap();

    let output = project.run_ridgen(&["generate"]).unwrap();
    assert!(output.success, "stderr: {}", output.stderr);
    let first = project.read_file("runtime.json").unwrap();
    let first_map = project.read_file("runtime.compat.json").unwrap();

    let output = project.run_ridgen(&["generate"]).unwrap();
    assert!(output.success, "stderr: {}", output.stderr);
    assert_eq!(first, project.read_file("runtime.json").unwrap());
    assert_eq!(first_map, project.read_file("runtime.compat.json").unwrap());
}

/// Test that RID definitions are written in sorted order
#[test]
fn test_generate_writes_sorted_keys() {
    let project = TestProject::new().unwrap();
    project.write_manifest(WINDOWS_MANIFEST).unwrap();

    project.run_ridgen(&["generate"]).unwrap();
    let raw = project.read_file("runtime.json").unwrap();

    let any = raw.find("\"any\"").unwrap();
    let win = raw.find("\"win\"").unwrap();
    let win7 = raw.find("\"win7\"").unwrap();
    let win7_x64 = raw.find("\"win7-x64\"").unwrap();
    assert!(any < win && win < win7 && win7 < win7_x64);
}

/// Test that inferred RIDs land in the generated graph
#[test]
fn test_generate_folds_inferred_rids_into_the_graph() {
    let project = TestProject::new().unwrap();
    project
        .write_manifest(
            r#"
infer = ["osx.10.14-x64"]

[output]
runtime-json = "runtime.json"

[[groups]]
base-rid = "osx"
versions = ["10.12", "10.13"]
architectures = ["x64"]
"#,
        )
        .unwrap();

    let output = project.run_ridgen(&["generate"]).unwrap();
    assert!(output.success, "stderr: {}", output.stderr);

    let graph: Value =
        serde_json::from_str(&project.read_file("runtime.json").unwrap()).unwrap();
    let runtimes = &graph["runtimes"];

    assert_eq!(
        runtimes["osx.10.14"]["#import"],
        serde_json::json!(["osx.10.13"])
    );
    assert_eq!(
        runtimes["osx.10.14-x64"]["#import"],
        serde_json::json!(["osx.10.14", "osx.10.13-x64"])
    );
}

/// Test that conflicting group definitions fail with a remediation hint
#[test]
fn test_generate_reports_conflicting_definitions() {
    let project = TestProject::new().unwrap();
    project
        .write_manifest(
            r#"
[output]
runtime-json = "runtime.json"

[[groups]]
base-rid = "any"

[[groups]]
base-rid = "other"
parent = "any"

[[groups]]
base-rid = "base"
parent = "any"

[[groups]]
base-rid = "base"
parent = "other"
"#,
        )
        .unwrap();

    let output = project.run_ridgen(&["generate"]).unwrap();
    assert!(!output.success);
    assert!(output.stderr.contains("defines RID 'base'"));
    assert!(output.stderr.contains("omit-rid-definitions"));
    assert!(output.stderr.contains("generation failed"));
}

/// Test that a dangling import fails the run but still writes the graph
#[test]
fn test_generate_reports_dangling_imports_after_writing() {
    let project = TestProject::new().unwrap();
    project
        .write_manifest(
            r#"
[output]
runtime-json = "runtime.json"

[[groups]]
base-rid = "linux"
parent = "unix"
"#,
        )
        .unwrap();

    let output = project.run_ridgen(&["generate"]).unwrap();
    assert!(!output.success);
    assert!(output.stderr.contains("imports 'unix' which is not defined"));
    // The graph is still written so the failure can be inspected.
    assert!(project.has_file("runtime.json"));
}

/// Test that the compatibility map holds full fallback closures
#[test]
fn test_generate_compatibility_map_contents() {
    let project = TestProject::new().unwrap();
    project.write_manifest(WINDOWS_MANIFEST).unwrap();

    project.run_ridgen(&["generate"]).unwrap();

    let map: Value =
        serde_json::from_str(&project.read_file("runtime.compat.json").unwrap()).unwrap();
    assert_eq!(
        map["win8-x64"],
        serde_json::json!(["win8-x64", "win8", "win7-x64", "win7", "win-x64", "win", "any"])
    );
}

/// Test generate help output
#[test]
fn test_generate_help() {
    let mut cmd = assert_cmd::Command::cargo_bin("ridgen").unwrap();
    cmd.arg("generate")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--manifest-path"))
        .stdout(predicate::str::contains("--verbose"));
}

/// Test that the DOT export names the import edges
#[test]
fn test_generate_directed_graph_contents() {
    let project = TestProject::new().unwrap();
    project.write_manifest(WINDOWS_MANIFEST).unwrap();

    project.run_ridgen(&["generate"]).unwrap();

    let dot = project.read_file("runtime.dot").unwrap();
    assert!(dot.starts_with("digraph"));
    assert!(dot.contains("\"win8-x64\" -> \"win8\""));
    assert!(dot.contains("\"win\" -> \"any\""));
}
