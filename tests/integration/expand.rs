//! Tests for the `expand` command.

use predicates::prelude::*;

use crate::common::TestProject;

const OSX_MANIFEST: &str = r#"
[output]
runtime-json = "runtime.json"

[[groups]]
base-rid = "osx"
versions = ["10.12", "10.13"]
architectures = ["x64"]
"#;

/// Test that expand prints the fallback chain in precedence order
#[test]
fn test_expand_prints_the_precedence_chain_in_order() {
    let project = TestProject::new().unwrap();
    project.write_manifest(OSX_MANIFEST).unwrap();

    let output = project.run_ridgen(&["expand", "osx.10.13-x64"]).unwrap();
    assert!(output.success, "stderr: {}", output.stderr);
    assert_eq!(
        output.stdout,
        "osx.10.13-x64\nosx.10.13\nosx.10.12-x64\nosx.10.12\nosx-x64\nosx\n"
    );
}

/// Test that a RID with no imports expands to itself alone
#[test]
fn test_expand_of_a_root_rid_is_itself() {
    let project = TestProject::new().unwrap();
    project.write_manifest(OSX_MANIFEST).unwrap();

    let output = project.run_ridgen(&["expand", "osx"]).unwrap();
    assert!(output.success, "stderr: {}", output.stderr);
    assert_eq!(output.stdout, "osx\n");
}

/// Test that expand builds the graph in memory without writing artifacts
#[test]
fn test_expand_does_not_write_artifacts() {
    let project = TestProject::new().unwrap();
    project.write_manifest(OSX_MANIFEST).unwrap();

    let output = project.run_ridgen(&["expand", "osx-x64"]).unwrap();
    assert!(output.success, "stderr: {}", output.stderr);
    assert!(!project.has_file("runtime.json"));
}

/// Test expand help output
#[test]
fn test_expand_help() {
    let mut cmd = assert_cmd::Command::cargo_bin("ridgen").unwrap();
    cmd.arg("expand")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("<RID>"));
}

/// Test that expanding an unknown RID fails with a spelling hint
#[test]
fn test_expand_unknown_rid_fails() {
    let project = TestProject::new().unwrap();
    project.write_manifest(OSX_MANIFEST).unwrap();

    let output = project.run_ridgen(&["expand", "osx.10.99-x64"]).unwrap();
    assert!(!output.success);
    assert!(output.stderr.contains("not defined in the graph"));
    assert!(output.stderr.contains("Check the RID spelling"));
}
