//! Common test utilities for ridgen integration tests
//!
//! This module consolidates frequently used test patterns to reduce
//! duplication and improve test maintainability.

// Allow dead code because these utilities are used across different test files
// and not all utilities are used in every test file
#![allow(dead_code)]

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Captured output of one ridgen invocation.
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

/// An isolated project directory for driving the ridgen binary.
///
/// Each project lives in its own temporary directory, so manifest
/// discovery cannot escape into the developer's real filesystem and
/// tests can run in parallel without interfering.
pub struct TestProject {
    _temp: TempDir,
    project_dir: PathBuf,
}

impl TestProject {
    /// Create a fresh empty project directory.
    pub fn new() -> Result<Self> {
        let temp = TempDir::new().context("Failed to create temp directory")?;
        let project_dir = temp.path().join("project");
        fs::create_dir_all(&project_dir)?;
        Ok(Self {
            _temp: temp,
            project_dir,
        })
    }

    /// The project directory commands run in.
    pub fn path(&self) -> &Path {
        &self.project_dir
    }

    /// Write the ridgen.toml manifest.
    pub fn write_manifest(&self, content: &str) -> Result<()> {
        let manifest_path = self.project_dir.join("ridgen.toml");
        fs::write(&manifest_path, content)
            .with_context(|| format!("Failed to write manifest to {manifest_path:?}"))?;
        Ok(())
    }

    /// Write an arbitrary file under the project directory.
    pub fn write_file(&self, name: &str, content: &str) -> Result<()> {
        let path = self.project_dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(())
    }

    /// Read a file under the project directory.
    pub fn read_file(&self, name: &str) -> Result<String> {
        let path = self.project_dir.join(name);
        fs::read_to_string(&path).with_context(|| format!("Failed to read {path:?}"))
    }

    /// Whether a file exists under the project directory.
    pub fn has_file(&self, name: &str) -> bool {
        self.project_dir.join(name).exists()
    }

    /// Run the ridgen binary with the given arguments in the project
    /// directory.
    pub fn run_ridgen(&self, args: &[&str]) -> Result<CommandOutput> {
        self.run_in(&self.project_dir, args)
    }

    /// Run the ridgen binary from a subdirectory of the project.
    ///
    /// Used to exercise manifest discovery walking up the directory
    /// tree.
    pub fn run_ridgen_in(&self, subdir: &str, args: &[&str]) -> Result<CommandOutput> {
        let dir = self.project_dir.join(subdir);
        fs::create_dir_all(&dir)?;
        self.run_in(&dir, args)
    }

    fn run_in(&self, dir: &Path, args: &[&str]) -> Result<CommandOutput> {
        let ridgen_binary = env!("CARGO_BIN_EXE_ridgen");
        let output = Command::new(ridgen_binary)
            .args(args)
            .current_dir(dir)
            .env("NO_COLOR", "1")
            .output()
            .context("Failed to run ridgen command")?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }
}
