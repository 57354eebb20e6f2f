//! Integration test suite for ridgen
//!
//! End-to-end tests that drive the compiled binary against real
//! manifests in temporary project directories and inspect the files it
//! writes. These tests run quickly and are executed in CI on every
//! commit.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **generate**: Artifact generation, inference and determinism
//! - **check**: Drift detection without writes
//! - **expand**: Fallback chain queries
//! - **manifest_errors**: Manifest discovery and validation failures

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

// Integration tests
mod check;
mod expand;
mod generate;
mod manifest_errors;
