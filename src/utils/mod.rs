//! Cross-platform utilities and helpers
//!
//! This module provides the file system helpers shared by the graph writers
//! and CLI commands. All utilities are designed to work consistently across
//! Windows, macOS, and Linux.
//!
//! # Modules
//!
//! - [`fs`] - File system operations with atomic writes and permission handling
//!
//! # Example
//!
//! ```rust,no_run
//! use ridgen_cli::utils::{atomic_write, ensure_dir};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! // Ensure directory exists
//! ensure_dir(Path::new("artifacts"))?;
//!
//! // Write file atomically
//! atomic_write(Path::new("artifacts/runtime.json"), b"{}")?;
//! # Ok(())
//! # }
//! ```

pub mod fs;

pub use fs::{atomic_write, ensure_dir, ensure_writable};
