//! Core types and functionality for ridgen
//!
//! This module forms the foundation of ridgen's type system. It defines the error
//! contracts used throughout the codebase and the user-facing error presentation
//! layer shared by every CLI command.
//!
//! # Architecture Overview
//!
//! ridgen uses an error handling system designed for both developer ergonomics
//! and end-user experience:
//! - **Strongly-typed errors** ([`RidgenError`]) for precise error handling in code
//! - **User-friendly contexts** ([`ErrorContext`]) with actionable suggestions for CLI users
//! - **Automatic error conversion** from common standard library errors
//! - **Contextual suggestions** tailored to specific error conditions
//!
//! Parse failures abort immediately, but graph-semantic failures (conflicting
//! definitions, dangling imports, stale artifacts) are accumulated by the
//! generator so that one run reports every problem in the manifest at once.
//!
//! # Modules
//!
//! ## `error` - Comprehensive Error Handling
//!
//! The error module provides:
//! - [`RidgenError`] - Enumerated error types covering all ridgen failure modes
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to user-friendly format
//!
//! # Examples
//!
//! ## Error Handling Pattern
//!
//! ```rust
//! use ridgen_cli::core::{RidgenError, user_friendly_error};
//! use anyhow::Result;
//!
//! fn example_operation() -> Result<String> {
//!     // Simulate an operation that might fail
//!     Err(RidgenError::ManifestNotFound.into())
//! }
//!
//! fn handle_operation() {
//!     match example_operation() {
//!         Ok(result) => println!("Success: {}", result),
//!         Err(e) => {
//!             // Convert to user-friendly error and display
//!             let friendly = user_friendly_error(e);
//!             friendly.display(); // Shows colored error with suggestions
//!         }
//!     }
//! }
//! ```
//!
//! ## Error Context Creation
//!
//! ```rust
//! use ridgen_cli::core::{RidgenError, ErrorContext};
//!
//! fn create_helpful_error() -> ErrorContext {
//!     ErrorContext::new(RidgenError::ManifestNotFound)
//!         .with_suggestion("Create a ridgen.toml file in your project directory")
//!         .with_details("ridgen searches current and parent directories for ridgen.toml")
//! }
//! ```
//!
//! # Integration with Other Modules
//!
//! - **CLI commands** use [`RidgenError`] and [`ErrorContext`] for user feedback
//! - **RID and version parsing** return [`RidgenError`] variants for malformed input
//! - **Graph merge and validation** report conflicts through dedicated variants
//! - **Check mode** signals missing or stale artifacts with typed errors so CI
//!   wrappers can match on them

pub mod error;

pub use error::{user_friendly_error, ErrorContext, RidgenError};
