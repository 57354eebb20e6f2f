//! Error handling for ridgen
//!
//! This module provides the error types and user-friendly error reporting for the
//! ridgen graph generator. The error system is designed around two core principles:
//! 1. **Strongly-typed errors** for precise error handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! The error system consists of two main types:
//! - [`RidgenError`] - Enumerated error types for all failure cases in ridgen
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! # Error Categories
//!
//! ridgen errors are organized into several categories:
//! - **Parsing**: [`RidgenError::RidParseError`], [`RidgenError::VersionParseError`]
//! - **Configuration**: [`RidgenError::ManifestNotFound`], [`RidgenError::ManifestParseError`], etc.
//! - **Graph construction**: [`RidgenError::ConflictingDefinition`], [`RidgenError::DanglingImport`], etc.
//! - **Check mode**: [`RidgenError::ArtifactMissing`], [`RidgenError::ArtifactOutOfDate`]
//!
//! # Error Conversion and Context
//!
//! Common standard library errors are automatically converted to ridgen errors:
//! - [`std::io::Error`] → [`RidgenError::IoError`]
//! - [`toml::de::Error`] → [`RidgenError::TomlError`]
//! - [`serde_json::Error`] → [`RidgenError::JsonError`]
//!
//! Use [`user_friendly_error`] to convert any error into a user-friendly format with
//! contextual suggestions.
//!
//! # Examples
//!
//! ## Basic Error Handling
//!
//! ```rust,no_run
//! use ridgen_cli::core::{RidgenError, user_friendly_error};
//!
//! fn load_manifest() -> Result<(), RidgenError> {
//!     // Simulate a missing manifest
//!     Err(RidgenError::ManifestNotFound)
//! }
//!
//! match load_manifest() {
//!     Ok(_) => println!("Loaded!"),
//!     Err(e) => {
//!         let ctx = user_friendly_error(anyhow::Error::from(e));
//!         ctx.display(); // Shows colored error with suggestions
//!     }
//! }
//! ```
//!
//! ## Creating Error Context Manually
//!
//! ```rust,no_run
//! use ridgen_cli::core::{RidgenError, ErrorContext};
//!
//! let error = RidgenError::ManifestNotFound;
//! let context = ErrorContext::new(error)
//!     .with_suggestion("Create a ridgen.toml file in your project directory")
//!     .with_details("ridgen searches for ridgen.toml in current and parent directories");
//!
//! // Display with colors in terminal
//! context.display();
//!
//! // Or get as string for logging
//! let message = format!("{}", context);
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for ridgen operations
///
/// This enum represents all possible errors that can occur while expanding,
/// merging, and validating runtime identifier graphs. Each variant is designed
/// to provide specific context about the failure and enable appropriate error
/// handling strategies.
///
/// # Design Philosophy
///
/// - **Specific Error Types**: Each error variant represents a specific failure mode
/// - **Rich Context**: Errors include relevant details like paths, RIDs, and import lists
/// - **User-Friendly**: Error messages are written for end users, not just developers
/// - **Actionable**: Most errors provide clear guidance on how to resolve the issue
///
/// Parse errors ([`RidParseError`], [`VersionParseError`]) abort the run as soon
/// as they are hit. Graph-semantic errors ([`ConflictingDefinition`],
/// [`DanglingImport`], [`DoubleDefinition`], [`InferenceError`] and the check-mode
/// variants) are accumulated by the generator so a single run reports every
/// problem in the input at once.
///
/// [`RidParseError`]: RidgenError::RidParseError
/// [`VersionParseError`]: RidgenError::VersionParseError
/// [`ConflictingDefinition`]: RidgenError::ConflictingDefinition
/// [`DanglingImport`]: RidgenError::DanglingImport
/// [`DoubleDefinition`]: RidgenError::DoubleDefinition
/// [`InferenceError`]: RidgenError::InferenceError
#[derive(Error, Debug)]
pub enum RidgenError {
    /// Runtime identifier failed to parse
    ///
    /// This error occurs when a RID string contains an empty segment, such as
    /// a leading delimiter (`-x64`), doubled delimiters (`linux--x64`), or a
    /// base that starts with a digit.
    #[error("Invalid runtime identifier '{rid}': empty segment at position {position}")]
    RidParseError {
        /// The runtime identifier that failed to parse
        rid: String,
        /// Byte offset of the offending segment
        position: usize,
    },

    /// Runtime version failed to parse
    ///
    /// Versions are dotted numeric strings with up to four components
    /// (`10.14`, `8.1.2.3`) or a bare major number (`8`).
    #[error("Invalid runtime version '{version}'")]
    VersionParseError {
        /// The version string that failed to parse
        version: String,
    },

    /// Manifest file (ridgen.toml) not found
    ///
    /// ridgen searches for ridgen.toml starting from the current working directory
    /// and walking up the directory tree, similar to how git searches for .git.
    #[error("Manifest file ridgen.toml not found in current directory or any parent directory")]
    ManifestNotFound,

    /// Manifest parsing error
    #[error("Invalid manifest file syntax in {file}")]
    ManifestParseError {
        /// Path to the manifest file that failed to parse
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// Manifest validation error
    #[error("Manifest validation failed: {reason}")]
    ManifestValidationError {
        /// Reason why manifest validation failed
        reason: String,
    },

    /// Runtime graph file missing
    ///
    /// Raised when a configured source or external graph path does not exist.
    #[error("Runtime graph file not found: {path}")]
    GraphNotFound {
        /// Path where the graph file was expected
        path: String,
    },

    /// Runtime graph parsing error
    #[error("Invalid runtime graph syntax in {file}")]
    GraphParseError {
        /// Path to the graph file that failed to parse
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// Two sources define the same RID with different import lists
    ///
    /// A RID may be defined by more than one group (or by a group and the
    /// source graph) only when the ordered import lists are identical.
    #[error(
        "Group '{group}' defines RID '{rid}' with imports [{new_imports}] which differ from existing imports [{existing_imports}]; to redefine a RID, suppress the other definition with omit-rid-definitions"
    )]
    ConflictingDefinition {
        /// Base RID of the group whose expansion collided
        group: String,
        /// The runtime identifier defined twice
        rid: String,
        /// Imports produced by the colliding group
        new_imports: String,
        /// Imports already present in the graph
        existing_imports: String,
    },

    /// A RID imports another RID that is defined nowhere
    #[error("Runtime '{rid}' imports '{import}' which is not defined")]
    DanglingImport {
        /// The runtime identifier holding the reference
        rid: String,
        /// The missing import target
        import: String,
    },

    /// A RID is defined both in this graph and in an external graph
    #[error("Runtime '{rid}' is defined in both this runtime graph and {external_path}")]
    DoubleDefinition {
        /// The runtime identifier defined on both sides
        rid: String,
        /// The external graph that also defines it
        external_path: String,
    },

    /// The final graph contains an import cycle
    #[error("Cyclic import chain detected: {chain}")]
    CyclicImport {
        /// The cycle rendered as `a → b → a`
        chain: String,
    },

    /// A RID could not be folded into any group
    #[error("Cannot infer runtime '{rid}': {reason}")]
    InferenceError {
        /// The runtime identifier that could not be inferred
        rid: String,
        /// Why no group could absorb it
        reason: String,
    },

    /// A requested RID is not defined in the generated graph
    #[error("Runtime '{rid}' is not defined in the graph")]
    UnknownRuntime {
        /// The runtime identifier that was requested
        rid: String,
    },

    /// Check mode: a configured output file does not exist yet
    #[error("Generated file does not exist: {path}; run 'ridgen generate' to create it")]
    ArtifactMissing {
        /// Path of the missing artifact
        path: String,
    },

    /// Check mode: a configured output file differs from the generated content
    #[error("Generated file is out of date: {path}; run 'ridgen generate' to refresh it")]
    ArtifactOutOfDate {
        /// Path of the stale artifact
        path: String,
    },

    /// The run finished with accumulated errors
    #[error("Runtime graph generation failed with {count} error(s)")]
    GenerationFailed {
        /// Number of errors collected during the run
        count: usize,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for RidgenError {
    fn clone(&self) -> Self {
        match self {
            Self::RidParseError {
                rid,
                position,
            } => Self::RidParseError {
                rid: rid.clone(),
                position: *position,
            },
            Self::VersionParseError {
                version,
            } => Self::VersionParseError {
                version: version.clone(),
            },
            Self::ManifestNotFound => Self::ManifestNotFound,
            Self::ManifestParseError {
                file,
                reason,
            } => Self::ManifestParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::ManifestValidationError {
                reason,
            } => Self::ManifestValidationError {
                reason: reason.clone(),
            },
            Self::GraphNotFound {
                path,
            } => Self::GraphNotFound {
                path: path.clone(),
            },
            Self::GraphParseError {
                file,
                reason,
            } => Self::GraphParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::ConflictingDefinition {
                group,
                rid,
                new_imports,
                existing_imports,
            } => Self::ConflictingDefinition {
                group: group.clone(),
                rid: rid.clone(),
                new_imports: new_imports.clone(),
                existing_imports: existing_imports.clone(),
            },
            Self::DanglingImport {
                rid,
                import,
            } => Self::DanglingImport {
                rid: rid.clone(),
                import: import.clone(),
            },
            Self::DoubleDefinition {
                rid,
                external_path,
            } => Self::DoubleDefinition {
                rid: rid.clone(),
                external_path: external_path.clone(),
            },
            Self::CyclicImport {
                chain,
            } => Self::CyclicImport {
                chain: chain.clone(),
            },
            Self::InferenceError {
                rid,
                reason,
            } => Self::InferenceError {
                rid: rid.clone(),
                reason: reason.clone(),
            },
            Self::UnknownRuntime {
                rid,
            } => Self::UnknownRuntime {
                rid: rid.clone(),
            },
            Self::ArtifactMissing {
                path,
            } => Self::ArtifactMissing {
                path: path.clone(),
            },
            Self::ArtifactOutOfDate {
                path,
            } => Self::ArtifactOutOfDate {
                path: path.clone(),
            },
            Self::GenerationFailed {
                count,
            } => Self::GenerationFailed {
                count: *count,
            },
            // For errors that don't implement Clone, convert to Other
            Self::IoError(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::TomlError(e) => Self::Other {
                message: format!("TOML parsing error: {e}"),
            },
            Self::JsonError(e) => Self::Other {
                message: format!("JSON error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// `ErrorContext` wraps a [`RidgenError`] and adds optional user-friendly messages,
/// suggestions for resolution, and additional details. This is the primary way
/// ridgen presents errors to CLI users.
///
/// # Display Format
///
/// When displayed, errors show:
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context about the error in yellow (optional)
/// 3. **Suggestion**: Actionable steps to resolve the issue in green (optional)
///
/// # Examples
///
/// ```rust,no_run
/// use ridgen_cli::core::{RidgenError, ErrorContext};
///
/// let context = ErrorContext::new(RidgenError::ManifestNotFound)
///     .with_suggestion("Create a ridgen.toml file in your project directory")
///     .with_details("ridgen searches current and parent directories for ridgen.toml");
///
/// println!("{}", context);
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying ridgen error
    pub error: RidgenError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a [`RidgenError`]
    ///
    /// This creates a basic error context with no additional suggestions or details.
    /// Use the builder methods [`with_suggestion`] and [`with_details`] to add
    /// user-friendly information.
    ///
    /// [`with_suggestion`]: ErrorContext::with_suggestion
    /// [`with_details`]: ErrorContext::with_details
    #[must_use]
    pub const fn new(error: RidgenError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    ///
    /// Suggestions should be actionable steps that users can take to resolve
    /// the error. They are displayed in green in the terminal to draw attention.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    ///
    /// Details provide context about why the error occurred or what it means.
    /// They are displayed in yellow in the terminal.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// This method prints the error, details, and suggestion to stderr using
    /// color coding:
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// This function is the main entry point for converting arbitrary errors into
/// user-friendly error messages for CLI display. It recognizes common error types
/// and provides appropriate context and suggestions.
///
/// # Error Recognition
///
/// The function recognizes and provides specific handling for:
/// - [`RidgenError`] variants with tailored suggestions
/// - [`std::io::Error`] with filesystem-specific guidance
/// - [`toml::de::Error`] with TOML syntax help
/// - Generic errors with the full error chain appended
///
/// # Examples
///
/// ```rust,no_run
/// use ridgen_cli::core::{RidgenError, user_friendly_error};
///
/// let error = RidgenError::ManifestNotFound;
/// let context = user_friendly_error(anyhow::Error::from(error));
///
/// context.display(); // Shows manifest setup suggestions
/// ```
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    // Check for specific error types and provide helpful suggestions
    if let Some(ridgen_error) = error.downcast_ref::<RidgenError>() {
        return create_error_context(ridgen_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(RidgenError::Other {
                    message: format!("Permission denied: {io_error}"),
                })
                .with_suggestion(
                    "Check file ownership, or remove the read-only attribute from the target file",
                )
                .with_details(
                    "This error occurs when ridgen doesn't have permission to read or write files",
                );
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(RidgenError::Other {
                    message: format!("File not found: {io_error}"),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct")
                .with_details(
                    "This error occurs when a required file or directory cannot be found",
                );
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(RidgenError::ManifestParseError {
            file: "ridgen.toml".to_string(),
            reason: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax in your ridgen.toml file. Verify quotes, brackets, and indentation")
        .with_details("TOML parsing errors are usually caused by syntax issues like missing quotes or mismatched brackets");
    }

    // Generic error - include the full error chain for better diagnostics
    let mut message = error.to_string();

    // Append error chain if available
    let chain: Vec<String> = error
        .chain()
        .skip(1) // Skip the root cause which is already in to_string()
        .map(std::string::ToString::to_string)
        .collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(RidgenError::Other {
        message,
    })
}

/// Create appropriate [`ErrorContext`] with suggestions for specific ridgen errors
///
/// This internal function maps each [`RidgenError`] variant to an appropriate
/// [`ErrorContext`] with tailored suggestions and details. It's used by
/// [`user_friendly_error`] to provide consistent, helpful error messages.
fn create_error_context(error: RidgenError) -> ErrorContext {
    match &error {
        RidgenError::ManifestNotFound => ErrorContext::new(RidgenError::ManifestNotFound)
            .with_suggestion("Create a ridgen.toml file in your project directory, or pass --manifest-path")
            .with_details("ridgen looks for ridgen.toml in the current directory and parent directories up to the filesystem root"),

        RidgenError::ManifestParseError { file, reason } => ErrorContext::new(RidgenError::ManifestParseError {
            file: file.clone(),
            reason: reason.clone(),
        })
            .with_suggestion(format!(
                "Check the TOML syntax in {file}. Common issues: missing quotes, unmatched brackets, invalid characters"
            ))
            .with_details("Use a TOML validator or check the ridgen documentation for the manifest format"),

        RidgenError::RidParseError { .. } => ErrorContext::new(error.clone())
            .with_suggestion("Runtime identifiers have the form <base>[.<version>][-<architecture>][-<qualifier>]")
            .with_details("Segments may not be empty and the base may not start with a digit"),

        RidgenError::VersionParseError { .. } => ErrorContext::new(error.clone())
            .with_suggestion("Runtime versions are dotted numeric strings like '10.14' or a bare major number like '8', with at most four components"),

        RidgenError::ConflictingDefinition { group, rid, .. } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Add '{rid}' to omit-rid-definitions for group '{group}' to keep the existing definition"
            ))
            .with_details("Overlapping RID definitions are only allowed when their ordered import lists are identical"),

        RidgenError::DanglingImport { import, .. } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Add a group that defines '{import}', or list the graph that defines it under external-graphs"
            )),

        RidgenError::DoubleDefinition { rid, .. } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Remove '{rid}' from one side, or suppress it here with omit-rid-definitions"
            ))
            .with_details("External graphs may be referenced but must not redefine RIDs from this graph"),

        RidgenError::GraphNotFound { .. } => ErrorContext::new(error.clone())
            .with_suggestion("Check the source-graph and external-graphs paths in ridgen.toml; they resolve relative to the manifest"),

        RidgenError::InferenceError { .. } => ErrorContext::new(error.clone())
            .with_details("Inferred RIDs need a version or an architecture, and a group with a matching base RID must already exist"),

        RidgenError::UnknownRuntime { .. } => ErrorContext::new(error.clone())
            .with_suggestion("Check the RID spelling, or add a group (or inferred RID) that defines it"),

        RidgenError::ArtifactMissing { .. } => ErrorContext::new(error.clone())
            .with_suggestion("Run 'ridgen generate' to create it")
            .with_details("Check mode never writes files; it only verifies that committed files match the generated graph"),

        RidgenError::ArtifactOutOfDate { .. } => ErrorContext::new(error.clone())
            .with_suggestion("Run 'ridgen generate' to update it and commit the result")
            .with_details("The groups in ridgen.toml produce different content than what is on disk"),

        RidgenError::CyclicImport { chain } => ErrorContext::new(error.clone())
            .with_suggestion("Review the group parents to remove the cycle")
            .with_details(format!(
                "Import cycle: {chain}. Fallback resolution requires an acyclic graph"
            )),

        _ => ErrorContext::new(error.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = RidgenError::ManifestNotFound;
        assert_eq!(
            error.to_string(),
            "Manifest file ridgen.toml not found in current directory or any parent directory"
        );

        let error = RidgenError::RidParseError {
            rid: "-x64".to_string(),
            position: 0,
        };
        assert_eq!(
            error.to_string(),
            "Invalid runtime identifier '-x64': empty segment at position 0"
        );

        let error = RidgenError::DanglingImport {
            rid: "win7-x64".to_string(),
            import: "win7".to_string(),
        };
        assert_eq!(error.to_string(), "Runtime 'win7-x64' imports 'win7' which is not defined");
    }

    #[test]
    fn test_error_context() {
        let ctx = ErrorContext::new(RidgenError::ManifestNotFound)
            .with_suggestion("Create a ridgen.toml file")
            .with_details("Searched up to the filesystem root");

        assert_eq!(ctx.suggestion, Some("Create a ridgen.toml file".to_string()));
        assert_eq!(ctx.details, Some("Searched up to the filesystem root".to_string()));
    }

    #[test]
    fn test_error_context_display() {
        let ctx = ErrorContext::new(RidgenError::ManifestNotFound).with_suggestion("Create one");

        let display = format!("{ctx}");
        assert!(display.contains("ridgen.toml not found"));
        assert!(display.contains("Create one"));
    }

    #[test]
    fn test_user_friendly_error_ridgen_error() {
        let error = RidgenError::ArtifactOutOfDate {
            path: "runtime.json".to_string(),
        };
        let ctx = user_friendly_error(anyhow::Error::from(error));

        match ctx.error {
            RidgenError::ArtifactOutOfDate {
                ..
            } => {}
            _ => panic!("Expected ArtifactOutOfDate"),
        }
        assert!(ctx.suggestion.unwrap().contains("ridgen generate"));
    }

    #[test]
    fn test_user_friendly_error_not_found() {
        use std::io::{Error, ErrorKind};

        let io_error = Error::new(ErrorKind::NotFound, "file not found");
        let ctx = user_friendly_error(anyhow::Error::from(io_error));

        assert!(ctx.suggestion.is_some());
        assert!(ctx.details.is_some());
    }

    #[test]
    fn test_user_friendly_error_toml_parse() {
        let toml_str = "invalid = toml {";
        let result: Result<toml::Value, _> = toml::from_str(toml_str);

        if let Err(e) = result {
            let ctx = user_friendly_error(anyhow::Error::from(e));

            match ctx.error {
                RidgenError::ManifestParseError {
                    ..
                } => {}
                _ => panic!("Expected ManifestParseError"),
            }
            assert!(ctx.suggestion.unwrap().contains("TOML syntax"));
        }
    }

    #[test]
    fn test_user_friendly_error_generic() {
        let error = anyhow::anyhow!("Generic error");
        let ctx = user_friendly_error(error);

        match ctx.error {
            RidgenError::Other {
                message,
            } => {
                assert_eq!(message, "Generic error");
            }
            _ => panic!("Expected Other error"),
        }
    }

    #[test]
    fn test_create_error_context_conflicting_definition() {
        let ctx = create_error_context(RidgenError::ConflictingDefinition {
            group: "win".to_string(),
            rid: "win7-x64".to_string(),
            new_imports: "win7;win-x64".to_string(),
            existing_imports: "win7".to_string(),
        });
        assert!(ctx.suggestion.is_some());
        let suggestion = ctx.suggestion.unwrap();
        assert!(suggestion.contains("omit-rid-definitions"));
        assert!(suggestion.contains("win7-x64"));
    }

    #[test]
    fn test_create_error_context_dangling_import() {
        let ctx = create_error_context(RidgenError::DanglingImport {
            rid: "osx.10.12-x64".to_string(),
            import: "osx.10.12".to_string(),
        });
        assert!(ctx.suggestion.unwrap().contains("osx.10.12"));
    }

    #[test]
    fn test_error_clone() {
        let error1 = RidgenError::ManifestNotFound;
        let error2 = error1.clone();
        assert_eq!(error1.to_string(), error2.to_string());

        let error1 = RidgenError::UnknownRuntime {
            rid: "win10-x64".to_string(),
        };
        let error2 = error1.clone();
        assert_eq!(error1.to_string(), error2.to_string());
    }

    #[test]
    fn test_from_io_error() {
        use std::io::Error;

        let io_error = Error::other("test error");
        let ridgen_error = RidgenError::from(io_error);

        match ridgen_error {
            RidgenError::IoError(_) => {}
            _ => panic!("Expected IoError"),
        }
    }

    #[test]
    fn test_error_display_all_variants() {
        let errors = vec![
            RidgenError::VersionParseError {
                version: "x.y".to_string(),
            },
            RidgenError::ManifestValidationError {
                reason: "no groups".to_string(),
            },
            RidgenError::GraphNotFound {
                path: "base/runtime.json".to_string(),
            },
            RidgenError::GraphParseError {
                file: "runtime.json".to_string(),
                reason: "trailing comma".to_string(),
            },
            RidgenError::DoubleDefinition {
                rid: "linux-x64".to_string(),
                external_path: "external/runtime.json".to_string(),
            },
            RidgenError::CyclicImport {
                chain: "a -> b -> a".to_string(),
            },
            RidgenError::InferenceError {
                rid: "foo".to_string(),
                reason: "it has no architecture nor version".to_string(),
            },
            RidgenError::GenerationFailed {
                count: 3,
            },
        ];

        for error in errors {
            let display = format!("{error}");
            assert!(!display.is_empty());
        }
    }
}
