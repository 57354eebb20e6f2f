//! Runtime identifier parsing and rendering.
//!
//! A runtime identifier (RID) names a platform a package asset applies to.
//! RIDs are structured strings of the form
//! `<base>[.<version>][-<architecture>][-<qualifier>]`, for example
//! `osx.10.12-x64`, `win7-x86` or `linux-musl-x64`.
//!
//! The grammar is more permissive than it first looks:
//! - A digit inside the base starts the version, so `win7` parses as base
//!   `win` with version `7` and renders back without a dot. The
//!   [`omit_version_delimiter`] flag records which spelling was used.
//! - A dash inside the base is only an architecture separator when no dot
//!   appears later in the string, so `ubuntu.16.04-x64` keeps `ubuntu` as the
//!   base while `linux-x64` splits at the dash.
//! - The architecture and qualifier delimiters are the same character; the
//!   second dash after the version starts the qualifier, which is how
//!   `linux-musl-x64` is modeled (base `linux`, architecture `musl`,
//!   qualifier `x64`).
//!
//! Parsing and rendering round-trip: for any string accepted by
//! [`Rid::parse`], rendering the parsed value reproduces the input (modulo a
//! trailing delimiter, which is dropped).
//!
//! [`omit_version_delimiter`]: Rid::omit_version_delimiter
//!
//! # Examples
//!
//! ```rust
//! use ridgen_cli::rid::Rid;
//!
//! let rid = Rid::parse("osx.10.12-x64").unwrap();
//! assert_eq!(rid.base, "osx");
//! assert_eq!(rid.version.as_ref().unwrap().as_str(), "10.12");
//! assert_eq!(rid.architecture.as_deref(), Some("x64"));
//! assert_eq!(rid.to_string(), "osx.10.12-x64");
//!
//! // Version written without a delimiter
//! let rid = Rid::parse("win7-x86").unwrap();
//! assert_eq!(rid.base, "win");
//! assert!(rid.omit_version_delimiter);
//! assert_eq!(rid.to_string(), "win7-x86");
//! ```

pub mod version;

pub use version::RuntimeVersion;

use std::fmt;
use std::str::FromStr;

use crate::core::RidgenError;

/// Delimiter between the base and a version spelled with a dot.
const VERSION_DELIMITER: char = '.';
/// Delimiter before the architecture and qualifier segments.
const PART_DELIMITER: char = '-';

/// Parser position, doubling as the slot index for the captured segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Base = 0,
    Version,
    Architecture,
    Qualifier,
}

/// A structured runtime identifier.
///
/// Equality and hashing compare all components including
/// [`omit_version_delimiter`], so `osx10.12` and `osx.10.12` are different
/// RIDs even though they share every segment value.
///
/// [`omit_version_delimiter`]: Rid::omit_version_delimiter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rid {
    /// The operating system or platform family, such as `win` or `linux`.
    pub base: String,
    /// True when the version follows the base without a dot (`win7`).
    /// Always false when there is no version.
    pub omit_version_delimiter: bool,
    /// Platform version, absent for version-neutral RIDs like `linux-x64`.
    pub version: Option<RuntimeVersion>,
    /// Processor architecture, such as `x64` or `arm64`.
    pub architecture: Option<String>,
    /// Trailing qualifier, such as `aot` or the `x64` in `linux-musl-x64`.
    pub qualifier: Option<String>,
}

fn record<'a>(
    rid: &'a str,
    parts: &mut [Option<&'a str>; 4],
    slot: ParseState,
    start: usize,
    end: usize,
) -> Result<(), RidgenError> {
    if end == start {
        return Err(RidgenError::RidParseError {
            rid: rid.to_string(),
            position: start,
        });
    }
    parts[slot as usize] = Some(&rid[start..end]);
    Ok(())
}

impl Rid {
    /// Parse a runtime identifier string into its components.
    ///
    /// # Errors
    ///
    /// Returns [`RidgenError::RidParseError`] when a segment is empty (a
    /// leading or doubled delimiter, or a base that starts with a digit),
    /// and [`RidgenError::VersionParseError`] when the version segment is
    /// not a valid dotted numeric version.
    pub fn parse(rid: &str) -> Result<Self, RidgenError> {
        let mut parts: [Option<&str>; 4] = [None; 4];
        let mut omit_version_delimiter = true;
        let mut state = ParseState::Base;
        let mut part_start = 0;

        for (i, current) in rid.char_indices() {
            match state {
                ParseState::Base => {
                    // A digit ends the base and starts the version
                    if current == VERSION_DELIMITER || current.is_ascii_digit() {
                        record(rid, &mut parts, state, part_start, i)?;
                        part_start = i;
                        if current == VERSION_DELIMITER {
                            omit_version_delimiter = false;
                            part_start = i + 1;
                        }
                        state = ParseState::Version;
                    } else if current == PART_DELIMITER {
                        // A dash with a version dot later in the string is
                        // part of the base itself
                        if rid[i..].contains(VERSION_DELIMITER) {
                            continue;
                        }
                        record(rid, &mut parts, state, part_start, i)?;
                        part_start = i + 1;
                        state = ParseState::Architecture;
                    }
                }
                ParseState::Version => {
                    if current == PART_DELIMITER {
                        record(rid, &mut parts, state, part_start, i)?;
                        part_start = i + 1;
                        state = ParseState::Architecture;
                    }
                }
                ParseState::Architecture => {
                    if current == PART_DELIMITER {
                        record(rid, &mut parts, state, part_start, i)?;
                        part_start = i + 1;
                        state = ParseState::Qualifier;
                    }
                }
                ParseState::Qualifier => {}
            }
        }

        // A trailing delimiter leaves an empty final part, which is dropped
        if part_start < rid.len() {
            record(rid, &mut parts, state, part_start, rid.len())?;
        }

        let base = parts[ParseState::Base as usize]
            .ok_or_else(|| RidgenError::RidParseError {
                rid: rid.to_string(),
                position: 0,
            })?
            .to_string();

        let version = match parts[ParseState::Version as usize] {
            Some(raw) => Some(RuntimeVersion::parse(raw)?),
            None => None,
        };
        if version.is_none() {
            omit_version_delimiter = false;
        }

        Ok(Self {
            base,
            omit_version_delimiter,
            version,
            architecture: parts[ParseState::Architecture as usize].map(str::to_string),
            qualifier: parts[ParseState::Qualifier as usize].map(str::to_string),
        })
    }
}

impl fmt::Display for Rid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)?;

        if let Some(version) = &self.version {
            if !self.omit_version_delimiter {
                write!(f, "{VERSION_DELIMITER}")?;
            }
            write!(f, "{version}")?;
        }

        if let Some(architecture) = &self.architecture {
            write!(f, "{PART_DELIMITER}{architecture}")?;
        }

        if let Some(qualifier) = &self.qualifier {
            write!(f, "{PART_DELIMITER}{qualifier}")?;
        }

        Ok(())
    }
}

impl FromStr for Rid {
    type Err = RidgenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
