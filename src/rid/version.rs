//! Runtime version parsing and ordering.
//!
//! Runtime identifier versions are not semantic versions. They are dotted
//! numeric strings with up to four components (`10.14.3`), and a bare major
//! number (`8`) is legal and distinct from its two-part spelling (`8.0`).
//! This module provides [`RuntimeVersion`], which preserves the original
//! spelling for display while comparing and hashing numerically.
//!
//! # Examples
//!
//! ```rust
//! use ridgen_cli::rid::RuntimeVersion;
//!
//! let bare: RuntimeVersion = "8".parse().unwrap();
//! let dotted: RuntimeVersion = "8.0".parse().unwrap();
//!
//! // A bare major renders without the implied ".0"
//! assert_eq!(bare.to_string(), "8");
//!
//! // ...and sorts strictly before the dotted spelling
//! assert!(bare < dotted);
//! assert_ne!(bare, dotted);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::RidgenError;

/// Maximum number of dotted components in a runtime version.
const MAX_PARTS: usize = 4;

/// A runtime identifier version such as `8`, `8.1` or `10.14.3`.
///
/// The original spelling is kept for rendering, but equality, ordering and
/// hashing ignore it and use the numeric components plus a flag recording
/// whether a minor component was written. A bare major number is normalized
/// to `major.0` internally so that `8` and `8.1` order numerically, while
/// the flag keeps `8` and `8.0` distinct (`8` sorts first).
///
/// Ordering compares components elementwise with missing components ranking
/// below present ones, so `10.14` sorts before `10.14.0`.
#[derive(Debug, Clone)]
pub struct RuntimeVersion {
    raw: String,
    parts: Vec<u32>,
    has_minor: bool,
}

impl RuntimeVersion {
    /// Parse a version from its string spelling.
    ///
    /// # Errors
    ///
    /// Returns [`RidgenError::VersionParseError`] if the string is empty,
    /// contains a non-numeric or empty component, or has more than four
    /// components.
    pub fn parse(version: &str) -> Result<Self, RidgenError> {
        let invalid = || RidgenError::VersionParseError {
            version: version.to_string(),
        };

        if version.is_empty() {
            return Err(invalid());
        }

        let has_minor = version.contains('.');
        let mut parts = Vec::new();
        for segment in version.split('.') {
            if segment.is_empty() {
                return Err(invalid());
            }
            let value: u32 = segment.parse().map_err(|_| invalid())?;
            parts.push(value);
        }
        if parts.len() > MAX_PARTS {
            return Err(invalid());
        }
        if !has_minor {
            // A bare major compares like "major.0" without rendering the ".0"
            parts.push(0);
        }

        Ok(Self {
            raw: version.to_string(),
            parts,
            has_minor,
        })
    }

    /// The original spelling, exactly as parsed.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the spelling included a minor component.
    #[must_use]
    pub const fn has_minor(&self) -> bool {
        self.has_minor
    }
}

impl PartialEq for RuntimeVersion {
    fn eq(&self, other: &Self) -> bool {
        self.parts == other.parts && self.has_minor == other.has_minor
    }
}

impl Eq for RuntimeVersion {}

impl Hash for RuntimeVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.parts.hash(state);
        self.has_minor.hash(state);
    }
}

impl PartialOrd for RuntimeVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RuntimeVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        // Vec<u32> ordering is elementwise with the shorter sequence ranking
        // first on a tie, which matches missing-component-sorts-lowest
        self.parts
            .cmp(&other.parts)
            .then(self.has_minor.cmp(&other.has_minor))
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for RuntimeVersion {
    type Err = RidgenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for RuntimeVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for RuntimeVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
