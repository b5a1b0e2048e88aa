//! Persisted format versions and the canvas decode strategy each one needs.
//!
//! Every snapshot carries the version of the application that wrote it.
//! Only the canvas layout depends on it today; a future layout change adds
//! an entry to [`CANVAS_ENCODINGS`] instead of another branch in the decoder.

use std::fmt;
use std::str::FromStr;

use semver::Version;

/// Last version that stored whiteboards at half resolution.
pub const LEGACY_CANVAS_THRESHOLD: &str = "0.6.1-3";

/// Version tag written by this build.
pub const FORMAT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Canvas layouts, keyed by the newest version that wrote them, oldest first.
/// Versions newer than every entry use [`CanvasEncoding::Native`].
pub const CANVAS_ENCODINGS: &[(&str, CanvasEncoding)] = &[
    (LEGACY_CANVAS_THRESHOLD, CanvasEncoding::HalfResolution),
];

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FormatVersion(Version);

impl FormatVersion {
    /// Parse a version tag; a leading `v` is accepted.
    pub fn parse(tag: &str) -> Result<Self, semver::Error> {
        let tag = tag.trim();
        let tag = tag.strip_prefix('v').unwrap_or(tag);
        Version::parse(tag).map(Self)
    }

    /// Parse a stored tag, treating anything unreadable as the current format.
    pub fn parse_lenient(tag: &str) -> Self {
        Self::parse(tag).unwrap_or_else(|err| {
            log::warn!("unreadable format version {:?} ({}); assuming current", tag, err);
            Self::current()
        })
    }

    pub fn current() -> Self {
        Self(Version::new(
            env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap_or(0),
            env!("CARGO_PKG_VERSION_MINOR").parse().unwrap_or(0),
            env!("CARGO_PKG_VERSION_PATCH").parse().unwrap_or(0),
        ))
    }

    pub fn as_semver(&self) -> &Version {
        &self.0
    }

    /// Canvas layout used by snapshots written at this version.
    pub fn canvas_encoding(&self) -> CanvasEncoding {
        CanvasEncoding::for_version(self)
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FormatVersion {
    type Err = semver::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// How stored canvas rows map onto canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasEncoding {
    /// One stored bit per canvas pixel.
    Native,
    /// Each stored bit covers a 2x2 block of canvas pixels.
    HalfResolution,
}

impl CanvasEncoding {
    pub fn for_version(version: &FormatVersion) -> Self {
        CANVAS_ENCODINGS
            .iter()
            .find(|(newest, _)| {
                Version::parse(newest)
                    .map(|newest| version.as_semver() <= &newest)
                    .unwrap_or(false)
            })
            .map(|(_, encoding)| *encoding)
            .unwrap_or(CanvasEncoding::Native)
    }

    /// Canvas pixels per stored pixel, along each axis.
    pub fn scale(self) -> usize {
        match self {
            CanvasEncoding::Native => 1,
            CanvasEncoding::HalfResolution => 2,
        }
    }
}
