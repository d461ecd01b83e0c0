use std::{fmt, str::FromStr};

use anyhow::Context;

/// The numeric components of a version string like `1.2.3-r45` or `0.1dev`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    /// `0` if the version string only has two components.
    pub bugfix: u32,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.bugfix)
    }
}

impl FromStr for Version {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        split(s)
    }
}

/// Split `version` into its major, minor and bugfix numbers.
///
/// Any development marker (`-r<count>` or `-git-<hash>`) is ignored, as is every occurrence of `dev`
/// along with a dash right before it, as in `0.3.0-dev`.
pub fn split(version: &str) -> anyhow::Result<Version> {
    let cleaned = strip_devstr(version).replace("-dev", "").replace("dev", "");
    let mut components = cleaned.split('.');
    let mut component = |name: &str| -> anyhow::Result<Option<u32>> {
        components
            .next()
            .map(|c| {
                c.parse::<u32>()
                    .with_context(|| format!("{name} component '{c}' of version '{version}' is not a number"))
            })
            .transpose()
    };
    let major = component("major")?.with_context(|| format!("version '{version}' is empty"))?;
    let minor = component("minor")?.with_context(|| format!("version '{version}' lacks a minor component"))?;
    let bugfix = component("bugfix")?.unwrap_or(0);
    Ok(Version { major, minor, bugfix })
}

/// Return `version` without its development marker, if it has one.
pub fn strip_devstr(version: &str) -> &str {
    let version = strip_git_hash(version);
    strip_revision_count(version)
}

/// Cut `version` right before `-git-`, if present.
pub fn strip_git_hash(version: &str) -> &str {
    version.split_once(GIT_MARKER).map_or(version, |(base, _hash)| base)
}

/// Cut `version` right before the first `-r` that is followed by a digit.
pub fn strip_revision_count(version: &str) -> &str {
    version
        .match_indices(REVISION_MARKER)
        .find(|(pos, marker)| {
            version[pos + marker.len()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_digit())
        })
        .map_or(version, |(pos, _)| &version[..pos])
}

/// Returns `true` if `version` denotes a release, i.e. it isn't marked as development version.
pub fn is_release(version: &str) -> bool {
    !version.contains("dev")
}

pub(crate) const GIT_MARKER: &str = "-git-";
pub(crate) const REVISION_MARKER: &str = "-r";
