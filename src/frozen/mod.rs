//! The generated `version.rs` module: writing it when the version changed and loading it back.
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::update;

mod parse;
pub mod write;

pub use write::{generate, Options, Outcome};

/// The contents of a generated version file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrozenVersion {
    /// The version as recorded in the file.
    pub frozen: String,
    /// The recorded version with its development marker refreshed from the working copy the file is in.
    pub version: String,
    pub major: u32,
    pub minor: u32,
    pub bugfix: u32,
    pub release: bool,
    pub debug: bool,
}

impl FrozenVersion {
    /// Read the version file at `path`, and refresh its version just like the generated `version()` function would.
    /// Releases are never refreshed.
    ///
    /// Call this again whenever the file may have been rewritten; nothing is cached.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).with_context(|| format!("Could not read '{}'", path.display()))?;
        let mut frozen = Self::from_source(&text).with_context(|| format!("Invalid version file at '{}'", path.display()))?;
        if !frozen.release {
            frozen.version = update::update_git_devstr(&frozen.frozen, Some(containing_dir(path).as_path()));
        }
        Ok(frozen)
    }

    /// Parse the generated Rust source in `text`, without refreshing the version.
    pub fn from_source(text: &str) -> anyhow::Result<Self> {
        parse::frozen_version(text)
    }
}

fn containing_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_owned(),
        _ => PathBuf::from("."),
    }
}
