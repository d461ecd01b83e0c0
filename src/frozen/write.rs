use std::{io::Write, path::Path};

use anyhow::{bail, Context};

use crate::{frozen::FrozenVersion, utils::will, version};

#[derive(Debug, Default, Clone, Copy)]
pub struct Options {
    /// Log what would be written instead of writing it.
    pub dry_run: bool,
}

/// What [`generate()`] did.
#[derive(Debug)]
pub enum Outcome {
    /// The file already holds the requested version, release and debug flags. It wasn't touched.
    Unchanged(FrozenVersion),
    /// The file was rewritten, and this is what it holds now.
    Written(FrozenVersion),
    /// The file would have been rewritten with the given content if this wasn't a dry-run.
    WouldWrite { content: String },
}

/// Regenerate the version file of `package` at `path` if it doesn't already hold `version`, `release` and `debug`.
///
/// If `debug` is `None`, the value currently in the file is kept, or `false` if there is no file.
/// A file that can't be loaded is treated as if it didn't exist.
pub fn generate(
    package: &str,
    path: &Path,
    version: &str,
    release: bool,
    debug: Option<bool>,
    Options { dry_run }: Options,
) -> anyhow::Result<Outcome> {
    let current = match FrozenVersion::load(path) {
        Ok(current) => Some(current),
        Err(err) => {
            log::debug!("Treating version file as absent: {err:#}");
            None
        }
    };
    let debug = debug.unwrap_or_else(|| current.as_ref().is_some_and(|c| c.debug));

    if let Some(current) = current {
        if current.version == version && current.release == release && current.debug == debug {
            log::debug!("Version file at '{}' is up to date", path.display());
            return Ok(Outcome::Unchanged(current));
        }
    }

    let content = source(package, version, release, debug, jiff::Timestamp::now())?;
    log::info!("{} freeze version number to '{}'", will(dry_run), path.display());
    if dry_run {
        return Ok(Outcome::WouldWrite { content });
    }

    std::fs::File::create(path)
        .and_then(|mut file| file.write_all(content.as_bytes()))
        .with_context(|| format!("Could not write version file to '{}'", path.display()))?;
    Ok(Outcome::Written(FrozenVersion::load(path)?))
}

/// Produce the Rust source of a version file.
///
/// Releases are frozen as they are, while the `version()` function of development versions refreshes
/// the development marker from the working copy.
pub fn source(
    package: &str,
    verstr: &str,
    release: bool,
    debug: bool,
    timestamp: jiff::Timestamp,
) -> anyhow::Result<String> {
    if let Some(c) = verstr.chars().find(|&c| matches!(c, '"' | '\\') || c.is_control()) {
        bail!("Version '{}' contains {c:?} which can't be frozen", verstr.escape_debug());
    }
    let version::Version { major, minor, bugfix } = version::split(verstr)?;
    let version_fn = if release {
        "/// The frozen release version.
pub fn version() -> String {
    VERSION.to_owned()
}"
    } else {
        r#"/// The frozen version with its development marker refreshed from the working copy, if there is one.
pub fn version() -> String {
    freeze_version::update_git_devstr(VERSION, Some(std::path::Path::new(env!("CARGO_MANIFEST_DIR"))))
}"#
    };
    Ok(format!(
        r#"// Autogenerated by freeze-version for {package} on {timestamp}

pub const VERSION: &str = "{verstr}";

pub const MAJOR: u32 = {major};
pub const MINOR: u32 = {minor};
pub const BUGFIX: u32 = {bugfix};

pub const RELEASE: bool = {release};
pub const DEBUG: bool = {debug};

{version_fn}
"#
    ))
}
