//! Integration with cargo, for use in build scripts or with a `Cargo.toml` at hand.
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{frozen, update, version};

/// The package whose version should be frozen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    /// The base version, like `0.3dev` or `1.2.0`.
    pub version: String,
    /// The directory containing `Cargo.toml`.
    pub manifest_dir: PathBuf,
    /// The build profile if known, like `debug` or `release`.
    pub profile: Option<String>,
}

impl Package {
    /// Read the package from the environment cargo sets up when running a build script.
    pub fn from_env() -> anyhow::Result<Self> {
        let var = |name: &str| std::env::var(name).with_context(|| format!("{name} must be set by cargo"));
        Ok(Package {
            name: var("CARGO_PKG_NAME")?,
            version: var("CARGO_PKG_VERSION")?,
            manifest_dir: var("CARGO_MANIFEST_DIR")?.into(),
            profile: std::env::var("PROFILE").ok(),
        })
    }

    /// Read name and version from the manifest at `path`.
    pub fn from_manifest(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let manifest = cargo_toml::Manifest::from_path(path)
            .with_context(|| format!("Could not read manifest at '{}'", path.display()))?;
        let package = manifest
            .package
            .with_context(|| format!("Manifest at '{}' has no [package] section", path.display()))?;
        let version = package
            .version
            .get()
            .with_context(|| format!("Could not determine version of package '{}'", package.name))?
            .to_owned();
        Ok(Package {
            name: package.name,
            version,
            manifest_dir: match path.parent() {
                Some(dir) if !dir.as_os_str().is_empty() => dir.to_owned(),
                _ => PathBuf::from("."),
            },
            profile: None,
        })
    }

    /// Where the version file goes unless specified otherwise.
    pub fn default_version_file(&self) -> PathBuf {
        self.manifest_dir.join("src").join("version.rs")
    }

    /// The debug flag implied by the build profile, if there is one.
    pub fn debug(&self) -> Option<bool> {
        self.profile.as_deref().map(|profile| profile == "debug")
    }
}

/// Compute the version of `package`, appending a fresh development marker unless it's a release,
/// and freeze it into `path` along with the release flag and `debug`.
pub fn freeze(
    package: &Package,
    path: &Path,
    debug: Option<bool>,
    options: frozen::Options,
) -> anyhow::Result<frozen::Outcome> {
    let release = version::is_release(&package.version);
    let version = if release {
        package.version.clone()
    } else {
        update::update_git_devstr(&package.version, Some(package.manifest_dir.as_path()))
    };
    log::debug!("Package '{}' is at version '{version}' (release: {release})", package.name);
    frozen::generate(&package.name, path, &version, release, debug, options)
}

/// Tell cargo to rerun the build script whenever `HEAD` of the repository containing `dir` moves.
///
/// Nothing is printed if `dir` isn't inside a git repository.
pub fn rerun_if_changed(dir: &Path) {
    match gix::discover(dir) {
        Ok(repo) => {
            let git_dir = repo.git_dir();
            for path in [git_dir.join("HEAD"), git_dir.join("refs")] {
                println!("cargo:rerun-if-changed={}", path.display());
            }
        }
        Err(err) => log::debug!("Not watching git state of '{}': {err}", dir.display()),
    }
}

/// Freeze the version of the package whose build script is running into `src/version.rs`.
///
/// ```no_run
/// // build.rs
/// fn main() -> anyhow::Result<()> {
///     freeze_version::cargo::freeze_from_build_script()?;
///     Ok(())
/// }
/// ```
pub fn freeze_from_build_script() -> anyhow::Result<frozen::Outcome> {
    let package = Package::from_env()?;
    rerun_if_changed(&package.manifest_dir);
    freeze(
        &package,
        &package.default_version_file(),
        package.debug(),
        frozen::Options::default(),
    )
}
