use std::path::Path;

use crate::{
    git::{self, Git, Kind, Probe},
    version,
};

/// Refresh the development marker of `version` if and only if `dir` is inside a git working copy,
/// so that the marker always reflects the current state of the repository.
///
/// A revision count (`-r<count>`) is used by default, but a version that already carries a hash
/// (`-git-<hash>`) keeps that style. If `git` isn't available or there is no repository, `version` is
/// returned unchanged.
/// If `dir` is `None`, [`git::default_dir()`] is used.
pub fn update_git_devstr(version: &str, dir: Option<&Path>) -> String {
    update_with(&Git::default(), version, dir)
}

/// Like [`update_git_devstr()`], but use the given `git` executable.
pub fn update_with(git: &Git, version: &str, dir: Option<&Path>) -> String {
    let dir = dir.map_or_else(git::default_dir, Path::to_path_buf);
    let hash = git.probe(Kind::Hash, &dir);
    if let Probe::ToolMissing(err) = &hash {
        log::debug!("Keeping version '{version}' as git could not be run: {err}");
    }
    if !hash.is_available() {
        return version.to_owned();
    }

    let (base, devstr) = if version.contains(version::GIT_MARKER) {
        (version::strip_git_hash(version), hash.devstr().to_owned())
    } else {
        let count = git.probe(Kind::Count, &dir);
        if let Probe::Failed { stderr, .. } = &count {
            log::debug!("Could not count revisions in '{}': {stderr}", dir.display());
        }
        (version::strip_revision_count(version), count.devstr().to_owned())
    };
    format!("{base}{devstr}")
}
