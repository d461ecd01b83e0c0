//! Obtain a development marker for a directory by asking `git` about its `HEAD`.
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use gix::bstr::ByteSlice;

/// The exit code `git` uses when there is no repository, or no `HEAD` to resolve.
const NO_REPOSITORY_EXIT_CODE: i32 = 128;
const HEX_LEN: usize = 40;

/// What kind of development marker to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// `-r<count>`, with `count` being the number of commits reachable from `HEAD`.
    Count,
    /// `-git-<hash>`, with `hash` being the full hexadecimal object id of `HEAD`.
    Hash,
}

impl Kind {
    fn subcommand(&self) -> &'static str {
        match self {
            Kind::Count => "rev-list",
            // Faster than listing all revisions when only the hash of HEAD is needed.
            Kind::Hash => "rev-parse",
        }
    }
}

/// The result of probing a directory for revision information.
#[derive(Debug)]
pub enum Probe {
    /// A development marker like `-r42` or `-git-<hash>`.
    Available(String),
    /// The directory isn't inside a git repository, or it has no commits yet.
    NoRepository,
    /// `git` ran but failed for another reason.
    Failed { code: Option<i32>, stderr: String },
    /// `git` couldn't be invoked at all.
    ToolMissing(std::io::Error),
}

impl Probe {
    /// The development marker, or an empty string if none is available.
    pub fn devstr(&self) -> &str {
        match self {
            Probe::Available(devstr) => devstr,
            Probe::NoRepository | Probe::Failed { .. } | Probe::ToolMissing(_) => "",
        }
    }

    /// Returns `true` if a development marker was obtained.
    pub fn is_available(&self) -> bool {
        matches!(self, Probe::Available(_))
    }
}

/// A handle to the `git` executable.
#[derive(Debug, Clone)]
pub struct Git {
    program: Cow<'static, Path>,
}

impl Default for Git {
    fn default() -> Self {
        Git {
            program: Cow::Borrowed(gix::path::env::exe_invocation()),
        }
    }
}

impl Git {
    /// Use `program` instead of the `git` found on the system.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Git {
            program: Cow::Owned(program.into()),
        }
    }

    /// Run `git` in `dir` to obtain a development marker of the given `kind`.
    ///
    /// This never fails, all outcomes are represented by [`Probe`].
    pub fn probe(&self, kind: Kind, dir: &Path) -> Probe {
        let mut cmd = Command::new(&*self.program);
        cmd.args([kind.subcommand(), "HEAD"])
            .current_dir(dir)
            .stdin(Stdio::null());
        log::trace!("run {cmd:?} in '{}'", dir.display());
        let output = match cmd.output() {
            Ok(output) => output,
            Err(err) => return Probe::ToolMissing(err),
        };

        match output.status.code() {
            Some(0) => {}
            Some(NO_REPOSITORY_EXIT_CODE) => return Probe::NoRepository,
            code => {
                return Probe::Failed {
                    code,
                    stderr: output.stderr.to_str_lossy().trim_end().to_owned(),
                }
            }
        }

        match kind {
            Kind::Hash => {
                let hex = &output.stdout[..output.stdout.len().min(HEX_LEN)];
                match gix::hash::ObjectId::from_hex(hex) {
                    Ok(id) => Probe::Available(format!("-git-{id}")),
                    Err(err) => Probe::Failed {
                        code: Some(0),
                        stderr: format!("unexpected output '{}': {err}", hex.to_str_lossy()),
                    },
                }
            }
            Kind::Count => {
                let count = output.stdout.iter().filter(|b| **b == b'\n').count();
                Probe::Available(format!("-r{count}"))
            }
        }
    }

    /// Like [`probe()`](Self::probe()), but only distinguishes between a marker, possibly empty if no repository
    /// is present or `git` failed, and `git` not being invocable at all.
    ///
    /// If `show_warning` is `true`, the reason for returning an empty marker is logged as warning.
    /// If `dir` is `None`, [`default_dir()`] is used.
    pub fn devstr(&self, kind: Kind, show_warning: bool, dir: Option<&Path>) -> std::io::Result<String> {
        let dir = dir.map_or_else(default_dir, Path::to_path_buf);
        match self.probe(kind, &dir) {
            Probe::Available(devstr) => Ok(devstr),
            Probe::NoRepository => {
                if show_warning {
                    log::warn!("No git repository present! Using default dev version.");
                }
                Ok(String::new())
            }
            Probe::Failed { stderr, .. } => {
                if show_warning {
                    log::warn!("Git failed while determining revision count: {stderr}");
                }
                Ok(String::new())
            }
            Probe::ToolMissing(err) => Err(err),
        }
    }
}

/// Determine the development marker of the repository at `dir`, as hash if `sha` is `true`, or as
/// count of revisions otherwise.
///
/// Returns an empty string if there is no repository or `git` fails, logging the reason as warning if
/// `show_warning` is `true`. An error is returned only if `git` can't be run.
pub fn get_git_devstr(sha: bool, show_warning: bool, dir: Option<&Path>) -> std::io::Result<String> {
    let kind = if sha { Kind::Hash } else { Kind::Count };
    Git::default().devstr(kind, show_warning, dir)
}

/// The directory to probe if none is given: the manifest directory of the package being built, or the
/// current working directory outside of cargo.
pub fn default_dir() -> PathBuf {
    std::env::var_os("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
