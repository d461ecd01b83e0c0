//! Compute a package version from its git working copy and freeze it into a generated Rust module.
//!
//! The typical entry point is [`cargo::freeze_from_build_script()`], called from a package's `build.rs`,
//! which writes `src/version.rs` whenever the version, release or debug flag changed since the last build.
#![deny(rust_2018_idioms)]

pub mod cargo;
pub mod frozen;
pub mod git;
pub mod update;
pub mod version;

mod utils;

pub use frozen::FrozenVersion;
pub use git::get_git_devstr;
pub use update::update_git_devstr;
pub use version::Version;
