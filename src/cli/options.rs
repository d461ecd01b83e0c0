use std::path::PathBuf;

#[derive(clap::Parser)]
#[clap(name = "freeze-version", about = "Freeze a package version into a generated source file", version = env!("FREEZE_VERSION_VERSION"))]
pub struct Args {
    /// Provide more detailed messages on the terminal, including every git invocation.
    #[clap(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Only print warnings and errors.
    #[clap(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[clap(subcommand)]
    pub subcommands: SubCommands,
}

#[derive(clap::Args)]
pub struct PackageArgs {
    /// The `Cargo.toml` to read the package name and version from.
    #[clap(long, default_value = "Cargo.toml")]
    pub manifest_path: PathBuf,

    /// Use this base version instead of the one in the manifest.
    #[clap(long = "base-version", value_name = "VERSION")]
    pub base_version: Option<String>,
}

#[derive(clap::Subcommand)]
pub enum SubCommands {
    /// Regenerate the version file if the version, release or debug flag changed.
    #[clap(name = "write")]
    Write {
        #[clap(flatten)]
        package: PackageArgs,

        /// Use this package name instead of the one in the manifest.
        #[clap(long)]
        package_name: Option<String>,

        /// Treat the version as release, even if it's marked as development version.
        #[clap(long, conflicts_with = "dev")]
        release: bool,

        /// Treat the version as development version, appending a development marker.
        #[clap(long)]
        dev: bool,

        /// Mark the frozen version as debug build. Without this flag or --no-debug the current value is kept.
        #[clap(long, conflicts_with = "no_debug")]
        debug: bool,

        /// Mark the frozen version as non-debug build.
        #[clap(long)]
        no_debug: bool,

        /// The file to write, `src/version.rs` next to the manifest by default.
        #[clap(long, short = 'o')]
        output: Option<PathBuf>,

        /// Only log what would be written.
        #[clap(long)]
        dry_run: bool,
    },
    /// Print the base version with a refreshed development marker.
    #[clap(name = "show")]
    Show {
        #[clap(flatten)]
        package: PackageArgs,

        /// The working copy to inspect, the manifest directory by default.
        #[clap(long)]
        dir: Option<PathBuf>,
    },
    /// Print the development marker of a working copy, which is empty outside of a repository.
    #[clap(name = "devstr")]
    Devstr {
        /// Use the hash of HEAD instead of the number of revisions.
        #[clap(long)]
        sha: bool,

        /// Don't warn if there is no repository or git fails.
        #[clap(long)]
        no_warnings: bool,

        /// The working copy to inspect, the current directory by default.
        #[clap(long)]
        dir: Option<PathBuf>,
    },
    /// Print the contents of a generated version file.
    #[clap(name = "load")]
    Load {
        /// The version file to read.
        path: PathBuf,
    },
}
