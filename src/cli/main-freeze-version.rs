#![deny(rust_2018_idioms)]

mod options;

use clap::Parser;
use freeze_version::{cargo, frozen, git, FrozenVersion};
use options::{Args, PackageArgs, SubCommands};

fn main() -> anyhow::Result<()> {
    let args: Args = Args::parse();
    init_logging(&args);
    match args.subcommands {
        SubCommands::Write {
            package,
            package_name,
            release,
            dev,
            debug,
            no_debug,
            output,
            dry_run,
        } => {
            let mut package = load_package(package)?;
            if let Some(name) = package_name {
                package.name = name;
            }
            if dev && freeze_version::version::is_release(&package.version) {
                package.version.push_str("dev");
            }
            let path = output.unwrap_or_else(|| package.default_version_file());
            let debug = match (debug, no_debug) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let options = frozen::Options { dry_run };
            let outcome = if release {
                frozen::generate(&package.name, &path, &package.version, true, debug, options)?
            } else {
                cargo::freeze(&package, &path, debug, options)?
            };
            match outcome {
                frozen::Outcome::Unchanged(frozen) => {
                    log::info!("Version file at '{}' already holds {}", path.display(), frozen.version)
                }
                frozen::Outcome::Written(frozen) => print(&frozen),
                frozen::Outcome::WouldWrite { content } => print!("{content}"),
            }
        }
        SubCommands::Show { package, dir } => {
            let package = load_package(package)?;
            let dir = dir.unwrap_or(package.manifest_dir);
            println!("{}", freeze_version::update_git_devstr(&package.version, Some(dir.as_path())));
        }
        SubCommands::Devstr { sha, no_warnings, dir } => {
            let devstr = git::get_git_devstr(sha, !no_warnings, dir.as_deref())?;
            println!("{devstr}");
        }
        SubCommands::Load { path } => print(&FrozenVersion::load(path)?),
    }
    Ok(())
}

fn load_package(args: PackageArgs) -> anyhow::Result<cargo::Package> {
    let mut package = cargo::Package::from_manifest(&args.manifest_path)?;
    if let Some(version) = args.base_version {
        package.version = version;
    }
    Ok(package)
}

fn print(frozen: &FrozenVersion) {
    let FrozenVersion {
        frozen,
        version,
        major,
        minor,
        bugfix,
        release,
        debug,
    } = frozen;
    println!("version = {version}");
    println!("frozen  = {frozen}");
    println!("major   = {major}");
    println!("minor   = {minor}");
    println!("bugfix  = {bugfix}");
    println!("release = {release}");
    println!("debug   = {debug}");
}

fn init_logging(args: &Args) {
    let level = if args.verbose {
        log::LevelFilter::Trace
    } else if args.quiet {
        log::LevelFilter::Warn
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .format_module_path(false)
        .format_target(false)
        .format_timestamp(None)
        .filter_level(level)
        .parse_default_env()
        .init();
}
