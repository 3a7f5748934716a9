use crate::builder::SiteBuilder;
use crate::directory::Directory;
use crate::error::{Error, Result};
use crate::logger::{Logger, Policies};
use crate::options::ToolVersion;
use crate::tools::hugo::OUTPUT_DIR;
use crate::tools::{Hugo, Npm};
use arkive::{Digest, DB};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

/// Reproducible static site builds: npm dependencies, then Hugo.
#[derive(Parser, Debug)]
#[command(name = "sitebuild", version, about, long_about = None)]
pub struct Cli {
    /// Where stored Directories and downloaded tools live
    #[arg(long, global = true, env = "SITEBUILD_DB", default_value = "./.sitebuild_db")]
    pub db: PathBuf,

    /// Only print result digests
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Show debug diagnostics on stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a site from a source directory
    Build(BuildArgs),

    /// List the contents of a stored Directory
    Show {
        /// Hex digest printed by a previous command
        digest: String,
    },
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// The site's source directory
    pub source: PathBuf,

    /// Base URL for generated links (generator default if empty or unset)
    #[arg(long, env = "SITEBUILD_BASE_URL")]
    pub base_url: Option<String>,

    /// Write the built tree to this directory
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Export only the generated site, not the whole project
    #[arg(long, requires = "out")]
    pub site_only: bool,

    /// Hugo release: "latest", "system" or X.Y.Z
    #[arg(long, default_value = "latest")]
    pub hugo_version: ToolVersion,

    /// Dart Sass release: "latest", "system" or X.Y.Z
    #[arg(long, default_value = "latest")]
    pub dart_sass_version: ToolVersion,

    /// npm-compatible program used to install dependencies
    #[arg(long, default_value = "npm")]
    pub npm: String,
}

pub fn execute(cli: Cli, log: &mut Logger) -> ExitCode {
    if cli.quiet {
        log.pol = Policies::quiet();
    }
    match run(cli, log) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Nowhere left to report a failure to print.
            let _ = writeln!(log.stderr, "Failed to execute: {}", e);
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli, log: &mut Logger) -> Result<()> {
    let db = DB::new(&cli.db)?;
    match cli.command {
        Command::Build(args) => build(&db, args, log),
        Command::Show { digest } => show(&db, &digest, log),
    }
}

fn build(db: &DB, args: BuildArgs, log: &mut Logger) -> Result<()> {
    log.header("Import")?;
    let source = Directory::import(db, &args.source)?;
    writeln!(log.digest(), "{}", source)?;

    log.header("Build")?;
    let builder = SiteBuilder::new(db, Npm::with_program(db, args.npm), Hugo::new(db)?)
        .with_versions(args.hugo_version, args.dart_sass_version);
    let site = builder.build(&source, args.base_url.as_deref())?;
    writeln!(log.digest(), "{}", site)?;

    if let Some(out) = &args.out {
        log.header("Export")?;
        let tree = if args.site_only {
            site.subtree(db, OUTPUT_DIR)?
        } else {
            site
        };
        tree.export(db, out)?;
    }
    Ok(())
}

fn show(db: &DB, digest: &str, log: &mut Logger) -> Result<()> {
    let digest = Digest::from_hex(digest.trim())
        .map_err(|e| Error::InvalidDigest(format!("{:?}: {}", digest, e)))?;
    let dir = Directory::load(db, &digest)?;
    for (path, attrs, content) in dir.ark().files() {
        let kind = if attrs.is_symlink() { "LINK" } else { "FILE" };
        writeln!(log.stdout, "{} {}\n  Digest: {}", kind, path, content)?;
    }
    for (path, _) in dir.ark().dirs() {
        writeln!(log.stdout, "DIR {}", path)?;
    }
    Ok(())
}
