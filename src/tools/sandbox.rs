//! Run an external program against a scratch copy of a Directory.
//!
//! The project is exported into a fresh directory under the DB's `tmp/`
//! section, the program runs there, and whatever part of the tree the
//! caller cares about is imported back as a new Directory. The scratch
//! copy is deleted when the Sandbox is dropped.

use crate::directory::Directory;
use crate::error::{Error, Result};
use arkive::{Ark, IPR, DB};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use tracing::{debug, info};

/// How many trailing lines of stderr to keep in a failure.
const STDERR_TAIL: usize = 40;

/// A program invocation, independent of where it runs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cmd {
    program: String,
    args: Vec<String>,
    path_prefix: Vec<PathBuf>,
    envs: Vec<(String, String)>,
}

impl Cmd {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<S: Into<String>>(mut self, args: impl IntoIterator<Item = S>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Search `dir` for programs before the inherited `PATH`.
    pub fn path_prefix(mut self, dir: impl Into<PathBuf>) -> Self {
        self.path_prefix.push(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn search_path(&self) -> Result<Option<OsString>> {
        if self.path_prefix.is_empty() {
            return Ok(None);
        }
        let inherited = std::env::var_os("PATH").unwrap_or_default();
        let dirs = self
            .path_prefix
            .iter()
            .cloned()
            .chain(std::env::split_paths(&inherited));
        Ok(Some(std::env::join_paths(dirs).map_err(std::io::Error::other)?))
    }

    fn to_command(&self, cwd: &Path) -> Result<Command> {
        let mut command = Command::new(&self.program);
        command.args(&self.args).current_dir(cwd);
        if let Some(path) = self.search_path()? {
            command.env("PATH", path);
        }
        for (k, v) in &self.envs {
            command.env(k, v);
        }
        Ok(command)
    }
}

impl std::fmt::Display for Cmd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

fn tail(text: &str, lines: usize) -> String {
    let all: Vec<&str> = text.lines().collect();
    all[all.len().saturating_sub(lines)..].join("\n")
}

pub struct Sandbox<'a> {
    db: &'a DB,
    dir: TempDir,
}

impl<'a> Sandbox<'a> {
    /// Export `project` into a fresh scratch directory.
    pub fn new(db: &'a DB, project: &Directory) -> Result<Self> {
        let dir = tempfile::tempdir_in(db.join("tmp"))?;
        project.export(db, dir.path())?;
        debug!(dir = %dir.path().display(), project = %project, "Sandbox ready");
        Ok(Self { db, dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn has(&self, rel: impl AsRef<Path>) -> bool {
        self.path().join(rel).exists()
    }

    /// Run to completion, failing on a non-zero exit.
    pub fn run(&self, cmd: &Cmd) -> Result<()> {
        info!("Running {}", cmd);
        let output = cmd
            .to_command(self.path())?
            .output()
            .map_err(|source| Error::ToolMissing {
                tool: cmd.program().to_owned(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stdout.is_empty() {
            debug!(tool = cmd.program(), "{}", stdout.trim_end());
        }
        if !output.status.success() {
            return Err(Error::ToolFailed {
                tool: cmd.program().to_owned(),
                status: output.status.to_string(),
                stderr: tail(&stderr, STDERR_TAIL),
            });
        }
        if !stderr.is_empty() {
            debug!(tool = cmd.program(), "{}", stderr.trim_end());
        }
        Ok(())
    }

    /// Import `sub` (and everything in it) from the scratch directory.
    ///
    /// Paths stay relative to the project root, so the result can be
    /// overlaid straight onto the project. A missing `sub` gives an empty
    /// Directory.
    pub fn collect(&self, sub: impl Into<IPR>) -> Result<Directory> {
        let ark = Ark::scan_within(self.path(), sub)?;
        Directory::store(self.db, &ark)
    }
}
