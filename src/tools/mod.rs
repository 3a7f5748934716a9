//! The external programs a build leans on, and the seams they plug into.

use crate::directory::Directory;
use crate::error::Result;
use crate::options::BuildOptions;

pub mod hugo;
pub mod npm;
pub mod sandbox;
pub mod toolchain;

pub use hugo::Hugo;
pub use npm::Npm;
pub use sandbox::{Cmd, Sandbox};
pub use toolchain::{Platform, Tool, Toolchain};

/// Fetches a project's third-party dependencies.
pub trait DependencyInstaller {
    /// Returns the installed dependencies, laid out where they belong in
    /// `project` (so the caller can overlay them directly).
    fn install(&self, project: &Directory) -> Result<Directory>;
}

/// Turns a prepared project into a built site.
pub trait SiteGenerator {
    /// Returns the generated output at its real location in `project`.
    fn generate(&self, project: &Directory, options: &BuildOptions) -> Result<Directory>;
}
