//! Build a Hugo site reproducibly.
//!
//! A [`SiteBuilder`] takes a source [`Directory`], lets a
//! [`DependencyInstaller`] fill in `node_modules/`, then lets a
//! [`SiteGenerator`] render the site. Each stage's output is overlaid onto
//! the tree it was given, so the result is the whole project with
//! dependencies and generated output in place.

pub mod builder;
pub mod cli;
pub mod directory;
pub mod error;
pub mod logger;
pub mod options;
pub mod tools;

pub use builder::SiteBuilder;
pub use directory::Directory;
pub use error::{Error, Result};
pub use options::{BuildOptions, ToolVersion};
pub use tools::{DependencyInstaller, SiteGenerator};
