//! The build itself: dependencies, then the generator, each layered onto
//! what came before.
//!
//! ```text
//! source ──install──▶ source + deps ──generate──▶ source + deps + site
//! ```
//!
//! Both stages are delegated. Whatever they return is overlaid onto the
//! tree they were given, and whatever error they raise comes back to the
//! caller as-is.

use crate::directory::Directory;
use crate::error::Result;
use crate::options::{BuildOptions, ToolVersion};
use crate::tools::{DependencyInstaller, SiteGenerator};
use arkive::DB;
use strum_macros::Display;
use tracing::{debug, info, info_span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Stage {
    Install,
    Generate,
}

pub struct SiteBuilder<'a, I, G> {
    db: &'a DB,
    installer: I,
    generator: G,
    generator_version: ToolVersion,
    css_preprocessor_version: ToolVersion,
}

impl<'a, I, G> SiteBuilder<'a, I, G>
where
    I: DependencyInstaller,
    G: SiteGenerator,
{
    pub fn new(db: &'a DB, installer: I, generator: G) -> Self {
        Self {
            db,
            installer,
            generator,
            generator_version: ToolVersion::Latest,
            css_preprocessor_version: ToolVersion::Latest,
        }
    }

    /// Ask for particular tool releases instead of the latest ones.
    pub fn with_versions(mut self, generator: ToolVersion, css_preprocessor: ToolVersion) -> Self {
        self.generator_version = generator;
        self.css_preprocessor_version = css_preprocessor;
        self
    }

    /// The options the generator will see for a given base URL.
    pub fn options(&self, base_url: Option<&str>) -> BuildOptions {
        BuildOptions::new(base_url).with_versions(
            self.generator_version.clone(),
            self.css_preprocessor_version.clone(),
        )
    }

    /// Build `source` into a site.
    ///
    /// An empty `base_url` is treated the same as `None`.
    pub fn build(&self, source: &Directory, base_url: Option<&str>) -> Result<Directory> {
        info!(source = %source, "Building site");

        let intermediate = {
            let _span = info_span!("stage", stage = %Stage::Install).entered();
            let installed = self.installer.install(source)?;
            debug!(installed = %installed, "Overlaying dependencies");
            source.overlay(self.db, &installed)?
        };

        let result = {
            let _span = info_span!("stage", stage = %Stage::Generate).entered();
            let options = self.options(base_url);
            debug!(?options, "Generating");
            let generated = self.generator.generate(&intermediate, &options)?;
            intermediate.overlay(self.db, &generated)?
        };

        info!(result = %result, "Build finished");
        Ok(result)
    }
}
