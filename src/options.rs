//! Configuration handed to the site generator.

use crate::error::Error;
use lazy_regex::regex_captures;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which release of an external tool to run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolVersion {
    /// Whatever the newest upstream release is at build time.
    #[default]
    Latest,
    /// Whatever is already on `PATH`.
    System,
    /// A specific `X.Y.Z` release.
    Exact(String),
}

impl FromStr for ToolVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "latest" => Ok(Self::Latest),
            "system" => Ok(Self::System),
            other => regex_captures!(r"^v?(\d+\.\d+\.\d+)$", other)
                .map(|(_, version)| Self::Exact(version.to_owned()))
                .ok_or_else(|| Error::InvalidVersion(s.to_owned())),
        }
    }
}

impl fmt::Display for ToolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => f.write_str("latest"),
            Self::System => f.write_str("system"),
            Self::Exact(v) => f.write_str(v),
        }
    }
}

/// Everything the generation stage is told about a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildOptions {
    pub generator_version: ToolVersion,
    pub css_preprocessor_version: ToolVersion,
    pub minify: bool,
    /// `None` means "use the generator's own default".
    pub base_url: Option<String>,
}

impl BuildOptions {
    /// Standard options: latest tools, minified, with an optional base URL.
    ///
    /// An empty (or blank) base URL is the same as no base URL at all.
    pub fn new(base_url: Option<&str>) -> Self {
        Self {
            generator_version: ToolVersion::Latest,
            css_preprocessor_version: ToolVersion::Latest,
            minify: true,
            base_url: base_url
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(str::to_owned),
        }
    }

    pub fn with_versions(mut self, generator: ToolVersion, css_preprocessor: ToolVersion) -> Self {
        self.generator_version = generator;
        self.css_preprocessor_version = css_preprocessor;
        self
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self::new(None)
    }
}
