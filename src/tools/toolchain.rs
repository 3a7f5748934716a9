//! Fetch prebuilt Hugo and Dart Sass releases into the DB.
//!
//! Releases come from GitHub. A resolved version is unpacked once into
//! `tools/{tool}-{version}-{os}-{arch}` and reused after that; the
//! downloaded tarball is kept in `cas/` like any other blob.

use crate::error::{Error, Result};
use crate::options::ToolVersion;
use arkive::{Digest, DB};
use flate2::read::GzDecoder;
use lazy_regex::regex_is_match;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumIter};
use tracing::{debug, info};

const GITHUB_API: &str = "https://api.github.com";
const GITHUB: &str = "https://github.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Tool {
    #[strum(serialize = "hugo")]
    Hugo,
    #[strum(serialize = "dart-sass")]
    DartSass,
}

impl Tool {
    pub fn repo(&self) -> &'static str {
        match self {
            Self::Hugo => "gohugoio/hugo",
            Self::DartSass => "sass/dart-sass",
        }
    }

    /// Git tag for a plain `X.Y.Z` version.
    pub fn tag(&self, version: &str) -> String {
        match self {
            Self::Hugo => format!("v{}", version),
            Self::DartSass => version.to_owned(),
        }
    }

    /// Where the executable sits inside an unpacked release.
    pub fn bin_subdir(&self) -> &'static str {
        match self {
            Self::Hugo => "",
            Self::DartSass => "dart-sass",
        }
    }

    pub fn executable(&self) -> &'static str {
        match self {
            Self::Hugo => "hugo",
            Self::DartSass => "sass",
        }
    }

    fn unsupported(&self, platform: &Platform) -> Error {
        Error::UnsupportedPlatform {
            tool: self.to_string(),
            os: platform.os.to_owned(),
            arch: platform.arch.to_owned(),
        }
    }

    /// Release asset name for `version` on `platform`.
    pub fn asset(&self, version: &str, platform: &Platform) -> Result<String> {
        match self {
            Self::Hugo => {
                let target = match (platform.os, platform.arch) {
                    ("macos", _) => "darwin-universal",
                    ("linux", "x86_64") => "linux-amd64",
                    ("linux", "aarch64") => "linux-arm64",
                    _ => return Err(self.unsupported(platform)),
                };
                Ok(format!("hugo_extended_{}_{}.tar.gz", version, target))
            }
            Self::DartSass => {
                let os = match platform.os {
                    "linux" => "linux",
                    "macos" => "macos",
                    _ => return Err(self.unsupported(platform)),
                };
                let arch = match platform.arch {
                    "x86_64" => "x64",
                    "aarch64" => "arm64",
                    _ => return Err(self.unsupported(platform)),
                };
                Ok(format!("dart-sass-{}-{}-{}.tar.gz", version, os, arch))
            }
        }
    }
}

/// An (os, arch) pair in `std::env::consts` spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub os: &'static str,
    pub arch: &'static str,
}

impl Platform {
    pub fn current() -> Self {
        Self {
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
        }
    }
}

fn is_plain_version(v: &str) -> bool {
    regex_is_match!(r"^\d+\.\d+\.\d+$", v)
}

#[derive(Deserialize)]
struct Release {
    tag_name: String,
}

/// Unpack a gzipped tarball into `dest`.
pub fn unpack_tar_gz(archive: &Path, dest: &Path) -> Result<()> {
    let decoder = GzDecoder::new(BufReader::new(File::open(archive)?));
    tar::Archive::new(decoder).unpack(dest)?;
    Ok(())
}

pub struct Toolchain<'a> {
    db: &'a DB,
    platform: Platform,
    client: reqwest::blocking::Client,
}

impl<'a> Toolchain<'a> {
    pub fn new(db: &'a DB) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("sitebuild/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            db,
            platform: Platform::current(),
            client,
        })
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Turn a requested version into a concrete `X.Y.Z`.
    ///
    /// `System` resolves to `None`: use whatever is on `PATH`.
    pub fn resolve(&self, tool: Tool, version: &ToolVersion) -> Result<Option<String>> {
        match version {
            ToolVersion::System => Ok(None),
            ToolVersion::Exact(v) if is_plain_version(v) => Ok(Some(v.clone())),
            ToolVersion::Exact(v) => Err(Error::InvalidVersion(v.clone())),
            ToolVersion::Latest => self.latest(tool).map(Some),
        }
    }

    fn latest(&self, tool: Tool) -> Result<String> {
        let url = format!("{}/repos/{}/releases/latest", GITHUB_API, tool.repo());
        debug!(%url, "Asking for latest release");
        let release: Release = self.client.get(&url).send()?.error_for_status()?.json()?;
        let version = release.tag_name.trim_start_matches('v');
        if !is_plain_version(version) {
            return Err(Error::BadRelease {
                tool: tool.to_string(),
                reason: format!("unexpected tag {:?}", release.tag_name),
            });
        }
        info!(%tool, version, "Resolved latest");
        Ok(version.to_owned())
    }

    /// Where a given release gets unpacked.
    pub fn install_dir(&self, tool: Tool, version: &str) -> PathBuf {
        self.db.join("tools").join(format!(
            "{}-{}-{}-{}",
            tool, version, self.platform.os, self.platform.arch
        ))
    }

    /// Make sure a release is unpacked, returning the directory holding its
    /// executable. `None` means "use `PATH`".
    pub fn install(&self, tool: Tool, version: &ToolVersion) -> Result<Option<PathBuf>> {
        let version = match self.resolve(tool, version)? {
            Some(v) => v,
            None => return Ok(None),
        };
        let dest = self.install_dir(tool, &version);
        if !dest.exists() {
            let asset = tool.asset(&version, &self.platform)?;
            let url = format!(
                "{}/{}/releases/download/{}/{}",
                GITHUB,
                tool.repo(),
                tool.tag(&version),
                asset
            );
            let tarball = self.download(&url)?;
            self.unpack(&tarball, &dest)?;
        }
        debug!(%tool, dir = %dest.display(), "Tool ready");
        Ok(Some(dest.join(tool.bin_subdir())))
    }

    fn download(&self, url: &str) -> Result<Digest> {
        info!(%url, "Downloading");
        let bytes = self.client.get(url).send()?.error_for_status()?.bytes()?;
        Ok(self.db.write_blob(&bytes)?)
    }

    fn unpack(&self, tarball: &Digest, dest: &Path) -> Result<()> {
        let staging = tempfile::tempdir_in(self.db.join("tmp"))?;
        unpack_tar_gz(&self.db.cas_path(tarball), staging.path())?;
        // Another process may have won the race; its copy is as good as ours.
        if let Err(e) = std::fs::rename(staging.path(), dest) {
            if !dest.exists() {
                return Err(e.into());
            }
        }
        Ok(())
    }
}
