use thiserror::Error;

/// Anything that can go wrong while building a site.
///
/// The builder itself never constructs one of these. They come from the
/// collaborators (npm, hugo, the toolchain) and pass through untouched.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Could not start {tool}: {source}")]
    ToolMissing {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status}\n{stderr}")]
    ToolFailed {
        tool: String,
        status: String,
        stderr: String,
    },

    #[error("No {tool} release for {os}/{arch}")]
    UnsupportedPlatform {
        tool: String,
        os: String,
        arch: String,
    },

    #[error("Invalid version {0:?}: expected \"latest\", \"system\" or X.Y.Z")]
    InvalidVersion(String),

    #[error("Invalid digest {0}")]
    InvalidDigest(String),

    #[error("Unusable {tool} release metadata: {reason}")]
    BadRelease { tool: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
