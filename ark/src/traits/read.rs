//! Read files from disk into memory.
//!
//! ```
//! use ::arkive::*;
//!
//! let ark = Ark::scan("src")?.read()?;
//! assert!(ark.contains("lib.rs"));
//! # Ok::<(), std::io::Error>(())
//! ```

use crate::types::*;
use std::io::Result;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

/// Bytes that represent a file on disk. For a symlink, that's its target.
pub(crate) fn file_bytes(p: &Path) -> Result<Vec<u8>> {
    if std::fs::symlink_metadata(p)?.file_type().is_symlink() {
        Ok(std::fs::read_link(p)?.as_os_str().as_bytes().to_vec())
    } else {
        std::fs::read(p)
    }
}

impl Ark<PathBuf> {
    /// Fetch file contents from disk into memory.
    ///
    /// Be warned that this may be a very bad idea if the directory is larger
    /// than you have RAM for.
    pub fn read(&self) -> Result<Ark<Vec<u8>>> {
        self.map_contents(|pb| file_bytes(pb))
    }
}
