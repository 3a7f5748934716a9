//! Read file metadata from disk. See `Ark::scan`.

use crate::types::*;
use std::fs::Metadata;
use std::io::{Error, Result};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

impl From<&Metadata> for Attrs {
    fn from(meta: &Metadata) -> Attrs {
        let attrs = Attrs::new().append(UNIX_MODE, meta.permissions().mode().to_string());
        if meta.file_type().is_symlink() {
            attrs.append(SYMLINK, "1")
        } else {
            attrs
        }
    }
}

type ScanEntry = (IPR, Attrs, Contents<PathBuf>);

/// Walk a directory on disk, producing one entry per file and subdirectory.
///
/// The content type is PathBuf: each file remembers where it lives on the
/// real FS, so it can be read or imported later no matter how its IPR gets
/// shuffled around in the meantime. Symlinks are recorded as files (with the
/// `SYMLINK` attr) and never followed.
///
/// A nonexistent `base` scans as an empty tree.
pub fn scan_to_entries(base: impl AsRef<Path>) -> Result<Vec<ScanEntry>> {
    let mut output: Vec<ScanEntry> = vec![];
    walk(base.as_ref(), base.as_ref(), None, &mut output)?;
    Ok(output)
}

fn walk(base: &Path, cur: &Path, skip: Option<&Path>, output: &mut Vec<ScanEntry>) -> Result<()> {
    if !cur.is_dir() {
        return Ok(());
    }
    for entry in std::fs::read_dir(cur)? {
        let entry = entry?;
        let path = entry.path();
        if skip == Some(path.as_path()) {
            continue;
        }
        // DirEntry::metadata does not traverse symlinks.
        let meta = entry.metadata()?;
        let ipr = relativize(base, &path)?;

        if meta.is_dir() {
            walk(base, &path, skip, output)?;
            output.push((ipr, (&meta).into(), Contents::Dir));
        } else {
            output.push((ipr, (&meta).into(), Contents::File(path)));
        }
    }
    Ok(())
}

fn relativize(base: &Path, p: &Path) -> Result<IPR> {
    p.strip_prefix(base)
        .map_err(Error::other)?
        .try_into()
        .map_err(Error::other)
}

impl Ark<PathBuf> {
    /// Fetch metadata for a directory into memory.
    pub fn scan(base: impl AsRef<Path>) -> Result<Self> {
        Ok(scan_to_entries(base)?.into())
    }

    /// Scan only `base/sub`, keeping paths relative to `base`.
    ///
    /// The `sub` directory itself is included as an entry, so its permissions
    /// survive. Scanning a `sub` that doesn't exist gives an empty Ark.
    pub fn scan_within(base: impl AsRef<Path>, sub: impl Into<IPR>) -> Result<Self> {
        let (base, sub) = (base.as_ref(), sub.into());
        let top = base.join(sub.as_ref());
        let mut output: Vec<ScanEntry> = vec![];
        walk(base, &top, None, &mut output)?;
        if !sub.is_root() && top.is_dir() {
            let meta = std::fs::symlink_metadata(&top)?;
            output.push((sub, (&meta).into(), Contents::Dir));
        }
        Ok(output.into())
    }

    /// Like `scan`, but leave out `skip` (and everything in it) if it lives
    /// somewhere under `base`.
    ///
    /// This is how a store kept inside the tree being snapshotted stays out
    /// of its own snapshots.
    pub fn scan_excluding(base: impl AsRef<Path>, skip: impl AsRef<Path>) -> Result<Self> {
        let base = base.as_ref();
        let nested = match (base.canonicalize(), skip.as_ref().canonicalize()) {
            (Ok(b), Ok(s)) => s
                .strip_prefix(&b)
                .ok()
                .filter(|rel| !rel.as_os_str().is_empty())
                .map(|rel| base.join(rel)),
            _ => None,
        };
        let mut output: Vec<ScanEntry> = vec![];
        walk(base, base, nested.as_deref(), &mut output)?;
        Ok(output.into())
    }
}
