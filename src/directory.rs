//! A stored, immutable file tree.
//!
//! A `Directory` pairs an `Ark<Digest>` with the digest of its own JSON form,
//! so it can be passed around by value and named by content. It never
//! changes after creation: merging, re-rooting and importing all hand back a
//! fresh `Directory`.

use crate::error::Result;
use arkive::*;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct Directory {
    digest: Digest,
    ark: Ark<Digest>,
}

impl Directory {
    /// Save an Ark whose file contents are already in the DB.
    pub fn from_ark(db: &DB, ark: Ark<Digest>) -> Result<Self> {
        let digest = ark.save(db)?;
        Ok(Self { digest, ark })
    }

    /// Copy an in-memory (or on-disk) Ark's contents into the DB.
    pub fn store<C: Temporizable>(db: &DB, ark: &Ark<C>) -> Result<Self> {
        Self::from_ark(db, ark.import_files(db)?)
    }

    /// Snapshot a real directory.
    ///
    /// If the DB itself lives inside `path`, it is left out of the snapshot.
    pub fn import(db: &DB, path: impl AsRef<Path>) -> Result<Self> {
        Self::store(db, &Ark::scan_excluding(path, db)?)
    }

    pub fn load(db: &DB, digest: &Digest) -> Result<Self> {
        Ok(Self {
            digest: *digest,
            ark: Ark::load(db, digest)?,
        })
    }

    pub fn empty(db: &DB) -> Result<Self> {
        Self::from_ark(db, Ark::empty())
    }

    pub fn digest(&self) -> Digest {
        self.digest
    }

    pub fn ark(&self) -> &Ark<Digest> {
        &self.ark
    }

    pub fn contains(&self, path: impl Into<IPR>) -> bool {
        self.ark.contains(path)
    }

    /// Contents of the file at `path`, if there is one.
    pub fn read_file(&self, db: &DB, path: impl Into<IPR>) -> Result<Option<Vec<u8>>> {
        let path = path.into();
        match self.ark.files().find(|(p, _, _)| **p == path) {
            Some((_, _, digest)) => Ok(Some(db.read_blob(digest)?)),
            None => Ok(None),
        }
    }

    /// This tree with `upper` layered on top.
    pub fn overlay(&self, db: &DB, upper: &Directory) -> Result<Directory> {
        Self::from_ark(db, self.ark.overlay(&upper.ark))
    }

    /// Everything beneath `dir`, re-rooted there.
    pub fn subtree(&self, db: &DB, dir: impl Into<IPR>) -> Result<Directory> {
        Self::from_ark(db, self.ark.subtree(dir))
    }

    /// Materialize on disk at `dest`.
    pub fn export(&self, db: &DB, dest: impl AsRef<Path>) -> Result<()> {
        Ok(self.ark.export(db, dest)?)
    }
}

impl fmt::Display for Directory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.digest)
    }
}
