use crate::types::Digest;
use std::io::Result;
use std::path::{Path, PathBuf};

/// An on-disk, content-addressed store.
///
/// Layout:
///
///  * `cas/`   - blobs named by the hex of their digest
///  * `tmp/`   - scratch space, kept on the same filesystem as `cas/` so
///               finished files can be renamed into place
///  * `tools/` - unpacked third party programs
pub enum DB {
    Persistent(PathBuf),
    Temp(tempfile::TempDir),
}

const SECTIONS: [&str; 3] = ["tmp", "cas", "tools"];

fn init_sections(p: &Path) -> Result<()> {
    for section in SECTIONS {
        std::fs::create_dir_all(p.join(section))?;
    }
    Ok(())
}

impl DB {
    pub fn new(p: impl AsRef<Path>) -> Result<Self> {
        let p: PathBuf = p.as_ref().into();
        init_sections(&p)?;
        Ok(Self::Persistent(p))
    }

    /// A store that deletes itself when dropped.
    pub fn new_temp() -> Result<Self> {
        let t = tempfile::tempdir()?;
        init_sections(t.as_ref())?;
        Ok(Self::Temp(t))
    }

    pub fn join(&self, p: impl AsRef<Path>) -> PathBuf {
        self.as_ref().join(p)
    }

    /// Where a blob with this digest lives (or would live).
    pub fn cas_path(&self, digest: &Digest) -> PathBuf {
        self.join("cas").join(digest.to_hex())
    }

    pub fn has(&self, digest: &Digest) -> bool {
        self.cas_path(digest).exists()
    }

    /// Store an in-memory blob.
    pub fn write_blob(&self, bytes: impl AsRef<[u8]>) -> Result<Digest> {
        let d = Digest::from(bytes.as_ref());
        let dest = self.cas_path(&d);
        if !dest.exists() {
            let staged = tempfile::NamedTempFile::new_in(self.join("tmp"))?;
            std::fs::write(staged.path(), bytes)?;
            staged.persist(&dest).map_err(|e| e.error)?;
        }
        Ok(d)
    }

    pub fn read_blob(&self, digest: &Digest) -> Result<Vec<u8>> {
        std::fs::read(self.cas_path(digest))
    }
}

impl AsRef<Path> for DB {
    fn as_ref(&self) -> &Path {
        match self {
            Self::Persistent(path) => path,
            Self::Temp(td) => td.as_ref(),
        }
    }
}
