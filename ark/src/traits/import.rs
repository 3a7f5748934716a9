//! Import files into a DB.
//!
//! ```
//! use ::arkive::*;
//! let db = DB::new_temp()?;
//!
//! // Imports all files, then the serialized archive. Gives you the CAS address.
//! let digest = Ark::scan("src")?.import(&db)?;
//! assert!(db.has(&digest));
//! # Ok::<(), std::io::Error>(())
//! ```
use crate::traits::save::Save;
use crate::types::*;
use std::io::Result;
use std::iter::zip;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::{tempdir_in, TempDir};

/// File content that can be staged as a real file in the DB's tmp section.
pub trait Temporizable {
    fn temporize(&self, dest: &Path) -> Result<()>;
}

impl Temporizable for PathBuf {
    fn temporize(&self, dest: &Path) -> Result<()> {
        if std::fs::symlink_metadata(self)?.file_type().is_symlink() {
            std::fs::write(dest, crate::traits::read::file_bytes(self)?)
        } else {
            std::fs::copy(self, dest).map(|_| ())
        }
    }
}
impl Temporizable for Vec<u8> {
    fn temporize(&self, dest: &Path) -> Result<()> {
        std::fs::write(dest, self)
    }
}
impl Temporizable for String {
    fn temporize(&self, dest: &Path) -> Result<()> {
        std::fs::write(dest, self)
    }
}
impl Temporizable for &str {
    fn temporize(&self, dest: &Path) -> Result<()> {
        std::fs::write(dest, self)
    }
}

fn temporize_files<T>(db: &DB, contents: &[T]) -> Result<(TempDir, Vec<PathBuf>)>
where
    T: Temporizable,
{
    let dir = tempdir_in(db.join("tmp"))?;
    let temps = contents
        .iter()
        .enumerate()
        .map(|(n, t)| {
            let dest = dir.path().join(n.to_string());
            t.temporize(&dest)?;
            Ok(dest)
        })
        .collect::<Result<Vec<PathBuf>>>()?;
    Ok((dir, temps))
}

fn hash_file(pb: &Path) -> Result<Digest> {
    let f = std::fs::File::open(pb)?;

    // Mapping an empty file is an error.
    if f.metadata()?.len() == 0 {
        return Ok(Digest::from(""));
    }

    let mmap = unsafe { memmap::Mmap::map(&f)? };
    Ok(Digest::from(mmap.as_ref()))
}

impl<C> Ark<C>
where
    C: Temporizable,
{
    /// Copy file contents into the DB, giving an Ark of digests.
    pub fn import_files(&self, db: &DB) -> Result<Ark<Digest>> {
        let (_dir, temps) = temporize_files(db, self.contents())?;
        let digests = temps
            .iter()
            .map(|pb| hash_file(pb))
            .collect::<Result<Vec<Digest>>>()?;
        for (temp, digest) in zip(temps, &digests) {
            std::fs::rename(temp, db.cas_path(digest))?;
        }
        Ok(Ark(self.0.clone(), self.1.clone(), Rc::new(digests)))
    }

    /// Import files _and_ serialized self into DB.
    pub fn import(&self, db: &DB) -> Result<Digest> {
        self.import_files(db)?.save(db)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;

    #[test]
    fn import_files() -> Result<()> {
        let db = DB::new_temp()?;
        let fixture = fixture()?;
        let ark = Ark::scan(&fixture)?.import_files(&db)?;

        assert_eq!(ark.paths(), Ark::scan(&fixture)?.paths());
        assert_eq!(ark.contents()[2], Digest::from(NESTED_TXT));
        assert_eq!(
            std::fs::read_to_string(db.cas_path(&ark.contents()[2]))?,
            NESTED_TXT
        );

        // Symlinks are stored as their target
        assert_eq!(ark.contents()[0], Digest::from("run.sh"));

        // Same results if we start from an in-memory copy
        assert_eq!(Ark::scan(&fixture)?.read()?.import_files(&db)?, ark);
        Ok(())
    }

    #[test]
    fn import_is_deterministic() -> Result<()> {
        let fixture = fixture()?;
        let d1 = Ark::scan(&fixture)?.import(&DB::new_temp()?)?;
        let d2 = Ark::scan(&fixture)?.import(&DB::new_temp()?)?;
        assert_eq!(d1, d2);
        Ok(())
    }

    #[test]
    fn empty_files() -> Result<()> {
        let db = DB::new_temp()?;
        let ark = Ark::from_entries([("empty.txt", Contents::File(""))]);
        assert_eq!(ark.import_files(&db)?.contents(), &vec![Digest::from("")]);
        Ok(())
    }
}
