//! Materialize Arks onto the real filesystem.

use crate::types::*;
use std::fs::{copy, create_dir_all, set_permissions, Permissions};
use std::io::{ErrorKind, Result};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::{symlink, PermissionsExt};
use std::path::{Path, PathBuf};
use std::rc::Rc;

fn apply_mode(dest: &Path, attrs: &Attrs) -> Result<()> {
    match attrs.mode() {
        Some(mode) => set_permissions(dest, Permissions::from_mode(mode & 0o7777)),
        None => Ok(()),
    }
}

/// Remove whatever file or link sits at `dest`. Its permissions don't matter.
fn clear(dest: &Path) -> Result<()> {
    match std::fs::remove_file(dest) {
        Err(e) if e.kind() != ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

fn place_symlink(src: &Path, dest: &Path) -> Result<()> {
    let target = if std::fs::symlink_metadata(src)?.file_type().is_symlink() {
        std::fs::read_link(src)?
    } else {
        PathBuf::from(std::ffi::OsStr::from_bytes(&std::fs::read(src)?))
    };
    clear(dest)?;
    symlink(target, dest)
}

impl Ark<PathBuf> {
    /// Write files to a directory, creating it if needed.
    ///
    /// Permissions are restored from `UNIX_MODE`. Directory permissions are
    /// applied last and deepest-first, so a read-only directory can't block
    /// writing its own children.
    pub fn write(&self, dest: impl AsRef<Path>) -> Result<()> {
        let root = dest.as_ref();
        create_dir_all(root)?;

        for (ipr, _) in self.dirs() {
            create_dir_all(root.join(ipr.as_ref()))?;
        }

        for (ipr, attrs, src) in self.files() {
            let dest_file = root.join(ipr.as_ref());
            if let Some(parent) = dest_file.parent() {
                create_dir_all(parent)?;
            }
            if attrs.is_symlink() {
                place_symlink(src, &dest_file)?;
            } else {
                clear(&dest_file)?;
                copy(src, &dest_file)?;
                apply_mode(&dest_file, attrs)?;
            }
        }

        let mut dirs: Vec<(&IPR, &Attrs)> = self.dirs().collect();
        dirs.sort_by(|a, b| b.0.cmp(a.0));
        for (ipr, attrs) in dirs {
            apply_mode(&root.join(ipr.as_ref()), attrs)?;
        }
        Ok(())
    }
}

impl Ark<Digest> {
    /// Where each file's content lives inside the DB.
    pub fn locate(&self, db: &DB) -> Ark<PathBuf> {
        let paths: Vec<PathBuf> = self.2.iter().map(|d| db.cas_path(d)).collect();
        Ark(self.0.clone(), self.1.clone(), Rc::new(paths))
    }

    /// Write a stored Ark out to a directory.
    pub fn export(&self, db: &DB, dest: impl AsRef<Path>) -> Result<()> {
        self.locate(db).write(dest)
    }
}
