//! A small on-disk fixture with predictable permissions.
//!
//! ```text
//! fixture
//! ├── bin
//! │   ├── link -> run.sh
//! │   └── run.sh          (0755)
//! ├── dir1
//! │   └── dir2
//! │       └── nested.txt
//! └── file_at_root.txt
//! ```

use std::fs::{create_dir_all, set_permissions, write, Permissions};
use std::io::Result;
use std::os::unix::fs::{symlink, PermissionsExt};
use tempfile::TempDir;

pub const NESTED_TXT: &str = "A file nested under multiple directories\n";
pub const ROOT_TXT: &str = "Here are some file contents, teehee!\n";
pub const RUN_SH: &str = "#!/bin/sh\necho running\n";

pub const FILE_MODE: &str = "33188"; // 0o100644
pub const EXEC_MODE: &str = "33261"; // 0o100755
pub const DIR_MODE: &str = "16877"; // 0o040755

pub fn fixture() -> Result<TempDir> {
    let td = tempfile::tempdir()?;
    let root = td.path();

    create_dir_all(root.join("dir1/dir2"))?;
    create_dir_all(root.join("bin"))?;
    write(root.join("dir1/dir2/nested.txt"), NESTED_TXT)?;
    write(root.join("file_at_root.txt"), ROOT_TXT)?;
    write(root.join("bin/run.sh"), RUN_SH)?;
    symlink("run.sh", root.join("bin/link"))?;

    for f in ["dir1/dir2/nested.txt", "file_at_root.txt"] {
        set_permissions(root.join(f), Permissions::from_mode(0o644))?;
    }
    set_permissions(root.join("bin/run.sh"), Permissions::from_mode(0o755))?;
    for d in ["dir1", "dir1/dir2", "bin"] {
        set_permissions(root.join(d), Permissions::from_mode(0o755))?;
    }
    Ok(td)
}
