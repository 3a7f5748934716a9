//! Per-entry tag used when building or taking apart an Ark.

/// Is this entry a directory, or a file with some content?
///
/// File content is generic. A freshly scanned tree carries `PathBuf`s, a tree
/// read into memory carries `Vec<u8>`, and a stored tree carries `Digest`s.
#[derive(Debug, PartialEq, Clone)]
pub enum Contents<C> {
    Dir,
    File(C),
}

impl<C> Contents<C> {
    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Dir)
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }
}
