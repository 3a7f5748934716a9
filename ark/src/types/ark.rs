//! The core type and nothing else.

use crate::types::attrs::Attrs;
use crate::types::ipr::IPR;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// An immutable description of a directory tree.
///
/// The content type is generic, so the same structure describes a tree on
/// disk (`Ark<PathBuf>`), a tree in memory (`Ark<Vec<u8>>`) and a tree in a
/// store (`Ark<Digest>`). Converting between them is a matter of replacing
/// one channel.
///
/// The layout is struct-of-arrays:
///
///   - ark.paths()
///   - ark.attrs()
///   - ark.contents()
///
/// Each channel is a reference-counted vector, so a transformation that only
/// touches paths (see [`Ark::prefixed`]) shares the other two with its input.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Ark<C>(
    pub(crate) Rc<Vec<IPR>>,
    pub(crate) Rc<Vec<Attrs>>,
    pub(crate) Rc<Vec<C>>,
);

impl<C> Ark<C> {
    /// Internal paths list.
    ///
    /// In an archive of F files and D directories:
    ///
    ///  - This vector is length F+D.
    ///  - There are no duplicate paths.
    ///  - All files come before all directories.
    ///  - Within each of those sections, paths are sorted.
    pub fn paths(&self) -> &Vec<IPR> {
        &self.0
    }

    /// Internal attrs list. `ark.attrs()[N]` belongs to `ark.paths()[N]`.
    pub fn attrs(&self) -> &Vec<Attrs> {
        &self.1
    }

    /// Internal contents list.
    ///
    /// This vector is length F, not F+D, and `ark.contents()[N]` belongs to
    /// `ark.paths()[N]`.
    pub fn contents(&self) -> &Vec<C> {
        &self.2
    }

    pub fn empty() -> Self {
        Self(Rc::new(vec![]), Rc::new(vec![]), Rc::new(vec![]))
    }

    /// Total number of entries, files and directories together.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over (path, attrs, content) for every file.
    pub fn files(&self) -> impl Iterator<Item = (&IPR, &Attrs, &C)> {
        self.0
            .iter()
            .zip(self.1.iter())
            .zip(self.2.iter())
            .map(|((p, a), c)| (p, a, c))
    }

    /// Iterate over (path, attrs) for every directory.
    pub fn dirs(&self) -> impl Iterator<Item = (&IPR, &Attrs)> {
        let n = self.2.len();
        self.0.iter().zip(self.1.iter()).skip(n)
    }

    /// Does any entry, file or directory, live at this path?
    pub fn contains(&self, path: impl Into<IPR>) -> bool {
        let path = path.into();
        self.0.iter().any(|p| *p == path)
    }

    /// Replace the content channel, keeping paths and attrs.
    pub fn map_contents<D, E>(&self, f: impl FnMut(&C) -> Result<D, E>) -> Result<Ark<D>, E> {
        let contents = self.2.iter().map(f).collect::<Result<Vec<D>, E>>()?;
        Ok(Ark(self.0.clone(), self.1.clone(), Rc::new(contents)))
    }
}
