//! Convert to and from lists of entries.
//!
//! An entry is either `(path, attrs, contents)` or `(path, contents)`. The
//! short form infers blank attrs, which is handy in tests and not much else.
//!
//! ```
//! use ::arkive::*;
//!
//! let ark = Ark::from_entries([
//!     ("content", Contents::Dir),
//!     ("content/_index.md", Contents::File("# Welcome")),
//! ]);
//!
//! // Arks have a canonical order, so the original order is not preserved.
//! let entries = ark.to_entries();
//! assert_eq!(entries[0],
//!     ("content/_index.md".to_ipr(), Attrs::new(), Contents::File("# Welcome")));
//! ```
use crate::types::*;
use std::collections::HashMap;
use std::iter::zip;
use std::rc::Rc;

/// Internal conversion format.
pub struct Entry<C>(IPR, Attrs, Contents<C>);

impl<S, C> From<(S, Attrs, Contents<C>)> for Entry<C>
where
    S: Into<IPR>,
{
    fn from(src: (S, Attrs, Contents<C>)) -> Self {
        Self(src.0.into(), src.1, src.2)
    }
}

impl<S, C> From<(S, Contents<C>)> for Entry<C>
where
    S: Into<IPR>,
{
    fn from(src: (S, Contents<C>)) -> Self {
        Self(src.0.into(), Attrs::new(), src.1)
    }
}

impl<C> Ark<C> {
    /// Build an Ark from entries in any order.
    ///
    /// When a path shows up more than once, the last entry wins.
    pub fn from_entries<E>(entries: impl IntoIterator<Item = E>) -> Self
    where
        E: Into<Entry<C>>,
    {
        let uniq: HashMap<IPR, (Attrs, Contents<C>)> = entries
            .into_iter()
            .map(|e| {
                let Entry(p, a, c) = e.into();
                (p, (a, c))
            })
            .collect();

        let (mut files, mut dirs): (Vec<_>, Vec<_>) = uniq
            .into_iter()
            .map(|(p, (a, c))| (p, a, c))
            .partition(|(_, _, c)| c.is_file());
        files.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        dirs.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        let n = files.len() + dirs.len();
        let mut paths = Vec::<IPR>::with_capacity(n);
        let mut attrs = Vec::<Attrs>::with_capacity(n);
        let mut contents = Vec::<C>::with_capacity(files.len());

        for (p, a, c) in files {
            paths.push(p);
            attrs.push(a);
            if let Contents::File(content) = c {
                contents.push(content)
            }
        }
        for (p, a, _) in dirs {
            paths.push(p);
            attrs.push(a);
        }

        Self(Rc::new(paths), Rc::new(attrs), Rc::new(contents))
    }

    /// Turn this Ark into a Vec of (path, attrs, contents) entries.
    pub fn to_entries(&self) -> Vec<(IPR, Attrs, Contents<C>)>
    where
        C: Clone,
    {
        let file_contents = self.2.iter().cloned().map(Contents::File);
        let contents = file_contents.chain(std::iter::repeat_with(|| Contents::Dir));

        zip(self.0.iter().cloned(), self.1.iter().cloned())
            .zip(contents)
            .map(|((p, a), c)| (p, a, c))
            .collect()
    }
}

impl<C, S> From<Vec<(S, Attrs, Contents<C>)>> for Ark<C>
where
    S: Into<IPR>,
{
    fn from(src: Vec<(S, Attrs, Contents<C>)>) -> Self {
        Ark::from_entries(src)
    }
}

impl<C, S> From<Vec<(S, Contents<C>)>> for Ark<C>
where
    S: Into<IPR>,
{
    fn from(src: Vec<(S, Contents<C>)>) -> Self {
        Ark::from_entries(src)
    }
}

impl<C> From<Ark<C>> for Vec<(IPR, Attrs, Contents<C>)>
where
    C: Clone,
{
    fn from(src: Ark<C>) -> Self {
        src.to_entries()
    }
}
