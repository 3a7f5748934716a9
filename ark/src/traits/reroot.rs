//! Move an Ark under a directory, or pull a directory out of one.
//!
//! ```
//! use ::arkive::*;
//!
//! let built = Ark::from_entries([
//!     ("index.html", Contents::File("<html>")),
//! ]).prefixed("public");
//! assert!(built.contains("public/index.html"));
//!
//! let site = built.subtree("public");
//! assert!(site.contains("index.html"));
//! ```
use crate::types::*;
use std::rc::Rc;

impl<C> Ark<C>
where
    C: Clone,
{
    /// Move every entry under `prefix`.
    ///
    /// Sort order is preserved by prepending a common prefix, so only the
    /// paths channel is rebuilt.
    pub fn prefixed(&self, prefix: impl Into<IPR>) -> Ark<C> {
        let prefix = prefix.into();
        if prefix.is_root() {
            return self.clone();
        }
        let paths: Vec<IPR> = self.0.iter().map(|p| p.under(&prefix)).collect();
        Ark(Rc::new(paths), self.1.clone(), self.2.clone())
    }

    /// Everything strictly beneath `dir`, re-rooted at `dir`.
    pub fn subtree(&self, dir: impl Into<IPR>) -> Ark<C> {
        let dir = dir.into();
        if dir.is_root() {
            return self.clone();
        }
        Ark::from_entries(
            self.to_entries()
                .into_iter()
                .filter_map(|(p, a, c)| p.relative_to(&dir).map(|rel| (rel, a, c))),
        )
    }
}
