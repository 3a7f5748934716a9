//! Layer one Ark on top of another.
//!
//! ```
//! use ::arkive::*;
//!
//! let site = Ark::from_entries([
//!     ("package.json", Contents::File("{}")),
//!     ("public/index.html", Contents::File("stale")),
//! ]);
//! let build = Ark::from_entries([
//!     ("public/index.html", Contents::File("fresh")),
//! ]);
//!
//! let merged = site.overlay(&build);
//! assert_eq!(merged.contents(), &vec!["{}", "fresh"]);
//! ```
use crate::types::*;
use std::collections::HashSet;

impl<C> Ark<C>
where
    C: Clone,
{
    /// Merge `upper` over `self`, producing a new Ark.
    ///
    /// The rules are:
    ///
    ///  * Every entry of `upper` survives unchanged. Same path, upper wins.
    ///  * A file in `upper` hides everything `self` had beneath that path.
    ///  * An entry in `upper` hides any file `self` had at one of its
    ///    ancestors, since that ancestor has to be a directory now.
    ///  * Everything else in `self` is kept.
    pub fn overlay(&self, upper: &Ark<C>) -> Ark<C> {
        if upper.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return upper.clone();
        }

        let upper_paths: HashSet<&IPR> = upper.paths().iter().collect();
        let upper_files: HashSet<&IPR> = upper.files().map(|(p, _, _)| p).collect();
        let upper_parents: HashSet<IPR> = upper.paths().iter().flat_map(|p| p.ancestors()).collect();

        let kept = self.to_entries().into_iter().filter(|(p, _, c)| {
            if upper_paths.contains(p) {
                return false;
            }
            if c.is_file() && upper_parents.contains(p) {
                return false;
            }
            !p.ancestors().any(|a| upper_files.contains(&a))
        });
        Ark::from_entries(kept.chain(upper.to_entries()))
    }
}
