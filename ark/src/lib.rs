//! Immutable directory values, stored by content.
//!
//! A build step that shells out to external tools still wants to reason about
//! its inputs and outputs as plain values: "this tree, plus that tree, gives
//! this other tree". The filesystem doesn't work that way, so Arkive keeps an
//! in-memory description of a tree (an [`Ark`]) and a content-addressed
//! [`DB`] that holds the actual bytes. Every transformation produces a new
//! Ark, and every saved Ark has a [`Digest`] that identifies it by content.
//!
//! ```
//! use ::arkive::*;
//!
//! // File content can be anything. Strings are handy for demonstrations.
//! let lower = Ark::from_entries([
//!     ("site", Contents::Dir),
//!     ("site/config.toml", Contents::File("title = 'hello'")),
//! ]);
//! let upper = Ark::from_entries([
//!     ("node_modules/left-pad/index.js", Contents::File("module.exports = 0")),
//! ]);
//!
//! let merged = lower.overlay(&upper);
//! assert_eq!(merged.len(), 3);
//! ```

pub mod traits;
pub mod types;

pub use traits::*;
pub use types::*;

#[cfg(test)]
pub(crate) mod testing;
