//! Behavior on Ark objects, one concern per module.

pub mod entries;
pub mod import;
pub mod overlay;
pub mod read;
pub mod reroot;
pub mod save;
pub mod scan;
pub mod write;

pub use import::Temporizable;
pub use save::*;
