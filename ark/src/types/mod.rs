pub mod ark;
pub mod attrs;
pub mod contents;
pub mod db;
pub mod digest;
pub mod ipr;

pub use ark::*;
pub use attrs::*;
pub use contents::*;
pub use db::*;
pub use digest::*;
pub use ipr::*;
