//! Loosely-typed attributes on files and directories.
//!
//! Two attributes have meaning to this crate:
//!
//!  * `UNIX_MODE` is the permission bits of an entry, in decimal. It is
//!    recorded on scan and restored on write.
//!  * `SYMLINK` marks a file entry as a symbolic link. The "content" of such
//!    a file is the link target.
//!
//! Everything else is carried along untouched. It's always valid to omit any
//! attribute, and writing falls back to whatever the OS gives you.
//!
//! ```
//! use ::arkive::*;
//!
//! let attrs = at! { UNIX_MODE => "33261" }.set("X-ORIGIN", "npm");
//! assert_eq!(attrs.mode(), Some(0o100755));
//! assert_eq!(attrs.get("X-ORIGIN"), Some("npm"));
//! ```

use serde::{Deserialize, Serialize};

pub const UNIX_MODE: &str = "UNIX_MODE";
pub const SYMLINK: &str = "SYMLINK";

/// A single named attribute.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Attr(String, String);

impl Attr {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self(name.into(), value.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn value(&self) -> &str {
        &self.1
    }
}

/// Every attribute on one entry, in insertion order.
#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize, Deserialize)]
pub struct Attrs(Vec<Attr>);

impl Attrs {
    pub fn new() -> Self {
        Self(vec![])
    }

    /// Add an attribute, even if one with the same name already exists.
    pub fn append(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push(Attr::new(name, value));
        self
    }

    /// Drop every attribute called `name`.
    pub fn delete(mut self, name: impl AsRef<str>) -> Self {
        self.0.retain(|attr| attr.name() != name.as_ref());
        self
    }

    /// Replace all attributes called `name` with a single new value.
    pub fn set(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.delete(&name).append(name, value)
    }

    /// Last value recorded under `name`.
    pub fn get(&self, name: impl AsRef<str>) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|attr| attr.name() == name.as_ref())
            .map(Attr::value)
    }

    pub fn items(&self) -> &Vec<Attr> {
        &self.0
    }

    /// Parsed `UNIX_MODE`, if present and numeric.
    pub fn mode(&self) -> Option<u32> {
        self.get(UNIX_MODE)?.parse().ok()
    }

    pub fn is_symlink(&self) -> bool {
        self.get(SYMLINK).is_some()
    }
}

#[macro_export]
macro_rules! at {
    ( $( $k:ident => $v:expr ),* $(,)? ) => {
        {
            $crate::Attrs::new() $( .append(stringify!($k), $v) )*
        }
    };
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn attr_json() {
        let attr = Attr::new("foo", "bar");
        let txt = serde_json::to_string(&attr).expect("should serialize");
        assert_eq!(txt, r#"["foo","bar"]"#);
        assert_eq!(
            serde_json::from_str::<Attr>(&txt).expect("should deserialize"),
            attr
        );
    }

    #[test]
    fn at_macro() {
        let attrs = Attrs::new().append("A", "1").append("B", "2").append("A", "3");
        assert_eq!(at! { A => "1", B => "2", A => "3" }, attrs);
        assert_eq!(at! {}, Attrs::new());
    }

    #[test]
    fn set_and_get() {
        let attrs = at! { A => "1", B => "2", A => "3" };
        assert_eq!(attrs.get("A"), Some("3"));
        assert_eq!(attrs.get("C"), None);

        let attrs = attrs.set("A", "4");
        assert_eq!(attrs, at! { B => "2", A => "4" });
    }

    #[test]
    fn mode() {
        assert_eq!(at! { UNIX_MODE => "33188" }.mode(), Some(0o100644));
        assert_eq!(at! { UNIX_MODE => "rw-r--r--" }.mode(), None);
        assert_eq!(Attrs::new().mode(), None);
    }

    #[test]
    fn symlink() {
        assert!(at! { SYMLINK => "1" }.is_symlink());
        assert!(!at! { UNIX_MODE => "33188" }.is_symlink());
    }
}
