use lazy_regex::regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Internal Path Representation.
///
/// Every path inside an Ark is relative to the root of the tree and obeys:
///
///  * Valid UTF-8
///  * Separated with /
///  * No leading or trailing /
///  * No empty, `.` or `..` segments
///
/// Conversion from a string never fails: offending segments are dropped. So
/// `/site/./public//index.html` becomes `site/public/index.html`, and a path
/// can't escape the tree by climbing out with `..`. The empty IPR is the root.
#[derive(Clone, Debug, PartialEq, PartialOrd, Ord, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct IPR(String);

impl IPR {
    pub fn is_well_formed(src: &str) -> bool {
        src.is_empty() || src.split('/').all(|seg| !matches!(seg, "" | "." | ".."))
    }

    pub fn canonize(src: &str) -> Cow<'_, str> {
        if Self::is_well_formed(src) {
            Cow::Borrowed(src)
        } else {
            Cow::Owned(Self::force_canonize(src))
        }
    }

    pub fn force_canonize(src: &str) -> String {
        regex!("/+")
            .split(src)
            .filter(|seg| !matches!(*seg, "" | "." | ".."))
            .collect::<Vec<&str>>()
            .join("/")
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Prepend a directory. Joining onto the root is a no-op.
    pub fn under(&self, prefix: &IPR) -> IPR {
        match (prefix.is_root(), self.is_root()) {
            (true, _) => self.clone(),
            (false, true) => prefix.clone(),
            (false, false) => IPR(format!("{}/{}", prefix.0, self.0)),
        }
    }

    /// Is this path strictly inside the directory `dir`?
    pub fn is_within(&self, dir: &IPR) -> bool {
        if dir.is_root() {
            return !self.is_root();
        }
        self.0.len() > dir.0.len()
            && self.0.starts_with(&dir.0)
            && self.0.as_bytes()[dir.0.len()] == b'/'
    }

    /// The path relative to `dir`, if it is strictly inside it.
    pub fn relative_to(&self, dir: &IPR) -> Option<IPR> {
        if !self.is_within(dir) {
            None
        } else if dir.is_root() {
            Some(self.clone())
        } else {
            Some(IPR(self.0[dir.0.len() + 1..].to_owned()))
        }
    }

    /// Every proper ancestor, nearest first. The root is not included.
    pub fn ancestors(&self) -> impl Iterator<Item = IPR> + '_ {
        self.0
            .char_indices()
            .rev()
            .filter(|(_, c)| *c == '/')
            .map(|(i, _)| IPR(self.0[..i].to_owned()))
    }
}

impl AsRef<str> for IPR {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IPR {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait ToIPR: AsRef<str> {
    fn to_ipr(&self) -> IPR {
        IPR(IPR::canonize(self.as_ref()).into_owned())
    }
}

impl ToIPR for str {}
impl ToIPR for &str {}
impl ToIPR for String {}
impl ToIPR for &String {}

impl<T> PartialEq<T> for IPR
where
    T: ToIPR,
{
    fn eq(&self, other: &T) -> bool {
        self.eq(&other.to_ipr())
    }
}

impl From<&str> for IPR {
    fn from(other: &str) -> IPR {
        other.to_ipr()
    }
}
impl From<&&str> for IPR {
    fn from(other: &&str) -> IPR {
        (*other).to_ipr()
    }
}
impl From<String> for IPR {
    fn from(other: String) -> IPR {
        if IPR::is_well_formed(&other) {
            IPR(other)
        } else {
            IPR(IPR::force_canonize(&other))
        }
    }
}
impl From<&String> for IPR {
    fn from(other: &String) -> IPR {
        other.to_ipr()
    }
}
impl From<&IPR> for IPR {
    fn from(other: &IPR) -> IPR {
        other.clone()
    }
}
impl From<IPR> for String {
    fn from(ipr: IPR) -> String {
        ipr.0
    }
}

impl TryFrom<&std::path::Path> for IPR {
    type Error = String;

    fn try_from(p: &std::path::Path) -> Result<Self, Self::Error> {
        p.to_str()
            .map(IPR::from)
            .ok_or_else(|| format!("Path is not valid UTF-8: {:?}", p))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn is_well_formed() {
        fn check(case: &str, expected: bool) {
            assert_eq!(IPR::is_well_formed(case), expected, "Failed on: {:?}", case);
        }
        check("", true);
        check("foo", true);
        check("foo/bar", true);
        check("/foo/bar", false);
        check("foo/bar/", false);
        check("foo//bar", false);
        check(".", false);
        check("..", false);
        check("...", true);
        check("foo.", true);
        check(".hugo_build.lock", true);
        check("a/./b", false);
        check("a/../b", false);
        check("a/.../b", true);
    }

    #[test]
    fn canonize() {
        fn check(case: &str, expected: &str) {
            assert_eq!(IPR::canonize(case), expected, "canonize failed on: {:?}", case);
            assert_eq!(
                IPR::force_canonize(case),
                expected,
                "force_canonize failed on: {:?}",
                case
            );
        }
        check("", "");
        check("foo/bar", "foo/bar");
        check("/foo/bar/", "foo/bar");
        check("////foo////bar", "foo/bar");
        check(".", "");
        check("...", "...");
        check("a/./b", "a/b");
        check("../../etc/passwd", "etc/passwd");
    }

    #[test]
    fn convert() {
        let from_str: IPR = "/hello/world/".into();
        let from_string: IPR = "/hello/world/".to_owned().into();
        assert_eq!(from_str.as_ref(), "hello/world");
        assert_eq!(from_str, from_string);
        assert_eq!(from_str, "hello/world");
    }

    #[test]
    fn json() {
        let ipr: IPR = serde_json::from_str(r#""/public//index.html""#).expect("deserialize");
        assert_eq!(ipr, "public/index.html");
        assert_eq!(
            serde_json::to_string(&ipr).expect("serialize"),
            r#""public/index.html""#
        );
    }

    #[test]
    fn under() {
        let root = IPR::from("");
        let public = IPR::from("public");
        assert_eq!(IPR::from("index.html").under(&public), "public/index.html");
        assert_eq!(IPR::from("index.html").under(&root), "index.html");
        assert_eq!(root.under(&public), "public");
    }

    #[test]
    fn within() {
        let nm = IPR::from("node_modules");
        assert!(IPR::from("node_modules/x").is_within(&nm));
        assert!(!IPR::from("node_modules").is_within(&nm));
        assert!(!IPR::from("node_modules_old/x").is_within(&nm));
        assert!(IPR::from("anything").is_within(&IPR::from("")));

        assert_eq!(
            IPR::from("node_modules/a/b.js").relative_to(&nm),
            Some("a/b.js".into())
        );
        assert_eq!(IPR::from("src/a.js").relative_to(&nm), None);
    }

    #[test]
    fn ancestors() {
        let found: Vec<IPR> = IPR::from("a/b/c.txt").ancestors().collect();
        assert_eq!(found, vec![IPR::from("a/b"), IPR::from("a")]);
        assert_eq!(IPR::from("top").ancestors().count(), 0);
    }
}
