use super::util::serde_arc_str;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A dot-separated fully qualified name, e.g. `com.example.Outer.Inner`.
///
/// The empty name is the root (default package).
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct FqName(#[serde(with = "serde_arc_str")] Arc<str>);

impl FqName {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    pub fn root() -> Self {
        Self::new("")
    }

    /// Convert a JVM internal name (`com/example/Outer$Inner`) into a qualified name.
    pub fn from_internal_name(internal: &str) -> Self {
        Self::new(internal.replace(['/', '$'], "."))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The last segment of the name.
    pub fn short_name(&self) -> &str {
        match self.0.rfind('.') {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }

    pub fn parent(&self) -> FqName {
        match self.0.rfind('.') {
            Some(idx) => Self::new(&self.0[..idx]),
            None => Self::root(),
        }
    }

    pub fn child(&self, name: &str) -> FqName {
        if self.is_root() {
            Self::new(name)
        } else {
            Self::new(format!("{}.{}", self.0, name))
        }
    }

    /// True when `other` is nested strictly inside this name.
    pub fn encloses(&self, other: &FqName) -> bool {
        if self.is_root() {
            return !other.is_root();
        }
        other
            .0
            .strip_prefix(&*self.0)
            .is_some_and(|rest| rest.starts_with('.'))
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.').filter(|s| !s.is_empty())
    }
}

impl Default for FqName {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for FqName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for FqName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FqName({})", self.0)
    }
}

impl From<&str> for FqName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
