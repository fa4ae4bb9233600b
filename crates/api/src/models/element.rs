use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Stable identity of a node inside one artifact (compiled or origin tree).
///
/// `artifact` identifies the owning tree, `index` the node within it. Two handles
/// over the same node compare equal even when they are distinct allocations.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId {
    pub artifact: u64,
    pub index: u32,
}

impl ElementId {
    pub const fn new(artifact: u64, index: u32) -> Self {
        Self { artifact, index }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}:{}", self.artifact, self.index)
    }
}

/// Half-open byte range inside a source text.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextRange {
    pub start: u32,
    pub end: u32,
}

impl TextRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, offset: u32) -> bool {
        offset >= self.start && offset < self.end
    }
}

/// Where navigation to a declaration should land.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    pub path: PathBuf,
    pub range: Option<TextRange>,
}

impl NavigationTarget {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            range: None,
        }
    }

    pub fn at(path: impl Into<PathBuf>, range: TextRange) -> Self {
        Self {
            path: path.into(),
            range: Some(range),
        }
    }
}

/// Which kind of tree a class projection was built from.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ClassOriginKind {
    Source,
    Binary,
}
