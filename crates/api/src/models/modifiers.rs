use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Static,
    Final,
    Default,
    Synchronized,
    Native,
    Transient,
    Volatile,
    Strictfp,
}

impl Modifier {
    pub fn as_str(self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Abstract => "abstract",
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Default => "default",
            Modifier::Synchronized => "synchronized",
            Modifier::Native => "native",
            Modifier::Transient => "transient",
            Modifier::Volatile => "volatile",
            Modifier::Strictfp => "strictfp",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let modifier = match s {
            "public" => Modifier::Public,
            "protected" => Modifier::Protected,
            "private" => Modifier::Private,
            "abstract" => Modifier::Abstract,
            "static" => Modifier::Static,
            "final" => Modifier::Final,
            "default" => Modifier::Default,
            "synchronized" => Modifier::Synchronized,
            "native" => Modifier::Native,
            "transient" => Modifier::Transient,
            "volatile" => Modifier::Volatile,
            "strictfp" => Modifier::Strictfp,
            _ => return None,
        };
        Some(modifier)
    }
}

/// An ordered, duplicate-free modifier set.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, Default)]
#[serde(transparent)]
pub struct Modifiers(Vec<Modifier>);

/// Pseudo-modifier that holds when no access modifier is present.
pub const PACKAGE_LOCAL: &str = "packageLocal";

impl Modifiers {
    pub fn new(modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        let mut list: Vec<Modifier> = modifiers.into_iter().collect();
        list.sort();
        list.dedup();
        Self(list)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        self.0.contains(&modifier)
    }

    pub fn insert(&mut self, modifier: Modifier) {
        if let Err(pos) = self.0.binary_search(&modifier) {
            self.0.insert(pos, modifier);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.0.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// String-keyed query, accepting the keyword spelling or `packageLocal`.
    pub fn has_property(&self, name: &str) -> bool {
        if name == PACKAGE_LOCAL {
            return !self.contains(Modifier::Public)
                && !self.contains(Modifier::Protected)
                && !self.contains(Modifier::Private);
        }
        Modifier::parse(name).is_some_and(|m| self.contains(m))
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words: Vec<&str> = self.0.iter().map(|m| m.as_str()).collect();
        f.write_str(&words.join(" "))
    }
}
