use serde::{Deserialize, Deserializer, Serializer};
use std::sync::Arc;

pub mod serde_arc_str {
    use super::*;

    pub fn serialize<S>(arc: &Arc<str>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(arc)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Arc<str>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Arc::from(s.as_str()))
    }
}

/// Whether `name` looks like the JVM name of an anonymous or local class segment
/// (`1`, `2`, `1Local`).
pub fn is_anonymous_segment(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_digit())
}
