use crate::error::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for the projection layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Materialize `values`/`valueOf` for enum classes.
    pub synthesize_enum_members: bool,
    /// Let accessor-named methods (`getFoo`, `isFoo`, `setFoo`) fall back to the
    /// property origin `foo` when no same-named function exists.
    pub match_accessor_origins: bool,
    /// Maximum depth of ancestor walks.
    pub max_hierarchy_depth: usize,
    /// Hide compiler-generated (synthetic / bridge) members from member arrays.
    pub skip_synthetic_compiled_members: bool,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            synthesize_enum_members: true,
            match_accessor_origins: true,
            max_hierarchy_depth: 64,
            skip_synthetic_compiled_members: true,
        }
    }
}

impl ProjectionConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        tracing::debug!(path = %path.display(), ?config, "loaded projection config");
        Ok(config)
    }

    /// JSON schema of the configuration file.
    pub fn json_schema() -> serde_json::Value {
        serde_json::to_value(schemars::schema_for!(ProjectionConfig)).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_keys_take_defaults() {
        let config = ProjectionConfig::from_json_str(r#"{ "synthesize_enum_members": false }"#)
            .unwrap();
        assert!(!config.synthesize_enum_members);
        assert!(config.match_accessor_origins);
        assert_eq!(config.max_hierarchy_depth, 64);
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "max_hierarchy_depth": 3 }}"#).unwrap();
        let config = ProjectionConfig::load(file.path()).unwrap();
        assert_eq!(config.max_hierarchy_depth, 3);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(ProjectionConfig::from_json_str("{ not json").is_err());
    }

    #[test]
    fn schema_lists_properties() {
        let schema = ProjectionConfig::json_schema();
        assert!(schema["properties"]["synthesize_enum_members"].is_object());
    }
}
