//! Configuration management

use crate::domain::reflect::Resolver;
use crate::domain::registry::AnnotationRegistry;
use crate::domain::tags::TagStyle;
use crate::error::{MarginaliaError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

fn default_type_suffix() -> String {
    "Annotation".to_string()
}

/// Settings for an annotation resolver, loadable from TOML
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Tag delimiting convention used in documentation text
    #[serde(default)]
    pub tag_style: TagStyle,

    /// Canonical annotation-type suffix appended to tag names
    #[serde(default = "default_type_suffix")]
    pub type_suffix: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            tag_style: TagStyle::default(),
            type_suffix: default_type_suffix(),
        }
    }
}

impl ResolverConfig {
    /// Load config from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        toml::from_str(&contents).map_err(|e| {
            MarginaliaError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Save config as TOML
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| MarginaliaError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, contents)?;

        Ok(())
    }

    /// Build a resolver over the given registry with these settings
    pub fn build_resolver(&self, registry: Arc<AnnotationRegistry>) -> Resolver {
        Resolver::new(registry, self.tag_style, &self.type_suffix)
    }
}
