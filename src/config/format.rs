//! Property file formats
//!
//! Every format parses into a [`serde_json::Value`] tree so that property
//! lookup and type coercion work the same regardless of where a value came from.

use crate::error::{Error, Result};
use serde_json::Value;
use std::path::Path;

/// Trait for property file formats
///
/// Additional formats can be plugged in by implementing this trait and
/// handing it to [`FilePropertySource::load`](super::FilePropertySource::load).
pub trait PropertyFormat: Send + Sync {
    /// File extension for this format (e.g., "json", "toml")
    fn extension(&self) -> &str;

    /// Parse file content into a value tree
    ///
    /// `source_name` is only used in error messages.
    fn parse(&self, source_name: &str, content: &str) -> Result<Value>;

    /// Read and parse a file
    fn read(&self, path: &Path) -> Result<Value> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.parse(&path.display().to_string(), &content)
    }
}

/// Pick a format from a file extension
///
/// Returns `None` for unknown extensions and for formats whose feature is disabled.
pub fn format_for_path(path: &Path) -> Option<Box<dyn PropertyFormat>> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "json" => Some(Box::new(JsonFormat)),
        #[cfg(feature = "toml")]
        "toml" => Some(Box::new(TomlFormat)),
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => Some(Box::new(YamlFormat)),
        _ => None,
    }
}

// =============================================================================
// JSON
// =============================================================================

/// JSON property files (always available)
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl PropertyFormat for JsonFormat {
    fn extension(&self) -> &str {
        "json"
    }

    fn parse(&self, source_name: &str, content: &str) -> Result<Value> {
        serde_json::from_str(content).map_err(|e| Error::Parse {
            source_name: source_name.to_string(),
            reason: e.to_string(),
        })
    }
}

// =============================================================================
// TOML
// =============================================================================

/// TOML property files
#[cfg(feature = "toml")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlFormat;

#[cfg(feature = "toml")]
impl PropertyFormat for TomlFormat {
    fn extension(&self) -> &str {
        "toml"
    }

    fn parse(&self, source_name: &str, content: &str) -> Result<Value> {
        toml::from_str(content).map_err(|e| Error::Parse {
            source_name: source_name.to_string(),
            reason: e.to_string(),
        })
    }
}

// =============================================================================
// YAML
// =============================================================================

/// YAML property files
#[cfg(feature = "yaml")]
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFormat;

#[cfg(feature = "yaml")]
impl PropertyFormat for YamlFormat {
    fn extension(&self) -> &str {
        "yaml"
    }

    fn parse(&self, source_name: &str, content: &str) -> Result<Value> {
        // An empty YAML document is null; treat it as an empty mapping
        if content.trim().is_empty() {
            return Ok(Value::Object(serde_json::Map::new()));
        }
        serde_yaml::from_str(content).map_err(|e| Error::Parse {
            source_name: source_name.to_string(),
            reason: e.to_string(),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
