//! Property sources
//!
//! A [`PropertySource`] answers "what is the raw value for this key?". Sources are
//! stacked inside an [`Environment`](super::Environment), which handles precedence
//! and typed coercion.

use crate::error::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::format::{PropertyFormat, format_for_path};

/// A named source of raw property values
pub trait PropertySource: Send + Sync {
    /// Human-readable name, used in logs
    fn name(&self) -> &str;

    /// Look up the raw value for a dotted property key
    fn get(&self, key: &str) -> Option<Value>;
}

// =============================================================================
// In-memory source
// =============================================================================

/// Flat in-memory property map
///
/// # Example
/// ```rust
/// use repo_autoconfig::config::{MapPropertySource, PropertySource};
///
/// let source = MapPropertySource::new("overrides")
///     .with("mybatis.table-generator.table", "ids");
/// assert!(source.get("mybatis.table-generator.table").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapPropertySource {
    name: String,
    values: HashMap<String, Value>,
}

impl MapPropertySource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: HashMap::new(),
        }
    }

    /// Add a property (builder style)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add or replace a property
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }
}

impl PropertySource for MapPropertySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }
}

// =============================================================================
// Process environment
// =============================================================================

/// Access to environment variables
///
/// Injected so tests never have to mutate the real process environment.
pub trait EnvSource: Send + Sync {
    fn var(&self, key: &str) -> std::result::Result<String, std::env::VarError>;
}

/// Reads the real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEnvSource;

impl EnvSource for DefaultEnvSource {
    fn var(&self, key: &str) -> std::result::Result<String, std::env::VarError> {
        std::env::var(key)
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> std::result::Result<String, std::env::VarError> {
        self.get(key).cloned().ok_or(std::env::VarError::NotPresent)
    }
}

/// Property source backed by environment variables
///
/// Keys are mapped as `mybatis.table-generator.allocation-size` ->
/// `MYBATIS_TABLE_GENERATOR_ALLOCATION_SIZE`. Values are handed out as raw
/// strings; [`Environment`](super::Environment) converts them once the target
/// type is known, so `007` stays `007` when a string is requested.
pub struct EnvVarPropertySource {
    source: Arc<dyn EnvSource>,
}

impl EnvVarPropertySource {
    /// Source reading the real process environment
    pub fn new() -> Self {
        Self::with_env(Arc::new(DefaultEnvSource))
    }

    /// Source reading from a custom [`EnvSource`]
    pub fn with_env(source: Arc<dyn EnvSource>) -> Self {
        Self { source }
    }

    /// Get the environment variable name for a property key
    pub fn var_name(key: &str) -> String {
        key.replace(['.', '-'], "_").to_uppercase()
    }
}

impl Default for EnvVarPropertySource {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EnvVarPropertySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvVarPropertySource").finish_non_exhaustive()
    }
}

impl PropertySource for EnvVarPropertySource {
    fn name(&self) -> &str {
        "environment variables"
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.source.var(&Self::var_name(key)).ok().map(Value::String)
    }
}

// =============================================================================
// Property files
// =============================================================================

/// Property source loaded from a configuration file
///
/// Keys can be written flat (`"mybatis.mapper-locations"`) or nested
/// (`mybatis: { mapper-locations: ... }`); both resolve the same dotted key.
#[derive(Debug, Clone)]
pub struct FilePropertySource {
    name: String,
    root: Value,
}

impl FilePropertySource {
    /// Load a file, picking the format from its extension
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is unknown (or its feature is disabled),
    /// or if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = format_for_path(path).ok_or_else(|| {
            Error::Config(format!(
                "Unsupported property file '{}': unknown or disabled format",
                path.display()
            ))
        })?;
        Self::load(path, format.as_ref())
    }

    /// Load a file with an explicit format
    pub fn load(path: impl AsRef<Path>, format: &dyn PropertyFormat) -> Result<Self> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let root = format.read(&path)?;
        Ok(Self::from_value(path.display().to_string(), root))
    }

    /// Wrap an already parsed value tree
    pub fn from_value(name: impl Into<String>, root: Value) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }
}

impl PropertySource for FilePropertySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &str) -> Option<Value> {
        lookup(&self.root, key).cloned()
    }
}

/// Resolve a dotted key against a value tree, accepting any mix of flat and
/// nested segments
fn lookup<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    let map = value.as_object()?;
    if let Some(found) = map.get(key) {
        return Some(found);
    }
    for (idx, _) in key.match_indices('.') {
        let (head, rest) = (&key[..idx], &key[idx + 1..]);
        if let Some(found) = map.get(head).and_then(|child| lookup(child, rest)) {
            return Some(found);
        }
    }
    None
}
