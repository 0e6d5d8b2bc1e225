//! Layered property lookup with typed coercion

use crate::error::{Error, Result};
use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::source::{EnvVarPropertySource, PropertySource};

/// Ordered stack of property sources
///
/// The first source that holds a (non-null) value for a key wins. Sources added
/// with [`with_source`](Self::with_source) have lower precedence than the ones
/// already present; [`add_first`](Self::add_first) puts a source on top.
///
/// # Example
/// ```rust
/// use repo_autoconfig::config::{Environment, MapPropertySource};
///
/// let env = Environment::new()
///     .with_source(MapPropertySource::new("overrides").with("mybatis.table-generator.allocation-size", "25"))
///     .with_source(MapPropertySource::new("defaults").with("mybatis.table-generator.allocation-size", 10));
///
/// let size: Option<i32> = env.get_property("mybatis.table-generator.allocation-size")?;
/// assert_eq!(size, Some(25));
/// # Ok::<(), repo_autoconfig::Error>(())
/// ```
#[derive(Default)]
pub struct Environment {
    sources: Vec<Box<dyn PropertySource>>,
}

impl Environment {
    /// Empty environment: every lookup returns `None`
    pub fn new() -> Self {
        Self::default()
    }

    /// Environment backed by the process environment variables
    pub fn standard() -> Self {
        Self::new().with_source(EnvVarPropertySource::new())
    }

    /// Append a source with the lowest precedence so far
    pub fn with_source(mut self, source: impl PropertySource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Insert a source with the highest precedence
    pub fn add_first(&mut self, source: impl PropertySource + 'static) {
        self.sources.insert(0, Box::new(source));
    }

    /// Names of the sources in precedence order
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Check whether any source defines the key
    pub fn contains_property(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Look up a property and convert it to `T`
    ///
    /// Conversion is lenient the way property binding usually is: strings holding
    /// numbers or JSON are parsed, scalars bind to strings, and a comma-separated
    /// string or a single scalar binds to a list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] when the value is present but cannot be
    /// converted.
    pub fn get_property<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.find(key) {
            Some(value) => coerce(key, value).map(Some),
            None => Ok(None),
        }
    }

    fn find(&self, key: &str) -> Option<Value> {
        self.sources.iter().find_map(|source| {
            let value = source.get(key).filter(|v| !v.is_null())?;
            debug!("Property '{key}' resolved from '{}'", source.name());
            Some(value)
        })
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("sources", &self.source_names())
            .finish()
    }
}

fn coerce<T: DeserializeOwned>(key: &str, value: Value) -> Result<T> {
    for candidate in candidates(&value) {
        if let Ok(converted) = serde_json::from_value::<T>(candidate) {
            return Ok(converted);
        }
    }
    Err(Error::TypeMismatch {
        key: key.to_string(),
        expected: std::any::type_name::<T>().to_string(),
        actual: value.to_string(),
    })
}

/// Alternative shapes of a raw value, tried in order
fn candidates(value: &Value) -> Vec<Value> {
    let mut out = vec![value.clone()];

    let as_text = match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    };

    if let Some(text) = as_text {
        if let Value::String(s) = value {
            if let Ok(parsed) = serde_json::from_str::<Value>(s.trim()) {
                out.push(parsed);
            }
        } else {
            out.push(Value::String(text.clone()));
        }

        let items = text
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| Value::String(item.to_string()))
            .collect();
        out.push(Value::Array(items));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapPropertySource;
    use serde_json::json;

    fn env_with(key: &str, value: Value) -> Environment {
        Environment::new().with_source(MapPropertySource::new("test").with(key, value))
    }

    #[test]
    fn test_missing_property_is_none() {
        let env = Environment::new();
        let value: Option<String> = env.get_property("mybatis.mapper-locations").unwrap();
        assert!(value.is_none());
        assert!(!env.contains_property("mybatis.mapper-locations"));
    }

    #[test]
    fn test_null_counts_as_absent() {
        let env = env_with("k", Value::Null);
        let value: Option<String> = env.get_property("k").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_comma_separated_string_binds_to_list() {
        let env = env_with("k", json!("com.a, com.b ,,com.c"));
        let value: Vec<String> = env.get_property("k").unwrap().unwrap();
        assert_eq!(value, vec!["com.a", "com.b", "com.c"]);
    }

    #[test]
    fn test_single_string_binds_to_list() {
        let env = env_with("k", json!("classpath:mappers/*.xml"));
        let value: Vec<String> = env.get_property("k").unwrap().unwrap();
        assert_eq!(value, vec!["classpath:mappers/*.xml"]);
    }

    #[test]
    fn test_numeric_string_binds_to_integer() {
        let env = env_with("k", json!(" 42 "));
        let value: i32 = env.get_property("k").unwrap().unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_number_binds_to_string() {
        let env = env_with("k", json!(2024));
        let value: String = env.get_property("k").unwrap().unwrap();
        assert_eq!(value, "2024");
    }

    #[test]
    fn test_uncoercible_value_is_type_mismatch() {
        let env = env_with("mybatis.table-generator.allocation-size", json!("ten"));
        let result = env.get_property::<i32>("mybatis.table-generator.allocation-size");

        match result {
            Err(Error::TypeMismatch { key, .. }) => {
                assert_eq!(key, "mybatis.table-generator.allocation-size");
            }
            other => panic!("expected type mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_precedence_first_source_wins() {
        let mut env = Environment::new()
            .with_source(MapPropertySource::new("first").with("k", "one"))
            .with_source(MapPropertySource::new("second").with("k", "two").with("only", "second"));

        assert_eq!(env.get_property::<String>("k").unwrap().as_deref(), Some("one"));
        assert_eq!(env.get_property::<String>("only").unwrap().as_deref(), Some("second"));

        env.add_first(MapPropertySource::new("top").with("k", "zero"));
        assert_eq!(env.get_property::<String>("k").unwrap().as_deref(), Some("zero"));
        assert_eq!(env.source_names(), vec!["top", "first", "second"]);
    }
}
