//! Configuration properties and where they come from
//!
//! This module contains:
//! - `Environment` - Ordered property sources with typed lookup
//! - `PropertySource` - Trait for raw value providers (maps, env vars, files)
//! - `RepositoryProperties` - Mapper locations and base package settings
//! - `TableGeneratorConfig` - Table-based ID generator parameters

mod environment;
mod format;
mod properties;
mod source;
mod table_generator;

pub use environment::Environment;
pub use format::{JsonFormat, PropertyFormat, format_for_path};
#[cfg(feature = "toml")]
pub use format::TomlFormat;
#[cfg(feature = "yaml")]
pub use format::YamlFormat;
pub use properties::{
    BASE_PACKAGES, BASE_PACKAGES_FILE, DEFAULT_PREFIX, MAPPER_LOCATIONS, RepositoryProperties,
    property_key,
};
pub use source::{
    DefaultEnvSource, EnvSource, EnvVarPropertySource, FilePropertySource, MapPropertySource,
    PropertySource,
};
pub use table_generator::{TABLE_GENERATOR, TableGeneratorConfig};
