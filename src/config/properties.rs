//! Repository scanning properties read at startup

use crate::error::Result;
use serde::{Deserialize, Serialize};

use super::environment::Environment;

/// Default property prefix
pub const DEFAULT_PREFIX: &str = "mybatis";

/// Mapper file location patterns
pub const MAPPER_LOCATIONS: &str = "mapper-locations";

/// Explicit base packages to scan for repositories
pub const BASE_PACKAGES: &str = "repositories-base-packages";

/// Resource locations of files listing base packages, one per line
pub const BASE_PACKAGES_FILE: &str = "repositories-base-packages-file";

/// Join a prefix and a property name with a dot
///
/// An empty prefix yields the bare name.
pub fn property_key(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

/// Repository scanning settings
///
/// An empty list means the property was not set and the host's default applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RepositoryProperties {
    /// Mapper file patterns, in declaration order
    pub mapper_locations: Vec<String>,

    #[serde(rename = "repositories-base-packages")]
    pub base_packages: Vec<String>,

    #[serde(rename = "repositories-base-packages-file")]
    pub base_packages_file: Vec<String>,
}

impl RepositoryProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the properties under `prefix`
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`](crate::Error::TypeMismatch) if a property
    /// cannot be read as a list of strings.
    pub fn from_environment(env: &Environment, prefix: &str) -> Result<Self> {
        let list = |name: &str| -> Result<Vec<String>> {
            Ok(env
                .get_property(&property_key(prefix, name))?
                .unwrap_or_default())
        };

        Ok(Self {
            mapper_locations: list(MAPPER_LOCATIONS)?,
            base_packages: list(BASE_PACKAGES)?,
            base_packages_file: list(BASE_PACKAGES_FILE)?,
        })
    }

    pub fn with_mapper_location(mut self, location: impl Into<String>) -> Self {
        self.mapper_locations.push(location.into());
        self
    }

    pub fn with_base_package(mut self, package: impl Into<String>) -> Self {
        self.base_packages.push(package.into());
        self
    }

    pub fn with_base_packages_file(mut self, location: impl Into<String>) -> Self {
        self.base_packages_file.push(location.into());
        self
    }

    /// True when neither explicit packages nor package files are configured
    #[must_use]
    pub fn uses_default_base_packages(&self) -> bool {
        self.base_packages.is_empty() && self.base_packages_file.is_empty()
    }
}
