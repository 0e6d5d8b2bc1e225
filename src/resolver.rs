//! Configuration resolution
//!
//! [`ConfigurationResolver`] turns the startup [`RepositoryProperties`] plus the
//! host's defaults into the final base packages, mapper locations and table
//! generator settings.

use crate::config::{Environment, RepositoryProperties, TableGeneratorConfig};
use crate::error::Result;
use crate::resource::ResourcePatternResolver;
use log::{debug, warn};
use std::collections::BTreeSet;

/// Resolves the merged repository configuration
pub struct ConfigurationResolver {
    prefix: String,
    properties: RepositoryProperties,
    environment: Environment,
    resources: Box<dyn ResourcePatternResolver>,
}

impl ConfigurationResolver {
    pub fn new(
        prefix: impl Into<String>,
        properties: RepositoryProperties,
        environment: Environment,
        resources: Box<dyn ResourcePatternResolver>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            properties,
            environment,
            resources,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn properties(&self) -> &RepositoryProperties {
        &self.properties
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Resolve the set of packages to scan for repositories
    ///
    /// With neither `repositories-base-packages` nor
    /// `repositories-base-packages-file` configured, `default` is returned as is.
    /// Otherwise the result is the union of the explicit packages and every
    /// non-blank line of every resource the package files resolve to.
    ///
    /// A package file that cannot be resolved or read is logged and skipped; it
    /// never fails the whole resolution.
    pub fn resolve_base_packages(&self, default: BTreeSet<String>) -> BTreeSet<String> {
        if self.properties.uses_default_base_packages() {
            debug!("No base packages configured, using {} default package(s)", default.len());
            return default;
        }

        let mut packages: BTreeSet<String> = self
            .properties
            .base_packages
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_owned)
            .collect();

        for location in &self.properties.base_packages_file {
            let location = location.trim();
            if location.is_empty() {
                continue;
            }
            self.collect_from_location(location, &mut packages);
        }

        debug!("Resolved {} base package(s)", packages.len());
        packages
    }

    fn collect_from_location(&self, location: &str, packages: &mut BTreeSet<String>) {
        let resources = match self.resources.resolve(location) {
            Ok(resources) => resources,
            Err(e) => {
                warn!("Skipping base packages file '{location}': {e}");
                return;
            }
        };

        if resources.is_empty() {
            debug!("Base packages file '{location}' matched no resources");
            return;
        }

        for resource in resources {
            match resource.read_to_string() {
                Ok(content) => {
                    let before = packages.len();
                    packages.extend(parse_package_list(&content));
                    debug!(
                        "Read {} new package(s) from {}",
                        packages.len() - before,
                        resource.path().display()
                    );
                }
                Err(e) => warn!("Skipping base packages file '{}': {e}", resource.location()),
            }
        }
    }

    /// Configured mapper locations, unmodified
    pub fn resolve_mapper_locations(&self) -> Vec<String> {
        self.properties.mapper_locations.clone()
    }

    /// Merge `<prefix>.table-generator.*` overrides into the host default
    ///
    /// Only fields with a property are replaced; the rest of `default` is kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`](crate::Error::TypeMismatch) when an
    /// override has the wrong type.
    pub fn resolve_table_generator_config(
        &self,
        mut default: TableGeneratorConfig,
    ) -> Result<TableGeneratorConfig> {
        let overrides = TableGeneratorConfig::from_environment(&self.environment, &self.prefix)?;
        if !overrides.is_empty() {
            debug!("Applying table generator overrides: {overrides:?}");
        }
        default.merge(overrides);
        Ok(default)
    }
}

impl std::fmt::Debug for ConfigurationResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigurationResolver")
            .field("prefix", &self.prefix)
            .field("properties", &self.properties)
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}

/// Split a package list file into trimmed, non-blank lines
pub fn parse_package_list(content: &str) -> impl Iterator<Item = String> + '_ {
    content
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
}
