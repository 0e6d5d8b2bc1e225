//! Repository registration entry point
//!
//! This module contains [`RepositoriesAutoConfiguration`], which reads the
//! repository properties once at startup, resolves the final configuration and
//! hands it to the host's [`RepositoryRegistrar`].

use crate::config::{
    DEFAULT_PREFIX, Environment, RepositoryProperties, TableGeneratorConfig,
};
use crate::error::{BoxError, Error, Result};
use crate::resolver::ConfigurationResolver;
use crate::resource::{FileSystemResourceResolver, ResourcePatternResolver};
use log::{debug, info};
use serde::Serialize;
use std::collections::BTreeSet;

/// Defaults computed by the host framework for this registration pass
///
/// Typically the base package is the package of the application's startup
/// unit and the table generator comes from the host's own annotations or
/// conventions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupMetadata {
    pub default_base_packages: BTreeSet<String>,
    /// Mapper locations used when none are configured
    pub default_mapper_locations: Vec<String>,
    pub table_generator: TableGeneratorConfig,
}

impl StartupMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata whose only default base package is `package`
    pub fn for_package(package: impl Into<String>) -> Self {
        Self::new().with_base_package(package)
    }

    pub fn with_base_package(mut self, package: impl Into<String>) -> Self {
        self.default_base_packages.insert(package.into());
        self
    }

    pub fn with_mapper_location(mut self, location: impl Into<String>) -> Self {
        self.default_mapper_locations.push(location.into());
        self
    }

    pub fn table_generator(mut self, config: TableGeneratorConfig) -> Self {
        self.table_generator = config;
        self
    }
}

/// Fully resolved configuration handed to the registrar
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RepositoryConfigurationSource {
    pub base_packages: BTreeSet<String>,
    pub mapper_locations: Vec<String>,
    pub table_generator: TableGeneratorConfig,
}

/// Host service that scans the configured packages and registers the
/// repositories it finds in `registry`
///
/// Closures with the matching signature implement this trait.
pub trait RepositoryRegistrar<R: ?Sized> {
    fn register_repositories(
        &self,
        source: RepositoryConfigurationSource,
        registry: &mut R,
    ) -> std::result::Result<(), BoxError>;
}

impl<R, F> RepositoryRegistrar<R> for F
where
    R: ?Sized,
    F: Fn(RepositoryConfigurationSource, &mut R) -> std::result::Result<(), BoxError>,
{
    fn register_repositories(
        &self,
        source: RepositoryConfigurationSource,
        registry: &mut R,
    ) -> std::result::Result<(), BoxError> {
        self(source, registry)
    }
}

/// Wires repository scanning into application startup.
///
/// # Example
///
/// ```rust,no_run
/// use repo_autoconfig::{
///     BoxError, RepositoriesAutoConfiguration, RepositoryConfigurationSource, StartupMetadata,
/// };
/// use repo_autoconfig::resource::FileSystemResourceResolver;
///
/// let autoconfig = RepositoriesAutoConfiguration::builder()
///     .resource_resolver(FileSystemResourceResolver::new().with_classpath_root("resources"))
///     .build()?;
///
/// let mut registry: Vec<String> = Vec::new();
/// let registrar = |source: RepositoryConfigurationSource, registry: &mut Vec<String>| -> Result<(), BoxError> {
///     registry.extend(source.base_packages);
///     Ok(())
/// };
///
/// autoconfig.register_repositories(
///     &StartupMetadata::for_package("com.example.app"),
///     &mut registry,
///     &registrar,
/// )?;
/// # Ok::<(), repo_autoconfig::Error>(())
/// ```
#[derive(Debug)]
pub struct RepositoriesAutoConfiguration {
    resolver: ConfigurationResolver,
}

impl RepositoriesAutoConfiguration {
    /// Create a new builder
    pub fn builder() -> RepositoriesAutoConfigurationBuilder {
        RepositoriesAutoConfigurationBuilder::new()
    }

    /// Create from an already constructed resolver
    pub fn new(resolver: ConfigurationResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &ConfigurationResolver {
        &self.resolver
    }

    pub fn properties(&self) -> &RepositoryProperties {
        self.resolver.properties()
    }

    /// Resolve everything the registrar needs for this pass
    ///
    /// Configured mapper locations take precedence; without any, the host's
    /// default mapper locations are used.
    ///
    /// # Errors
    ///
    /// Fails if a table generator override has the wrong type.
    pub fn configuration_source(
        &self,
        metadata: &StartupMetadata,
    ) -> Result<RepositoryConfigurationSource> {
        let mut mapper_locations = self.resolver.resolve_mapper_locations();
        if mapper_locations.is_empty() {
            debug!("No mapper locations configured, using host defaults");
            mapper_locations = metadata.default_mapper_locations.clone();
        }

        Ok(RepositoryConfigurationSource {
            base_packages: self
                .resolver
                .resolve_base_packages(metadata.default_base_packages.clone()),
            mapper_locations,
            table_generator: self
                .resolver
                .resolve_table_generator_config(metadata.table_generator.clone())?,
        })
    }

    /// Resolve the configuration and let `registrar` register repositories in
    /// `registry`
    ///
    /// # Errors
    ///
    /// Resolution errors and registrar failures are returned unchanged in kind;
    /// the host is expected to abort startup on either.
    pub fn register_repositories<R, G>(
        &self,
        metadata: &StartupMetadata,
        registry: &mut R,
        registrar: &G,
    ) -> Result<()>
    where
        R: ?Sized,
        G: RepositoryRegistrar<R> + ?Sized,
    {
        let source = self.configuration_source(metadata)?;
        info!(
            "Registering repositories from {} base package(s) with {} mapper location(s)",
            source.base_packages.len(),
            source.mapper_locations.len()
        );
        registrar
            .register_repositories(source, registry)
            .map_err(Error::Registration)
    }
}

/// Builder for [`RepositoriesAutoConfiguration`]
pub struct RepositoriesAutoConfigurationBuilder {
    prefix: String,
    environment: Option<Environment>,
    resources: Option<Box<dyn ResourcePatternResolver>>,
}

impl RepositoriesAutoConfigurationBuilder {
    pub fn new() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            environment: None,
            resources: None,
        }
    }

    /// Set the property prefix (default: "mybatis")
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the environment properties are read from
    ///
    /// Defaults to [`Environment::standard`] (process environment variables).
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Set the resolver used for `repositories-base-packages-file` locations
    ///
    /// Defaults to a [`FileSystemResourceResolver`] rooted at the working directory.
    pub fn resource_resolver(mut self, resolver: impl ResourcePatternResolver + 'static) -> Self {
        self.resources = Some(Box::new(resolver));
        self
    }

    /// Read the repository properties and build the auto-configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix is malformed or a property has the wrong type.
    pub fn build(self) -> Result<RepositoriesAutoConfiguration> {
        let prefix = self.prefix.trim().trim_end_matches('.').to_string();
        if prefix.chars().any(char::is_whitespace) || prefix.starts_with('.') {
            return Err(Error::Config(format!(
                "Invalid property prefix '{}'",
                self.prefix
            )));
        }

        let environment = self.environment.unwrap_or_else(Environment::standard);
        let resources = self
            .resources
            .unwrap_or_else(|| Box::new(FileSystemResourceResolver::new()));

        let properties = RepositoryProperties::from_environment(&environment, &prefix)?;
        debug!("Repository properties under '{prefix}': {properties:?}");

        Ok(RepositoriesAutoConfiguration::new(ConfigurationResolver::new(
            prefix,
            properties,
            environment,
            resources,
        )))
    }
}

impl Default for RepositoriesAutoConfigurationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RepositoriesAutoConfigurationBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoriesAutoConfigurationBuilder")
            .field("prefix", &self.prefix)
            .field("environment", &self.environment)
            .field("resources", &self.resources.as_ref().map(|_| "Some(resolver)"))
            .finish()
    }
}
