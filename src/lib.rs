//! # repo-autoconfig - Repository scanning auto-configuration
//!
//! Resolves the configuration an ORM repository scanner needs at application
//! startup and hands it to the host's registration service.
//!
//! ## Features
//!
//! - **Base Packages**: Explicit packages, package-list files found through
//!   resource patterns, or the host default when neither is configured
//! - **Mapper Locations**: Configured patterns passed through untouched
//! - **Table ID Generator**: Host defaults merged field by field with overrides
//! - **Layered Properties**: Environment variables, JSON/TOML/YAML files and in-memory maps
//! - **Resource Patterns**: `classpath:`, `classpath*:` and `file:` locations with glob support
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use repo_autoconfig::config::{Environment, EnvVarPropertySource, FilePropertySource};
//! use repo_autoconfig::resource::FileSystemResourceResolver;
//! use repo_autoconfig::{
//!     BoxError, RepositoriesAutoConfiguration, RepositoryConfigurationSource, StartupMetadata,
//!     TableGeneratorConfig,
//! };
//!
//! # fn example() -> repo_autoconfig::Result<()> {
//! let environment = Environment::new()
//!     .with_source(EnvVarPropertySource::new())
//!     .with_source(FilePropertySource::from_path("config/application.json")?);
//!
//! let autoconfig = RepositoriesAutoConfiguration::builder()
//!     .prefix("mybatis")
//!     .environment(environment)
//!     .resource_resolver(FileSystemResourceResolver::new().with_classpath_root("resources"))
//!     .build()?;
//!
//! let metadata = StartupMetadata::for_package("com.example.app")
//!     .table_generator(TableGeneratorConfig::new().table("id_sequences").allocation_size(50));
//!
//! let mut registry: Vec<String> = Vec::new();
//! autoconfig.register_repositories(
//!     &metadata,
//!     &mut registry,
//!     &|source: RepositoryConfigurationSource, registry: &mut Vec<String>| -> Result<(), BoxError> {
//!         registry.extend(source.base_packages);
//!         Ok(())
//!     },
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Properties
//!
//! All keys live under a prefix (`mybatis` by default):
//!
//! | Key                                   | Type          |
//! |---------------------------------------|---------------|
//! | `mapper-locations`                    | list          |
//! | `repositories-base-packages`          | list          |
//! | `repositories-base-packages-file`     | list          |
//! | `table-generator.allocation-size`     | integer       |
//! | `table-generator.table`               | string        |
//! | `table-generator.schema`              | string        |
//! | `table-generator.catalog`             | string        |
//! | `table-generator.pk-column-name`      | string        |
//! | `table-generator.value-column-name`   | string        |
//! | `table-generator.pk-column-value`     | string        |
//! | `table-generator.initial-value`       | integer       |
//!
//! Lists may be given as arrays or comma-separated strings. As environment
//! variables, keys are upper-cased with `.` and `-` replaced by `_`
//! (`MYBATIS_TABLE_GENERATOR_TABLE`).
//!
//! ## Logging
//!
//! The crate logs through the `log` facade and never installs a logger; the host
//! sets one up when the process starts. Unreadable package files are reported at
//! `warn` level and skipped.

// Core modules
mod error;
mod registrar;
mod resolver;

// Grouped modules
pub mod config;
pub mod resource;

// Re-exports from core
pub use error::{BoxError, Error, Result};
pub use registrar::{
    RepositoriesAutoConfiguration, RepositoriesAutoConfigurationBuilder,
    RepositoryConfigurationSource, RepositoryRegistrar, StartupMetadata,
};
pub use resolver::{ConfigurationResolver, parse_package_list};

// Re-exports from config
pub use config::{Environment, RepositoryProperties, TableGeneratorConfig};
