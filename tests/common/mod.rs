//! Common test utilities for repo-autoconfig integration tests
//!
//! Provides a classpath fixture on disk, a recording registrar and helpers.

#![allow(dead_code)]

use repo_autoconfig::config::{Environment, MapPropertySource};
use repo_autoconfig::resource::FileSystemResourceResolver;
use repo_autoconfig::{
    BoxError, RepositoriesAutoConfiguration, RepositoryConfigurationSource, RepositoryRegistrar,
};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// =============================================================================
// Test Fixtures
// =============================================================================

/// Temporary classpath root plus the properties used to build an auto-configuration
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub properties: MapPropertySource,
}

impl TestFixture {
    /// Create a fixture with an empty classpath root and no properties
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        Self {
            temp_dir,
            properties: MapPropertySource::new("test properties"),
        }
    }

    /// Write a file under the classpath root
    pub fn write_file(&self, relative: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.temp_dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Set a property (builder style)
    pub fn with_property(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.properties.insert(key, value);
        self
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn resource_resolver(&self) -> FileSystemResourceResolver {
        FileSystemResourceResolver::new().with_classpath_root(self.root())
    }

    pub fn environment(&self) -> Environment {
        Environment::new().with_source(self.properties.clone())
    }

    /// Build an auto-configuration over this fixture
    pub fn autoconfig(&self) -> RepositoriesAutoConfiguration {
        RepositoriesAutoConfiguration::builder()
            .environment(self.environment())
            .resource_resolver(self.resource_resolver())
            .build()
            .expect("Failed to build auto-configuration")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Registry that keeps every configuration source it was handed
#[derive(Debug, Default)]
pub struct RecordingRegistry {
    pub sources: Vec<RepositoryConfigurationSource>,
}

/// Registrar that records the configuration source instead of scanning
pub struct RecordingRegistrar;

impl RepositoryRegistrar<RecordingRegistry> for RecordingRegistrar {
    fn register_repositories(
        &self,
        source: RepositoryConfigurationSource,
        registry: &mut RecordingRegistry,
    ) -> Result<(), BoxError> {
        registry.sources.push(source);
        Ok(())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Build a package set from string slices
pub fn packages(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}
