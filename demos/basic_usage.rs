//! Basic usage of repo-autoconfig
//!
//! Run with:
//!   RUST_LOG=debug MYBATIS_TABLE_GENERATOR_TABLE=demo_ids cargo run --example basic_usage

use repo_autoconfig::config::{EnvVarPropertySource, Environment, MapPropertySource};
use repo_autoconfig::resource::FileSystemResourceResolver;
use repo_autoconfig::{
    BoxError, RepositoriesAutoConfiguration, RepositoryConfigurationSource, StartupMetadata,
    TableGeneratorConfig,
};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The logger lives for the whole process; install it before anything logs
    env_logger::init();

    let classpath = tempfile::tempdir()?;
    std::fs::write(
        classpath.path().join("repositories.txt"),
        "com.example.orders\ncom.example.users\n\n",
    )?;

    let environment = Environment::new()
        .with_source(EnvVarPropertySource::new())
        .with_source(
            MapPropertySource::new("application defaults")
                .with("mybatis.mapper-locations", json!(["classpath:mappers/*.xml"]))
                .with("mybatis.repositories-base-packages", "com.example.core")
                .with(
                    "mybatis.repositories-base-packages-file",
                    json!(["classpath:repositories.txt", "classpath:missing.txt"]),
                )
                .with("mybatis.table-generator.allocation-size", 50),
        );

    let autoconfig = RepositoriesAutoConfiguration::builder()
        .environment(environment)
        .resource_resolver(FileSystemResourceResolver::new().with_classpath_root(classpath.path()))
        .build()?;

    let metadata = StartupMetadata::for_package("com.example")
        .table_generator(TableGeneratorConfig::new().table("id_sequences").allocation_size(10));

    let mut registry: Vec<RepositoryConfigurationSource> = Vec::new();
    let registrar = |source: RepositoryConfigurationSource,
                     registry: &mut Vec<RepositoryConfigurationSource>|
     -> Result<(), BoxError> {
        registry.push(source);
        Ok(())
    };
    autoconfig.register_repositories(&metadata, &mut registry, &registrar)?;

    for source in &registry {
        println!("{}", serde_json::to_string_pretty(source)?);
    }

    Ok(())
}
