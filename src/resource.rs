//! Resource location and pattern resolution
//!
//! Locations follow the familiar prefix convention:
//!
//! | Location                 | Meaning                                              |
//! |--------------------------|------------------------------------------------------|
//! | `classpath:pkg/list.txt` | first classpath root containing a match              |
//! | `classpath*:**/list.txt` | matches from every classpath root, in root order     |
//! | `file:/etc/app/list.txt` | filesystem path                                      |
//! | `conf/list.txt`          | filesystem path, relative to the working directory   |
//!
//! Any location containing `*`, `?` or `[` is a glob pattern and may expand to
//! several resources (or none).

use crate::error::{Error, Result};
use glob::Pattern;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Prefix for a lookup in the first matching classpath root
pub const CLASSPATH_PREFIX: &str = "classpath:";

/// Prefix for a lookup across all classpath roots
pub const CLASSPATH_ALL_PREFIX: &str = "classpath*:";

/// Prefix for an explicit filesystem location
pub const FILE_PREFIX: &str = "file:";

/// A readable resource produced by pattern resolution
///
/// Resolution does not check existence for plain (non-pattern) locations; a
/// missing resource only fails when it is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    location: String,
    path: PathBuf,
}

impl Resource {
    pub fn new(location: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
            path: path.into(),
        }
    }

    /// The location this resource was resolved from
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the whole resource as UTF-8 text
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileRead`] if the file cannot be read and
    /// [`Error::InvalidUtf8`] if its content is not UTF-8.
    pub fn read_to_string(&self) -> Result<String> {
        let bytes = std::fs::read(&self.path).map_err(|e| Error::FileRead {
            path: self.path.clone(),
            source: e,
        })?;
        String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8(self.path.clone()))
    }
}

/// Expands a location (possibly a pattern) into resources
pub trait ResourcePatternResolver: Send + Sync {
    /// Resolve `location` into zero or more resources
    fn resolve(&self, location: &str) -> Result<Vec<Resource>>;
}

/// Check if a location contains glob metacharacters
pub fn is_pattern(location: &str) -> bool {
    location.contains(['*', '?', '['])
}

/// Resolves locations against the filesystem and a list of classpath roots
///
/// # Example
/// ```rust,no_run
/// use repo_autoconfig::resource::{FileSystemResourceResolver, ResourcePatternResolver};
///
/// let resolver = FileSystemResourceResolver::new()
///     .with_classpath_root("src/main/resources")
///     .with_classpath_root("~/.config/my-app");
///
/// let lists = resolver.resolve("classpath*:repositories/*.txt")?;
/// # Ok::<(), repo_autoconfig::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FileSystemResourceResolver {
    classpath_roots: Vec<PathBuf>,
}

impl FileSystemResourceResolver {
    /// Resolver without explicit classpath roots
    ///
    /// Until a root is added, classpath locations resolve against the working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a classpath root (searched after the ones already added)
    ///
    /// Supports `~` expansion for home directory.
    pub fn with_classpath_root(mut self, root: impl Into<PathBuf>) -> Self {
        let root: PathBuf = root.into();
        let expanded = if root.starts_with("~") {
            if let Some(home) = dirs::home_dir() {
                home.join(root.strip_prefix("~").unwrap_or(&root))
            } else {
                root
            }
        } else {
            root
        };
        self.classpath_roots.push(expanded);
        self
    }

    /// Classpath roots in search order
    pub fn classpath_roots(&self) -> Vec<PathBuf> {
        if self.classpath_roots.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            self.classpath_roots.clone()
        }
    }

    fn resolve_classpath(&self, location: &str, relative: &str) -> Result<Vec<Resource>> {
        let roots = self.classpath_roots();

        if is_pattern(relative) {
            for root in &roots {
                let found = expand(location, root, relative)?;
                if !found.is_empty() {
                    return Ok(found);
                }
            }
            return Ok(Vec::new());
        }

        // Plain location: the first root that has the file, else a handle under
        // the first root that fails on read
        let candidates: Vec<Resource> = roots
            .iter()
            .map(|root| Resource::new(location, root.join(relative)))
            .collect();
        let chosen = candidates
            .iter()
            .find(|r| r.exists())
            .or_else(|| candidates.first())
            .cloned();
        Ok(chosen.into_iter().collect())
    }

    fn resolve_all_classpath(&self, location: &str, relative: &str) -> Result<Vec<Resource>> {
        let mut found = Vec::new();
        for root in self.classpath_roots() {
            if is_pattern(relative) {
                found.extend(expand(location, &root, relative)?);
            } else {
                let resource = Resource::new(location, root.join(relative));
                if resource.exists() {
                    found.push(resource);
                }
            }
        }
        Ok(found)
    }

    fn resolve_file(&self, location: &str, path: &str) -> Result<Vec<Resource>> {
        if !is_pattern(path) {
            return Ok(vec![Resource::new(location, path)]);
        }
        collect_matches(location, path)
    }
}

impl ResourcePatternResolver for FileSystemResourceResolver {
    fn resolve(&self, location: &str) -> Result<Vec<Resource>> {
        let location = location.trim();

        let resources = if let Some(rest) = location.strip_prefix(CLASSPATH_ALL_PREFIX) {
            self.resolve_all_classpath(location, rest.trim_start_matches('/'))?
        } else if let Some(rest) = location.strip_prefix(CLASSPATH_PREFIX) {
            self.resolve_classpath(location, rest.trim_start_matches('/'))?
        } else if let Some(rest) = location.strip_prefix(FILE_PREFIX) {
            self.resolve_file(location, rest)?
        } else {
            self.resolve_file(location, location)?
        };

        debug!("Resolved '{location}' to {} resource(s)", resources.len());
        Ok(resources)
    }
}

/// Expand a relative pattern under `root`
fn expand(location: &str, root: &Path, relative: &str) -> Result<Vec<Resource>> {
    // The root is literal even if its name contains glob metacharacters
    let escaped_root = Pattern::escape(&root.to_string_lossy());
    let pattern = format!("{}/{relative}", escaped_root.trim_end_matches('/'));
    collect_matches(location, &pattern)
}

/// Collect the files matching a glob pattern, sorted by path
fn collect_matches(location: &str, pattern: &str) -> Result<Vec<Resource>> {
    let entries = glob::glob(pattern).map_err(|e| Error::InvalidPattern {
        pattern: location.to_string(),
        reason: e.to_string(),
    })?;

    Ok(matched_files(location, entries)
        .into_iter()
        .map(|path| Resource::new(location, path))
        .collect())
}

/// Keep the regular files among glob matches, sorted by path
///
/// Entries that failed to expand (e.g. an unreadable directory) are logged and
/// skipped.
fn matched_files<E: std::fmt::Display>(
    location: &str,
    entries: impl IntoIterator<Item = std::result::Result<PathBuf, E>>,
) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => paths.push(path),
            Ok(_) => {}
            Err(e) => warn!("Skipping '{location}': {e}"),
        }
    }
    paths.sort();
    paths
}
