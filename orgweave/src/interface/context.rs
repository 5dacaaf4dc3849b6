//! Execution context for tangle runs.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::errors::Result;

/// Context for orgweave operations.
///
/// Bundles the configuration and the base directory all relative paths
/// resolve against.
#[derive(Debug, Clone)]
pub struct Context {
    /// Configuration.
    pub config: Config,
    /// Base directory for operations.
    pub base_dir: PathBuf,
}

impl Context {
    /// Creates a new context with the given configuration.
    pub fn new(config: Config, base_dir: PathBuf) -> Self {
        Self { config, base_dir }
    }

    /// Creates a context with default configuration.
    pub fn default_for_dir(base_dir: PathBuf) -> Self {
        Self::new(Config::default(), base_dir)
    }

    /// Creates a context from the current directory, reading discovered
    /// configuration.
    pub fn from_current_dir() -> Result<Self> {
        let base_dir = std::env::current_dir()?;
        let config = crate::config::read_config(&base_dir).unwrap_or_default();
        Ok(Self::new(config, base_dir))
    }

    /// Discovers source documents under the base directory.
    ///
    /// Files inside excluded directories are dropped. The result is sorted
    /// and de-duplicated so discovery order is stable.
    pub fn source_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for pattern in &self.config.source_patterns {
            let full_pattern = self.base_dir.join(pattern);
            let pattern_str = full_pattern.to_str().ok_or_else(|| {
                crate::errors::OrgweaveError::Config(format!(
                    "non-UTF-8 source pattern under {}",
                    self.base_dir.display()
                ))
            })?;

            for entry in glob::glob(pattern_str)? {
                match entry {
                    Ok(path) => {
                        if path.is_file() && !self.is_excluded(&path) {
                            files.push(path);
                        }
                    }
                    Err(e) => {
                        tracing::warn!("discovery: {}", e);
                    }
                }
            }
        }

        files.sort();
        files.dedup();
        Ok(files)
    }

    /// Resolves a path relative to the base directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.base_dir).unwrap_or(path);
        relative.components().any(|component| {
            let name = component.as_os_str().to_string_lossy();
            self.config.exclude_dirs.iter().any(|dir| *dir == name)
        })
    }
}
