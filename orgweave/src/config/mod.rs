//! Configuration loading and management.

mod config_data;
mod language;
mod templates;

use std::fs;
use std::path::{Path, PathBuf};

pub use config_data::Config;
pub use language::{Comment, Language};
pub use templates::{builtin_comment, builtin_extension, FALLBACK_EXTENSION};

use crate::errors::Result;

/// Standard configuration file names to search for.
const CONFIG_FILES: &[&str] = &["orgweave.toml", ".orgweave.toml"];

/// Finds the configuration file in the given directory or its parents.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for name in CONFIG_FILES {
            let candidate = current.join(name);
            if candidate.exists() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Reads configuration from a TOML file.
pub fn read_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Reads configuration, searching from the given directory.
///
/// If no config file is found, returns the default configuration.
pub fn read_config(start_dir: &Path) -> Result<Config> {
    match find_config_file(start_dir) {
        Some(path) => read_config_file(&path),
        None => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("orgweave.toml");
        fs::write(&config_path, "out_dir = \"build\"").unwrap();

        let found = find_config_file(dir.path()).unwrap();
        assert_eq!(found, config_path);
    }

    #[test]
    fn test_find_config_file_parent() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(".orgweave.toml");
        fs::write(&config_path, "").unwrap();

        let subdir = dir.path().join("docs");
        fs::create_dir(&subdir).unwrap();

        let found = find_config_file(&subdir).unwrap();
        assert_eq!(found, config_path);
    }

    #[test]
    fn test_read_config_default() {
        let dir = tempdir().unwrap();
        let config = read_config(dir.path()).unwrap();
        assert_eq!(config.source_patterns, vec!["**/*.org"]);
        assert_eq!(config.out_dir, PathBuf::from("dist"));
    }

    #[test]
    fn test_read_config_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("orgweave.toml");
        fs::write(
            &config_path,
            r#"
source_patterns = ["docs/**/*.org"]
out_dir = "build"
exclude_dirs = ["vendor"]
"#,
        )
        .unwrap();

        let config = read_config_file(&config_path).unwrap();
        assert_eq!(config.source_patterns, vec!["docs/**/*.org"]);
        assert_eq!(config.out_dir, PathBuf::from("build"));
        assert_eq!(config.exclude_dirs, vec!["vendor"]);
    }

    #[test]
    fn test_read_config_with_languages() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("orgweave.toml");
        fs::write(
            &config_path,
            r#"
[[languages]]
name = "mylang"
extension = "ml"
comment = ";;"
"#,
        )
        .unwrap();

        let config = read_config_file(&config_path).unwrap();
        assert_eq!(config.languages.len(), 1);
        assert_eq!(config.extension_for("mylang"), "ml");
        assert_eq!(config.comment_for("ml"), Some(Comment::line(";;")));
    }
}
