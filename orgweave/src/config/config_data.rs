//! Configuration data structures.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::language::{Comment, Language};
use super::templates;

/// Main configuration structure for orgweave.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Glob patterns for Org source documents.
    #[serde(default = "default_source_patterns")]
    pub source_patterns: Vec<String>,

    /// Directory names excluded from document discovery.
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,

    /// Directory scanned for stale build caches after tangling.
    ///
    /// This does not redirect block output; output paths are governed by
    /// `tangle` directives alone.
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Glob patterns (relative to `out_dir`) removed by the cleanup pass.
    #[serde(default = "default_clean_patterns")]
    pub clean_patterns: Vec<String>,

    /// Language overrides (extension and framing comment).
    #[serde(default)]
    pub languages: Vec<Language>,
}

fn default_source_patterns() -> Vec<String> {
    vec!["**/*.org".to_string()]
}

fn default_exclude_dirs() -> Vec<String> {
    vec![
        "node_modules".to_string(),
        "scripts".to_string(),
        "dist".to_string(),
    ]
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_clean_patterns() -> Vec<String> {
    vec!["**/*.tsbuildinfo".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_patterns: default_source_patterns(),
            exclude_dirs: default_exclude_dirs(),
            out_dir: default_out_dir(),
            clean_patterns: default_clean_patterns(),
            languages: Vec::new(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the output extension (no leading dot) for a language tag,
    /// checking configured overrides before the built-in table.
    pub fn extension_for(&self, language: &str) -> String {
        if let Some(lang) = self.languages.iter().find(|l| l.matches(language)) {
            return lang.bare_extension().to_string();
        }
        templates::builtin_extension(language)
            .unwrap_or(templates::FALLBACK_EXTENSION)
            .to_string()
    }

    /// Returns the framing comment style for an output extension, or `None`
    /// when the target must not be framed.
    pub fn comment_for(&self, extension: &str) -> Option<Comment> {
        if let Some(lang) = self
            .languages
            .iter()
            .find(|l| l.bare_extension() == extension)
        {
            if let Some(comment) = &lang.comment {
                return Some(comment.clone());
            }
        }
        templates::builtin_comment(extension)
    }
}
