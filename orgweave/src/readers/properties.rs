//! File-level property extraction.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::HeaderArgs;

use super::header::parse_args;

/// Scope key for document-global properties.
const GLOBAL_SCOPE: &str = "*";

/// Pattern for `#+property: header-args[:LANG] ...` lines at column zero.
static PROPERTY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^#\+property:[ \t]+header-args(?::(?P<lang>[^ \t]+))?(?P<args>[ \t].*)?$")
        .unwrap()
});

/// Header arguments declared at document level.
///
/// Scopes are `*` (global) or a lowercased language tag. These seed the
/// inheritance chain merged into each block at scan time.
#[derive(Debug, Clone, Default)]
pub struct FileProperties {
    scopes: HashMap<String, HeaderArgs>,
}

impl FileProperties {
    /// Creates an empty property set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Extracts properties from document text.
    ///
    /// Repeated lines for one scope merge key-wise, later lines winning.
    pub fn parse(text: &str) -> Self {
        let mut props = Self::new();

        for line in text.lines() {
            let line = line.trim_end_matches('\r');
            let Some(caps) = PROPERTY_PATTERN.captures(line) else {
                continue;
            };

            let scope = caps
                .name("lang")
                .map(|m| m.as_str().to_ascii_lowercase())
                .unwrap_or_else(|| GLOBAL_SCOPE.to_string());
            let args = parse_args(caps.name("args").map(|m| m.as_str()).unwrap_or(""));
            props.add(scope, args);
        }

        props
    }

    fn add(&mut self, scope: String, args: HeaderArgs) {
        self.scopes.entry(scope).or_default().extend_from(&args);
    }

    /// Returns the document-global arguments.
    pub fn global(&self) -> Option<&HeaderArgs> {
        self.scopes.get(GLOBAL_SCOPE)
    }

    /// Returns the arguments scoped to a language (lowercased lookup).
    pub fn for_language(&self, language: &str) -> Option<&HeaderArgs> {
        if language.is_empty() {
            return None;
        }
        self.scopes.get(&language.to_ascii_lowercase())
    }

    /// Returns true if no properties were declared.
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}
