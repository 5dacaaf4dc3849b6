//! Code block representation.

use std::path::PathBuf;

use super::header_args::{ArgValue, HeaderArgs, KEY_NOWEB_REF};

/// A code block extracted from an Org document.
///
/// Blocks are created by the document scanner with their header arguments
/// fully merged, and are immutable for the rest of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Name supplied by a preceding `#+name:` directive.
    pub name: Option<String>,

    /// The language identifier from the fence, original case retained.
    /// Empty for malformed fences.
    pub language: String,

    /// The block content: LF line endings, trailing newline trimmed,
    /// escape commas stripped.
    pub content: String,

    /// Merged header arguments (global, language scoped, block local).
    pub args: HeaderArgs,

    /// Originating document.
    pub source_path: PathBuf,

    /// 0-based line index of the opening directive.
    pub start_line: usize,

    /// 0-based line index of the closing directive.
    pub end_line: usize,
}

impl Block {
    /// Creates a new Block.
    pub fn new(
        language: impl Into<String>,
        content: impl Into<String>,
        source_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: None,
            language: language.into(),
            content: content.into(),
            args: HeaderArgs::new(),
            source_path: source_path.into(),
            start_line: 0,
            end_line: 0,
        }
    }

    /// Sets the block name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the merged header arguments.
    pub fn with_args(mut self, args: HeaderArgs) -> Self {
        self.args = args;
        self
    }

    /// Sets the source line span.
    pub fn with_lines(mut self, start_line: usize, end_line: usize) -> Self {
        self.start_line = start_line;
        self.end_line = end_line;
        self
    }

    /// Returns the lowercased language tag used for dispatch.
    pub fn language_tag(&self) -> String {
        self.language.to_ascii_lowercase()
    }

    /// Returns the `noweb-ref` index key, if the block has one.
    pub fn noweb_ref(&self) -> Option<&str> {
        self.args.get(KEY_NOWEB_REF).and_then(ArgValue::as_str)
    }

    /// Returns the line count of the content.
    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }

    /// Returns true if the content is empty or whitespace only.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}
