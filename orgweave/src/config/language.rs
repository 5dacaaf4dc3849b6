//! Language and comment style configuration.

use serde::{Deserialize, Serialize};

/// Comment style used for framing tangled output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Comment {
    /// Single line comment prefix, e.g., "//" or "#"
    Line(String),
    /// Block comment with open and close delimiters, e.g., ["/*", "*/"]
    Block { open: String, close: String },
}

impl Comment {
    /// Creates a line comment style.
    pub fn line(prefix: impl Into<String>) -> Self {
        Comment::Line(prefix.into())
    }

    /// Creates a block comment style.
    pub fn block(open: impl Into<String>, close: impl Into<String>) -> Self {
        Comment::Block {
            open: open.into(),
            close: close.into(),
        }
    }

    /// Wraps text in a comment.
    pub fn wrap(&self, text: &str) -> String {
        match self {
            Comment::Line(prefix) => format!("{} {}", prefix, text),
            Comment::Block { open, close } => format!("{} {} {}", open, text, close),
        }
    }
}

/// Per-language override for output extension and framing comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Language identifier as it appears on the block fence (e.g., "python").
    pub name: String,

    /// Output file extension, with or without a leading dot.
    pub extension: String,

    /// Comment style for targets with this extension (falls back to the
    /// built-in extension table when absent).
    #[serde(default)]
    pub comment: Option<Comment>,
}

impl Language {
    /// Creates a new Language override.
    pub fn new(name: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extension: extension.into(),
            comment: None,
        }
    }

    /// Sets the comment style.
    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comment = Some(comment);
        self
    }

    /// Checks if this language matches a given identifier.
    pub fn matches(&self, identifier: &str) -> bool {
        self.name.eq_ignore_ascii_case(identifier)
    }

    /// Returns the extension without a leading dot.
    pub fn bare_extension(&self) -> &str {
        self.extension.trim_start_matches('.')
    }
}
