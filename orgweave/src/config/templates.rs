//! Built-in language extension and comment tables.

use super::language::Comment;

/// Maps a lowercased language tag to its output extension (no leading dot).
static EXTENSION_MAP: &[(&str, &str)] = &[
    ("typescript", "ts"),
    ("javascript", "js"),
    ("python", "py"),
    ("rust", "rs"),
    ("go", "go"),
    ("java", "java"),
    ("c", "c"),
    ("cpp", "cpp"),
    ("sh", "sh"),
    ("bash", "sh"),
    ("ruby", "rb"),
    ("json", "json"),
    ("yaml", "yaml"),
    ("yml", "yml"),
    ("markdown", "md"),
    ("org", "org"),
];

/// Extension used for languages outside the built-in table.
pub const FALLBACK_EXTENSION: &str = "txt";

/// Looks up the built-in extension for a language tag.
pub fn builtin_extension(language: &str) -> Option<&'static str> {
    EXTENSION_MAP
        .iter()
        .find(|(lang, _)| *lang == language)
        .map(|(_, ext)| *ext)
}

/// Returns the framing comment style for an output extension.
///
/// `None` means the target gets no framing at all (data formats, binary
/// output, plain text).
pub fn builtin_comment(extension: &str) -> Option<Comment> {
    match extension {
        "py" | "sh" | "bash" | "zsh" | "fish" | "toml" | "rb" | "pl" | "r" => {
            Some(Comment::line("#"))
        }
        "lisp" | "el" | "clj" | "scm" => Some(Comment::line(";;")),
        "lua" | "sql" | "hs" => Some(Comment::line("--")),
        "css" => Some(Comment::block("/*", "*/")),
        "html" | "xml" => Some(Comment::block("<!--", "-->")),
        "json" | "yaml" | "yml" | "md" | "org" | "wasm" | "txt" => None,
        _ => Some(Comment::line("//")),
    }
}
