//! Header arguments attached to code blocks.

use indexmap::IndexMap;

/// Key controlling whether and where a block is tangled.
pub const KEY_TANGLE: &str = "tangle";
/// Key naming a block for reference expansion only.
pub const KEY_NOWEB_REF: &str = "noweb-ref";
/// Key suppressing framing comments for a target.
pub const KEY_COMMENTS: &str = "comments";
/// Key supplying a literal shebang line for a target.
pub const KEY_SHEBANG: &str = "shebang";

/// A single header argument value.
///
/// Boolean-ish tokens (`yes`/`t`/`no`/`nil`) are normalized to `Bool` at
/// parse time; everything else stays a string. The boolean reading wins
/// over the string reading, so a literal string `"yes"` is not
/// representable. This aliasing is deliberate and documented rather than
/// guessed around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Str(String),
    Bool(bool),
}

impl ArgValue {
    /// Returns the string form, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Str(s) => Some(s),
            ArgValue::Bool(_) => None,
        }
    }
}

/// What the effective `tangle` argument asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TangleMode {
    /// The block does not produce output.
    Skip,
    /// Output path derived from the document basename and the language
    /// extension.
    Derive,
    /// Output path given explicitly, relative to the document's directory.
    Path(String),
}

/// An ordered map of header arguments.
///
/// Keys are merged from three scopes: document-global (`*`), language
/// scoped, and block-local, with later scopes winning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderArgs {
    entries: IndexMap<String, ArgValue>,
}

impl HeaderArgs {
    /// Creates an empty argument map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an argument, canonicalizing the `nowebRef` alias.
    pub fn insert(&mut self, key: impl Into<String>, value: ArgValue) {
        let key = key.into();
        let key = if key == "nowebRef" {
            KEY_NOWEB_REF.to_string()
        } else {
            key
        };
        self.entries.insert(key, value);
    }

    /// Gets an argument by key.
    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.entries.get(key)
    }

    /// Checks whether a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Copies all entries from `other`, overwriting existing keys.
    pub fn extend_from(&mut self, other: &HeaderArgs) {
        for (key, value) in &other.entries {
            self.entries.insert(key.clone(), value.clone());
        }
    }

    /// Merges the three argument scopes; later scopes win per key.
    pub fn merged(
        global: Option<&HeaderArgs>,
        language: Option<&HeaderArgs>,
        local: &HeaderArgs,
    ) -> HeaderArgs {
        let mut merged = HeaderArgs::new();
        if let Some(global) = global {
            merged.extend_from(global);
        }
        if let Some(language) = language {
            merged.extend_from(language);
        }
        merged.extend_from(local);
        merged
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Interprets the effective `tangle` argument.
    pub fn tangle_mode(&self) -> TangleMode {
        match self.get(KEY_TANGLE) {
            None | Some(ArgValue::Bool(false)) => TangleMode::Skip,
            Some(ArgValue::Bool(true)) => TangleMode::Derive,
            Some(ArgValue::Str(s)) => match s.as_str() {
                "no" | "false" => TangleMode::Skip,
                "yes" | "true" => TangleMode::Derive,
                other => TangleMode::Path(other.to_string()),
            },
        }
    }

    /// Returns true when `comments: no|false` suppresses framing.
    pub fn comments_disabled(&self) -> bool {
        match self.get(KEY_COMMENTS) {
            Some(ArgValue::Bool(false)) => true,
            Some(ArgValue::Str(s)) => s == "no" || s == "false",
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(&str, ArgValue)]) -> HeaderArgs {
        let mut a = HeaderArgs::new();
        for (k, v) in pairs {
            a.insert(*k, v.clone());
        }
        a
    }

    #[test]
    fn test_noweb_ref_alias_canonicalized() {
        let mut a = HeaderArgs::new();
        a.insert("nowebRef", ArgValue::Str("greet".into()));
        assert_eq!(a.get(KEY_NOWEB_REF).and_then(ArgValue::as_str), Some("greet"));
        assert!(!a.contains("nowebRef"));
    }

    #[test]
    fn test_merge_precedence() {
        let global = args(&[
            (KEY_TANGLE, ArgValue::Str("a.ts".into())),
            ("mode", ArgValue::Str("0644".into())),
        ]);
        let lang = args(&[(KEY_TANGLE, ArgValue::Str("b.ts".into()))]);
        let local = args(&[(KEY_TANGLE, ArgValue::Str("c.ts".into()))]);

        let merged = HeaderArgs::merged(Some(&global), Some(&lang), &local);
        assert_eq!(
            merged.get(KEY_TANGLE).and_then(ArgValue::as_str),
            Some("c.ts")
        );
        assert_eq!(merged.get("mode").and_then(ArgValue::as_str), Some("0644"));

        let merged = HeaderArgs::merged(Some(&global), Some(&lang), &HeaderArgs::new());
        assert_eq!(
            merged.get(KEY_TANGLE).and_then(ArgValue::as_str),
            Some("b.ts")
        );
    }

    #[test]
    fn test_tangle_mode() {
        assert_eq!(HeaderArgs::new().tangle_mode(), TangleMode::Skip);
        assert_eq!(
            args(&[(KEY_TANGLE, ArgValue::Bool(false))]).tangle_mode(),
            TangleMode::Skip
        );
        assert_eq!(
            args(&[(KEY_TANGLE, ArgValue::Str("no".into()))]).tangle_mode(),
            TangleMode::Skip
        );
        assert_eq!(
            args(&[(KEY_TANGLE, ArgValue::Bool(true))]).tangle_mode(),
            TangleMode::Derive
        );
        assert_eq!(
            args(&[(KEY_TANGLE, ArgValue::Str("true".into()))]).tangle_mode(),
            TangleMode::Derive
        );
        assert_eq!(
            args(&[(KEY_TANGLE, ArgValue::Str("src/out.ts".into()))]).tangle_mode(),
            TangleMode::Path("src/out.ts".into())
        );
    }

    #[test]
    fn test_comments_disabled() {
        assert!(!HeaderArgs::new().comments_disabled());
        assert!(args(&[(KEY_COMMENTS, ArgValue::Bool(false))]).comments_disabled());
        assert!(args(&[(KEY_COMMENTS, ArgValue::Str("false".into()))]).comments_disabled());
        assert!(!args(&[(KEY_COMMENTS, ArgValue::Bool(true))]).comments_disabled());
    }
}
