//! Noweb reference expansion.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use super::reference_index::ReferenceIndex;

/// Pattern for reference sites: `<<name>>` on its own line, optionally
/// indented and optionally followed by trailing text.
static REF_SITE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<indent>\s*)<<(?P<refname>[\w:/_.-]+)>>(?P<trailing>.*)$").unwrap()
});

/// Tracks the names currently being expanded.
///
/// A name reappearing on the active stack is a cycle; the offending site is
/// rendered as an inline error comment and expansion continues.
#[derive(Debug, Clone, Default)]
pub struct ExpansionStack {
    /// Stack of names currently being expanded.
    stack: Vec<String>,
    /// Set for O(1) membership checks.
    seen: HashSet<String>,
}

impl ExpansionStack {
    /// Creates a new empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters a name. Returns false when the name is already active.
    pub fn enter(&mut self, name: &str) -> bool {
        if self.seen.contains(name) {
            return false;
        }
        self.seen.insert(name.to_string());
        self.stack.push(name.to_string());
        true
    }

    /// Exits the most recently entered name.
    pub fn exit(&mut self) {
        if let Some(name) = self.stack.pop() {
            self.seen.remove(&name);
        }
    }

    /// Returns the current depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

/// Expands all `<<name>>` references in `content`.
///
/// Convenience entry point with an empty indent and a fresh stack.
pub fn expand_content(index: &ReferenceIndex, content: &str) -> String {
    expand(index, content, "", &mut ExpansionStack::new())
}

/// Expands references line by line.
///
/// - The indent of a reference site is combined with `outer_indent` and
///   prepended to every line of the expansion, so nesting composes
///   additively.
/// - A name already on the stack renders an inline cycle marker.
/// - An unknown name is re-emitted literally so it stays greppable in the
///   output.
/// - Multiple blocks under one name expand in discovery order with one
///   empty line between them.
/// - Trailing text after a reference is appended to the last emitted line
///   of the expansion.
pub fn expand(
    index: &ReferenceIndex,
    content: &str,
    outer_indent: &str,
    stack: &mut ExpansionStack,
) -> String {
    let mut output = Vec::new();

    for line in content.lines() {
        let Some(caps) = REF_SITE.captures(line) else {
            output.push(format!("{}{}", outer_indent, line));
            continue;
        };

        let indent = &caps["indent"];
        let refname = &caps["refname"];
        let trailing = &caps["trailing"];
        let total_indent = format!("{}{}", outer_indent, indent);

        if !stack.enter(refname) {
            output.push(format!(
                "{}/* ERROR: Circular reference to {} */{}",
                total_indent, refname, trailing
            ));
            continue;
        }

        let ids = index.ids_by_name(refname);
        if ids.is_empty() {
            stack.exit();
            output.push(format!("{}<<{}>>{}", total_indent, refname, trailing));
            continue;
        }

        let mut pieces = Vec::new();
        for (i, id) in ids.iter().enumerate() {
            if i > 0 {
                pieces.push(String::new());
            }
            if let Some(block) = index.get(*id) {
                pieces.push(expand(index, &block.content, &total_indent, stack));
            }
        }
        stack.exit();

        let mut expanded = pieces.join("\n");
        if !trailing.is_empty() {
            expanded.push_str(trailing);
        }
        output.push(expanded);
    }

    output.join("\n")
}
