//! Output target resolution and assembly.

use std::path::{Path, PathBuf};

use crate::config::Config;

use super::block::Block;
use super::expand::expand_content;
use super::header_args::{ArgValue, TangleMode, KEY_SHEBANG};
use super::reference_index::{BlockId, ReferenceIndex};

/// Banner placed at the top of framed targets.
const GENERATED_BANNER: &str = "Generated by orgweave. Do not edit this file directly.";

/// An output file and the blocks that contribute to it, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Resolved output path.
    pub path: PathBuf,
    /// Contributing blocks, in discovery order.
    pub blocks: Vec<BlockId>,
}

impl Target {
    /// Creates a new target.
    pub fn new(path: impl Into<PathBuf>, blocks: Vec<BlockId>) -> Self {
        Self {
            path: path.into(),
            blocks,
        }
    }
}

/// Resolves the output path for a block, or `None` when the block is not
/// tangled.
///
/// A derived path (`tangle: yes`) is the document basename with the
/// language extension, next to the document. An explicit path is resolved
/// relative to the document's directory.
pub fn resolve_output_path(block: &Block, config: &Config) -> Option<PathBuf> {
    let dir = block
        .source_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    match block.args.tangle_mode() {
        TangleMode::Skip => None,
        TangleMode::Derive => {
            let stem = block
                .source_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("untitled");
            let ext = config.extension_for(&block.language_tag());
            Some(dir.join(format!("{}.{}", stem, ext)))
        }
        TangleMode::Path(path) => Some(dir.join(path)),
    }
}

/// Extracts a shebang line from content.
///
/// Returns the shebang and the remaining content with the line removed.
fn extract_shebang(content: &str) -> Option<(&str, &str)> {
    let first_line = content.lines().next()?;
    if !first_line.starts_with("#!") {
        return None;
    }
    let rest = content[first_line.len()..].trim_start_matches('\n');
    Some((first_line, rest))
}

/// Renders a path relative to the base directory for generated comments.
fn display_relative(path: &Path, base_dir: &Path) -> String {
    path.strip_prefix(base_dir)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Comma-joined list of the documents contributing to a target.
fn source_list(target: &Target, index: &ReferenceIndex, base_dir: &Path) -> String {
    let mut sources: Vec<String> = Vec::new();
    for id in &target.blocks {
        if let Some(block) = index.get(*id) {
            let display = display_relative(&block.source_path, base_dir);
            if !sources.contains(&display) {
                sources.push(display);
            }
        }
    }
    sources.join(", ")
}

/// Assembles the final content for a target.
///
/// Layout: shebang, framing header (banner, source list, blank line), then
/// each block with its location comment, expanded content, and name footer,
/// separated by blank lines. Framing is suppressed for non-commentable
/// extensions and when any contributing block disables comments.
/// `.org` targets bypass reference expansion so literal reference tokens
/// survive.
pub fn assemble_target(
    target: &Target,
    index: &ReferenceIndex,
    config: &Config,
    base_dir: &Path,
) -> String {
    let extension = target
        .path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let comments_suppressed = target
        .blocks
        .iter()
        .filter_map(|id| index.get(*id))
        .any(|block| block.args.comments_disabled());

    let comment = config
        .comment_for(&extension)
        .filter(|_| !comments_suppressed);

    // First block with a shebang arg wins; otherwise a leading #! line of
    // the first block's content is lifted out.
    let mut shebang: Option<String> = None;
    for id in &target.blocks {
        if let Some(block) = index.get(*id) {
            if let Some(ArgValue::Str(line)) = block.args.get(KEY_SHEBANG) {
                shebang = Some(line.clone());
                break;
            }
        }
    }
    let mut first_content_override: Option<String> = None;
    if shebang.is_none() {
        if let Some(first) = target.blocks.first().and_then(|id| index.get(*id)) {
            if let Some((line, rest)) = extract_shebang(&first.content) {
                shebang = Some(line.to_string());
                first_content_override = Some(rest.to_string());
            }
        }
    }

    let bypass_expansion = extension == "org";

    let mut lines: Vec<String> = Vec::new();

    if let Some(shebang) = &shebang {
        lines.push(shebang.clone());
    }

    if let Some(comment) = &comment {
        lines.push(comment.wrap(GENERATED_BANNER));
        lines.push(comment.wrap(&format!(
            "Source: {}",
            source_list(target, index, base_dir)
        )));
        lines.push(String::new());
    }

    for (i, id) in target.blocks.iter().enumerate() {
        let Some(block) = index.get(*id) else {
            continue;
        };

        let content = match (i, &first_content_override) {
            (0, Some(lifted)) => lifted.as_str(),
            _ => block.content.as_str(),
        };

        if let Some(comment) = &comment {
            lines.push(comment.wrap(&format!(
                "file:{}::{}",
                display_relative(&block.source_path, base_dir),
                block.start_line + 1
            )));
        }

        let body = if bypass_expansion {
            content.to_string()
        } else {
            expand_content(index, content)
        };
        lines.push(body);

        if let Some(comment) = &comment {
            if let Some(name) = &block.name {
                lines.push(comment.wrap(&format!("{} ends here", name)));
            }
        }

        lines.push(String::new());
    }

    while lines.last().map(|l| l.is_empty()).unwrap_or(false) {
        lines.pop();
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}
