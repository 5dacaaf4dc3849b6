//! Document scanning: a single forward pass collecting code blocks.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::Result;
use crate::model::{ArgValue, Block, HeaderArgs, KEY_NOWEB_REF, KEY_TANGLE};
use crate::text_location::TextLocation;

use super::header::parse_src_header;
use super::properties::FileProperties;

/// Directive patterns. All require column zero; leading whitespace turns a
/// would-be directive into ordinary content or prose.
static SRC_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^#\+begin_src(?P<rest>[ \t].*)?$").unwrap());
static SRC_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^#\+end_src[ \t]*$").unwrap());
static EXAMPLE_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^#\+begin_example(?:[ \t].*)?$").unwrap());
static EXAMPLE_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^#\+end_example[ \t]*$").unwrap());
static NAME_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^#\+name:[ \t]*(?P<name>\S+)[ \t]*$").unwrap());

/// Scanner state. The three states are mutually exclusive; transitions
/// happen only on column-zero directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Outside,
    InExample,
    InSrc,
}

/// A block currently being collected.
struct OpenBlock {
    name: Option<String>,
    language: String,
    args: HeaderArgs,
    start_line: usize,
    lines: Vec<String>,
}

/// A scanned document.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// Blocks in document order.
    pub blocks: Vec<Block>,
    /// Source file path.
    pub source_path: PathBuf,
}

/// Removes the escape convention from a content line.
///
/// One leading comma is stripped (it quoted a directive-like line inside
/// the block), and a comma between a backtick and `#+` is dropped so
/// template literals holding directives round-trip too.
fn strip_escapes(line: &str) -> String {
    let line = line.strip_prefix(',').unwrap_or(line);
    line.replace("`,#+", "`#+")
}

/// Scans normalized document text into blocks.
///
/// `props` holds the pre-extracted file properties; each block's arguments
/// are merged (global, language scoped, block local) and frozen here. A
/// `noweb-ref` block without a block-local `tangle` is forced to
/// `tangle: no` so it never becomes a standalone target.
pub fn scan_document(text: &str, source_path: &Path, props: &FileProperties) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut state = ScanState::Outside;
    let mut pending_name: Option<String> = None;
    let mut open: Option<OpenBlock> = None;
    let mut last_index = 0;

    for (index, line) in text.lines().enumerate() {
        last_index = index;

        match state {
            ScanState::Outside => {
                if let Some(caps) = SRC_OPEN.captures(line) {
                    let rest = caps.name("rest").map(|m| m.as_str()).unwrap_or("");
                    let (language, local) = parse_src_header(rest);

                    let mut args = HeaderArgs::merged(
                        props.global(),
                        props.for_language(&language.to_ascii_lowercase()),
                        &local,
                    );
                    if args.contains(KEY_NOWEB_REF) && !local.contains(KEY_TANGLE) {
                        args.insert(KEY_TANGLE, ArgValue::Str("no".to_string()));
                    }

                    open = Some(OpenBlock {
                        name: pending_name.take(),
                        language,
                        args,
                        start_line: index,
                        lines: Vec::new(),
                    });
                    state = ScanState::InSrc;
                } else if EXAMPLE_OPEN.is_match(line) {
                    state = ScanState::InExample;
                } else if let Some(caps) = NAME_LINE.captures(line) {
                    pending_name = Some(caps["name"].to_string());
                }
                // Everything else outside a block is prose and is dropped.
            }
            ScanState::InExample => {
                if EXAMPLE_CLOSE.is_match(line) {
                    state = ScanState::Outside;
                }
            }
            ScanState::InSrc => {
                if SRC_CLOSE.is_match(line) {
                    if let Some(block) = open.take() {
                        blocks.push(finish_block(block, index, source_path));
                    }
                    state = ScanState::Outside;
                } else if let Some(block) = open.as_mut() {
                    block.lines.push(strip_escapes(line));
                }
            }
        }
    }

    // Unterminated block: keep the content rather than dropping it.
    if let Some(block) = open.take() {
        tracing::warn!(
            "unclosed source block at {}",
            TextLocation::file_line(source_path.to_path_buf(), block.start_line + 1)
        );
        blocks.push(finish_block(block, last_index, source_path));
    }

    blocks
}

fn finish_block(open: OpenBlock, end_line: usize, source_path: &Path) -> Block {
    let content = open.lines.join("\n");
    let mut block = Block::new(open.language, content, source_path.to_path_buf())
        .with_args(open.args)
        .with_lines(open.start_line, end_line);
    if let Some(name) = open.name {
        block = block.with_name(name);
    }
    block
}

/// Parses raw document text: normalizes line endings, pre-extracts file
/// properties, then scans.
pub fn parse_document(text: &str, source_path: &Path) -> ParsedDocument {
    let text = text.replace("\r\n", "\n");
    let props = FileProperties::parse(&text);
    let blocks = scan_document(&text, source_path, &props);
    ParsedDocument {
        blocks,
        source_path: source_path.to_path_buf(),
    }
}

/// Reads and parses a document file.
pub fn read_document_file(path: &Path) -> Result<ParsedDocument> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_document(&text, path))
}
