//! Document readers: directive parsing, file properties, block scanning.

mod document;
mod header;
mod properties;

pub use document::{parse_document, read_document_file, scan_document, ParsedDocument};
pub use header::{parse_args, parse_src_header};
pub use properties::FileProperties;
