//! Shared helpers for unit tests.

use crate::model::{ArgValue, Block, HeaderArgs, KEY_NOWEB_REF, KEY_TANGLE};

/// Creates a named block with the given content.
pub(crate) fn make_block(name: &str, content: &str) -> Block {
    Block::new("python", content, "doc.org").with_name(name)
}

/// Creates a block indexed only through `noweb-ref`.
pub(crate) fn make_noweb_block(noweb_ref: &str, content: &str) -> Block {
    let mut args = HeaderArgs::new();
    args.insert(KEY_NOWEB_REF, ArgValue::Str(noweb_ref.to_string()));
    args.insert(KEY_TANGLE, ArgValue::Str("no".to_string()));
    Block::new("python", content, "doc.org").with_args(args)
}

/// Creates a block tangled to an explicit path.
pub(crate) fn make_tangled_block(language: &str, content: &str, tangle: &str) -> Block {
    let mut args = HeaderArgs::new();
    args.insert(KEY_TANGLE, ArgValue::Str(tangle.to_string()));
    Block::new(language, content, "doc.org").with_args(args)
}
