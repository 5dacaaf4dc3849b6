//! Tangle orchestration: documents in, write transaction out.

use std::path::PathBuf;

use indexmap::IndexMap;

use crate::errors::Result;
use crate::io::Transaction;
use crate::model::{assemble_target, resolve_output_path, BlockId, ReferenceIndex, Target};
use crate::readers::read_document_file;

use super::context::Context;

/// Tangles all discovered documents.
pub fn tangle_documents(ctx: &Context) -> Result<Transaction> {
    let source_files = ctx.source_files()?;
    Ok(tangle_files(ctx, &source_files))
}

/// Tangles specific document files.
///
/// A document that cannot be read is logged and skipped so one bad file
/// does not block emission of unrelated targets. Blocks enter the index in
/// input-file order, then intra-document order, which fixes the expansion
/// and target order for the whole run.
pub fn tangle_files(ctx: &Context, source_files: &[PathBuf]) -> Transaction {
    let mut index = ReferenceIndex::new();

    for path in source_files {
        match read_document_file(path) {
            Ok(doc) => {
                tracing::debug!(
                    "{}: {} blocks",
                    doc.source_path.display(),
                    doc.blocks.len()
                );
                for block in doc.blocks {
                    index.insert(block);
                }
            }
            Err(e) => {
                tracing::error!("failed to read {}: {}", path.display(), e);
            }
        }
    }

    // Partition blocks into targets, keyed by resolved path in
    // first-discovery order.
    let mut targets: IndexMap<PathBuf, Vec<BlockId>> = IndexMap::new();
    for (id, block) in index.blocks() {
        if let Some(path) = resolve_output_path(block, &ctx.config) {
            let full_path = ctx.resolve_path(&path);
            targets.entry(full_path).or_default().push(id);
        }
    }

    let mut transaction = Transaction::new();
    for (path, block_ids) in targets {
        let target = Target::new(path.clone(), block_ids);
        let content = assemble_target(&target, &index, &ctx.config, &ctx.base_dir);
        let block_count = target.blocks.len();
        tracing::debug!(
            "target {}: {} blocks, {} bytes",
            path.display(),
            block_count,
            content.len()
        );
        transaction.write(path, content, block_count);
    }

    transaction
}
