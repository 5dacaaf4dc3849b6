//! Reference index over all scanned blocks.

use std::collections::HashMap;

use super::block::Block;

/// Index into the block arena.
pub type BlockId = usize;

/// A name-keyed index over a flat block arena.
///
/// Blocks are stored in discovery order (document order of the input file
/// list, then intra-document order). A block registers under its `name`
/// and, when different, under its `noweb-ref`, so either key resolves to
/// the same content during expansion.
///
/// The index is built to completion before expansion observes it and is
/// read-only afterwards.
#[derive(Debug, Default)]
pub struct ReferenceIndex {
    blocks: Vec<Block>,
    by_name: HashMap<String, Vec<BlockId>>,
}

impl ReferenceIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a block, returning its id.
    pub fn insert(&mut self, block: Block) -> BlockId {
        let id = self.blocks.len();

        if let Some(name) = &block.name {
            self.by_name.entry(name.clone()).or_default().push(id);
        }
        if let Some(noweb_ref) = block.noweb_ref() {
            if block.name.as_deref() != Some(noweb_ref) {
                self.by_name
                    .entry(noweb_ref.to_string())
                    .or_default()
                    .push(id);
            }
        }

        self.blocks.push(block);
        id
    }

    /// Gets a block by id.
    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id)
    }

    /// Returns the ids registered under a name, in discovery order.
    pub fn ids_by_name(&self, name: &str) -> &[BlockId] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the blocks registered under a name, in discovery order.
    pub fn blocks_by_name(&self, name: &str) -> Vec<&Block> {
        self.ids_by_name(name)
            .iter()
            .filter_map(|id| self.blocks.get(*id))
            .collect()
    }

    /// Checks if a name exists in the index.
    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Iterates all blocks with their ids, in discovery order.
    pub fn blocks(&self) -> impl Iterator<Item = (BlockId, &Block)> {
        self.blocks.iter().enumerate()
    }

    /// Returns the number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns true if there are no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
