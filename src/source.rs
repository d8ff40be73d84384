use crate::chain::Block;
use crate::types::Hash;
use anyhow::anyhow;
use std::collections::HashMap;

/// Where blocks come from. Any error is fatal to the scan.
pub trait BlockSource {
    fn best_height(&self) -> anyhow::Result<i64>;

    fn block_hash(&self, height: i64) -> anyhow::Result<Hash>;

    fn block(&self, hash: &Hash) -> anyhow::Result<Block>;
}

/// In-memory chain, indexed by height.
#[derive(Debug, Default)]
pub struct MemoryChain {
    heights: Vec<Hash>,
    blocks: HashMap<Hash, Block>,
}

impl MemoryChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `block`; the best height becomes its height.
    pub fn push(&mut self, block: Block) -> anyhow::Result<()> {
        let height = usize::try_from(block.height)
            .map_err(|_| anyhow!("Negative block height: {}", block.height))?;
        if self.heights.len() <= height {
            self.heights.resize(height + 1, Hash::from_bytes([0; 32]));
        }
        self.heights[height] = block.hash;
        self.blocks.insert(block.hash, block);
        Ok(())
    }
}

impl BlockSource for MemoryChain {
    fn best_height(&self) -> anyhow::Result<i64> {
        Ok(self.heights.len() as i64 - 1)
    }

    fn block_hash(&self, height: i64) -> anyhow::Result<Hash> {
        usize::try_from(height)
            .ok()
            .and_then(|h| self.heights.get(h))
            .copied()
            .ok_or_else(|| anyhow!("Block height out of range: {height}"))
    }

    fn block(&self, hash: &Hash) -> anyhow::Result<Block> {
        self.blocks
            .get(hash)
            .cloned()
            .ok_or_else(|| anyhow!("Block not found: {hash}"))
    }
}
