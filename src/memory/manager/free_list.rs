/*!
 * Ordered Free List
 * Free blocks kept in insertion order; the order is the allocation policy
 */

use crate::core::types::Size;
use crate::memory::block::Block;

/// Free blocks in the order they became free.
///
/// First-fit and the fragmentation path both walk this order, so it must stay
/// a sequence. Sorting it would change which ranges get handed out.
#[derive(Debug, Default)]
pub(super) struct FreeList {
    blocks: Vec<Block>,
}

impl FreeList {
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Append a simple block at the back
    pub fn push(&mut self, block: Block) {
        debug_assert!(!block.is_fragmented(), "free list only holds simple blocks");
        self.blocks.push(block);
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// Index of the first block (in list order) holding at least `size` bytes
    pub fn first_fit(&self, size: Size) -> Option<usize> {
        self.blocks.iter().position(|block| block.length() >= size)
    }

    /// Number of leading blocks whose combined length reaches `size`
    pub fn prefix_covering(&self, size: Size) -> Option<usize> {
        let mut covered = 0;
        for (idx, block) in self.blocks.iter().enumerate() {
            covered += block.length();
            if covered >= size {
                return Some(idx + 1);
            }
        }
        None
    }

    pub fn remove(&mut self, idx: usize) -> Block {
        self.blocks.remove(idx)
    }

    /// Remove and return the first `count` blocks, preserving their order
    pub fn take_front(&mut self, count: usize) -> Vec<Block> {
        self.blocks.drain(..count).collect()
    }

    pub fn largest(&self) -> Size {
        self.blocks.iter().map(Block::length).max().unwrap_or(0)
    }

    pub fn total_bytes(&self) -> Size {
        self.blocks.iter().map(Block::length).sum()
    }
}
