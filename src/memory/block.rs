/*!
 * Memory Block
 * Descriptor of a byte range, optionally chained for fragmented allocations
 */

use crate::core::types::{Address, ManagerId, Size};
use std::fmt;

/// A contiguous range `[start, start + length)` of the managed buffer.
///
/// A block with no successor is *simple*. A block with a successor is the head
/// of a *fragmented chain*: one logical allocation spread over disjoint ranges,
/// traversed in link order.
///
/// Blocks are only created by the memory manager and are deliberately not
/// `Clone`: handing a block back to [`release`](super::MemoryManager::release)
/// moves it, so the same range cannot be released twice.
#[derive(Debug)]
pub struct Block {
    owner: ManagerId,
    start: Address,
    length: Size,
    next: Option<Box<Block>>,
}

impl Block {
    pub(crate) fn new(owner: ManagerId, start: Address, length: Size) -> Self {
        debug_assert!(length > 0, "blocks always cover at least one byte");
        Self {
            owner,
            start,
            length,
            next: None,
        }
    }

    #[inline]
    pub fn start(&self) -> Address {
        self.start
    }

    /// One past the last byte of this segment
    #[inline]
    pub fn end(&self) -> Address {
        self.start + self.length
    }

    /// Length of this segment only
    #[inline]
    pub fn length(&self) -> Size {
        self.length
    }

    /// Sum of segment lengths along the whole chain
    pub fn total_length(&self) -> Size {
        self.segments().map(Block::length).sum()
    }

    #[inline]
    pub fn next(&self) -> Option<&Block> {
        self.next.as_deref()
    }

    #[inline]
    pub fn is_fragmented(&self) -> bool {
        self.next.is_some()
    }

    pub fn segment_count(&self) -> usize {
        self.segments().count()
    }

    /// Iterate over this block and every block linked after it
    pub fn segments(&self) -> Segments<'_> {
        Segments {
            current: Some(self),
        }
    }

    #[inline]
    pub(crate) fn owner(&self) -> ManagerId {
        self.owner
    }

    pub(crate) fn link(&mut self, next: Block) {
        self.next = Some(Box::new(next));
    }

    pub(crate) fn take_next(&mut self) -> Option<Block> {
        self.next.take().map(|next| *next)
    }

    /// Split off `[start + at, end)`, shrinking this block to `[start, start + at)`
    pub(crate) fn split_off(&mut self, at: Size) -> Block {
        debug_assert!(at > 0 && at < self.length, "split point must be inside the block");
        let remainder = Block::new(self.owner, self.start + at, self.length - at);
        self.length = at;
        remainder
    }
}

impl Drop for Block {
    // Unlink iteratively so dropping a long chain cannot overflow the stack
    fn drop(&mut self) {
        let mut next = self.next.take();
        while let Some(mut block) = next {
            next = block.next.take();
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Block. Start: {}, end: {}, size: {}",
            self.start(),
            self.end(),
            self.length()
        )
    }
}

/// Iterator over the segments of a block chain
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    current: Option<&'a Block>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a Block;

    fn next(&mut self) -> Option<Self::Item> {
        let block = self.current?;
        self.current = block.next();
        Some(block)
    }
}
