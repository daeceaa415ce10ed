/*!
 * Memory Diagnostics
 * Human-readable dumps of blocks, the free list, and the buffer
 */

use super::block::Block;
use super::manager::MemoryManager;
use std::fmt;

/// One line per segment of a block chain
pub struct ChainReport<'a> {
    head: &'a Block,
}

/// One line per free block, in free-list order
pub struct FreeListReport<'a> {
    manager: &'a MemoryManager,
}

/// The managed buffer as text, non-printable bytes shown as `.`
pub struct BufferReport<'a> {
    bytes: &'a [u8],
}

impl Block {
    pub fn chain_report(&self) -> ChainReport<'_> {
        ChainReport { head: self }
    }
}

impl MemoryManager {
    pub fn free_list_report(&self) -> FreeListReport<'_> {
        FreeListReport { manager: self }
    }

    pub fn buffer_report(&self) -> BufferReport<'_> {
        BufferReport {
            bytes: self.buffer(),
        }
    }
}

impl fmt::Display for ChainReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Block chain: {} segment(s), {} bytes",
            self.head.segment_count(),
            self.head.total_length()
        )?;
        for segment in self.head.segments() {
            writeln!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl fmt::Display for FreeListReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut blocks = self.manager.free_blocks().peekable();
        if blocks.peek().is_none() {
            return writeln!(f, "No free memory blocks");
        }
        for block in blocks {
            writeln!(f, "{block}")?;
        }
        Ok(())
    }
}

impl fmt::Display for BufferReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Buffer: ")?;
        for &byte in self.bytes {
            let c = if byte.is_ascii_graphic() || byte == b' ' {
                byte as char
            } else {
                '.'
            };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
