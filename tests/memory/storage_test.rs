/*!
 * Storage Tests
 * Reading and writing through simple and fragmented blocks
 */

use chain_alloc::memory::{AllocatorConfig, Block, MemoryError, MemoryManager, ShortWritePolicy};
use pretty_assertions::assert_eq;

const MEM_SIZE: usize = 10;

fn fragment_entirely(manager: &mut MemoryManager) {
    let blocks: Vec<Block> = (0..MEM_SIZE).map(|_| manager.allocate(1).unwrap()).collect();
    for block in blocks {
        manager.release(block).unwrap();
    }
}

#[test]
fn test_read_and_write_with_entire_buffer_allocated_contiguously() {
    let mut manager = MemoryManager::with_capacity(MEM_SIZE);
    let block = manager.allocate(MEM_SIZE).unwrap();

    manager.write(&block, b"Twingate10").unwrap();
    assert_eq!(manager.read(&block).unwrap(), b"Twingate10".to_vec());
}

#[test]
fn test_read_and_write_with_entire_buffer_allocated_fragmented() {
    let mut manager = MemoryManager::with_capacity(MEM_SIZE);
    fragment_entirely(&mut manager);
    let block = manager.allocate(MEM_SIZE).unwrap();
    assert!(block.is_fragmented());

    manager.write(&block, b"Twingate10").unwrap();
    assert_eq!(manager.read(&block).unwrap(), b"Twingate10".to_vec());
}

#[test]
fn test_read_and_write_with_partially_fragmented_buffer() {
    let mut manager = MemoryManager::new(vec![b'-'; MEM_SIZE], MEM_SIZE).unwrap();
    let mut blocks: Vec<Option<Block>> =
        (0..MEM_SIZE).map(|_| manager.allocate(1).ok()).collect();
    for idx in [2, 5, 7] {
        manager.release(blocks[idx].take().unwrap()).unwrap();
    }

    let chain = manager.allocate(3).unwrap();
    assert_eq!(chain.total_length(), 3);

    manager.write(&chain, b"123").unwrap();
    assert_eq!(manager.read(&chain).unwrap(), b"123".to_vec());
    // Only the chained bytes changed
    assert_eq!(manager.buffer(), b"--1--2-3--");
}

#[test]
fn test_fragmented_write_spans_multi_byte_segments() {
    let mut manager = MemoryManager::with_capacity(9);
    let a = manager.allocate(3).unwrap();
    let _b = manager.allocate(3).unwrap();
    let c = manager.allocate(3).unwrap();
    manager.release(a).unwrap();
    manager.release(c).unwrap();

    let chain = manager.allocate(5).unwrap();
    manager.write(&chain, b"hello").unwrap();

    assert_eq!(manager.read(&chain).unwrap(), b"hello".to_vec());
    assert_eq!(&manager.buffer()[..3], b"hel");
    assert_eq!(&manager.buffer()[6..8], b"lo");
}

#[test]
fn test_short_write_leaves_stale_tail_by_default() {
    let mut manager = MemoryManager::with_capacity(MEM_SIZE);
    let block = manager.allocate(4).unwrap();
    manager.write(&block, b"abcd").unwrap();
    manager.release(block).unwrap();

    let reused = manager.allocate(MEM_SIZE).unwrap();
    manager.write(&reused, b"xy").unwrap();
    let data = manager.read(&reused).unwrap();
    assert_eq!(&data[..2], b"xy");
    assert_eq!(data.len(), MEM_SIZE);
}

#[test]
fn test_short_write_zero_fill_clears_every_segment() {
    let config = AllocatorConfig::default().with_short_write(ShortWritePolicy::ZeroFill);
    let mut manager = MemoryManager::with_config(vec![b'#'; MEM_SIZE], MEM_SIZE, config).unwrap();
    fragment_entirely(&mut manager);

    let chain = manager.allocate(4).unwrap();
    manager.write(&chain, b"ok").unwrap();
    assert_eq!(manager.read(&chain).unwrap(), b"ok\0\0".to_vec());
    assert_eq!(&manager.buffer()[4..], b"######");
}

#[test]
fn test_scrub_on_release() {
    let config = AllocatorConfig::default().with_scrub_on_release(true);
    let mut manager = MemoryManager::with_config(vec![0u8; MEM_SIZE], MEM_SIZE, config).unwrap();
    let block = manager.allocate(3).unwrap();
    manager.write(&block, b"key").unwrap();
    manager.release(block).unwrap();

    assert_eq!(manager.buffer(), &[0u8; MEM_SIZE][..]);
}

#[test]
fn test_write_longer_than_block_is_rejected() {
    let mut manager = MemoryManager::new(b"0123456789".to_vec(), MEM_SIZE).unwrap();
    fragment_entirely(&mut manager);
    let chain = manager.allocate(3).unwrap();

    let err = manager.write(&chain, b"four").unwrap_err();
    assert_eq!(
        err,
        MemoryError::CapacityExceeded {
            requested: 4,
            available: 3
        }
    );
    assert_eq!(manager.buffer(), b"0123456789");
}

#[test]
fn test_foreign_block_cannot_be_read_or_written() {
    let mut ours = MemoryManager::with_capacity(MEM_SIZE);
    let mut theirs = MemoryManager::with_capacity(MEM_SIZE);
    let block = theirs.allocate(2).unwrap();

    assert!(matches!(
        ours.read(&block),
        Err(MemoryError::ForeignBlock { start: 0, end: 2 })
    ));
    assert!(matches!(
        ours.write(&block, b"no"),
        Err(MemoryError::ForeignBlock { .. })
    ));
    assert_eq!(ours.buffer(), &[0u8; MEM_SIZE][..]);
}
